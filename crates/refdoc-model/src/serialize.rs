//! Plain data snapshot of a reflection tree
//!
//! [`ReflectionObject`] has no parent field, and [`ReflectionTree::to_object`]
//! only descends through `children`, so a snapshot is always a finite tree
//! even though reflections point back at their parents.

use crate::error::TreeError;
use crate::group::ReflectionGroup;
use crate::reflection::{Comment, DeclarationReflection, ReflectionId, SourceReference};
use crate::tree::{check_group_containment, ReflectionTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized form of one reflection and its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReflectionObject {
    pub id: ReflectionId,
    pub name: String,

    /// Kind bits
    pub kind: u32,

    /// Singular kind title
    pub kind_string: String,

    /// Set flags only, keyed `isPrivate`, `isStatic`, ...
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReflectionObject>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupObject>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
}

/// Serialized form of a group; members are ids of sibling objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupObject {
    pub title: String,
    pub kind: u32,
    pub children: Vec<ReflectionId>,
}

impl From<&ReflectionGroup> for GroupObject {
    fn from(group: &ReflectionGroup) -> Self {
        GroupObject {
            title: group.title.clone(),
            kind: group.kind.bits(),
            children: group.children.clone(),
        }
    }
}

impl ReflectionObject {
    /// Copy the fields of a single reflection, without children
    fn from_reflection(reflection: &DeclarationReflection) -> Self {
        ReflectionObject {
            id: reflection.id(),
            name: reflection.name.clone(),
            kind: reflection.kind.bits(),
            kind_string: reflection.kind.singular().to_string(),
            flags: reflection
                .flags
                .keys()
                .map(|key| (key.to_string(), true))
                .collect(),
            comment: reflection.comment.clone(),
            children: Vec::new(),
            groups: reflection.groups().iter().map(GroupObject::from).collect(),
            sources: reflection.sources.clone(),
        }
    }

    /// Depth of the snapshot; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ReflectionObject::depth).max().unwrap_or(0)
    }

    /// Find a descendant (or self) by id
    pub fn find(&self, id: ReflectionId) -> Option<&ReflectionObject> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

impl ReflectionTree {
    /// Snapshot `id` and its subtree.
    ///
    /// Fails if any container in the subtree has a group member that is not
    /// one of its children.
    pub fn to_object(&self, id: ReflectionId) -> Result<ReflectionObject, TreeError> {
        let reflection = self.node(id)?;
        check_group_containment(reflection)?;

        let mut object = ReflectionObject::from_reflection(reflection);
        for child in reflection.children() {
            object.children.push(self.to_object(*child)?);
        }
        Ok(object)
    }

    /// Snapshot of the whole project
    pub fn project_object(&self) -> Result<ReflectionObject, TreeError> {
        self.to_object(self.root())
    }
}
