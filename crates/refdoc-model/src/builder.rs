//! Building a tree from declaration records
//!
//! The compiler front end hands over one record per documented symbol, nested
//! the way the symbols are nested in source. Records are plain JSON so any
//! front end can produce them.

use crate::error::TreeError;
use crate::kind::{ReflectionFlags, ReflectionKind};
use crate::reflection::{Comment, ReflectionId, SourceReference};
use crate::tree::ReflectionTree;
use serde::{Deserialize, Serialize};

/// One declaration as reported by the compiler front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRecord {
    pub name: String,

    /// Kind identifier, e.g. `"class"` or `"TypeAlias"`
    pub kind: String,

    /// Flag names, e.g. `["exported", "static"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,

    /// Raw documentation comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeclarationRecord>,
}

impl DeclarationRecord {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            flags: Vec::new(),
            comment: None,
            sources: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: DeclarationRecord) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }
}

impl ReflectionTree {
    /// Build a project tree from top-level declaration records
    pub fn from_records(
        project_name: impl Into<String>,
        records: &[DeclarationRecord],
    ) -> Result<Self, TreeError> {
        let mut tree = ReflectionTree::new(project_name);
        let root = tree.root();
        tree.add_records(root, records)?;
        Ok(tree)
    }

    /// Append records (and their nested children) below `parent`
    pub fn add_records(
        &mut self,
        parent: ReflectionId,
        records: &[DeclarationRecord],
    ) -> Result<Vec<ReflectionId>, TreeError> {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let kind = ReflectionKind::parse(&record.kind).ok_or_else(|| TreeError::UnknownKind {
                name: record.name.clone(),
                kind: record.kind.clone(),
            })?;

            let mut flags = ReflectionFlags::empty();
            for flag in &record.flags {
                flags |= ReflectionFlags::parse(flag).ok_or_else(|| TreeError::UnknownFlag {
                    name: record.name.clone(),
                    flag: flag.clone(),
                })?;
            }

            let id = self.add_child(parent, record.name.clone(), kind)?;
            if let Some(reflection) = self.get_mut(id) {
                reflection.flags = flags;
                reflection.comment = record.comment.as_deref().map(Comment::from_raw);
                reflection.sources = record.sources.clone();
            }
            self.add_records(id, &record.children)?;
            ids.push(id);
        }
        Ok(ids)
    }
}
