//! Presentation groups
//!
//! A group buckets sibling reflections of one kind under a title. Groups hold
//! ids into their container's children and are rebuilt from those children
//! on every grouping pass.

use crate::kind::ReflectionKind;
use crate::reflection::{DeclarationReflection, ReflectionId};

/// A titled bucket of sibling reflections sharing a kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionGroup {
    /// Heading, the plural kind title ("Classes", "Methods", ...)
    pub title: String,

    pub kind: ReflectionKind,

    /// Members, referenced by id
    pub children: Vec<ReflectionId>,

    pub all_children_are_private: bool,
    pub all_children_are_protected: bool,
    pub all_children_are_external: bool,
    pub some_children_are_exported: bool,
}

impl ReflectionGroup {
    pub fn new(title: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            title: title.into(),
            kind,
            children: Vec::new(),
            all_children_are_private: false,
            all_children_are_protected: false,
            all_children_are_external: false,
            some_children_are_exported: false,
        }
    }

    pub fn contains(&self, id: ReflectionId) -> bool {
        self.children.contains(&id)
    }

    /// Build the groups for a list of siblings.
    ///
    /// One group per distinct kind, ordered by [`ReflectionKind::weight`].
    /// Members are sorted by name, ignoring case; equal names keep their
    /// insertion order.
    pub fn build<'a, I>(children: I) -> Vec<ReflectionGroup>
    where
        I: IntoIterator<Item = &'a DeclarationReflection>,
    {
        let mut buckets: Vec<(ReflectionGroup, Vec<&DeclarationReflection>)> = Vec::new();

        for child in children {
            match buckets.iter_mut().find(|(group, _)| group.kind == child.kind) {
                Some((_, members)) => members.push(child),
                None => {
                    let group = ReflectionGroup::new(child.kind.plural(), child.kind);
                    buckets.push((group, vec![child]));
                }
            }
        }

        buckets.sort_by_key(|(group, _)| group.kind.weight());

        buckets
            .into_iter()
            .map(|(mut group, mut members)| {
                members.sort_by_cached_key(|m| m.name.to_lowercase());
                group.all_children_are_private = members.iter().all(|m| m.is_private());
                group.all_children_are_protected = members.iter().all(|m| m.is_protected());
                group.all_children_are_external = members.iter().all(|m| m.is_external());
                group.some_children_are_exported = members.iter().any(|m| m.is_exported());
                group.children = members.iter().map(|m| m.id()).collect();
                group
            })
            .collect()
    }
}
