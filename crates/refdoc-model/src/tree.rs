//! Reflection tree arena
//!
//! The tree owns every reflection in a table keyed by [`ReflectionId`].
//! Containers list their children by id and each child stores its parent id,
//! so the parent/child cycle exists only as ids and never as ownership.

use crate::error::TreeError;
use crate::group::ReflectionGroup;
use crate::kind::ReflectionKind;
use crate::reflection::{DeclarationReflection, ReflectionId, TraverseProperty};
use rustc_hash::FxHashMap;
use std::ops::ControlFlow;

/// Arena owning a project's reflections
#[derive(Debug)]
pub struct ReflectionTree {
    /// All live reflections, keyed by id
    reflections: FxHashMap<ReflectionId, DeclarationReflection>,

    /// The project reflection (kind `GLOBAL`, no parent)
    root: ReflectionId,
}

impl ReflectionTree {
    /// Create a tree holding only the project root
    pub fn new(project_name: impl Into<String>) -> Self {
        let root = DeclarationReflection::new(project_name, ReflectionKind::GLOBAL, None);
        let root_id = root.id();
        let mut reflections = FxHashMap::default();
        reflections.insert(root_id, root);
        Self {
            reflections,
            root: root_id,
        }
    }

    pub fn root(&self) -> ReflectionId {
        self.root
    }

    /// Number of live reflections, root included
    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }

    pub fn contains(&self, id: ReflectionId) -> bool {
        self.reflections.contains_key(&id)
    }

    pub fn get(&self, id: ReflectionId) -> Option<&DeclarationReflection> {
        self.reflections.get(&id)
    }

    /// Mutable access to a reflection's own fields.
    ///
    /// Children, groups and the parent link are not reachable through this;
    /// use the tree operations so both sides of each link stay consistent.
    pub fn get_mut(&mut self, id: ReflectionId) -> Option<&mut DeclarationReflection> {
        self.reflections.get_mut(&id)
    }

    pub(crate) fn node(&self, id: ReflectionId) -> Result<&DeclarationReflection, TreeError> {
        self.reflections.get(&id).ok_or(TreeError::UnknownReflection(id))
    }

    /// Create a reflection and attach it as the last child of `parent`
    pub fn add_child(
        &mut self,
        parent: ReflectionId,
        name: impl Into<String>,
        kind: ReflectionKind,
    ) -> Result<ReflectionId, TreeError> {
        let owner = self
            .reflections
            .get_mut(&parent)
            .ok_or(TreeError::UnknownReflection(parent))?;
        let child = DeclarationReflection::new(name, kind, Some(parent));
        let id = child.id();
        owner.children.push(id);
        self.reflections.insert(id, child);
        Ok(id)
    }

    /// Direct children of `id`, in insertion order
    pub fn children(&self, id: ReflectionId) -> Result<&[ReflectionId], TreeError> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: ReflectionId) -> Result<Option<ReflectionId>, TreeError> {
        Ok(self.node(id)?.parent())
    }

    /// Parent chain of `id`, nearest first, ending at the root
    pub fn ancestors(&self, id: ReflectionId) -> Result<Vec<ReflectionId>, TreeError> {
        let mut chain = Vec::new();
        let mut current = self.node(id)?.parent();
        while let Some(parent) = current {
            chain.push(parent);
            current = self.node(parent)?.parent();
        }
        Ok(chain)
    }

    /// Dotted path of names below the project root, e.g. `"ui.Widget.render"`
    pub fn full_name(&self, id: ReflectionId) -> Result<String, TreeError> {
        let node = self.node(id)?;
        let mut names = vec![node.name.as_str()];
        for ancestor in self.ancestors(id)? {
            if ancestor == self.root {
                break;
            }
            names.push(self.node(ancestor)?.name.as_str());
        }
        names.reverse();
        Ok(names.join("."))
    }

    /// Direct children of `id` whose kind is any of `kind`, in insertion order.
    ///
    /// Grandchildren are not searched.
    pub fn children_by_kind(
        &self,
        id: ReflectionId,
        kind: ReflectionKind,
    ) -> Result<Vec<&DeclarationReflection>, TreeError> {
        let node = self.node(id)?;
        let mut values = Vec::new();
        for child in &node.children {
            let child = self.node(*child)?;
            if child.kind_of(kind) {
                values.push(child);
            }
        }
        Ok(values)
    }

    /// Visit each direct child of `id` once, in order, tagged with its role.
    ///
    /// The visitor returns `ControlFlow::Break` to stop; the break is passed
    /// back to the caller.
    pub fn traverse<F>(&self, id: ReflectionId, mut visitor: F) -> Result<ControlFlow<()>, TreeError>
    where
        F: FnMut(&DeclarationReflection, TraverseProperty) -> ControlFlow<()>,
    {
        let node = self.node(id)?;
        for child in &node.children {
            let child = self.node(*child)?;
            if visitor(child, TraverseProperty::Children).is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Depth-first, pre-order walk over every descendant of `id`
    pub fn walk<F>(&self, id: ReflectionId, mut visitor: F) -> Result<ControlFlow<()>, TreeError>
    where
        F: FnMut(&DeclarationReflection, TraverseProperty) -> ControlFlow<()>,
    {
        self.walk_inner(id, &mut visitor)
    }

    fn walk_inner<F>(&self, id: ReflectionId, visitor: &mut F) -> Result<ControlFlow<()>, TreeError>
    where
        F: FnMut(&DeclarationReflection, TraverseProperty) -> ControlFlow<()>,
    {
        let node = self.node(id)?;
        for child in &node.children {
            let child = self.node(*child)?;
            if visitor(child, TraverseProperty::Children).is_break() {
                return Ok(ControlFlow::Break(()));
            }
            if self.walk_inner(child.id(), visitor)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Detach `id` from its parent and destroy it with all its descendants
    pub fn remove(&mut self, id: ReflectionId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::CannotRemoveRoot(id));
        }
        let parent = self.node(id)?.parent();

        if let Some(parent) = parent.and_then(|p| self.reflections.get_mut(&p)) {
            parent.children.retain(|child| *child != id);
            for group in &mut parent.groups {
                group.children.retain(|child| *child != id);
            }
            parent.groups.retain(|group| !group.children.is_empty());
        }

        let mut pending = vec![id];
        let mut removed = 0usize;
        while let Some(next) = pending.pop() {
            if let Some(reflection) = self.reflections.remove(&next) {
                pending.extend(reflection.children);
                removed += 1;
            }
        }
        tracing::debug!(reflection = %id, removed, "removed reflection subtree");
        Ok(())
    }

    /// Recompute the groups of one container from its current children
    pub fn group_children(&mut self, id: ReflectionId) -> Result<(), TreeError> {
        let node = self.node(id)?;
        let children = node
            .children
            .iter()
            .map(|child| self.node(*child))
            .collect::<Result<Vec<_>, _>>()?;
        let groups = ReflectionGroup::build(children);
        if let Some(node) = self.reflections.get_mut(&id) {
            node.groups = groups;
        }
        Ok(())
    }

    /// Recompute groups for every container reachable from the root
    pub fn group_all(&mut self) -> Result<(), TreeError> {
        let mut containers = vec![self.root];
        let _ = self.walk(self.root, |child, _| {
            containers.push(child.id());
            ControlFlow::Continue(())
        })?;
        for id in &containers {
            self.group_children(*id)?;
        }
        tracing::debug!(containers = containers.len(), "grouped reflection tree");
        Ok(())
    }

    /// Check the parent/child and group containment invariants of every
    /// reflection in the tree
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut ids: Vec<_> = self.reflections.keys().copied().collect();
        ids.sort();

        for id in ids {
            let node = self.node(id)?;

            if let Some(parent) = node.parent() {
                let owner = self
                    .reflections
                    .get(&parent)
                    .ok_or(TreeError::UnknownReflection(parent))?;
                if !owner.children.contains(&id) {
                    return Err(TreeError::OrphanedChild { child: id, parent });
                }
            }

            for child in &node.children {
                let actual = self.node(*child)?.parent();
                if actual != Some(id) {
                    return Err(TreeError::ParentMismatch {
                        container: id,
                        child: *child,
                        actual,
                    });
                }
            }

            check_group_containment(node)?;
        }
        Ok(())
    }
}

/// Every group member must also be a child of the container
pub(crate) fn check_group_containment(node: &DeclarationReflection) -> Result<(), TreeError> {
    for group in &node.groups {
        if let Some(member) = group
            .children
            .iter()
            .find(|member| !node.children.contains(member))
        {
            return Err(TreeError::DanglingGroupMember {
                container: node.id(),
                group: group.title.clone(),
                member: *member,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ReflectionTree, ReflectionId, ReflectionId, ReflectionId) {
        let mut tree = ReflectionTree::new("project");
        let module = tree
            .add_child(tree.root(), "ui", ReflectionKind::MODULE)
            .unwrap();
        let class = tree.add_child(module, "Widget", ReflectionKind::CLASS).unwrap();
        let method = tree.add_child(class, "render", ReflectionKind::METHOD).unwrap();
        (tree, module, class, method)
    }

    #[test]
    fn test_add_child_links_both_sides() {
        let (tree, module, class, _) = sample();
        assert_eq!(tree.children(module).unwrap(), &[class]);
        assert_eq!(tree.parent(class).unwrap(), Some(module));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let (mut tree, _, class, _) = sample();
        tree.remove(class).unwrap();
        let result = tree.add_child(class, "orphan", ReflectionKind::PROPERTY);
        assert_eq!(result, Err(TreeError::UnknownReflection(class)));
    }

    #[test]
    fn test_full_name_skips_root() {
        let (tree, module, _, method) = sample();
        assert_eq!(tree.full_name(method).unwrap(), "ui.Widget.render");
        assert_eq!(tree.full_name(module).unwrap(), "ui");
        assert_eq!(tree.full_name(tree.root()).unwrap(), "project");
    }

    #[test]
    fn test_ancestors() {
        let (tree, module, class, method) = sample();
        assert_eq!(tree.ancestors(method).unwrap(), vec![class, module, tree.root()]);
        assert!(tree.ancestors(tree.root()).unwrap().is_empty());
    }

    #[test]
    fn test_remove_detaches_and_destroys_subtree() {
        let (mut tree, module, class, method) = sample();
        tree.group_all().unwrap();
        assert_eq!(tree.len(), 4);

        tree.remove(class).unwrap();
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(class));
        assert!(!tree.contains(method));
        assert!(tree.children(module).unwrap().is_empty());
        assert!(tree.get(module).unwrap().groups().is_empty());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_root_fails() {
        let (mut tree, ..) = sample();
        let root = tree.root();
        assert_eq!(tree.remove(root), Err(TreeError::CannotRemoveRoot(root)));
    }

    #[test]
    fn test_walk_is_preorder() {
        let (mut tree, module, class, method) = sample();
        let helper = tree.add_child(module, "helper", ReflectionKind::FUNCTION).unwrap();

        let mut seen = Vec::new();
        let flow = tree
            .walk(tree.root(), |r, _| {
                seen.push(r.id());
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(seen, vec![module, class, method, helper]);
    }

    #[test]
    fn test_walk_stops_on_break() {
        let (mut tree, module, class, _) = sample();
        tree.add_child(module, "helper", ReflectionKind::FUNCTION).unwrap();

        let mut seen = Vec::new();
        let flow = tree
            .walk(tree.root(), |r, _| {
                seen.push(r.id());
                if r.id() == class {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert!(flow.is_break());
        assert_eq!(seen, vec![module, class]);
    }

    #[test]
    fn test_validate_detects_dangling_group_member() {
        let (mut tree, module, _, method) = sample();
        tree.group_all().unwrap();
        // Point a group of the module at a grandchild.
        tree.reflections.get_mut(&module).unwrap().groups[0].children.push(method);

        assert_eq!(
            tree.validate(),
            Err(TreeError::DanglingGroupMember {
                container: module,
                group: "Classes".to_string(),
                member: method,
            })
        );
    }

    #[test]
    fn test_validate_detects_parent_mismatch() {
        let (mut tree, module, _, method) = sample();
        tree.reflections.get_mut(&module).unwrap().children.push(method);

        assert!(matches!(
            tree.validate(),
            Err(TreeError::ParentMismatch { container, child, .. }) if container == module && child == method
        ));
    }
}
