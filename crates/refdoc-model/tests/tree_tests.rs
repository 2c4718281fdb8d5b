//! Integration tests for the reflection tree
//!
//! Exercises lookup, traversal, grouping and serialization on realistic
//! project shapes.

use refdoc_model::{
    DeclarationRecord, ReflectionId, ReflectionKind, ReflectionObject, ReflectionTree,
    TraverseProperty,
};
use std::ops::ControlFlow;

fn library_records() -> Vec<DeclarationRecord> {
    vec![
        DeclarationRecord::new("shapes", "module")
            .with_child(
                DeclarationRecord::new("Circle", "class")
                    .with_flag("exported")
                    .with_child(DeclarationRecord::new("constructor", "constructor"))
                    .with_child(DeclarationRecord::new("radius", "property"))
                    .with_child(DeclarationRecord::new("area", "method"))
                    .with_child(DeclarationRecord::new("diameter", "accessor")),
            )
            .with_child(DeclarationRecord::new("Shape", "interface").with_flag("exported"))
            .with_child(DeclarationRecord::new("unitCircle", "function"))
            .with_child(DeclarationRecord::new("PI", "variable").with_flag("const")),
        DeclarationRecord::new("Color", "enum")
            .with_child(DeclarationRecord::new("Red", "enum_member"))
            .with_child(DeclarationRecord::new("Green", "enum_member")),
    ]
}

fn library() -> ReflectionTree {
    ReflectionTree::from_records("shapes-lib", &library_records()).unwrap()
}

fn child_named(tree: &ReflectionTree, parent: ReflectionId, name: &str) -> ReflectionId {
    tree.children(parent)
        .unwrap()
        .iter()
        .copied()
        .find(|id| tree.get(*id).unwrap().name == name)
        .unwrap()
}

fn assert_no_parent_key(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            assert!(!map.contains_key("parent"));
            for inner in map.values() {
                assert_no_parent_key(inner);
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(assert_no_parent_key),
        _ => {}
    }
}

#[test]
fn test_traverse_visits_every_child_in_order() {
    let tree = library();
    let shapes = child_named(&tree, tree.root(), "shapes");

    let mut visited = Vec::new();
    let flow = tree
        .traverse(shapes, |child, property| {
            assert_eq!(property, TraverseProperty::Children);
            visited.push(child.id());
            ControlFlow::Continue(())
        })
        .unwrap();

    assert!(flow.is_continue());
    assert_eq!(visited, tree.children(shapes).unwrap());
    assert_eq!(visited.len(), 4);
}

#[test]
fn test_traverse_early_termination() {
    let tree = library();
    let shapes = child_named(&tree, tree.root(), "shapes");

    let mut count = 0;
    let flow = tree
        .traverse(shapes, |_, _| {
            count += 1;
            if count == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

    assert!(flow.is_break());
    assert_eq!(count, 2);
}

#[test]
fn test_traverse_is_not_recursive() {
    let tree = library();
    let mut names = Vec::new();
    let flow = tree
        .traverse(tree.root(), |child, _| {
            names.push(child.name.clone());
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(flow, ControlFlow::Continue(()));
    assert_eq!(names, vec!["shapes", "Color"]);
}

#[test]
fn test_traverse_leaf_visits_nothing() {
    let tree = library();
    let color = child_named(&tree, tree.root(), "Color");
    let red = child_named(&tree, color, "Red");

    let mut calls = 0;
    let flow = tree
        .traverse(red, |_, _| {
            calls += 1;
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(flow, ControlFlow::Continue(()));
    assert_eq!(calls, 0);
}

#[test]
fn test_children_by_kind_is_ordered_subsequence() {
    let tree = library();
    let shapes = child_named(&tree, tree.root(), "shapes");

    let kinds = [
        ReflectionKind::CLASS_OR_INTERFACE,
        ReflectionKind::FUNCTION_OR_METHOD,
        ReflectionKind::VARIABLE_OR_PROPERTY,
        ReflectionKind::ENUM,
    ];
    for kind in kinds {
        let expected: Vec<ReflectionId> = tree
            .children(shapes)
            .unwrap()
            .iter()
            .copied()
            .filter(|id| tree.get(*id).unwrap().kind_of(kind))
            .collect();
        let actual: Vec<ReflectionId> = tree
            .children_by_kind(shapes, kind)
            .unwrap()
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(actual, expected);
    }

    let classes: Vec<_> = tree
        .children_by_kind(shapes, ReflectionKind::CLASS_OR_INTERFACE)
        .unwrap()
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(classes, vec!["Circle", "Shape"]);
}

#[test]
fn test_children_by_kind_no_matches_and_no_recursion() {
    let tree = library();
    let shapes = child_named(&tree, tree.root(), "shapes");

    // Methods live on Circle, not directly on the module.
    assert!(tree
        .children_by_kind(shapes, ReflectionKind::METHOD)
        .unwrap()
        .is_empty());

    let color = child_named(&tree, tree.root(), "Color");
    let red = child_named(&tree, color, "Red");
    assert!(tree
        .children_by_kind(red, ReflectionKind::ENUM_MEMBER)
        .unwrap()
        .is_empty());
}

#[test]
fn test_grouping_is_contained_in_children() {
    let mut tree = library();
    tree.group_all().unwrap();
    tree.validate().unwrap();

    let mut containers = vec![tree.root()];
    let flow = tree
        .walk(tree.root(), |r, _| {
            containers.push(r.id());
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(flow, ControlFlow::Continue(()));

    for id in containers {
        let reflection = tree.get(id).unwrap();
        for group in reflection.groups() {
            for member in &group.children {
                assert!(reflection.children().contains(member));
            }
        }
        let grouped: usize = reflection.groups().iter().map(|g| g.children.len()).sum();
        assert_eq!(grouped, reflection.children().len());
    }
}

#[test]
fn test_group_titles_follow_kind_order() {
    let mut tree = library();
    tree.group_all().unwrap();

    let shapes = child_named(&tree, tree.root(), "shapes");
    let circle = child_named(&tree, shapes, "Circle");
    let titles: Vec<_> = tree
        .get(circle)
        .unwrap()
        .groups()
        .iter()
        .map(|g| g.title.clone())
        .collect();
    assert_eq!(titles, vec!["Constructors", "Properties", "Accessors", "Methods"]);

    let root_titles: Vec<_> = tree
        .get(tree.root())
        .unwrap()
        .groups()
        .iter()
        .map(|g| g.title.clone())
        .collect();
    assert_eq!(root_titles, vec!["Modules", "Enumerations"]);
}

#[test]
fn test_serialization_has_no_parent_and_bounded_depth() {
    let mut tree = library();
    tree.group_all().unwrap();

    let object = tree.project_object().unwrap();
    // root -> shapes -> Circle -> members
    assert_eq!(object.depth(), 4);

    let json = serde_json::to_value(&object).unwrap();
    assert_no_parent_key(&json);
}

#[test]
fn test_serialization_is_idempotent() {
    let mut tree = library();
    tree.group_all().unwrap();

    let first = serde_json::to_string(&tree.project_object().unwrap()).unwrap();
    let second = serde_json::to_string(&tree.project_object().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_serialized_output_reads_back() {
    let mut tree = library();
    tree.group_all().unwrap();
    let object = tree.project_object().unwrap();

    let json = serde_json::to_string_pretty(&object).unwrap();
    let parsed: ReflectionObject = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, object);

    let shapes = child_named(&tree, tree.root(), "shapes");
    let found = parsed.find(shapes).unwrap();
    assert_eq!(found.name, "shapes");
    assert_eq!(found.groups.len(), 4);
}

#[test]
fn test_serialized_groups_reference_child_ids() {
    let mut tree = library();
    tree.group_all().unwrap();
    let object = tree.project_object().unwrap();

    let color = object.children.iter().find(|c| c.name == "Color").unwrap();
    assert_eq!(color.groups.len(), 1);
    assert_eq!(color.groups[0].title, "Enumeration members");
    assert_eq!(color.groups[0].kind, ReflectionKind::ENUM_MEMBER.bits());
    // Members are ordered by name, children by declaration.
    let red = color.children.iter().find(|c| c.name == "Red").unwrap();
    let green = color.children.iter().find(|c| c.name == "Green").unwrap();
    assert_eq!(color.children[0].id, red.id);
    assert_eq!(color.groups[0].children, vec![green.id, red.id]);
}

#[test]
fn test_regrouping_after_removal() {
    let mut tree = library();
    tree.group_all().unwrap();

    let shapes = child_named(&tree, tree.root(), "shapes");
    let circle = child_named(&tree, shapes, "Circle");
    tree.remove(circle).unwrap();
    tree.group_children(shapes).unwrap();

    let titles: Vec<_> = tree
        .get(shapes)
        .unwrap()
        .groups()
        .iter()
        .map(|g| g.title.clone())
        .collect();
    assert_eq!(titles, vec!["Interfaces", "Variables", "Functions"]);
    tree.validate().unwrap();
    assert_eq!(tree.len(), 8);
}
