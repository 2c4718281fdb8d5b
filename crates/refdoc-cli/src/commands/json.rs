//! `refdoc json`: build a reflection tree and serialize it.

use super::{discover, report, Settings};
use crate::output::StyledOutput;
use anyhow::Context;
use refdoc_model::{DeclarationRecord, ReflectionFlags, ReflectionTree};
use refdoc_options::Configuration;
use std::fs;
use std::ops::ControlFlow;
use std::path::Path;

const DEFAULT_PROJECT_NAME: &str = "project";

/// Returns `false` when the configuration has errors; nothing is written then
pub fn execute(settings: &Settings, declarations: &Path, args: Vec<String>) -> anyhow::Result<bool> {
    let config = discover(settings, args)?;
    let mut out = StyledOutput::new(settings.color);
    report(&mut out, &config);

    if config.has_errors() {
        out.flush();
        return Ok(false);
    }

    let source = fs::read_to_string(declarations)
        .with_context(|| format!("Failed to read {}", declarations.display()))?;
    let records: Vec<DeclarationRecord> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid declaration records in {}", declarations.display()))?;

    let tree = build_tree(&config, &records)?;
    let json = serde_json::to_string_pretty(&tree.project_object()?)?;

    match config.get_path("json") {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            out.success(&format!("JSON written to {}", path.display()));
        }
        None => out.println(&json),
    }
    out.flush();

    Ok(true)
}

/// Build, filter and group the project tree
pub fn build_tree(config: &Configuration, records: &[DeclarationRecord]) -> anyhow::Result<ReflectionTree> {
    let name = config.get_str("name").unwrap_or(DEFAULT_PROJECT_NAME);
    let mut tree = ReflectionTree::from_records(name, records)?;

    let mut excluded = ReflectionFlags::empty();
    if config.get_bool("excludePrivate").unwrap_or(false) {
        excluded |= ReflectionFlags::PRIVATE;
    }
    if config.get_bool("excludeExternals").unwrap_or(false) {
        excluded |= ReflectionFlags::EXTERNAL;
    }

    if !excluded.is_empty() {
        let mut doomed = Vec::new();
        let _ = tree.walk(tree.root(), |reflection, _| {
            if reflection.flags.intersects(excluded) {
                doomed.push(reflection.id());
            }
            ControlFlow::Continue(())
        })?;
        for id in doomed {
            // Already gone when an ancestor was removed first.
            if tree.contains(id) {
                tree.remove(id)?;
            }
        }
        tracing::debug!(remaining = tree.len(), "filtered reflection tree");
    }

    tree.group_all()?;
    tree.validate()?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdoc_options::DiscoveryPipeline;

    fn config(args: &[&str]) -> Configuration {
        DiscoveryPipeline::builder()
            .cwd("/work")
            .with_default_readers(args.iter().copied())
            .build()
            .run()
    }

    fn records() -> Vec<DeclarationRecord> {
        vec![DeclarationRecord::new("Circle", "class")
            .with_flag("exported")
            .with_child(DeclarationRecord::new("radius", "property"))
            .with_child(DeclarationRecord::new("cache", "property").with_flag("private"))]
    }

    #[test]
    fn test_build_tree_uses_project_name() {
        let tree = build_tree(&config(&["--name", "Shapes"]), &records()).unwrap();
        assert_eq!(tree.get(tree.root()).unwrap().name, "Shapes");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_build_tree_excludes_private() {
        let tree = build_tree(&config(&["--excludePrivate"]), &records()).unwrap();
        assert_eq!(tree.get(tree.root()).unwrap().name, DEFAULT_PROJECT_NAME);
        assert_eq!(tree.len(), 3);

        let object = tree.project_object().unwrap();
        let circle = &object.children[0];
        assert_eq!(circle.children.len(), 1);
        assert_eq!(circle.groups[0].title, "Properties");
    }
}
