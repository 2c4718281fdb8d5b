//! tsconfig reader
//!
//! Reads the project's `tsconfig.json`, following its `extends` chain. The
//! `refdocOptions` block holds tool options, `compilerOptions` holds compiler
//! options and `files` lists the input files.

use super::{read_source, OptionsReader};
use crate::declaration::ParameterType;
use crate::error::ConfigFileError;
use crate::event::DiscoverScope;
use crate::registry::OptionRegistry;
use crate::{jsonc, paths};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const LABEL: &str = "tsconfig";

pub const TSCONFIG_FILE_NAME: &str = "tsconfig.json";

/// Block holding tool options
pub const TOOL_BLOCK: &str = "refdocOptions";

/// Block holding compiler options
pub const COMPILER_BLOCK: &str = "compilerOptions";

/// Compiler options that have no meaning for documentation runs
pub const IGNORED_COMPILER_OPTIONS: [&str; 9] = [
    "out",
    "version",
    "help",
    "watch",
    "declaration",
    "mapRoot",
    "sourceMap",
    "inlineSources",
    "removeComments",
];

/// Reads options and input files from a tsconfig file
#[derive(Debug, Clone, Copy, Default)]
pub struct TsConfigReader;

impl TsConfigReader {
    pub const PRIORITY: i32 = 200;

    /// Path named by the `tsconfig` option, or in CLI mode the nearest
    /// `tsconfig.json` at or above the working directory
    fn locate(scope: &DiscoverScope<'_>) -> Option<PathBuf> {
        if let Some(value) = scope.get("tsconfig") {
            let path = scope.context().resolve(value.as_str()?);
            if path.is_dir() {
                return Some(path.join(TSCONFIG_FILE_NAME));
            }
            return Some(path);
        }
        if !scope.context().is_cli {
            return None;
        }
        paths::find_upwards(&scope.context().cwd, TSCONFIG_FILE_NAME)
    }

    /// Load a tsconfig file with its `extends` chain merged in.
    ///
    /// Relative `files` entries and relative values of path options are
    /// resolved against the directory of the file that declares them.
    pub fn load(path: &Path, registry: &OptionRegistry) -> Result<Map<String, Value>, ConfigFileError> {
        let mut chain = Vec::new();
        load_chain(path, registry, &mut chain)
    }
}

fn load_chain(
    path: &Path,
    registry: &OptionRegistry,
    chain: &mut Vec<PathBuf>,
) -> Result<Map<String, Value>, ConfigFileError> {
    let identity = path.canonicalize().unwrap_or_else(|_| paths::normalize(path));
    if chain.contains(&identity) {
        return Err(ConfigFileError::CircularExtends {
            label: LABEL,
            path: path.to_path_buf(),
        });
    }

    let text = read_source(LABEL, path)?;
    let value: Value =
        serde_json::from_str(&jsonc::strip_comments(&text)).map_err(|_| ConfigFileError::InvalidSyntax {
            label: LABEL,
            path: path.to_path_buf(),
            format: "JSON",
        })?;
    let Value::Object(mut data) = value else {
        return Err(ConfigFileError::NotAnObject {
            label: LABEL,
            path: path.to_path_buf(),
            format: "JSON",
        });
    };

    let base_dir = path.parent().unwrap_or(Path::new(""));
    resolve_relative(&mut data, path, base_dir, registry)?;

    let Some(extends) = data.remove("extends") else {
        return Ok(data);
    };
    let Value::String(extends) = extends else {
        return Err(ConfigFileError::InvalidExtends {
            label: LABEL,
            path: path.to_path_buf(),
        });
    };

    let parent_name = if extends.ends_with(".json") {
        extends
    } else {
        format!("{}.json", extends)
    };
    let parent_path = paths::resolve(base_dir, parent_name);
    tracing::debug!(child = %path.display(), parent = %parent_path.display(), "tsconfig extends");

    chain.push(identity);
    let mut merged = load_chain(&parent_path, registry, chain)?;
    chain.pop();

    for (key, value) in data {
        let is_block = key == TOOL_BLOCK || key == COMPILER_BLOCK;
        match value {
            Value::Object(child_block) if is_block => {
                let block = merged
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                match block {
                    Value::Object(parent_block) => parent_block.extend(child_block),
                    other => *other = Value::Object(child_block),
                }
            }
            value => {
                merged.insert(key, value);
            }
        }
    }
    Ok(merged)
}

/// Make `files` entries and path option values absolute
fn resolve_relative(
    data: &mut Map<String, Value>,
    path: &Path,
    base_dir: &Path,
    registry: &OptionRegistry,
) -> Result<(), ConfigFileError> {
    if let Some(Value::Array(files)) = data.get_mut("files") {
        for file in files.iter_mut() {
            let resolved = match file {
                Value::String(name) => paths::resolve(base_dir, name.as_str()),
                _ => continue,
            };
            *file = Value::String(resolved.to_string_lossy().into_owned());
        }
    }

    for block_name in [TOOL_BLOCK, COMPILER_BLOCK] {
        let Some(block) = data.get_mut(block_name) else {
            continue;
        };
        let Value::Object(block) = block else {
            return Err(ConfigFileError::InvalidBlock {
                label: LABEL,
                path: path.to_path_buf(),
                block: block_name,
            });
        };
        for (key, value) in block.iter_mut() {
            let is_path = registry
                .get(key)
                .map(|decl| decl.kind == ParameterType::Path)
                .unwrap_or(false);
            let resolved = match value {
                Value::String(raw) if is_path && !raw.trim().is_empty() => {
                    paths::resolve(base_dir, raw.trim())
                }
                _ => continue,
            };
            *value = Value::String(resolved.to_string_lossy().into_owned());
        }
    }
    Ok(())
}

impl OptionsReader for TsConfigReader {
    fn name(&self) -> &str {
        "tsconfig"
    }

    fn read(&self, scope: &mut DiscoverScope<'_>) {
        let Some(path) = Self::locate(scope) else {
            return;
        };
        tracing::debug!(path = %path.display(), "reading tsconfig");

        let mut data = match Self::load(&path, scope.registry()) {
            Ok(data) => data,
            Err(err) => {
                scope.add_error(err.to_string());
                return;
            }
        };

        if let Some(Value::Array(files)) = data.remove("files") {
            let files: Vec<PathBuf> = files
                .iter()
                .filter_map(Value::as_str)
                .map(PathBuf::from)
                .collect();
            scope.add_input_files(files);
        }

        if let Some(Value::Object(tool)) = data.remove(TOOL_BLOCK) {
            for (key, value) in tool {
                scope.set(&key, value);
            }
        }

        if let Some(Value::Object(compiler)) = data.remove(COMPILER_BLOCK) {
            for (key, value) in compiler {
                if IGNORED_COMPILER_OPTIONS.contains(&key.as_str()) {
                    continue;
                }
                // The compiler understands far more options than are declared.
                if !scope.registry().contains(&key) {
                    tracing::trace!(option = %key, "skipping undeclared compiler option");
                    continue;
                }
                scope.set(&key, value);
            }
        }
    }
}
