//! Options file reader
//!
//! Loads `refdoc.json` or `refdoc.toml`: a flat object of option values plus
//! an optional `src` entry listing the input files.

use super::{read_source, OptionsReader};
use crate::error::ConfigFileError;
use crate::event::DiscoverScope;
use crate::jsonc;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const LABEL: &str = "options";

/// File names searched in the working directory, in order
pub const DEFAULT_FILE_NAMES: [&str; 2] = ["refdoc.json", "refdoc.toml"];

/// Reads options from a JSON or TOML options file
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsFileReader;

impl OptionsFileReader {
    pub const PRIORITY: i32 = 100;

    /// Path named by the `options` option, or in CLI mode the first default
    /// file that exists in the working directory
    fn locate(scope: &DiscoverScope<'_>) -> Option<PathBuf> {
        if let Some(value) = scope.get("options") {
            return value.as_str().map(|path| scope.context().resolve(path));
        }
        if !scope.context().is_cli {
            return None;
        }
        DEFAULT_FILE_NAMES
            .iter()
            .map(|name| scope.context().cwd.join(name))
            .find(|path| path.is_file())
    }

    /// Load the file and check that it holds an object
    pub fn load(path: &Path) -> Result<Map<String, Value>, ConfigFileError> {
        let text = read_source(LABEL, path)?;
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let format = if is_toml { "TOML" } else { "JSON" };
        let invalid = || ConfigFileError::InvalidSyntax {
            label: LABEL,
            path: path.to_path_buf(),
            format,
        };

        let value = if is_toml {
            let table: toml::Value = toml::from_str(&text).map_err(|_| invalid())?;
            serde_json::to_value(table).map_err(|_| invalid())?
        } else {
            serde_json::from_str(&jsonc::strip_comments(&text)).map_err(|_| invalid())?
        };

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ConfigFileError::NotAnObject {
                label: LABEL,
                path: path.to_path_buf(),
                format,
            }),
        }
    }
}

impl OptionsReader for OptionsFileReader {
    fn name(&self) -> &str {
        "options"
    }

    fn read(&self, scope: &mut DiscoverScope<'_>) {
        let Some(path) = Self::locate(scope) else {
            return;
        };
        tracing::debug!(path = %path.display(), "reading options file");

        let mut data = match Self::load(&path) {
            Ok(data) => data,
            Err(err) => {
                scope.add_error(err.to_string());
                return;
            }
        };
        let base_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();

        // An options file cannot point at another options file.
        data.remove("options");

        if let Some(src) = data.remove("src") {
            let files: Vec<PathBuf> = match &src {
                Value::String(file) => vec![crate::paths::resolve(&base_dir, file)],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|file| crate::paths::resolve(&base_dir, file))
                    .collect(),
                _ => {
                    let err = ConfigFileError::InvalidSourceList {
                        label: LABEL,
                        path: path.clone(),
                    };
                    scope.add_error(err.to_string());
                    Vec::new()
                }
            };
            scope.add_input_files(files);
        }

        for (key, value) in data {
            scope.set_from_file(&key, value, &base_dir);
        }
    }
}
