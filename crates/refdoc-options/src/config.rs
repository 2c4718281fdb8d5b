//! Sealed configuration
//!
//! The result of a discovery run. Values are typed, every key is a declared
//! option, and nothing can change it after it is handed out.

use crate::event::DiscoverEvent;
use crate::registry::OptionRegistry;
use crate::value::OptionValue;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Source name recorded for values filled from declared defaults
pub const DEFAULT_SOURCE: &str = "default";

/// How undeclared option names are treated during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Drop the key and record a warning
    #[default]
    Lenient,
    /// Drop the key and record an error
    Strict,
}

/// Validated, read-only configuration of a documentation run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    options: IndexMap<String, OptionValue>,
    #[serde(skip)]
    sources: IndexMap<String, String>,
    input_files: Vec<PathBuf>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Configuration {
    /// Validate a finished discover event against the registry.
    ///
    /// Unknown keys are dropped (warning or error per `strictness`), known
    /// keys are converted to their declared type, and declared defaults fill
    /// the options no reader set.
    pub(crate) fn seal(
        event: DiscoverEvent,
        registry: &OptionRegistry,
        strictness: Strictness,
        base_dir: &Path,
    ) -> Self {
        let (data, input_files, mut errors) = event.into_parts();
        let mut options = IndexMap::new();
        let mut sources = IndexMap::new();
        let mut warnings = Vec::new();

        for (key, entry) in data {
            let Some(declaration) = registry.get(&key) else {
                let message = format!("Unknown option '{}' (from {})", key, entry.source);
                match strictness {
                    Strictness::Lenient => warnings.push(message),
                    Strictness::Strict => errors.push(message),
                }
                continue;
            };

            match declaration.convert(&entry.value, base_dir) {
                Ok(value) => {
                    options.insert(declaration.name.clone(), value);
                    sources.insert(declaration.name.clone(), entry.source);
                }
                Err(message) => errors.push(format!("{} (from {})", message, entry.source)),
            }
        }

        for declaration in registry.iter() {
            if options.contains_key(&declaration.name) {
                continue;
            }
            if let Some(default) = &declaration.default_value {
                options.insert(declaration.name.clone(), default.clone());
                sources.insert(declaration.name.clone(), DEFAULT_SOURCE.to_string());
            }
        }

        Configuration {
            options,
            sources,
            input_files,
            errors,
            warnings,
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name).or_else(|| {
            self.options
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    pub fn get_number(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_number)
    }

    pub fn get_path(&self, name: &str) -> Option<&Path> {
        self.get(name).and_then(OptionValue::as_path)
    }

    pub fn get_array(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(OptionValue::as_array)
    }

    /// Name of the reader that supplied `name`, or `"default"`
    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
