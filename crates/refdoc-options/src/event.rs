//! The discover event
//!
//! One [`DiscoverEvent`] is created per discovery run and passed through the
//! readers. Readers never touch it directly: each gets a [`DiscoverScope`]
//! bound to its descriptor, and the scope applies that reader's precedence
//! policy to every write.

use crate::declaration::ParameterType;
use crate::paths;
use crate::registry::OptionRegistry;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Environment of a discovery run
#[derive(Debug, Clone)]
pub struct DiscoverContext {
    /// Directory relative paths are resolved against
    pub cwd: PathBuf,

    /// Running as the command-line tool; enables searching for default
    /// configuration files
    pub is_cli: bool,
}

impl DiscoverContext {
    pub fn new(cwd: impl Into<PathBuf>, is_cli: bool) -> Self {
        Self {
            cwd: cwd.into(),
            is_cli,
        }
    }

    pub fn resolve(&self, value: impl AsRef<Path>) -> PathBuf {
        paths::resolve(&self.cwd, value)
    }
}

/// A raw value in the bag and the reader that put it there
#[derive(Debug, Clone, PartialEq)]
pub struct BagEntry {
    pub value: Value,
    pub source: String,
}

/// Mutable state of one discovery run
#[derive(Debug, Default)]
pub struct DiscoverEvent {
    data: IndexMap<String, BagEntry>,
    input_files: Vec<PathBuf>,
    errors: Vec<String>,
}

impl DiscoverEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).map(|entry| &entry.value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &BagEntry)> {
        self.data.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub(crate) fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub(crate) fn into_parts(self) -> (IndexMap<String, BagEntry>, Vec<PathBuf>, Vec<String>) {
        (self.data, self.input_files, self.errors)
    }
}

/// A reader's handle on the discover event
pub struct DiscoverScope<'a> {
    event: &'a mut DiscoverEvent,
    registry: &'a OptionRegistry,
    context: &'a DiscoverContext,
    source: &'a str,
    overrides: bool,
}

impl<'a> DiscoverScope<'a> {
    pub fn new(
        event: &'a mut DiscoverEvent,
        registry: &'a OptionRegistry,
        context: &'a DiscoverContext,
        source: &'a str,
        overrides: bool,
    ) -> Self {
        Self {
            event,
            registry,
            context,
            source,
            overrides,
        }
    }

    pub fn registry(&self) -> &'a OptionRegistry {
        self.registry
    }

    pub fn context(&self) -> &'a DiscoverContext {
        self.context
    }

    /// Name of the reader this scope belongs to
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Whether this reader may replace values set by earlier readers
    pub fn overrides(&self) -> bool {
        self.overrides
    }

    /// Key under which `name` is stored: the declared spelling when the
    /// option is known, otherwise `name` unchanged
    fn key_for(&self, name: &str) -> String {
        self.registry
            .canonical_name(name)
            .unwrap_or(name)
            .to_string()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.event.get(&self.key_for(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Store a value, honoring this reader's precedence.
    ///
    /// Returns `false` when an earlier reader already set the key and this
    /// reader does not override.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        let key = self.key_for(name);
        if !self.overrides {
            if let Some(existing) = self.event.data.get(&key) {
                tracing::trace!(
                    option = %key,
                    kept = %existing.source,
                    skipped = %self.source,
                    "option already set"
                );
                return false;
            }
        }
        tracing::trace!(option = %key, source = %self.source, "option set");
        self.event.data.insert(
            key,
            BagEntry {
                value,
                source: self.source.to_string(),
            },
        );
        true
    }

    /// Store a value read from a file in `base_dir`; relative values of path
    /// options are resolved against that directory first
    pub fn set_from_file(&mut self, name: &str, value: Value, base_dir: &Path) -> bool {
        let resolved = match (self.registry.get(name), value.as_str()) {
            (Some(decl), Some(s)) if decl.kind == ParameterType::Path => Some(Value::String(
                paths::resolve(base_dir, s).to_string_lossy().into_owned(),
            )),
            _ => None,
        };
        self.set(name, resolved.unwrap_or(value))
    }

    /// Record a recoverable problem with this reader's input
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(source = %self.source, "{}", message);
        self.event.push_error(message);
    }

    /// Contribute input files.
    ///
    /// A non-overriding reader only contributes when no reader has yet.
    pub fn add_input_files<I>(&mut self, files: I) -> bool
    where
        I: IntoIterator<Item = PathBuf>,
    {
        if !self.overrides && !self.event.input_files.is_empty() {
            return false;
        }
        let before = self.event.input_files.len();
        self.event.input_files.extend(files);
        self.event.input_files.len() > before
    }

    pub fn input_files(&self) -> &[PathBuf] {
        self.event.input_files()
    }
}
