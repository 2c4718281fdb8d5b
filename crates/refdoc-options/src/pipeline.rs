//! Discovery pipeline
//!
//! Runs the registered readers over one [`DiscoverEvent`] in ascending
//! priority and seals the merged result into a [`Configuration`].

use crate::config::{Configuration, Strictness};
use crate::event::{DiscoverContext, DiscoverEvent, DiscoverScope};
use crate::readers::{ArgumentsReader, OptionsFileReader, OptionsReader, TsConfigReader};
use crate::registry::OptionRegistry;
use std::fmt;
use std::path::PathBuf;

/// A reader and the policy it runs under
pub struct ReaderDescriptor {
    pub name: String,
    /// Lower runs first
    pub priority: i32,
    /// May replace values set by readers that ran earlier
    pub overrides: bool,
    pub reader: Box<dyn OptionsReader>,
}

impl ReaderDescriptor {
    pub fn new(priority: i32, reader: impl OptionsReader + 'static) -> Self {
        Self {
            name: reader.name().to_string(),
            priority,
            overrides: false,
            reader: Box::new(reader),
        }
    }

    pub fn overriding(priority: i32, reader: impl OptionsReader + 'static) -> Self {
        Self {
            overrides: true,
            ..Self::new(priority, reader)
        }
    }
}

impl fmt::Debug for ReaderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderDescriptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("overrides", &self.overrides)
            .finish()
    }
}

/// Builder for [`DiscoveryPipeline`]
#[derive(Debug, Default)]
pub struct DiscoveryPipelineBuilder {
    registry: Option<OptionRegistry>,
    cwd: Option<PathBuf>,
    is_cli: bool,
    strictness: Strictness,
    readers: Vec<ReaderDescriptor>,
}

impl DiscoveryPipelineBuilder {
    /// Use `registry` instead of [`OptionRegistry::with_defaults`]
    pub fn registry(mut self, registry: OptionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Directory relative paths are resolved against; defaults to the
    /// process working directory
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Enable searching for default configuration files
    pub fn cli(mut self, is_cli: bool) -> Self {
        self.is_cli = is_cli;
        self
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn reader(mut self, descriptor: ReaderDescriptor) -> Self {
        self.readers.push(descriptor);
        self
    }

    /// Register the arguments, options file and tsconfig readers
    pub fn with_default_readers<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reader(ReaderDescriptor::overriding(
            ArgumentsReader::PRIORITY,
            ArgumentsReader::new(args),
        ))
        .reader(ReaderDescriptor::new(
            OptionsFileReader::PRIORITY,
            OptionsFileReader,
        ))
        .reader(ReaderDescriptor::new(TsConfigReader::PRIORITY, TsConfigReader))
    }

    pub fn build(self) -> DiscoveryPipeline {
        let mut readers = self.readers;
        // Stable: equal priorities keep registration order.
        readers.sort_by_key(|descriptor| descriptor.priority);

        let cwd = self
            .cwd
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        DiscoveryPipeline {
            registry: self.registry.unwrap_or_else(OptionRegistry::with_defaults),
            context: DiscoverContext::new(cwd, self.is_cli),
            strictness: self.strictness,
            readers,
        }
    }
}

/// Resolves a [`Configuration`] from an ordered set of readers
#[derive(Debug)]
pub struct DiscoveryPipeline {
    registry: OptionRegistry,
    context: DiscoverContext,
    strictness: Strictness,
    readers: Vec<ReaderDescriptor>,
}

impl DiscoveryPipeline {
    pub fn builder() -> DiscoveryPipelineBuilder {
        DiscoveryPipelineBuilder::default()
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    pub fn context(&self) -> &DiscoverContext {
        &self.context
    }

    /// Readers in the order they run
    pub fn readers(&self) -> &[ReaderDescriptor] {
        &self.readers
    }

    /// Run every reader and seal the result.
    ///
    /// Problems with configuration sources never abort the run; they are
    /// collected on the returned configuration.
    pub fn run(&self) -> Configuration {
        let mut event = DiscoverEvent::new();
        tracing::debug!(readers = self.readers.len(), "discovering options");

        for descriptor in &self.readers {
            tracing::debug!(
                reader = %descriptor.name,
                priority = descriptor.priority,
                overrides = descriptor.overrides,
                "running reader"
            );
            let mut scope = DiscoverScope::new(
                &mut event,
                &self.registry,
                &self.context,
                &descriptor.name,
                descriptor.overrides,
            );
            descriptor.reader.read(&mut scope);
        }

        tracing::debug!(
            options = event.entries().count(),
            errors = event.errors().len(),
            "validating options"
        );
        let config = Configuration::seal(event, &self.registry, self.strictness, &self.context.cwd);

        tracing::info!(
            options = config.len(),
            input_files = config.input_files().len(),
            errors = config.errors().len(),
            warnings = config.warnings().len(),
            "configuration sealed"
        );
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Writes a fixed value and records when it ran
    struct Recording {
        name: &'static str,
        value: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl OptionsReader for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn read(&self, scope: &mut DiscoverScope<'_>) {
            self.log.lock().unwrap().push(self.name);
            scope.set("name", json!(self.value));
        }
    }

    fn recording(
        name: &'static str,
        value: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Recording {
        Recording {
            name,
            value,
            log: Arc::clone(log),
        }
    }

    #[test]
    fn test_readers_run_in_priority_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = DiscoveryPipeline::builder()
            .cwd("/work")
            .reader(ReaderDescriptor::new(200, recording("late", "c", &log)))
            .reader(ReaderDescriptor::new(100, recording("tie-a", "a", &log)))
            .reader(ReaderDescriptor::new(100, recording("tie-b", "b", &log)))
            .reader(ReaderDescriptor::new(0, recording("early", "e", &log)))
            .build();

        let names: Vec<_> = pipeline.readers().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["early", "tie-a", "tie-b", "late"]);

        let config = pipeline.run();
        assert_eq!(*log.lock().unwrap(), vec!["early", "tie-a", "tie-b", "late"]);
        // First non-overriding writer wins.
        assert_eq!(config.get_str("name"), Some("e"));
        assert_eq!(config.source_of("name"), Some("early"));
    }

    #[test]
    fn test_overriding_reader_wins_regardless_of_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let config = DiscoveryPipeline::builder()
            .cwd("/work")
            .reader(ReaderDescriptor::new(0, recording("file", "from-file", &log)))
            .reader(ReaderDescriptor::overriding(10, recording("cli", "from-cli", &log)))
            .build()
            .run();

        assert_eq!(config.get_str("name"), Some("from-cli"));
    }

    #[test]
    fn test_default_readers_order() {
        let pipeline = DiscoveryPipeline::builder()
            .cwd("/work")
            .with_default_readers(Vec::<String>::new())
            .build();

        let summary: Vec<_> = pipeline
            .readers()
            .iter()
            .map(|d| (d.name.as_str(), d.priority, d.overrides))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("arguments", 0, true),
                ("options", 100, false),
                ("tsconfig", 200, false),
            ]
        );
    }

    #[test]
    fn test_run_without_readers_yields_defaults() {
        let config = DiscoveryPipeline::builder().cwd("/work").build().run();
        assert!(!config.has_errors());
        assert!(config.input_files().is_empty());
        assert_eq!(config.get_str("target"), Some("es5"));
    }
}
