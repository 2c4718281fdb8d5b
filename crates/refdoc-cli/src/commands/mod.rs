//! Subcommand implementations

pub mod config;
pub mod json;

use crate::output::StyledOutput;
use anyhow::Context;
use refdoc_options::{Configuration, DiscoveryPipeline, Strictness};
use termcolor::ColorChoice;

/// Settings shared by every subcommand
pub struct Settings {
    pub strict: bool,
    pub color: ColorChoice,
}

impl Settings {
    pub fn strictness(&self) -> Strictness {
        if self.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }
}

/// Resolve the configuration for `args` from the current directory
pub fn discover(settings: &Settings, args: Vec<String>) -> anyhow::Result<Configuration> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let config = DiscoveryPipeline::builder()
        .cwd(cwd)
        .cli(true)
        .strictness(settings.strictness())
        .with_default_readers(args)
        .build()
        .run();
    Ok(config)
}

/// Print warnings and errors of a configuration to stderr
pub fn report(out: &mut StyledOutput, config: &Configuration) {
    for warning in config.warnings() {
        out.warning(warning);
    }
    for error in config.errors() {
        out.error(error);
    }
}
