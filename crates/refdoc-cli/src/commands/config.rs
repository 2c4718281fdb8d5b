//! `refdoc config`: print the resolved configuration.

use super::{discover, report, Settings};
use crate::output::StyledOutput;

/// Returns `false` when the configuration has errors
pub fn execute(settings: &Settings, args: Vec<String>) -> anyhow::Result<bool> {
    let config = discover(settings, args)?;
    let mut out = StyledOutput::new(settings.color);

    out.println(&serde_json::to_string_pretty(&config)?);
    report(&mut out, &config);
    out.flush();

    Ok(!config.has_errors())
}
