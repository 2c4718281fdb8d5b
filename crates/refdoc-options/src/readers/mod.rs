//! Option readers
//!
//! A reader pulls option values from one kind of source and writes them
//! through the [`DiscoverScope`] it is handed. Readers never fail: problems
//! with their source are recorded with [`DiscoverScope::add_error`].

mod arguments;
mod options_file;
mod tsconfig;

pub use arguments::ArgumentsReader;
pub use options_file::OptionsFileReader;
pub use tsconfig::TsConfigReader;

use crate::error::ConfigFileError;
use crate::event::DiscoverScope;
use std::fs;
use std::io;
use std::path::Path;

/// A source of option values
pub trait OptionsReader {
    /// Name recorded as the source of every value this reader sets
    fn name(&self) -> &str;

    fn read(&self, scope: &mut DiscoverScope<'_>);
}

/// Read a configuration file, mapping a missing file to `NotFound`
fn read_source(label: &'static str, path: &Path) -> Result<String, ConfigFileError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigFileError::NotFound {
            label,
            path: path.to_path_buf(),
        },
        _ => ConfigFileError::Unreadable {
            label,
            path: path.to_path_buf(),
            source,
        },
    })
}
