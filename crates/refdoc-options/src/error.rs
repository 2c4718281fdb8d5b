//! Option errors
//!
//! [`OptionsError`] covers misuse of the registry and is returned to the
//! caller. [`ConfigFileError`] describes a bad configuration source; readers
//! record it as a message on the discover event and carry on.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while declaring options
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// Two declarations share a name
    #[error("Option '{0}' is declared more than once")]
    DuplicateOption(String),

    /// Two declarations share a short name
    #[error("Short option '-{short}' of '{name}' is already used by '{existing}'")]
    DuplicateShortName {
        short: String,
        name: String,
        existing: String,
    },
}

/// Problems with a configuration source file
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("The {label} file {} does not exist.", .path.display())]
    NotFound { label: &'static str, path: PathBuf },

    #[error("The {label} file {} could not be read: {source}", .path.display())]
    Unreadable {
        label: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("The {label} file {} does not contain valid {format}.", .path.display())]
    InvalidSyntax {
        label: &'static str,
        path: PathBuf,
        format: &'static str,
    },

    #[error("The {label} file {} does not contain a {format} object.", .path.display())]
    NotAnObject {
        label: &'static str,
        path: PathBuf,
        format: &'static str,
    },

    #[error("The {label} file {} has an invalid \"extends\" value; expected a string.", .path.display())]
    InvalidExtends { label: &'static str, path: PathBuf },

    #[error("Circular extends chain in {label} file {}.", .path.display())]
    CircularExtends { label: &'static str, path: PathBuf },

    #[error("The {label} file {} has a \"src\" entry that is not a string or list.", .path.display())]
    InvalidSourceList { label: &'static str, path: PathBuf },

    #[error("The {label} file {} has a \"{block}\" entry that is not an object.", .path.display())]
    InvalidBlock {
        label: &'static str,
        path: PathBuf,
        block: &'static str,
    },
}
