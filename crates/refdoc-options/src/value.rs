//! Typed option values

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A validated option value, one variant per parameter type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Number(i64),
    Boolean(bool),
    /// Canonical key of a map option
    Enum(String),
    Path(PathBuf),
    Array(Vec<String>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) | OptionValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            OptionValue::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            OptionValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::String(_) => "string",
            OptionValue::Number(_) => "number",
            OptionValue::Boolean(_) => "boolean",
            OptionValue::Enum(_) => "enum",
            OptionValue::Path(_) => "path",
            OptionValue::Array(_) => "array",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(s) | OptionValue::Enum(s) => f.write_str(s),
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::Boolean(b) => write!(f, "{}", b),
            OptionValue::Path(p) => write!(f, "{}", p.display()),
            OptionValue::Array(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value)
    }
}
