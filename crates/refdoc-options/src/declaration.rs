//! Option declarations
//!
//! A declaration describes one configurable option: its name, the type its
//! value must have, where it may come from and its default. Declarations also
//! convert loosely typed input (JSON values, command-line strings) into
//! [`OptionValue`]s.

use crate::paths;
use crate::value::OptionValue;
use serde_json::Value;
use std::path::Path;

/// Type of an option's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Number,
    Boolean,
    /// One of a fixed set of keys
    Map,
    Path,
    Array,
}

/// What a path option points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterHint {
    File,
    Directory,
}

/// Which part of the configuration an option belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterScope {
    /// Options of the documentation tool itself
    Tool,
    /// Compiler options, read from a tsconfig `compilerOptions` block
    Compiler,
}

/// Metadata of one configurable option
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDeclaration {
    pub name: String,
    pub short_name: Option<String>,
    pub help: String,
    pub kind: ParameterType,
    pub hint: Option<ParameterHint>,
    pub scope: ParameterScope,
    pub default_value: Option<OptionValue>,
    /// Allowed keys of a map option
    pub map: Vec<String>,
}

impl OptionDeclaration {
    pub fn new(name: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            help: String::new(),
            kind,
            hint: None,
            scope: ParameterScope::Tool,
            default_value: None,
            map: Vec::new(),
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short_name = Some(short.into());
        self
    }

    pub fn hint(mut self, hint: ParameterHint) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn compiler(mut self) -> Self {
        self.scope = ParameterScope::Compiler;
        self
    }

    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn map<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.map = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == ParameterType::Boolean
    }

    /// Convert a raw value into this option's type.
    ///
    /// Relative paths are resolved against `base_dir`. The error is a
    /// user-facing message.
    pub fn convert(&self, raw: &Value, base_dir: &Path) -> Result<OptionValue, String> {
        match self.kind {
            ParameterType::String => match raw {
                Value::String(s) => Ok(OptionValue::String(s.clone())),
                Value::Number(n) => Ok(OptionValue::String(n.to_string())),
                Value::Bool(b) => Ok(OptionValue::String(b.to_string())),
                _ => Err(self.type_error(raw, "a string")),
            },

            ParameterType::Number => match raw {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().and_then(whole_number))
                    .map(OptionValue::Number)
                    .ok_or_else(|| self.type_error(raw, "a whole number")),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(OptionValue::Number)
                    .map_err(|_| self.type_error(raw, "a number")),
                _ => Err(self.type_error(raw, "a number")),
            },

            ParameterType::Boolean => match raw {
                Value::Bool(b) => Ok(OptionValue::Boolean(*b)),
                Value::Number(n) => Ok(OptionValue::Boolean(n.as_f64() != Some(0.0))),
                Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" => Ok(OptionValue::Boolean(true)),
                    "false" | "no" | "0" => Ok(OptionValue::Boolean(false)),
                    _ => Err(self.type_error(raw, "a boolean")),
                },
                _ => Err(self.type_error(raw, "a boolean")),
            },

            ParameterType::Map => {
                let key = match raw {
                    Value::String(s) => s.trim(),
                    _ => return Err(self.type_error(raw, "a string")),
                };
                self.map
                    .iter()
                    .find(|allowed| allowed.eq_ignore_ascii_case(key))
                    .map(|allowed| OptionValue::Enum(allowed.clone()))
                    .ok_or_else(|| {
                        format!(
                            "Invalid value '{}' for option '{}'. Allowed values: {}",
                            key,
                            self.name,
                            self.map.join(", ")
                        )
                    })
            }

            ParameterType::Path => match raw {
                Value::String(s) if !s.trim().is_empty() => {
                    Ok(OptionValue::Path(paths::resolve(base_dir, s.trim())))
                }
                _ => Err(self.type_error(raw, "a path")),
            },

            // A bare string is a comma separated list. Array elements are
            // taken as they are, since globs like `{a,b}` contain commas.
            ParameterType::Array => match raw {
                Value::String(s) => Ok(OptionValue::Array(split_list(s))),
                Value::Array(values) => values
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => Ok(s.trim().to_string()),
                        Value::Number(_) | Value::Bool(_) => Ok(v.to_string()),
                        _ => Err(self.type_error(raw, "a list of strings")),
                    })
                    .filter(|item| !matches!(item, Ok(s) if s.is_empty()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(OptionValue::Array),
                _ => Err(self.type_error(raw, "a list of strings")),
            },
        }
    }

    fn type_error(&self, raw: &Value, expected: &str) -> String {
        format!("Option '{}' expects {}, got {}", self.name, expected, raw)
    }
}

/// `f` as an integer, if it has no fractional part and fits
fn whole_number(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Split a comma separated list, dropping empty entries
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
