//! Command-line arguments reader

use super::OptionsReader;
use crate::declaration::{split_list, OptionDeclaration, ParameterType};
use crate::event::DiscoverScope;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::PathBuf;

/// Reads options from a pre-tokenized argument list.
///
/// Accepted forms are `--name value`, `--name=value` and `-s value`, where
/// `s` is a short name. Boolean options take no value unless one is given
/// inline (`--excludePrivate=false`). Values of list options are comma
/// separated and accumulate over repeated flags. Everything after `--`, and
/// every token that does not start with `-`, is an input file.
#[derive(Debug, Clone, Default)]
pub struct ArgumentsReader {
    args: Vec<String>,
}

impl ArgumentsReader {
    pub const PRIORITY: i32 = 0;

    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn lookup<'r>(scope: &DiscoverScope<'r>, flag: &str) -> Option<&'r OptionDeclaration> {
    let registry = scope.registry();
    registry.get(flag).or_else(|| registry.get_by_short(flag))
}

impl OptionsReader for ArgumentsReader {
    fn name(&self) -> &str {
        "arguments"
    }

    fn read(&self, scope: &mut DiscoverScope<'_>) {
        let mut values: IndexMap<String, Value> = IndexMap::new();
        let mut input_files: Vec<PathBuf> = Vec::new();
        let mut tokens = self.args.iter();
        let mut options_done = false;

        while let Some(token) = tokens.next() {
            if options_done || !token.starts_with('-') || token == "-" {
                input_files.push(scope.context().resolve(token));
                continue;
            }
            if token == "--" {
                options_done = true;
                continue;
            }

            let stripped = token.trim_start_matches('-');
            let (flag, inline) = match stripped.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (stripped, None),
            };

            let Some(declaration) = lookup(scope, flag) else {
                scope.add_error(format!("Unknown option: {}", token));
                continue;
            };

            let value = match inline {
                Some(value) => value.to_string(),
                None if declaration.is_boolean() => {
                    values.insert(declaration.name.clone(), Value::Bool(true));
                    continue;
                }
                None => match tokens.next() {
                    Some(value) => value.clone(),
                    None => {
                        scope.add_error(format!("Option '{}' expects a value.", declaration.name));
                        continue;
                    }
                },
            };

            if declaration.kind == ParameterType::Array {
                let entry = values
                    .entry(declaration.name.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(items) = entry {
                    items.extend(split_list(&value).into_iter().map(Value::String));
                }
            } else {
                values.insert(declaration.name.clone(), Value::String(value));
            }
        }

        for (name, value) in values {
            scope.set(&name, value);
        }
        if !input_files.is_empty() {
            scope.add_input_files(input_files);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{DiscoverContext, DiscoverEvent};
    use crate::registry::OptionRegistry;
    use serde_json::json;

    fn read(args: &[&str]) -> DiscoverEvent {
        let registry = OptionRegistry::with_defaults();
        let context = DiscoverContext::new("/work", true);
        let mut event = DiscoverEvent::new();
        let reader = ArgumentsReader::new(args.iter().copied());
        let mut scope = DiscoverScope::new(&mut event, &registry, &context, reader.name(), true);
        reader.read(&mut scope);
        event
    }

    #[test]
    fn test_long_forms() {
        let event = read(&["--out", "docs", "--name=Shapes", "--mode", "file"]);
        assert_eq!(event.get("out"), Some(&json!("docs")));
        assert_eq!(event.get("name"), Some(&json!("Shapes")));
        assert_eq!(event.get("mode"), Some(&json!("file")));
        assert!(event.errors().is_empty());
    }

    #[test]
    fn test_case_insensitive_names_stored_canonically() {
        let event = read(&["--excludeprivate"]);
        assert_eq!(event.get("excludePrivate"), Some(&json!(true)));
    }

    #[test]
    fn test_boolean_flags_do_not_consume_next_token() {
        let event = read(&["--excludePrivate", "src/index.ts", "--verbose=false"]);
        assert_eq!(event.get("excludePrivate"), Some(&json!(true)));
        assert_eq!(event.get("verbose"), Some(&json!("false")));
        assert_eq!(event.input_files(), &[PathBuf::from("/work/src/index.ts")]);
    }

    #[test]
    fn test_short_names() {
        let event = read(&["-h"]);
        assert_eq!(event.get("help"), Some(&json!(true)));
    }

    #[test]
    fn test_positionals_and_double_dash() {
        let event = read(&["a.ts", "--", "--not-an-option.ts", "../b.ts"]);
        assert_eq!(
            event.input_files(),
            &[
                PathBuf::from("/work/a.ts"),
                PathBuf::from("/work/--not-an-option.ts"),
                PathBuf::from("/b.ts"),
            ]
        );
        assert!(event.errors().is_empty());
    }

    #[test]
    fn test_unknown_option_reported() {
        let event = read(&["--colour", "--out", "docs"]);
        assert_eq!(event.errors(), &["Unknown option: --colour".to_string()]);
        assert_eq!(event.get("out"), Some(&json!("docs")));
    }

    #[test]
    fn test_missing_value_reported() {
        let event = read(&["--out"]);
        assert_eq!(event.errors(), &["Option 'out' expects a value.".to_string()]);
        assert!(event.get("out").is_none());
    }

    #[test]
    fn test_repeated_array_option_accumulates() {
        let event = read(&["--exclude", "**/*.spec.ts", "--exclude=lib/**"]);
        assert_eq!(event.get("exclude"), Some(&json!(["**/*.spec.ts", "lib/**"])));
    }

    #[test]
    fn test_array_option_value_is_comma_separated() {
        let event = read(&["--exclude", "a.ts, b.ts", "--exclude=c.ts"]);
        assert_eq!(event.get("exclude"), Some(&json!(["a.ts", "b.ts", "c.ts"])));
    }

    #[test]
    fn test_repeated_scalar_option_last_wins() {
        let event = read(&["--name", "first", "--name", "second"]);
        assert_eq!(event.get("name"), Some(&json!("second")));
    }
}
