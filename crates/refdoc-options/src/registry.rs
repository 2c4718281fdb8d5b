//! Option declaration registry
//!
//! Names are matched case-insensitively, so `excludePrivate` and
//! `excludeprivate` address the same option.

use crate::declaration::{OptionDeclaration, ParameterHint, ParameterType};
use crate::error::OptionsError;
use crate::value::OptionValue;
use indexmap::IndexMap;

/// Every option the tool understands, in declaration order
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    /// Declarations keyed by lowercased name
    declarations: IndexMap<String, OptionDeclaration>,
}

impl OptionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in tool and compiler options
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for declaration in builtin_declarations() {
            let added = registry.add(declaration);
            debug_assert!(added.is_ok(), "conflicting built-in option: {:?}", added);
        }
        registry
    }

    /// Register a declaration
    pub fn add(&mut self, declaration: OptionDeclaration) -> Result<(), OptionsError> {
        let key = declaration.name.to_lowercase();
        if self.declarations.contains_key(&key) {
            return Err(OptionsError::DuplicateOption(declaration.name));
        }
        if let Some(short) = &declaration.short_name {
            if let Some(existing) = self.get_by_short(short) {
                return Err(OptionsError::DuplicateShortName {
                    short: short.clone(),
                    name: declaration.name.clone(),
                    existing: existing.name.clone(),
                });
            }
        }
        self.declarations.insert(key, declaration);
        Ok(())
    }

    /// Register several declarations, stopping at the first conflict
    pub fn add_all<I>(&mut self, declarations: I) -> Result<(), OptionsError>
    where
        I: IntoIterator<Item = OptionDeclaration>,
    {
        for declaration in declarations {
            self.add(declaration)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&OptionDeclaration> {
        self.declarations.get(&name.to_lowercase())
    }

    pub fn get_by_short(&self, short: &str) -> Option<&OptionDeclaration> {
        self.declarations
            .values()
            .find(|decl| decl.short_name.as_deref() == Some(short))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Canonical spelling of a declared name
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(|decl| decl.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDeclaration> {
        self.declarations.values()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

fn builtin_declarations() -> Vec<OptionDeclaration> {
    use ParameterType::*;

    vec![
        // Configuration sources
        OptionDeclaration::new("options", Path)
            .hint(ParameterHint::File)
            .help("Options file to load. Defaults to refdoc.json or refdoc.toml in the current directory."),
        OptionDeclaration::new("tsconfig", Path)
            .hint(ParameterHint::File)
            .help("tsconfig.json file to load. Defaults to the nearest tsconfig.json above the current directory."),
        // Output
        OptionDeclaration::new("out", Path)
            .hint(ParameterHint::Directory)
            .help("Directory the documentation is written to."),
        OptionDeclaration::new("json", Path)
            .hint(ParameterHint::File)
            .help("File the serialized reflection tree is written to."),
        OptionDeclaration::new("name", String).help("Title of the project."),
        OptionDeclaration::new("readme", String)
            .help("Readme file shown on the index page, or 'none'."),
        OptionDeclaration::new("theme", String)
            .default_value("default")
            .help("Theme used to render the documentation."),
        OptionDeclaration::new("mode", Map)
            .map(["file", "modules"])
            .default_value(OptionValue::Enum("modules".to_string()))
            .help("How the project is laid out: one module per file or declared modules."),
        OptionDeclaration::new("entryPoint", String)
            .help("Symbol that is documented as the project root."),
        // Filtering
        OptionDeclaration::new("exclude", Array)
            .help("Glob patterns of files to leave out."),
        OptionDeclaration::new("includeDeclarations", Boolean)
            .default_value(false)
            .help("Document declaration files."),
        OptionDeclaration::new("excludeExternals", Boolean)
            .default_value(false)
            .help("Leave out declarations from external modules."),
        OptionDeclaration::new("excludePrivate", Boolean)
            .default_value(false)
            .help("Leave out private members."),
        OptionDeclaration::new("excludeNotExported", Boolean)
            .default_value(false)
            .help("Leave out declarations that are not exported."),
        // Behaviour
        OptionDeclaration::new("logger", Map)
            .map(["console", "none"])
            .default_value(OptionValue::Enum("console".to_string()))
            .help("Where log messages are written."),
        OptionDeclaration::new("verbose", Boolean)
            .default_value(false)
            .help("Log extra information."),
        OptionDeclaration::new("help", Boolean)
            .short("h")
            .default_value(false)
            .help("Print usage information."),
        OptionDeclaration::new("version", Boolean)
            .short("v")
            .default_value(false)
            .help("Print the version."),
        // Compiler options
        OptionDeclaration::new("target", Map)
            .compiler()
            .map([
                "es3", "es5", "es6", "es2015", "es2016", "es2017", "es2018", "es2019", "es2020",
                "es2021", "es2022", "es2023", "es2024", "esnext",
            ])
            .default_value(OptionValue::Enum("es5".to_string()))
            .help("Language level of the sources."),
        OptionDeclaration::new("module", Map)
            .compiler()
            .map([
                "none", "commonjs", "amd", "umd", "system", "es6", "es2015", "es2020", "es2022",
                "esnext", "node16", "node18", "nodenext", "preserve",
            ])
            .help("Module system of the sources."),
        OptionDeclaration::new("moduleResolution", Map)
            .compiler()
            .map(["classic", "node", "node10", "node16", "nodenext", "bundler"])
            .help("How module specifiers are resolved."),
        OptionDeclaration::new("jsx", Map)
            .compiler()
            .map(["preserve", "react", "react-native", "react-jsx", "react-jsxdev"])
            .help("How JSX is handled."),
        OptionDeclaration::new("lib", Array)
            .compiler()
            .help("Library declaration sets to include."),
        OptionDeclaration::new("strict", Boolean)
            .compiler()
            .help("Enable all strict type checks."),
        OptionDeclaration::new("noImplicitAny", Boolean)
            .compiler()
            .help("Report expressions with an implied any type."),
        OptionDeclaration::new("experimentalDecorators", Boolean)
            .compiler()
            .help("Allow decorators."),
        OptionDeclaration::new("allowJs", Boolean)
            .compiler()
            .help("Accept JavaScript sources."),
        OptionDeclaration::new("baseUrl", Path)
            .compiler()
            .hint(ParameterHint::Directory)
            .help("Base directory for non-relative module names."),
        OptionDeclaration::new("rootDir", Path)
            .compiler()
            .hint(ParameterHint::Directory)
            .help("Root directory of the sources."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ParameterScope;

    #[test]
    fn test_builtin_registry() {
        let registry = OptionRegistry::with_defaults();
        assert_eq!(registry.len(), builtin_declarations().len());
        assert!(registry.contains("tsconfig"));
        assert_eq!(registry.get("target").unwrap().scope, ParameterScope::Compiler);
        assert_eq!(registry.get("out").unwrap().scope, ParameterScope::Tool);
    }

    #[test]
    fn test_builtin_registry_has_no_conflicts() {
        let mut registry = OptionRegistry::new();
        assert_eq!(registry.add_all(builtin_declarations()), Ok(()));
    }

    #[test]
    fn test_current_compiler_values_accepted() {
        let registry = OptionRegistry::with_defaults();
        let base = std::path::Path::new("/work");
        for (name, value) in [
            ("target", "es2022"),
            ("module", "nodenext"),
            ("moduleResolution", "bundler"),
            ("jsx", "react-jsx"),
        ] {
            let converted = registry.get(name).unwrap().convert(&serde_json::json!(value), base);
            assert_eq!(converted, Ok(OptionValue::Enum(value.to_string())), "{}", name);
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        let registry = OptionRegistry::with_defaults();
        assert_eq!(registry.canonical_name("EXCLUDEPRIVATE"), Some("excludePrivate"));
        assert_eq!(registry.canonical_name("nope"), None);
    }

    #[test]
    fn test_short_names() {
        let registry = OptionRegistry::with_defaults();
        assert_eq!(registry.get_by_short("h").unwrap().name, "help");
        assert!(registry.get_by_short("x").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = OptionRegistry::new();
        registry
            .add(OptionDeclaration::new("out", ParameterType::Path))
            .unwrap();
        assert_eq!(
            registry.add(OptionDeclaration::new("OUT", ParameterType::String)),
            Err(OptionsError::DuplicateOption("OUT".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_short_name_rejected() {
        let mut registry = OptionRegistry::new();
        registry
            .add(OptionDeclaration::new("help", ParameterType::Boolean).short("h"))
            .unwrap();
        let result = registry.add(OptionDeclaration::new("hidden", ParameterType::Boolean).short("h"));
        assert!(matches!(result, Err(OptionsError::DuplicateShortName { .. })));
    }
}
