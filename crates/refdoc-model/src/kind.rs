//! Reflection kinds and flags
//!
//! Both are set-valued so that a single declaration can satisfy several
//! category queries at once (e.g. a method is also "function or method").

use std::fmt;

bitflags::bitflags! {
    /// The kind of a reflection.
    ///
    /// A reflection carries exactly one kind bit (or none, for the project
    /// root). The composite constants are query sets for [`ReflectionKind::kind_of`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ReflectionKind: u32 {
        const GLOBAL = 0;
        const EXTERNAL_MODULE = 1 << 0;
        const MODULE = 1 << 1;
        const ENUM = 1 << 2;
        const ENUM_MEMBER = 1 << 4;
        const VARIABLE = 1 << 5;
        const FUNCTION = 1 << 6;
        const CLASS = 1 << 7;
        const INTERFACE = 1 << 8;
        const CONSTRUCTOR = 1 << 9;
        const PROPERTY = 1 << 10;
        const METHOD = 1 << 11;
        const CALL_SIGNATURE = 1 << 12;
        const INDEX_SIGNATURE = 1 << 13;
        const CONSTRUCTOR_SIGNATURE = 1 << 14;
        const PARAMETER = 1 << 15;
        const TYPE_LITERAL = 1 << 16;
        const TYPE_PARAMETER = 1 << 17;
        const ACCESSOR = 1 << 18;
        const GET_SIGNATURE = 1 << 19;
        const SET_SIGNATURE = 1 << 20;
        const OBJECT_LITERAL = 1 << 21;
        const TYPE_ALIAS = 1 << 22;
        const EVENT = 1 << 23;

        const CLASS_OR_INTERFACE = Self::CLASS.bits() | Self::INTERFACE.bits();
        const VARIABLE_OR_PROPERTY = Self::VARIABLE.bits() | Self::PROPERTY.bits();
        const FUNCTION_OR_METHOD = Self::FUNCTION.bits() | Self::METHOD.bits();
        const SOME_SIGNATURE = Self::CALL_SIGNATURE.bits()
            | Self::INDEX_SIGNATURE.bits()
            | Self::CONSTRUCTOR_SIGNATURE.bits()
            | Self::GET_SIGNATURE.bits()
            | Self::SET_SIGNATURE.bits();
        const SOME_MODULE = Self::MODULE.bits() | Self::EXTERNAL_MODULE.bits();
    }
}

/// (kind, identifier, singular title, plural title)
const KIND_NAMES: &[(ReflectionKind, &str, &str, &str)] = &[
    (ReflectionKind::GLOBAL, "Global", "Global", "Globals"),
    (ReflectionKind::EXTERNAL_MODULE, "ExternalModule", "External module", "External modules"),
    (ReflectionKind::MODULE, "Module", "Module", "Modules"),
    (ReflectionKind::ENUM, "Enum", "Enumeration", "Enumerations"),
    (ReflectionKind::ENUM_MEMBER, "EnumMember", "Enumeration member", "Enumeration members"),
    (ReflectionKind::VARIABLE, "Variable", "Variable", "Variables"),
    (ReflectionKind::FUNCTION, "Function", "Function", "Functions"),
    (ReflectionKind::CLASS, "Class", "Class", "Classes"),
    (ReflectionKind::INTERFACE, "Interface", "Interface", "Interfaces"),
    (ReflectionKind::CONSTRUCTOR, "Constructor", "Constructor", "Constructors"),
    (ReflectionKind::PROPERTY, "Property", "Property", "Properties"),
    (ReflectionKind::METHOD, "Method", "Method", "Methods"),
    (ReflectionKind::CALL_SIGNATURE, "CallSignature", "Call signature", "Call signatures"),
    (ReflectionKind::INDEX_SIGNATURE, "IndexSignature", "Index signature", "Index signatures"),
    (
        ReflectionKind::CONSTRUCTOR_SIGNATURE,
        "ConstructorSignature",
        "Constructor signature",
        "Constructor signatures",
    ),
    (ReflectionKind::PARAMETER, "Parameter", "Parameter", "Parameters"),
    (ReflectionKind::TYPE_LITERAL, "TypeLiteral", "Type literal", "Type literals"),
    (ReflectionKind::TYPE_PARAMETER, "TypeParameter", "Type parameter", "Type parameters"),
    (ReflectionKind::ACCESSOR, "Accessor", "Accessor", "Accessors"),
    (ReflectionKind::GET_SIGNATURE, "GetSignature", "Get signature", "Get signatures"),
    (ReflectionKind::SET_SIGNATURE, "SetSignature", "Set signature", "Set signatures"),
    (ReflectionKind::OBJECT_LITERAL, "ObjectLiteral", "Object literal", "Object literals"),
    (ReflectionKind::TYPE_ALIAS, "TypeAlias", "Type alias", "Type aliases"),
    (ReflectionKind::EVENT, "Event", "Event", "Events"),
];

/// Presentation order of groups. Kinds missing from this table sort last.
const KIND_WEIGHTS: &[ReflectionKind] = &[
    ReflectionKind::GLOBAL,
    ReflectionKind::EXTERNAL_MODULE,
    ReflectionKind::MODULE,
    ReflectionKind::ENUM,
    ReflectionKind::ENUM_MEMBER,
    ReflectionKind::CLASS,
    ReflectionKind::INTERFACE,
    ReflectionKind::TYPE_ALIAS,
    ReflectionKind::CONSTRUCTOR,
    ReflectionKind::EVENT,
    ReflectionKind::PROPERTY,
    ReflectionKind::VARIABLE,
    ReflectionKind::FUNCTION,
    ReflectionKind::ACCESSOR,
    ReflectionKind::METHOD,
    ReflectionKind::OBJECT_LITERAL,
    ReflectionKind::PARAMETER,
    ReflectionKind::TYPE_PARAMETER,
    ReflectionKind::TYPE_LITERAL,
    ReflectionKind::CALL_SIGNATURE,
    ReflectionKind::CONSTRUCTOR_SIGNATURE,
    ReflectionKind::INDEX_SIGNATURE,
    ReflectionKind::GET_SIGNATURE,
    ReflectionKind::SET_SIGNATURE,
];

impl ReflectionKind {
    /// Disjunctive kind test: true when this kind is any of the kinds in `set`.
    ///
    /// `GLOBAL` has no bits, so it only matches a query for `GLOBAL` itself.
    pub fn kind_of(self, set: ReflectionKind) -> bool {
        if set.is_empty() || self.is_empty() {
            return self == set;
        }
        self.intersects(set)
    }

    fn entry(self) -> Option<&'static (ReflectionKind, &'static str, &'static str, &'static str)> {
        KIND_NAMES.iter().find(|(kind, ..)| *kind == self)
    }

    /// Identifier form, e.g. `"TypeAlias"`. Composite sets have no name.
    pub fn name(self) -> Option<&'static str> {
        self.entry().map(|(_, name, _, _)| *name)
    }

    /// Singular display title, e.g. `"Type alias"`.
    pub fn singular(self) -> &'static str {
        self.entry().map(|(_, _, singular, _)| *singular).unwrap_or("Unknown")
    }

    /// Plural display title used for group headings, e.g. `"Type aliases"`.
    pub fn plural(self) -> &'static str {
        self.entry().map(|(_, _, _, plural)| *plural).unwrap_or("Unknown")
    }

    /// Parse a single kind from its identifier.
    ///
    /// Matching ignores case, `_` and `-`, so `"type_alias"`, `"type-alias"`
    /// and `"TypeAlias"` are all accepted.
    pub fn parse(name: &str) -> Option<ReflectionKind> {
        let wanted = normalize(name);
        KIND_NAMES
            .iter()
            .find(|(_, ident, _, _)| normalize(ident) == wanted)
            .map(|(kind, ..)| *kind)
    }

    /// Position in the group presentation order.
    pub fn weight(self) -> usize {
        KIND_WEIGHTS
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(KIND_WEIGHTS.len())
    }
}

impl fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#x}", self.bits()),
        }
    }
}

bitflags::bitflags! {
    /// Modifier flags of a reflection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReflectionFlags: u32 {
        const PRIVATE = 1 << 0;
        const PROTECTED = 1 << 1;
        const PUBLIC = 1 << 2;
        const STATIC = 1 << 3;
        const EXPORTED = 1 << 4;
        const EXPORT_ASSIGNMENT = 1 << 5;
        const EXTERNAL = 1 << 6;
        const OPTIONAL = 1 << 7;
        const DEFAULT_VALUE = 1 << 8;
        const REST = 1 << 9;
        const CONSTRUCTOR_PROPERTY = 1 << 10;
        const ABSTRACT = 1 << 11;
        const CONST = 1 << 12;
        const LET = 1 << 13;
    }
}

/// (flag, serialized key, short name)
const FLAG_NAMES: &[(ReflectionFlags, &str, &str)] = &[
    (ReflectionFlags::PRIVATE, "isPrivate", "private"),
    (ReflectionFlags::PROTECTED, "isProtected", "protected"),
    (ReflectionFlags::PUBLIC, "isPublic", "public"),
    (ReflectionFlags::STATIC, "isStatic", "static"),
    (ReflectionFlags::EXPORTED, "isExported", "exported"),
    (ReflectionFlags::EXPORT_ASSIGNMENT, "isExportAssignment", "exportAssignment"),
    (ReflectionFlags::EXTERNAL, "isExternal", "external"),
    (ReflectionFlags::OPTIONAL, "isOptional", "optional"),
    (ReflectionFlags::DEFAULT_VALUE, "hasDefaultValue", "defaultValue"),
    (ReflectionFlags::REST, "isRest", "rest"),
    (ReflectionFlags::CONSTRUCTOR_PROPERTY, "isConstructorProperty", "constructorProperty"),
    (ReflectionFlags::ABSTRACT, "isAbstract", "abstract"),
    (ReflectionFlags::CONST, "isConst", "const"),
    (ReflectionFlags::LET, "isLet", "let"),
];

impl ReflectionFlags {
    /// Parse a single flag from either its short name (`"private"`) or its
    /// serialized key (`"isPrivate"`), ignoring case.
    pub fn parse(name: &str) -> Option<ReflectionFlags> {
        let wanted = normalize(name);
        FLAG_NAMES
            .iter()
            .find(|(_, key, short)| normalize(key) == wanted || normalize(short) == wanted)
            .map(|(flag, ..)| *flag)
    }

    /// Serialized keys of all set flags, in declaration order.
    pub fn keys(self) -> impl Iterator<Item = &'static str> {
        FLAG_NAMES
            .iter()
            .filter(move |(flag, ..)| self.contains(*flag))
            .map(|(_, key, _)| *key)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
