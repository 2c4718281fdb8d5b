//! Reflection entities
//!
//! A [`DeclarationReflection`] is one documented declaration. Every
//! reflection can also act as a container: it owns an ordered list of child
//! ids and a derived list of presentation groups. Ownership and the parent
//! back-reference are both expressed as ids into the owning
//! [`ReflectionTree`](crate::ReflectionTree), so the parent link is never a
//! second ownership edge.

use crate::group::ReflectionGroup;
use crate::kind::{ReflectionFlags, ReflectionKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_REFLECTION_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique reflection identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(pub u32);

impl ReflectionId {
    /// Allocate a fresh id. Ids are never reused within a process.
    pub(crate) fn next() -> Self {
        ReflectionId(NEXT_REFLECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a declaration was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub file_name: String,
    pub line: u32,
    #[serde(default)]
    pub character: u32,
}

impl SourceReference {
    pub fn new(file_name: impl Into<String>, line: u32, character: u32) -> Self {
        Self {
            file_name: file_name.into(),
            line,
            character,
        }
    }
}

/// Documentation text attached to a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// First paragraph
    pub short_text: String,

    /// Remaining paragraphs
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Comment {
    /// Split raw documentation into the summary paragraph and the rest.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.split_once("\n\n") {
            Some((short, rest)) => Comment {
                short_text: short.trim().to_string(),
                text: rest.trim().to_string(),
            },
            None => Comment {
                short_text: trimmed.to_string(),
                text: String::new(),
            },
        }
    }
}

/// Structural relationship of a node reported during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraverseProperty {
    Children,
    Parameters,
    TypeLiteral,
    TypeParameter,
    Signatures,
    IndexSignature,
    GetSignature,
    SetSignature,
}

/// A documented declaration that may own child declarations
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationReflection {
    id: ReflectionId,

    /// Display name, not unique among siblings
    pub name: String,

    pub kind: ReflectionKind,

    pub flags: ReflectionFlags,

    pub comment: Option<Comment>,

    pub sources: Vec<SourceReference>,

    parent: Option<ReflectionId>,
    pub(crate) children: Vec<ReflectionId>,
    pub(crate) groups: Vec<ReflectionGroup>,
}

impl DeclarationReflection {
    pub(crate) fn new(name: impl Into<String>, kind: ReflectionKind, parent: Option<ReflectionId>) -> Self {
        Self {
            id: ReflectionId::next(),
            name: name.into(),
            kind,
            flags: ReflectionFlags::empty(),
            comment: None,
            sources: Vec::new(),
            parent,
            children: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn id(&self) -> ReflectionId {
        self.id
    }

    /// Owning reflection, `None` for the root
    pub fn parent(&self) -> Option<ReflectionId> {
        self.parent
    }

    /// Owned children in insertion order
    pub fn children(&self) -> &[ReflectionId] {
        &self.children
    }

    /// Groups from the last grouping pass
    pub fn groups(&self) -> &[ReflectionGroup] {
        &self.groups
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn kind_of(&self, kind: ReflectionKind) -> bool {
        self.kind.kind_of(kind)
    }

    pub fn has_flag(&self, flag: ReflectionFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set_flag(&mut self, flag: ReflectionFlags, value: bool) {
        self.flags.set(flag, value);
    }

    pub fn is_private(&self) -> bool {
        self.has_flag(ReflectionFlags::PRIVATE)
    }

    pub fn is_protected(&self) -> bool {
        self.has_flag(ReflectionFlags::PROTECTED)
    }

    pub fn is_exported(&self) -> bool {
        self.has_flag(ReflectionFlags::EXPORTED)
    }

    pub fn is_external(&self) -> bool {
        self.has_flag(ReflectionFlags::EXTERNAL)
    }
}
