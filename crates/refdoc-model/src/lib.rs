//! Refdoc Reflection Model
//!
//! This crate provides the in-memory documentation model, including:
//! - Reflection kinds and flags (set-valued, with "is-any-of" tests)
//! - The reflection tree arena with parent back-references
//! - Child lookup by kind and role-tagged traversal
//! - Presentation groups derived from a container's children
//! - Acyclic serialization to a plain data representation
//! - Building a tree from compiler declaration records

pub mod builder;
pub mod error;
pub mod group;
pub mod kind;
pub mod reflection;
pub mod serialize;
pub mod tree;

pub use builder::DeclarationRecord;
pub use error::TreeError;
pub use group::ReflectionGroup;
pub use kind::{ReflectionFlags, ReflectionKind};
pub use reflection::{Comment, DeclarationReflection, ReflectionId, SourceReference, TraverseProperty};
pub use serialize::{GroupObject, ReflectionObject};
pub use tree::ReflectionTree;
