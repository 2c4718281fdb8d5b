//! Reflection tree errors
//!
//! These describe broken tree invariants or misuse of the tree-building API.
//! They are not user input problems and are never collected; callers
//! propagate them.

use crate::reflection::ReflectionId;
use thiserror::Error;

/// Errors raised by tree construction, grouping and serialization
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// No reflection with this id lives in the tree
    #[error("Unknown reflection: {0}")]
    UnknownReflection(ReflectionId),

    /// The root reflection cannot be removed
    #[error("Cannot remove the root reflection {0}")]
    CannotRemoveRoot(ReflectionId),

    /// A child claims a parent whose children do not include it
    #[error("Reflection {child} claims parent {parent}, which does not list it as a child")]
    OrphanedChild {
        child: ReflectionId,
        parent: ReflectionId,
    },

    /// A container lists a child whose parent link points elsewhere
    #[error("Reflection {child} is listed by {container} but its parent is {actual:?}")]
    ParentMismatch {
        container: ReflectionId,
        child: ReflectionId,
        actual: Option<ReflectionId>,
    },

    /// A group references a reflection absent from its container's children
    #[error("Group '{group}' of reflection {container} references {member}, which is not a child")]
    DanglingGroupMember {
        container: ReflectionId,
        group: String,
        member: ReflectionId,
    },

    /// A declaration record names an unknown kind
    #[error("Unknown reflection kind '{kind}' on declaration '{name}'")]
    UnknownKind { name: String, kind: String },

    /// A declaration record names an unknown flag
    #[error("Unknown reflection flag '{flag}' on declaration '{name}'")]
    UnknownFlag { name: String, flag: String },
}
