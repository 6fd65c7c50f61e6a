//! # Tree Error Types
//!
//! Structured errors for field-tree construction and mutation. Uses
//! `thiserror` for ergonomic definitions with diagnostic context.

use thiserror::Error;

/// Errors from field-tree operations and options resolution.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A sibling with this name already exists under the parent.
    #[error("duplicate field '{name}' under '{parent}'")]
    DuplicateField { parent: String, name: String },

    /// No child with this name exists under the parent.
    #[error("unknown field '{name}' under '{parent}'")]
    UnknownField { parent: String, name: String },

    /// A raw options bag was not a mapping.
    #[error("field options must be a mapping, got {0}")]
    NotAMapping(String),

    /// The `depends_on` option was not `Dependency`-shaped. The one
    /// configuration failure surfaced before evaluation ever runs.
    #[error("invalid depends_on option: {0}")]
    InvalidDependsOn(String),

    /// An options key outside the closed record was supplied.
    #[error("unknown field option '{0}'")]
    UnknownOption(String),

    /// An options value had the wrong type for its key.
    #[error("invalid value for field option '{key}': {detail}")]
    InvalidOption { key: String, detail: String },
}
