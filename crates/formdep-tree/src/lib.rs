//! # formdep-tree — Field Tree Arena & Typed Options
//!
//! The host-framework surface the dependency engine runs against.
//!
//! ## Arena, not object graph
//!
//! The field tree is an arena of slots addressed by stable
//! [`FieldId`]s: a parent pointer plus an ordered child index per
//! node. "Replacing" a field for an option change is an in-place
//! update of the arena slot with a pointer-stable re-link of its
//! children — the id survives, declaration order survives, and every
//! re-attached child re-asserts its own options into its slot.
//!
//! ## Typed options, not string bags
//!
//! Per-field configuration is the closed [`FieldOptions`] record
//! (required flag, ordered constraint tags, optional dependency rule,
//! structural flags) rather than a lookup-by-string-key map. The one
//! surfaced configuration failure lives here too:
//! [`FieldOptions::resolve`] rejects a `depends_on` entry that is not
//! `Dependency`-shaped before any evaluation runs.

pub mod constraint;
pub mod error;
pub mod options;
pub mod tree;

// Re-export primary types.
pub use constraint::{ConstraintKind, ConstraintSet};
pub use error::TreeError;
pub use options::FieldOptions;
pub use tree::{FieldId, FieldTree};
