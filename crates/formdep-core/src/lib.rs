//! # formdep-core — Value Semantics & Dependency Rules
//!
//! The pure layer of formdep. Nothing here touches a field tree or a
//! constraint set: this crate defines how submitted values compare
//! ([`value`]) and what a declarative requirement rule looks like
//! ([`rule`]).
//!
//! ## Coercive comparison
//!
//! Form data arrives as loosely typed JSON: checkboxes post `"1"`,
//! selects post strings even for numeric choices, and absent branches
//! are `null`. The comparison primitives therefore coerce on purpose —
//! `"0"`, `0`, and `false` are interchangeable, and `is_empty_value`
//! treats all of them (plus `""`, `null`, `[]`, `{}`) as absent.
//!
//! ## Rule model
//!
//! A [`Dependency`] conditions one field's required-ness on a sibling
//! field's value through a fixed, closed set of [`MatchType`]
//! predicates. Rules are immutable after construction except for the
//! `required` flag, which the evaluator may flip to `false` as a
//! one-way disable signal during cascade relaxation.

pub mod rule;
pub mod value;

// Re-export primary types.
pub use rule::{Dependency, MatchType};
pub use value::{contains_loose, is_empty_value, loose_eq};
