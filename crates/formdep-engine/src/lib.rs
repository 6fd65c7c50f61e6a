//! # formdep-engine — Dependency Evaluation & Reconciliation
//!
//! The listener that keeps required-ness synchronized with form data.
//! The host fires it at exactly two lifecycle points — when initial
//! data is set on the tree and when submitted data arrives before
//! validation — and each firing re-derives required-ness from scratch
//! against the snapshot available at that moment.
//!
//! ```
//! use formdep_core::Dependency;
//! use formdep_engine::{DependencyEvaluator, FormEvent, FormLifecycle};
//! use formdep_tree::{FieldOptions, FieldTree};
//! use serde_json::json;
//!
//! let mut tree = FieldTree::new("checkout");
//! let root = tree.root();
//! tree.add_field(root, "country", FieldOptions::new()).unwrap();
//! tree.add_field(
//!     root,
//!     "state",
//!     FieldOptions::new().with_depends_on(Dependency::matching("country", "US")),
//! )
//! .unwrap();
//!
//! let mut lifecycle = FormLifecycle::new();
//! lifecycle.subscribe(Box::new(DependencyEvaluator::new()));
//! lifecycle.fire(
//!     FormEvent::PreSubmit,
//!     &mut tree,
//!     root,
//!     &json!({ "country": "US", "state": "" }),
//! );
//!
//! let state = tree.child(root, "state").unwrap();
//! assert!(tree.options(state).required);
//! ```
//!
//! The engine holds no state of its own between firings: everything
//! it needs lives on the field configurations (the dependency rule and
//! the constraint set), and everything it decides is written back
//! there through the host's copy-on-write `replace_field` primitive.

pub mod descriptor;
pub mod evaluator;
pub mod event;

// Re-export primary types.
pub use descriptor::{collect_descriptors, DependencyDescriptor};
pub use evaluator::DependencyEvaluator;
pub use event::{FormEvent, FormLifecycle, FormSubscriber};
