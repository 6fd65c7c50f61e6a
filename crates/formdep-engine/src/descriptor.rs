//! # Client Dependency Descriptors
//!
//! A read-only export of every dependency rule in a subtree, keyed by
//! the dependent field's framework path. Client layers (progressive
//! disclosure, prefill hints, documentation) consume these instead of
//! re-parsing field configuration; nothing here feeds back into
//! evaluation.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use formdep_core::MatchType;
use formdep_tree::{FieldId, FieldTree};

/// One exported rule: which field is watched, against what value,
/// under which predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyDescriptor {
    /// Framework path of the watched sibling. Multi-value expanded
    /// fields get a `[]` suffix, matching how their inputs post.
    pub field: String,
    /// The comparison value, absent for the empty-kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// The match predicate.
    pub match_type: MatchType,
}

/// Collect descriptors for every field in `node`'s subtree that
/// declares a dependency, keyed by the dependent field's full name.
///
/// A rule naming a sibling that does not exist in the tree is skipped
/// — the engine treats such rules as silently inert, and the export
/// mirrors that. `BTreeMap` keeps the export deterministically
/// ordered.
pub fn collect_descriptors(
    tree: &FieldTree,
    node: FieldId,
) -> BTreeMap<String, DependencyDescriptor> {
    let mut out = BTreeMap::new();
    for field in tree.descendants(node) {
        let Some(dependency) = tree.options(field).depends_on.as_ref() else {
            continue;
        };
        let Some(parent) = tree.parent(field) else {
            continue;
        };
        let Some(sibling) = tree.child(parent, dependency.field()) else {
            tracing::debug!(
                field = %tree.full_name(field),
                depends_on = dependency.field(),
                "dependency names a sibling that does not exist; descriptor skipped"
            );
            continue;
        };

        let mut watched = tree.full_name(sibling);
        let sibling_options = tree.options(sibling);
        if sibling_options.multiple && sibling_options.expanded {
            watched.push_str("[]");
        }

        out.insert(
            tree.full_name(field),
            DependencyDescriptor {
                field: watched,
                value: dependency.value().cloned(),
                match_type: dependency.match_type(),
            },
        );
    }
    out
}
