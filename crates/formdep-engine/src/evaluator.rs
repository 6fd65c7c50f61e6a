//! # The Dependency Evaluator
//!
//! One reconciliation pass: walk the field tree in declaration order,
//! evaluate each declared dependency against the data snapshot at that
//! tree depth, and make the field's `NotBlank` marker and `required`
//! flag agree with the outcome. Relaxation cascades: when a field
//! stops being required, every descendant that carries its own
//! dependency rule is disabled and stripped too — a field that is no
//! longer relevant must not leave required children behind.
//!
//! The pass is one-shot and synchronous. Marker changes go through the
//! host's copy-on-write [`FieldTree::replace_field`] primitive, and a
//! replacement completes (children re-attached, order intact) before
//! the walk moves to the next sibling.

use std::sync::OnceLock;

use serde_json::{Map, Value};

use formdep_tree::{FieldId, FieldTree};

use crate::event::{FormEvent, FormSubscriber};

static EMPTY_MAPPING: OnceLock<Value> = OnceLock::new();

fn empty_mapping() -> &'static Value {
    EMPTY_MAPPING.get_or_init(|| Value::Object(Map::new()))
}

/// The listener that reconciles required-ness with form data.
///
/// Stateless: everything it reads and writes lives on the field
/// configurations themselves, so the same instance can serve any
/// number of firings over any number of trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyEvaluator;

impl DependencyEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Run one reconciliation pass over `node`'s subtree against the
    /// data snapshot for that tree level.
    ///
    /// Idempotent: a second pass with the same `(tree, data)` leaves
    /// every marker and `required` flag unchanged.
    pub fn handle_dependencies(&self, tree: &mut FieldTree, node: FieldId, data: &Value) {
        for child in tree.children(node).to_vec() {
            if tree.options(child).depends_on.is_some() {
                self.process(tree, child, data);
            }

            if tree.options(child).compound {
                let branch = match data.get(tree.name(child)) {
                    Some(value) if value.is_object() => value,
                    Some(_) => {
                        tracing::warn!(
                            field = %tree.full_name(child),
                            "compound branch is not a mapping; evaluating against an empty one"
                        );
                        empty_mapping()
                    }
                    None => empty_mapping(),
                };
                self.handle_dependencies(tree, child, branch);
            }
        }
    }

    /// Evaluate one field's dependency against the mapping at its
    /// tree level and reconcile its marker.
    ///
    /// A dependency is never an error source: a missing referenced
    /// field, a non-mapping snapshot, or a disabled rule all resolve
    /// to "not required".
    fn process(&self, tree: &mut FieldTree, child: FieldId, data: &Value) {
        let Some(dependency) = tree.options(child).depends_on.clone() else {
            return;
        };

        let observed = data.as_object().and_then(|map| map.get(dependency.field()));
        let is_required =
            dependency.is_required() && observed.is_some_and(|value| dependency.matches(value));

        tracing::debug!(
            field = %tree.full_name(child),
            depends_on = dependency.field(),
            match_type = %dependency.match_type(),
            is_required,
            "dependency evaluated"
        );

        if is_required {
            self.assert_required(tree, child, true);
        } else {
            self.assert_required(tree, child, false);
            self.relax_descendants(tree, child);
        }
    }

    /// Make the field's marker and `required` flag agree with the
    /// decision, re-registering it through `replace_field` only when
    /// something actually changes.
    fn assert_required(&self, tree: &mut FieldTree, field: FieldId, required: bool) {
        let options = tree.options(field);
        if options.required == required && options.has_required_marker() == required {
            return;
        }

        let mut next = options.clone();
        next.required = required;
        if required {
            next.add_required_marker();
        } else {
            next.remove_required_marker();
        }

        // The root carries no dependency and is never reconciled.
        let Some(parent) = tree.parent(field) else {
            return;
        };
        let name = tree.name(field).to_string();
        if let Err(err) = tree.replace_field(parent, &name, next) {
            // Unreachable while the walk only names children it just
            // read off the tree; surfaced for diagnosis, not control flow.
            tracing::warn!(field = %name, %err, "field replacement failed during reconciliation");
        }
    }

    /// Cascade relaxation: permanently disable the dependency rule of
    /// every descendant that carries one, and strip its marker. A
    /// disabled rule keeps a later pass over the descendant from
    /// re-requiring it while its parent stays irrelevant.
    fn relax_descendants(&self, tree: &mut FieldTree, field: FieldId) {
        for descendant in tree.descendants(field) {
            if tree.options(descendant).depends_on.is_none() {
                continue;
            }
            let path = tree.full_name(descendant);
            if let Some(rule) = tree.options_mut(descendant).depends_on.as_mut() {
                if rule.is_required() {
                    rule.set_required(false);
                    tracing::debug!(field = %path, "cascade relaxation: dependency rule disabled");
                }
            }
            self.assert_required(tree, descendant, false);
        }
    }
}

impl FormSubscriber for DependencyEvaluator {
    fn subscribed_events(&self) -> &'static [FormEvent] {
        &[FormEvent::InitialData, FormEvent::PreSubmit]
    }

    fn handle(&self, _event: FormEvent, tree: &mut FieldTree, root: FieldId, data: &Value) {
        self.handle_dependencies(tree, root, data);
    }
}
