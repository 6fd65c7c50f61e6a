//! # Typed Field Options
//!
//! Per-field configuration as a closed record instead of a dynamic
//! string-keyed bag. Every key the declarative surface supports is an
//! explicit struct field; anything else is rejected at resolution
//! time, before the engine ever sees the tree.

use serde_json::Value;

use formdep_core::Dependency;

use crate::constraint::{ConstraintKind, ConstraintSet};
use crate::error::TreeError;

/// Configuration record for one field in the tree.
///
/// Treated as copy-on-write by the host: an option change is expressed
/// by re-registering the field with a new record through
/// [`FieldTree::replace_field`](crate::tree::FieldTree::replace_field),
/// never by mutating a live one in place. The engine is the only
/// exception — it adjusts `depends_on.required` directly during
/// cascade relaxation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions {
    /// Whether the field is currently required. Kept in lockstep with
    /// [`ConstraintKind::NotBlank`] membership by the engine.
    pub required: bool,
    /// Active validation constraint tags, in declaration order.
    pub constraints: ConstraintSet,
    /// The field's dependency rule, if it declares one.
    pub depends_on: Option<Dependency>,
    /// Whether the field contains named children (a subtree).
    pub compound: bool,
    /// Multi-value field (e.g. a multi-select).
    pub multiple: bool,
    /// Rendered as individual inputs rather than one control.
    pub expanded: bool,
    /// Human-readable label, if configured.
    pub label: Option<String>,
}

impl FieldOptions {
    /// A leaf field with no constraints and no dependency.
    pub fn new() -> Self {
        Self::default()
    }

    /// A compound field (has named children).
    pub fn compound() -> Self {
        Self {
            compound: true,
            ..Self::default()
        }
    }

    /// Attach a dependency rule. Chainable.
    pub fn with_depends_on(mut self, dependency: Dependency) -> Self {
        self.depends_on = Some(dependency);
        self
    }

    /// Mark as multi-value. Chainable.
    pub fn with_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Mark as expanded. Chainable.
    pub fn with_expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Whether the required-ness marker is present.
    pub fn has_required_marker(&self) -> bool {
        self.constraints.contains(ConstraintKind::NotBlank)
    }

    /// Add the required-ness marker. Idempotent; returns `true` when
    /// the marker was newly added.
    pub fn add_required_marker(&mut self) -> bool {
        self.constraints.insert(ConstraintKind::NotBlank)
    }

    /// Remove the required-ness marker. Returns `true` when the
    /// marker was present.
    pub fn remove_required_marker(&mut self) -> bool {
        self.constraints.remove(ConstraintKind::NotBlank)
    }

    /// Resolve a raw declarative options bag into a typed record.
    ///
    /// Supported keys: `required`, `compound`, `multiple`, `expanded`,
    /// `label`, `constraints`, `depends_on`. A `depends_on` value that
    /// is not `Dependency`-shaped is rejected with
    /// [`TreeError::InvalidDependsOn`]; an unrecognized key with
    /// [`TreeError::UnknownOption`].
    pub fn resolve(raw: &Value) -> Result<Self, TreeError> {
        let map = raw
            .as_object()
            .ok_or_else(|| TreeError::NotAMapping(type_name(raw).to_string()))?;

        let mut options = Self::new();
        for (key, entry) in map {
            match key.as_str() {
                "required" => options.required = expect_bool(key, entry)?,
                "compound" => options.compound = expect_bool(key, entry)?,
                "multiple" => options.multiple = expect_bool(key, entry)?,
                "expanded" => options.expanded = expect_bool(key, entry)?,
                "label" => {
                    options.label = Some(
                        entry
                            .as_str()
                            .ok_or_else(|| TreeError::InvalidOption {
                                key: key.clone(),
                                detail: format!("expected a string, got {}", type_name(entry)),
                            })?
                            .to_string(),
                    );
                }
                "constraints" => {
                    options.constraints = serde_json::from_value(entry.clone()).map_err(|e| {
                        TreeError::InvalidOption {
                            key: key.clone(),
                            detail: e.to_string(),
                        }
                    })?;
                }
                "depends_on" => {
                    let dependency: Dependency = serde_json::from_value(entry.clone())
                        .map_err(|e| TreeError::InvalidDependsOn(e.to_string()))?;
                    options.depends_on = Some(dependency);
                }
                other => return Err(TreeError::UnknownOption(other.to_string())),
            }
        }
        Ok(options)
    }
}

fn expect_bool(key: &str, entry: &Value) -> Result<bool, TreeError> {
    entry.as_bool().ok_or_else(|| TreeError::InvalidOption {
        key: key.to_string(),
        detail: format!("expected a boolean, got {}", type_name(entry)),
    })
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
