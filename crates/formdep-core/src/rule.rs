//! # Dependency Rules
//!
//! A [`Dependency`] declares that a field is required when a sibling
//! field's value satisfies a [`MatchType`] predicate. The rule is
//! attached to the dependent field's configuration once, at
//! declaration time; evaluation happens at data-set and pre-submit
//! time against whatever snapshot is current.
//!
//! The match-type set is closed — this is not a rule engine. Adding a
//! variant is a compile error at every `match` in the workspace until
//! each evaluation path handles it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{contains_loose, is_empty_value, loose_eq};

/// The closed set of match predicates a rule can use.
///
/// Wire names (`match`, `not_match`, `contain`, `empty`, `not_empty`)
/// are what declarative form configuration carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Sibling value loosely equals the comparison value.
    Match,
    /// Negation of [`MatchType::Match`].
    NotMatch,
    /// Comparison value is a loose member of the sibling value
    /// treated as a sequence.
    Contain,
    /// Sibling value is empty (no comparison value).
    #[serde(rename = "empty")]
    IsEmpty,
    /// Negation of [`MatchType::IsEmpty`] (no comparison value).
    #[serde(rename = "not_empty")]
    IsNotEmpty,
}

impl MatchType {
    /// The wire name of this match type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::NotMatch => "not_match",
            Self::Contain => "contain",
            Self::IsEmpty => "empty",
            Self::IsNotEmpty => "not_empty",
        }
    }

    /// Whether this match type consumes a comparison value.
    /// The empty-kinds ignore it; construction forces it to `None`.
    pub fn takes_value(self) -> bool {
        matches!(self, Self::Match | Self::NotMatch | Self::Contain)
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declarative requirement rule: "this field is required when the
/// sibling field named `field` currently holds a value satisfying
/// `match_type` against `value`".
///
/// ## Lifecycle
///
/// Constructed once when a field is declared. Immutable afterwards
/// except for `required`, which the evaluator flips to `false` as a
/// one-way disable signal when a parent field stops being required —
/// a disabled rule never re-requires its field, regardless of what
/// its own condition would compute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    match_type: MatchType,
    required: bool,
}

impl Dependency {
    /// Base constructor. When no explicit match type is wanted, use
    /// this: the match type defaults to [`MatchType::IsEmpty`] when
    /// `value` is `None`, else [`MatchType::Match`].
    pub fn new(field: impl Into<String>, value: Option<Value>) -> Self {
        let match_type = if value.is_none() {
            MatchType::IsEmpty
        } else {
            MatchType::Match
        };
        Self {
            field: field.into(),
            value,
            match_type,
            required: true,
        }
    }

    fn with_type(field: impl Into<String>, value: Option<Value>, match_type: MatchType) -> Self {
        let value = if match_type.takes_value() { value } else { None };
        Self {
            field: field.into(),
            value,
            match_type,
            required: true,
        }
    }

    /// Rule: required when the sibling loosely equals `value`.
    pub fn matching(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_type(field, Some(value.into()), MatchType::Match)
    }

    /// Rule: required when the sibling does NOT loosely equal `value`.
    pub fn not_matching(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_type(field, Some(value.into()), MatchType::NotMatch)
    }

    /// Rule: required when `value` is a loose member of the sibling.
    pub fn containing(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_type(field, Some(value.into()), MatchType::Contain)
    }

    /// Rule: required when the sibling is empty.
    pub fn is_empty(field: impl Into<String>) -> Self {
        Self::with_type(field, None, MatchType::IsEmpty)
    }

    /// Rule: required when the sibling is non-empty.
    pub fn is_not_empty(field: impl Into<String>) -> Self {
        Self::with_type(field, None, MatchType::IsNotEmpty)
    }

    /// Name of the sibling field whose value is tested.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The comparison value, `None` for the empty-kinds.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The match predicate kind.
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    /// Whether a positive match should still trigger required-ness.
    /// `false` means the rule has been disabled by cascade relaxation.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Disable (or re-enable) this rule. The evaluator only ever sets
    /// `false`; re-enabling is left to the host's own configuration.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Evaluate the match predicate against a candidate value.
    ///
    /// Pure and deterministic: depends only on the rule's match type,
    /// its comparison value, and `candidate`. The `required` flag is
    /// NOT consulted here — enabling is the evaluator's concern.
    pub fn matches(&self, candidate: &Value) -> bool {
        let comparison = self.value.as_ref().unwrap_or(&Value::Null);
        match self.match_type {
            MatchType::Match => loose_eq(candidate, comparison),
            MatchType::NotMatch => !loose_eq(candidate, comparison),
            MatchType::Contain => contains_loose(candidate, comparison),
            MatchType::IsEmpty => is_empty_value(candidate),
            MatchType::IsNotEmpty => !is_empty_value(candidate),
        }
    }
}

/// Raw wire shape. Routes through the constructor defaults so that a
/// shorthand `{"field": "country", "value": "US"}` resolves exactly
/// like [`Dependency::new`].
#[derive(Deserialize)]
struct RawDependency {
    field: String,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    match_type: Option<MatchType>,
    #[serde(default)]
    required: Option<bool>,
}

impl<'de> Deserialize<'de> for Dependency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawDependency::deserialize(deserializer)?;
        let mut dep = match raw.match_type {
            Some(match_type) => Self::with_type(raw.field, raw.value, match_type),
            None => Self::new(raw.field, raw.value),
        };
        if let Some(required) = raw.required {
            dep.required = required;
        }
        Ok(dep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── constructor defaults ─────────────────────────────────────────

    #[test]
    fn new_without_value_defaults_to_is_empty() {
        let dep = Dependency::new("comment", None);
        assert_eq!(dep.match_type(), MatchType::IsEmpty);
        assert!(dep.value().is_none());
        assert!(dep.is_required());
    }

    #[test]
    fn new_with_value_defaults_to_match() {
        let dep = Dependency::new("country", Some(json!("US")));
        assert_eq!(dep.match_type(), MatchType::Match);
        assert_eq!(dep.value(), Some(&json!("US")));
    }

    #[test]
    fn empty_kinds_discard_comparison_value() {
        let dep = Dependency::is_empty("comment");
        assert!(dep.value().is_none());
        let dep = Dependency::is_not_empty("comment");
        assert!(dep.value().is_none());
    }

    // ── matches ──────────────────────────────────────────────────────

    #[test]
    fn match_uses_loose_equality() {
        let dep = Dependency::matching("age", 18);
        assert!(dep.matches(&json!(18)));
        assert!(dep.matches(&json!("18")));
        assert!(!dep.matches(&json!(17)));
    }

    #[test]
    fn match_and_not_match_are_complements() {
        let pairs = [
            (json!("US"), json!("US")),
            (json!("US"), json!("CA")),
            (json!(1), json!("1")),
            (json!(0), json!(false)),
            (json!(["a"]), json!(["a"])),
        ];
        for (value, candidate) in pairs {
            let m = Dependency::matching("f", value.clone());
            let n = Dependency::not_matching("f", value);
            assert_ne!(
                m.matches(&candidate),
                n.matches(&candidate),
                "match/not_match must disagree on {candidate}"
            );
        }
    }

    #[test]
    fn is_empty_and_is_not_empty_are_complements() {
        let e = Dependency::is_empty("f");
        let ne = Dependency::is_not_empty("f");
        for candidate in [json!(null), json!(""), json!("0"), json!("x"), json!([1])] {
            assert_ne!(e.matches(&candidate), ne.matches(&candidate));
        }
    }

    #[test]
    fn contain_matches_multi_select() {
        let dep = Dependency::containing("reason", "other");
        assert!(dep.matches(&json!(["other", "x"])));
        assert!(!dep.matches(&json!(["x"])));
        // Scalar candidate wraps into a singleton sequence.
        assert!(dep.matches(&json!("other")));
    }

    #[test]
    fn matches_ignores_required_flag() {
        let mut dep = Dependency::matching("country", "US");
        dep.set_required(false);
        assert!(dep.matches(&json!("US")));
    }

    // ── serde ────────────────────────────────────────────────────────

    #[test]
    fn match_type_wire_names() {
        assert_eq!(serde_json::to_string(&MatchType::Match).unwrap(), "\"match\"");
        assert_eq!(
            serde_json::to_string(&MatchType::IsEmpty).unwrap(),
            "\"empty\""
        );
        assert_eq!(
            serde_json::to_string(&MatchType::IsNotEmpty).unwrap(),
            "\"not_empty\""
        );
    }

    #[test]
    fn shorthand_deserializes_through_constructor_defaults() {
        let dep: Dependency = serde_json::from_value(json!({
            "field": "country", "value": "US"
        }))
        .unwrap();
        assert_eq!(dep.match_type(), MatchType::Match);
        assert!(dep.is_required());

        let dep: Dependency = serde_json::from_value(json!({ "field": "comment" })).unwrap();
        assert_eq!(dep.match_type(), MatchType::IsEmpty);
    }

    #[test]
    fn explicit_match_type_deserializes() {
        let dep: Dependency = serde_json::from_value(json!({
            "field": "reason", "value": "other", "match_type": "contain", "required": false
        }))
        .unwrap();
        assert_eq!(dep.match_type(), MatchType::Contain);
        assert!(!dep.is_required());
    }

    #[test]
    fn serialize_roundtrip() {
        let dep = Dependency::containing("reason", "other");
        let json = serde_json::to_value(&dep).unwrap();
        let back: Dependency = serde_json::from_value(json).unwrap();
        assert_eq!(dep, back);
    }
}
