//! # Coercive Value Semantics
//!
//! Comparison primitives over [`serde_json::Value`] with the loose
//! coercion rules form data is evaluated under:
//!
//! - [`loose_eq`] — coercive equality: numeric strings equal numbers,
//!   booleans compare by truthiness, `null` equals any empty scalar.
//! - [`is_empty_value`] — canonical absence: `null`, `""`, `"0"`,
//!   numeric zero, `false`, `[]`, `{}` are all empty.
//! - [`contains_loose`] — loose membership in a sequence, with scalar
//!   candidates wrapped into a one-element sequence first.
//!
//! All three are pure and deterministic; `loose_eq` is symmetric.

use serde_json::Value;

/// Parse a string as a finite number, the way form inputs carry numbers.
///
/// Leading/trailing whitespace is tolerated. Non-finite results
/// (`inf`, `nan`) are rejected so that pathological strings never
/// compare equal to real numbers.
fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Canonical absence check for a submitted value.
///
/// Empty values: `null`, `false`, numeric zero, `""`, `"0"`, `[]`,
/// `{}`. Everything else is non-empty. Note that the string `"0"` IS
/// empty — unchecked checkboxes and zero-valued selects post `"0"`,
/// and the rule language treats both as "nothing was provided".
pub fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Coercive equality between two submitted values.
///
/// Rules, in precedence order:
///
/// 1. `null == null`; `null` equals anything empty per
///    [`is_empty_value`] (`""`, `0`, `false`, `[]`).
/// 2. A boolean on either side compares both sides by truthiness
///    (`false == "0" == 0`, `true == "1" == 1`).
/// 3. Numbers compare numerically; a number against a numeric string
///    compares numerically (`5 == "5"`, `"1.0" == 1`).
/// 4. Two strings compare numerically when both are numeric
///    (`"01" == "1"`), exactly otherwise.
/// 5. Sequences compare pairwise-loose; mappings compare by key set
///    with loose values. A sequence or mapping never equals a scalar.
///
/// Symmetric: `loose_eq(a, b) == loose_eq(b, a)` for all inputs.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, other) | (other, Value::Null) => is_empty_value(other),

        // Truthiness comparison when either side is a boolean.
        (Value::Bool(_), other) | (other, Value::Bool(_)) if !other.is_array() && !other.is_object() => {
            !is_empty_value(a) == !is_empty_value(b)
        }

        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match (n.as_f64(), parse_numeric(s)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::String(x), Value::String(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some(nx), Some(ny)) => nx == ny,
            _ => x == y,
        },

        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| loose_eq(x, y)))
        }

        _ => false,
    }
}

/// Loose membership: is `needle` an element of `candidate` treated as
/// a sequence?
///
/// A mapping contributes its values; a scalar candidate is wrapped
/// into a one-element sequence, so `contains_loose("other", "other")`
/// holds. `null` wraps into the empty sequence and contains nothing.
/// Element comparison uses [`loose_eq`].
pub fn contains_loose(candidate: &Value, needle: &Value) -> bool {
    match candidate {
        Value::Null => false,
        Value::Array(items) => items.iter().any(|item| loose_eq(item, needle)),
        Value::Object(map) => map.values().any(|item| loose_eq(item, needle)),
        scalar => loose_eq(scalar, needle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    // ── is_empty_value ───────────────────────────────────────────────

    #[test]
    fn empty_values() {
        for v in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(is_empty_value(&v), "{v} should be empty");
        }
    }

    #[test]
    fn non_empty_values() {
        for v in [
            json!(true),
            json!(1),
            json!(-1),
            json!("x"),
            json!("00"),
            json!(" "),
            json!([0]),
            json!({"a": null}),
        ] {
            assert!(!is_empty_value(&v), "{v} should not be empty");
        }
    }

    // ── loose_eq ─────────────────────────────────────────────────────

    #[test]
    fn numeric_string_equals_number() {
        assert!(loose_eq(&json!("5"), &json!(5)));
        assert!(loose_eq(&json!(5), &json!("5")));
        assert!(loose_eq(&json!("1.0"), &json!(1)));
        assert!(loose_eq(&json!(" 42 "), &json!(42)));
        assert!(!loose_eq(&json!("5x"), &json!(5)));
    }

    #[test]
    fn zero_string_zero_and_false_interchangeable() {
        assert!(loose_eq(&json!("0"), &json!(0)));
        assert!(loose_eq(&json!("0"), &json!(false)));
        assert!(loose_eq(&json!(0), &json!(false)));
        assert!(loose_eq(&json!(1), &json!(true)));
        assert!(loose_eq(&json!("1"), &json!(true)));
    }

    #[test]
    fn null_equals_empty_scalars_only() {
        assert!(loose_eq(&json!(null), &json!(null)));
        assert!(loose_eq(&json!(null), &json!("")));
        assert!(loose_eq(&json!(null), &json!(0)));
        assert!(loose_eq(&json!(null), &json!(false)));
        assert!(loose_eq(&json!(null), &json!([])));
        assert!(!loose_eq(&json!(null), &json!("x")));
        assert!(!loose_eq(&json!(null), &json!(1)));
    }

    #[test]
    fn numeric_strings_compare_numerically() {
        assert!(loose_eq(&json!("01"), &json!("1")));
        assert!(loose_eq(&json!("1e1"), &json!("10")));
        assert!(!loose_eq(&json!("abc"), &json!("abd")));
        assert!(loose_eq(&json!("abc"), &json!("abc")));
    }

    #[test]
    fn sequences_compare_pairwise() {
        assert!(loose_eq(&json!(["1", 2]), &json!([1, "2"])));
        assert!(!loose_eq(&json!([1, 2]), &json!([1])));
        assert!(!loose_eq(&json!([1]), &json!(1)));
    }

    #[test]
    fn mappings_compare_by_key_set() {
        assert!(loose_eq(&json!({"a": "1"}), &json!({"a": 1})));
        assert!(!loose_eq(&json!({"a": 1}), &json!({"b": 1})));
        assert!(!loose_eq(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn infinity_and_nan_strings_never_numeric() {
        assert!(!loose_eq(&json!("inf"), &json!(1)));
        assert!(!loose_eq(&json!("nan"), &json!(0)));
        // "nan" is a plain non-empty string, not a number.
        assert!(!is_empty_value(&json!("nan")));
    }

    // ── contains_loose ───────────────────────────────────────────────

    #[test]
    fn sequence_membership_is_loose() {
        assert!(contains_loose(&json!(["other", "x"]), &json!("other")));
        assert!(contains_loose(&json!(["5"]), &json!(5)));
        assert!(!contains_loose(&json!(["x"]), &json!("other")));
    }

    #[test]
    fn scalar_candidate_wraps_to_singleton() {
        assert!(contains_loose(&json!("other"), &json!("other")));
        assert!(!contains_loose(&json!("x"), &json!("other")));
        assert!(!contains_loose(&json!(null), &json!("other")));
    }

    #[test]
    fn mapping_candidate_contributes_values() {
        assert!(contains_loose(&json!({"k": "other"}), &json!("other")));
        assert!(!contains_loose(&json!({"other": "k"}), &json!("other")));
    }

    // ── property tests ───────────────────────────────────────────────

    fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[ -~]{0,8}".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn loose_eq_is_symmetric(a in arb_scalar(), b in arb_scalar()) {
            prop_assert_eq!(loose_eq(&a, &b), loose_eq(&b, &a));
        }

        #[test]
        fn loose_eq_is_reflexive(a in arb_scalar()) {
            prop_assert!(loose_eq(&a, &a));
        }

        #[test]
        fn empty_check_is_deterministic(a in arb_scalar()) {
            prop_assert_eq!(is_empty_value(&a), is_empty_value(&a));
        }
    }
}
