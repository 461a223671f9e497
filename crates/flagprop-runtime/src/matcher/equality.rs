//! Equality operators (`exact`, `is_not`)

use flagprop_core::{IndeterminateReason, MatchResult, Value};

/// `exact`: subject equals the target, or is one of the target's items
/// when the target is an array. `is_not` is the inverse.
pub(super) fn exact(subject: &Value, target: &Value) -> MatchResult {
    if !subject.is_scalar() {
        return MatchResult::Indeterminate(IndeterminateReason::TypeMismatch);
    }

    match target {
        Value::Array(items) => MatchResult::from_bool(
            items
                .iter()
                .any(|item| scalar_eq(subject, item).unwrap_or(false)),
        ),
        Value::Null | Value::Object(_) => {
            MatchResult::Indeterminate(IndeterminateReason::InvalidValue)
        }
        scalar => match scalar_eq(subject, scalar) {
            Some(eq) => MatchResult::from_bool(eq),
            None => MatchResult::Indeterminate(IndeterminateReason::TypeMismatch),
        },
    }
}

/// Compare two scalars: as exact integers when both sides are integral,
/// numerically when both have a lossless numeric form, otherwise by
/// canonical string (case-sensitive).
pub(super) fn scalar_eq(left: &Value, right: &Value) -> Option<bool> {
    if let (Some(l), Some(r)) = (left.as_integer(), right.as_integer()) {
        return Some(l == r);
    }
    if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
        return Some(l == r);
    }

    match (left.to_canonical_string(), right.to_canonical_string()) {
        (Some(l), Some(r)) => Some(l == r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_strings_case_sensitive() {
        assert_eq!(exact(&Value::from("Pro"), &Value::from("Pro")), MatchResult::Matched);
        assert_eq!(exact(&Value::from("pro"), &Value::from("Pro")), MatchResult::NotMatched);
    }

    #[test]
    fn test_exact_numeric_coercion() {
        assert_eq!(exact(&Value::from("10"), &Value::Number(10.0)), MatchResult::Matched);
        assert_eq!(exact(&Value::from("10.0"), &Value::from("10")), MatchResult::Matched);
        assert_eq!(exact(&Value::Number(3.0), &Value::from("3.5")), MatchResult::NotMatched);
    }

    #[test]
    fn test_exact_long_numeric_ids_are_not_rounded() {
        let subject = Value::from("12345678901234567891");
        let target = Value::from("12345678901234567890");
        assert_eq!(exact(&subject, &target), MatchResult::NotMatched);
        assert_eq!(exact(&target, &target), MatchResult::Matched);
        assert_eq!(
            exact(&Value::from("12345678901234567890"), &Value::from("12345678901234567890.0")),
            MatchResult::NotMatched
        );
    }

    #[test]
    fn test_exact_bool_against_string() {
        assert_eq!(exact(&Value::Bool(true), &Value::from("true")), MatchResult::Matched);
        assert_eq!(exact(&Value::Bool(false), &Value::Bool(true)), MatchResult::NotMatched);
    }

    #[test]
    fn test_exact_array_membership() {
        let target = Value::from(vec!["US", "CA"]);
        assert_eq!(exact(&Value::from("CA"), &target), MatchResult::Matched);
        assert_eq!(exact(&Value::from("DE"), &target), MatchResult::NotMatched);

        let numbers = Value::from(vec![1.0, 2.0]);
        assert_eq!(exact(&Value::from("2"), &numbers), MatchResult::Matched);
        assert_eq!(exact(&Value::from("x"), &Value::Array(vec![])), MatchResult::NotMatched);
    }

    #[test]
    fn test_exact_wrong_shapes() {
        assert_eq!(
            exact(&Value::Array(vec![]), &Value::from("x")),
            MatchResult::Indeterminate(IndeterminateReason::TypeMismatch)
        );
        assert_eq!(
            exact(&Value::from("x"), &Value::Null),
            MatchResult::Indeterminate(IndeterminateReason::InvalidValue)
        );
    }
}
