//! Ordering operators (`gt`, `gte`, `lt`, `lte`)

use flagprop_core::{IndeterminateReason, Value};
use std::cmp::Ordering;

/// Order subject against target.
///
/// Exact integer comparison when both sides are integral, numeric when both
/// have a lossless numeric form, lexicographic when both are strings,
/// indeterminate for anything else.
pub(super) fn compare(subject: &Value, target: &Value) -> Result<Ordering, IndeterminateReason> {
    if !target.is_scalar() {
        return Err(IndeterminateReason::InvalidValue);
    }

    if let (Some(l), Some(r)) = (subject.as_integer(), target.as_integer()) {
        return Ok(l.cmp(&r));
    }
    if let (Some(l), Some(r)) = (subject.as_number(), target.as_number()) {
        return l.partial_cmp(&r).ok_or(IndeterminateReason::TypeMismatch);
    }

    match (subject, target) {
        (Value::String(l), Value::String(r)) => Ok(l.as_str().cmp(r.as_str())),
        _ => Err(IndeterminateReason::TypeMismatch),
    }
}
