//! Dependency operators (`flag_evaluates_to`, `in_cohort`, `not_in_cohort`)
//!
//! The answer comes from an injected resolver. Whatever goes wrong inside a
//! resolver (unresolved, error, panic) stays local to the condition being
//! matched and is reported as indeterminate.

use super::equality::scalar_eq;
use crate::context::PropertyContext;
use crate::error::{ResolverError, Result};
use crate::resolver::{CohortResolver, FlagResolver};
use flagprop_core::{IndeterminateReason, MatchResult, PropertyCondition, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// `flag_evaluates_to`: `key` names the flag, `value` the expected outcome.
///
/// `true` accepts any enabled outcome (boolean `true` or a variant key),
/// `false` accepts a disabled flag, a string accepts that exact variant.
pub(super) fn flag_evaluates_to(
    resolver: &dyn FlagResolver,
    condition: &PropertyCondition,
    context: &PropertyContext,
) -> MatchResult {
    let resolved = guarded(&condition.key, || resolver.resolve_flag(&condition.key, context));

    let actual = match resolved {
        Ok(Some(value)) => value,
        Ok(None) => return MatchResult::Indeterminate(IndeterminateReason::FlagUnresolved),
        Err(e) => {
            tracing::warn!("Flag resolver failed for '{}': {}", condition.key, e);
            return MatchResult::Indeterminate(IndeterminateReason::ResolverFailed);
        }
    };

    match &condition.value {
        Value::Bool(expected) => MatchResult::from_bool(is_enabled(&actual) == *expected),
        Value::String(variant) => match &actual {
            Value::String(actual) => MatchResult::from_bool(actual == variant),
            other => MatchResult::from_bool(
                scalar_eq(other, &condition.value).unwrap_or(false),
            ),
        },
        _ => MatchResult::Indeterminate(IndeterminateReason::InvalidValue),
    }
}

/// `in_cohort`: `value` is the cohort id (number or string)
pub(super) fn in_cohort(
    resolver: &dyn CohortResolver,
    condition: &PropertyCondition,
    context: &PropertyContext,
) -> MatchResult {
    let Some(cohort_id) = condition.value.to_canonical_string() else {
        return MatchResult::Indeterminate(IndeterminateReason::InvalidValue);
    };

    match guarded(&cohort_id, || resolver.resolve_cohort(&cohort_id, context)) {
        Ok(Some(member)) => MatchResult::from_bool(member),
        Ok(None) => MatchResult::Indeterminate(IndeterminateReason::CohortUnresolved),
        Err(e) => {
            tracing::warn!("Cohort resolver failed for '{}': {}", cohort_id, e);
            MatchResult::Indeterminate(IndeterminateReason::ResolverFailed)
        }
    }
}

fn is_enabled(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(variant) => !variant.is_empty(),
        _ => false,
    }
}

/// Run a resolver call, turning a panic into `ResolverError::Panicked`
fn guarded<T>(subject: &str, call: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(ResolverError::Panicked(format!("{}: {}", subject, message)))
    })
}
