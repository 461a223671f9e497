//! Injected resolvers for dependency operators
//!
//! `flag_evaluates_to` and `in_cohort` / `not_in_cohort` need information
//! the matcher does not own. Callers pass it in as resolver capabilities so
//! the matcher never reaches back into a flag store.
//!
//! A resolver returns `Ok(None)` when it cannot answer (unknown flag,
//! dependency cycle, unknown cohort) and `Err` when the lookup itself failed.
//! Both end up as an indeterminate outcome for that condition only.

use crate::context::PropertyContext;
use crate::error::Result;
use flagprop_core::Value;

/// Resolves the value another flag evaluates to for the same context
pub trait FlagResolver: Send + Sync {
    fn resolve_flag(&self, flag_key: &str, context: &PropertyContext) -> Result<Option<Value>>;
}

/// Decides cohort membership for a context
pub trait CohortResolver: Send + Sync {
    fn resolve_cohort(&self, cohort_id: &str, context: &PropertyContext) -> Result<Option<bool>>;
}

impl<F> FlagResolver for F
where
    F: Fn(&str, &PropertyContext) -> Result<Option<Value>> + Send + Sync,
{
    fn resolve_flag(&self, flag_key: &str, context: &PropertyContext) -> Result<Option<Value>> {
        self(flag_key, context)
    }
}

impl<F> CohortResolver for F
where
    F: Fn(&str, &PropertyContext) -> Result<Option<bool>> + Send + Sync,
{
    fn resolve_cohort(&self, cohort_id: &str, context: &PropertyContext) -> Result<Option<bool>> {
        self(cohort_id, context)
    }
}

/// Resolver that never knows the answer
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolvable;

impl FlagResolver for Unresolvable {
    fn resolve_flag(&self, _flag_key: &str, _context: &PropertyContext) -> Result<Option<Value>> {
        Ok(None)
    }
}

impl CohortResolver for Unresolvable {
    fn resolve_cohort(&self, _cohort_id: &str, _context: &PropertyContext) -> Result<Option<bool>> {
        Ok(None)
    }
}
