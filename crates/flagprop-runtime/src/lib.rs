//! flagprop Runtime - Property matching for feature-flag targeting
//!
//! This crate decides whether a property context satisfies targeting
//! conditions:
//! - [`PropertyMatcher`] evaluates one condition to a tri-state [`MatchResult`]
//! - [`ConditionEvaluator`] combines conditions (AND) and groups (OR)
//! - Flag and cohort lookups are injected through [`FlagResolver`] and
//!   [`CohortResolver`]
//!
//! Everything here is synchronous and free of shared mutable state.
//!
//! [`MatchResult`]: flagprop_core::MatchResult

pub mod context;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod resolver;

// Re-export main types
pub use context::PropertyContext;
pub use error::{ResolverError, Result};
pub use evaluator::{
    ConditionEvaluator, ConditionGroup, ConditionTrace, EvaluationPolicy, GroupEvaluation,
    TargetingOutcome,
};
pub use matcher::PropertyMatcher;
pub use resolver::{CohortResolver, FlagResolver, Unresolvable};
