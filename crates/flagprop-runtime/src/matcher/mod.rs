//! Property matcher
//!
//! Evaluates one [`PropertyCondition`] against one [`PropertyContext`].
//! Dispatch is an exhaustive match over [`OperatorKind`], one comparison
//! routine per operator family:
//!
//! - `presence`: `is_set`, `is_not_set`
//! - `equality`: `exact`, `is_not`
//! - `containment`: `icontains`, `not_icontains`, `regex`, `not_regex`
//! - `ordering`: `gt`, `gte`, `lt`, `lte`
//! - `date`: `is_date_exact`, `is_date_before`, `is_date_after`
//! - `version`: `semver_*`
//! - `dependency`: `flag_evaluates_to`, `in_cohort`, `not_in_cohort`
//!
//! Data problems (bad regex, unparseable date, wrong JSON shape, missing
//! property) never escape as errors: they become
//! `MatchResult::Indeterminate` with a reason tag.

mod containment;
mod date;
mod dependency;
mod equality;
mod ordering;
mod presence;
mod version;

use crate::context::PropertyContext;
use crate::resolver::{CohortResolver, FlagResolver, Unresolvable};
use chrono::{DateTime, Utc};
use flagprop_core::{IndeterminateReason, MatchResult, OperatorKind, PropertyCondition, Value};
use std::cmp::Ordering;

static UNRESOLVABLE: Unresolvable = Unresolvable;

/// Matches single conditions at a fixed evaluation time
#[derive(Clone, Copy)]
pub struct PropertyMatcher<'a> {
    evaluation_time: DateTime<Utc>,
    flags: &'a dyn FlagResolver,
    cohorts: &'a dyn CohortResolver,
}

impl<'a> PropertyMatcher<'a> {
    /// Create a matcher; relative dates resolve against `evaluation_time`.
    ///
    /// Without resolvers, dependency operators are indeterminate.
    pub fn new(evaluation_time: DateTime<Utc>) -> Self {
        Self {
            evaluation_time,
            flags: &UNRESOLVABLE,
            cohorts: &UNRESOLVABLE,
        }
    }

    pub fn with_flag_resolver(mut self, flags: &'a dyn FlagResolver) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_cohort_resolver(mut self, cohorts: &'a dyn CohortResolver) -> Self {
        self.cohorts = cohorts;
        self
    }

    pub fn evaluation_time(&self) -> DateTime<Utc> {
        self.evaluation_time
    }

    /// Match a condition against a context
    pub fn match_condition(
        &self,
        condition: &PropertyCondition,
        context: &PropertyContext,
    ) -> MatchResult {
        let result = self.match_operator(condition, context);
        let result = if condition.negation {
            result.invert()
        } else {
            result
        };

        if let MatchResult::Indeterminate(reason) = result {
            tracing::debug!(
                "Condition {} {} is indeterminate: {}",
                condition.key,
                condition.operator,
                reason
            );
        }

        result
    }

    fn match_operator(&self, condition: &PropertyCondition, context: &PropertyContext) -> MatchResult {
        use OperatorKind::*;

        let target = &condition.value;
        let subject = context.value_of(&condition.key);

        match condition.operator {
            IsSet => presence::is_set(subject),
            IsNotSet => presence::is_set(subject).invert(),

            Exact => with_subject(subject, |s| equality::exact(s, target)),
            IsNot => with_subject(subject, |s| equality::exact(s, target)).invert(),

            Icontains => with_subject(subject, |s| containment::icontains(s, target)),
            NotIcontains => with_subject(subject, |s| containment::icontains(s, target)).invert(),
            Regex => with_subject(subject, |s| containment::regex(s, target)),
            NotRegex => with_subject(subject, |s| containment::regex(s, target)).invert(),

            Gt => ordered(subject, target, |o| o == Ordering::Greater),
            Gte => ordered(subject, target, |o| o != Ordering::Less),
            Lt => ordered(subject, target, |o| o == Ordering::Less),
            Lte => ordered(subject, target, |o| o != Ordering::Greater),

            IsDateExact => with_subject(subject, |s| {
                date::compare(s, target, self.evaluation_time, date::DateCheck::Exact)
            }),
            IsDateBefore => with_subject(subject, |s| {
                date::compare(s, target, self.evaluation_time, date::DateCheck::Before)
            }),
            IsDateAfter => with_subject(subject, |s| {
                date::compare(s, target, self.evaluation_time, date::DateCheck::After)
            }),

            SemverEq => semver_ordered(subject, target, |o| o == Ordering::Equal),
            SemverNeq => semver_ordered(subject, target, |o| o != Ordering::Equal),
            SemverGt => semver_ordered(subject, target, |o| o == Ordering::Greater),
            SemverGte => semver_ordered(subject, target, |o| o != Ordering::Less),
            SemverLt => semver_ordered(subject, target, |o| o == Ordering::Less),
            SemverLte => semver_ordered(subject, target, |o| o != Ordering::Greater),
            SemverTilde => with_subject(subject, |s| version::tilde(s, target)),
            SemverCaret => with_subject(subject, |s| version::caret(s, target)),
            SemverWildcard => with_subject(subject, |s| version::wildcard(s, target)),

            FlagEvaluatesTo => dependency::flag_evaluates_to(self.flags, condition, context),
            InCohort => dependency::in_cohort(self.cohorts, condition, context),
            NotInCohort => dependency::in_cohort(self.cohorts, condition, context).invert(),
        }
    }
}

/// Run `f` on a present, non-null subject
fn with_subject(subject: Option<&Value>, f: impl FnOnce(&Value) -> MatchResult) -> MatchResult {
    match subject {
        Some(value) => f(value),
        None => MatchResult::Indeterminate(IndeterminateReason::MissingProperty),
    }
}

fn ordered(
    subject: Option<&Value>,
    target: &Value,
    accept: impl FnOnce(Ordering) -> bool,
) -> MatchResult {
    with_subject(subject, |s| match ordering::compare(s, target) {
        Ok(order) => MatchResult::from_bool(accept(order)),
        Err(reason) => MatchResult::Indeterminate(reason),
    })
}

fn semver_ordered(
    subject: Option<&Value>,
    target: &Value,
    accept: impl FnOnce(Ordering) -> bool,
) -> MatchResult {
    with_subject(subject, |s| match version::compare(s, target) {
        Ok(order) => MatchResult::from_bool(accept(order)),
        Err(reason) => MatchResult::Indeterminate(reason),
    })
}
