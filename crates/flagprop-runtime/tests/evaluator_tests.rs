//! Integration tests for condition groups and targeting outcomes

use chrono::{TimeZone, Utc};
use flagprop_core::{IndeterminateReason, MatchResult, OperatorKind, PropertyCondition, Value};
use flagprop_runtime::{
    ConditionEvaluator, ConditionGroup, EvaluationPolicy, PropertyContext, PropertyMatcher,
};

fn matcher() -> PropertyMatcher<'static> {
    PropertyMatcher::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
}

/// One condition that matches and one that cannot be decided
fn matched_and_indeterminate() -> (Vec<PropertyCondition>, PropertyContext) {
    let conditions = vec![
        PropertyCondition::new("plan", OperatorKind::Exact, "pro"),
        PropertyCondition::new("app_version", OperatorKind::SemverGte, "2.0.0"),
    ];
    let ctx = PropertyContext::new()
        .with("plan", "pro")
        .with("app_version", "not-a-version");
    (conditions, ctx)
}

#[test]
fn test_indeterminate_dominance_with_exclude_policy() {
    let (conditions, ctx) = matched_and_indeterminate();
    let evaluator = ConditionEvaluator::new(matcher(), EvaluationPolicy::strict());

    let evaluation = evaluator.evaluate_group(&conditions, &ctx);
    assert_eq!(
        evaluation.result,
        MatchResult::Indeterminate(IndeterminateReason::InvalidSemver)
    );
    assert!(!evaluation.result.is_matched());
}

#[test]
fn test_indeterminate_as_non_blocking_pass_without_exclude_policy() {
    let (conditions, ctx) = matched_and_indeterminate();
    let evaluator = ConditionEvaluator::new(matcher(), EvaluationPolicy::lenient());

    let evaluation = evaluator.evaluate_group(&conditions, &ctx);
    // still reported as indeterminate, but callers treating it as a pass may proceed
    assert_eq!(
        evaluation.result,
        MatchResult::Indeterminate(IndeterminateReason::InvalidSemver)
    );
    assert!(evaluation.complete);
    assert!(evaluation.passes_treating_indeterminate_as_pass());
    assert_eq!(evaluation.traces[0].result, MatchResult::Matched);
}

#[test]
fn test_strict_group_never_passes_leniently_after_short_circuit() {
    let conditions = vec![
        PropertyCondition::new("missing", OperatorKind::Exact, "x"),
        PropertyCondition::new("plan", OperatorKind::Exact, "enterprise"),
    ];
    let ctx = PropertyContext::new().with("plan", "pro");
    let evaluator = ConditionEvaluator::new(matcher(), EvaluationPolicy::strict());

    let evaluation = evaluator.evaluate_group(&conditions, &ctx);
    assert!(evaluation.result.is_indeterminate());
    assert!(!evaluation.complete);
    assert!(!evaluation.passes_treating_indeterminate_as_pass());
}

#[test]
fn test_lenient_indeterminate_outranks_not_matched_regardless_of_order() {
    let ctx = PropertyContext::new().with("plan", "pro");
    let conditions = vec![
        PropertyCondition::new("plan", OperatorKind::Exact, "free"),
        PropertyCondition::new("missing", OperatorKind::Exact, "x"),
    ];
    let evaluator = ConditionEvaluator::new(matcher(), EvaluationPolicy::lenient());

    let evaluation = evaluator.evaluate_group(&conditions, &ctx);
    assert!(evaluation.result.is_indeterminate());
    assert!(!evaluation.passes_treating_indeterminate_as_pass());
}

#[test]
fn test_flag_targeting_groups_from_json() {
    let groups: Vec<ConditionGroup> = serde_json::from_value(serde_json::json!([
        {
            "properties": [
                {"key": "email", "operator": "icontains", "value": "@acme.com", "type": "person"},
                {"key": "signup_date", "operator": "is_date_after", "value": "-30d", "type": "person"}
            ]
        },
        {
            "properties": [
                {"key": "country", "operator": "exact", "value": ["US", "CA"], "type": "person"}
            ]
        }
    ]))
    .unwrap();

    let evaluator = ConditionEvaluator::new(matcher(), EvaluationPolicy::default());

    let employee = PropertyContext::new()
        .with("email", "jo@ACME.com")
        .with("signup_date", "2024-06-01");
    let outcome = evaluator.evaluate_groups(&groups, &employee);
    assert_eq!(outcome.result, MatchResult::Matched);
    assert_eq!(outcome.matched_group, Some(0));

    let canadian = PropertyContext::new()
        .with("email", "sam@example.org")
        .with("country", "CA");
    let outcome = evaluator.evaluate_groups(&groups, &canadian);
    assert_eq!(outcome.result, MatchResult::Matched);
    assert_eq!(outcome.matched_group, Some(1));

    let unknown = PropertyContext::new().with("email", "sam@example.org");
    let outcome = evaluator.evaluate_groups(&groups, &unknown);
    assert_eq!(
        outcome.result,
        MatchResult::Indeterminate(IndeterminateReason::MissingProperty)
    );
}

#[test]
fn test_evaluate_many() {
    let groups = vec![ConditionGroup::new(vec![PropertyCondition::new(
        "seats",
        OperatorKind::Gt,
        10.0,
    )])];
    let contexts = vec![
        PropertyContext::new().with("seats", 50.0),
        PropertyContext::new().with("seats", "5"),
        PropertyContext::new().with("seats", Value::Null),
    ];

    let evaluator = ConditionEvaluator::new(matcher(), EvaluationPolicy::default());
    let results: Vec<MatchResult> = evaluator
        .evaluate_many(&groups, &contexts)
        .into_iter()
        .map(|outcome| outcome.result)
        .collect();

    assert_eq!(
        results,
        vec![
            MatchResult::Matched,
            MatchResult::NotMatched,
            MatchResult::Indeterminate(IndeterminateReason::MissingProperty),
        ]
    );
}

#[test]
fn test_sibling_conditions_survive_failing_resolver() {
    let cohorts = |_: &str, _: &PropertyContext| -> flagprop_runtime::Result<Option<bool>> {
        Err(flagprop_runtime::ResolverError::LookupFailed("connection reset".to_string()))
    };
    let matcher = matcher().with_cohort_resolver(&cohorts);
    let evaluator = ConditionEvaluator::new(matcher, EvaluationPolicy::lenient());

    let conditions = vec![
        PropertyCondition::new("id", OperatorKind::InCohort, 3.0),
        PropertyCondition::new("plan", OperatorKind::Exact, "pro"),
    ];
    let ctx = PropertyContext::new().with("plan", "pro");

    let evaluation = evaluator.evaluate_group(&conditions, &ctx);
    assert_eq!(evaluation.traces.len(), 2);
    assert_eq!(
        evaluation.traces[0].result,
        MatchResult::Indeterminate(IndeterminateReason::ResolverFailed)
    );
    assert_eq!(evaluation.traces[1].result, MatchResult::Matched);
}
