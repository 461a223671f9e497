//! Condition evaluation
//!
//! Conditions inside a group are combined with AND, groups with OR, the
//! same shape as flag targeting groups:
//!
//! ```json
//! {"groups": [{"properties": [{"key": "plan", "operator": "exact", "value": "pro"}]}]}
//! ```
//!
//! How an indeterminate condition affects its group is controlled by
//! [`EvaluationPolicy`]. In both modes an indeterminate outcome is reported
//! as such and never folded into `NotMatched`.

use crate::context::PropertyContext;
use crate::matcher::PropertyMatcher;
use flagprop_core::{MatchResult, OperatorKind, PropertyCondition};
use serde::{Deserialize, Serialize};

/// Caller-supplied handling of indeterminate conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPolicy {
    /// Stop at the first condition that is not `Matched` and let it decide
    /// the group. When false, every condition is evaluated and the group
    /// reports its most severe outcome.
    pub exclude_on_indeterminate: bool,
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        Self {
            exclude_on_indeterminate: true,
        }
    }
}

impl EvaluationPolicy {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            exclude_on_indeterminate: false,
        }
    }
}

/// A set of conditions combined with AND
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    #[serde(default)]
    pub properties: Vec<PropertyCondition>,
}

impl ConditionGroup {
    pub fn new(properties: Vec<PropertyCondition>) -> Self {
        Self { properties }
    }
}

/// Outcome of one condition within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTrace {
    pub key: String,
    pub operator: OperatorKind,
    pub result: MatchResult,
}

/// Outcome of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEvaluation {
    /// Group outcome under the policy it was evaluated with
    pub result: MatchResult,
    /// Conditions evaluated, in order
    pub traces: Vec<ConditionTrace>,
    /// False when evaluation stopped early
    pub complete: bool,
}

impl GroupEvaluation {
    /// Group verdict for callers that treat indeterminate conditions as a
    /// non-blocking pass: every condition was evaluated and none was
    /// `NotMatched`.
    pub fn passes_treating_indeterminate_as_pass(&self) -> bool {
        self.complete
            && self
                .traces
                .iter()
                .all(|t| t.result != MatchResult::NotMatched)
    }

    pub fn indeterminate_count(&self) -> usize {
        self.traces.iter().filter(|t| t.result.is_indeterminate()).count()
    }
}

/// Outcome of a list of groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingOutcome {
    pub result: MatchResult,
    /// Index of the first matching group
    pub matched_group: Option<usize>,
    pub groups: Vec<GroupEvaluation>,
}

/// Evaluates condition groups against contexts
#[derive(Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    matcher: PropertyMatcher<'a>,
    policy: EvaluationPolicy,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(matcher: PropertyMatcher<'a>, policy: EvaluationPolicy) -> Self {
        Self { matcher, policy }
    }

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    pub fn matcher(&self) -> &PropertyMatcher<'a> {
        &self.matcher
    }

    /// AND over a group's conditions. An empty group matches.
    pub fn evaluate_group(
        &self,
        conditions: &[PropertyCondition],
        context: &PropertyContext,
    ) -> GroupEvaluation {
        let mut traces = Vec::with_capacity(conditions.len());
        let mut result = MatchResult::Matched;

        for condition in conditions {
            let outcome = self.matcher.match_condition(condition, context);
            traces.push(ConditionTrace {
                key: condition.key.clone(),
                operator: condition.operator,
                result: outcome,
            });

            if self.policy.exclude_on_indeterminate {
                if outcome != MatchResult::Matched {
                    tracing::debug!(
                        "Group short-circuited at {} {}: {}",
                        condition.key,
                        condition.operator,
                        outcome
                    );
                    let complete = traces.len() == conditions.len();
                    return GroupEvaluation {
                        result: outcome,
                        traces,
                        complete,
                    };
                }
            } else {
                result = result.worst(outcome);
            }
        }

        GroupEvaluation {
            result,
            traces,
            complete: true,
        }
    }

    /// OR over groups: the first matching group decides. Without a match the
    /// result is indeterminate if any group was, otherwise `NotMatched`.
    /// An empty list of groups does not match.
    pub fn evaluate_groups(
        &self,
        groups: &[ConditionGroup],
        context: &PropertyContext,
    ) -> TargetingOutcome {
        let mut evaluations = Vec::with_capacity(groups.len());
        let mut result = MatchResult::NotMatched;

        for (index, group) in groups.iter().enumerate() {
            let evaluation = self.evaluate_group(&group.properties, context);
            let group_result = evaluation.result;
            evaluations.push(evaluation);

            if group_result.is_matched() {
                return TargetingOutcome {
                    result: MatchResult::Matched,
                    matched_group: Some(index),
                    groups: evaluations,
                };
            }
            result = result.worst(group_result);
        }

        TargetingOutcome {
            result,
            matched_group: None,
            groups: evaluations,
        }
    }

    /// Evaluate the same groups for many contexts
    pub fn evaluate_many(
        &self,
        groups: &[ConditionGroup],
        contexts: &[PropertyContext],
    ) -> Vec<TargetingOutcome> {
        contexts
            .iter()
            .map(|context| self.evaluate_groups(groups, context))
            .collect()
    }
}
