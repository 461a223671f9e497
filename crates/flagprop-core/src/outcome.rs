//! Match outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a condition could not be decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndeterminateReason {
    /// Property absent (or null) but the operator needs a value
    MissingProperty,
    /// Subject and target cannot be compared under this operator
    TypeMismatch,
    /// Target value has the wrong shape for the operator
    InvalidValue,
    InvalidRegex,
    InvalidDate,
    InvalidSemver,
    /// Flag resolver could not produce a value (unknown flag, cycle)
    FlagUnresolved,
    /// Cohort resolver could not decide membership
    CohortUnresolved,
    /// A resolver returned an error
    ResolverFailed,
}

impl IndeterminateReason {
    /// Machine-readable tag
    pub fn as_str(&self) -> &'static str {
        match self {
            IndeterminateReason::MissingProperty => "missing_property",
            IndeterminateReason::TypeMismatch => "type_mismatch",
            IndeterminateReason::InvalidValue => "invalid_value",
            IndeterminateReason::InvalidRegex => "invalid_regex",
            IndeterminateReason::InvalidDate => "invalid_date",
            IndeterminateReason::InvalidSemver => "invalid_semver",
            IndeterminateReason::FlagUnresolved => "flag_unresolved",
            IndeterminateReason::CohortUnresolved => "cohort_unresolved",
            IndeterminateReason::ResolverFailed => "resolver_failed",
        }
    }
}

impl fmt::Display for IndeterminateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state result of matching a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum MatchResult {
    Matched,
    NotMatched,
    Indeterminate(IndeterminateReason),
}

impl MatchResult {
    pub fn from_bool(matched: bool) -> Self {
        if matched {
            MatchResult::Matched
        } else {
            MatchResult::NotMatched
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, MatchResult::Indeterminate(_))
    }

    /// Swap `Matched` and `NotMatched`; indeterminate stays indeterminate.
    pub fn invert(self) -> Self {
        match self {
            MatchResult::Matched => MatchResult::NotMatched,
            MatchResult::NotMatched => MatchResult::Matched,
            other => other,
        }
    }

    /// Reporting rank: `Indeterminate` > `NotMatched` > `Matched`
    pub fn severity(&self) -> u8 {
        match self {
            MatchResult::Matched => 0,
            MatchResult::NotMatched => 1,
            MatchResult::Indeterminate(_) => 2,
        }
    }

    /// The more severe of two results; ties keep `self`.
    pub fn worst(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Matched => f.write_str("matched"),
            MatchResult::NotMatched => f.write_str("not_matched"),
            MatchResult::Indeterminate(reason) => write!(f, "indeterminate({})", reason),
        }
    }
}
