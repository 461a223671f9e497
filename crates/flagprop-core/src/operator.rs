//! Property operators
//!
//! `OperatorKind` is the closed set of comparison operators the evaluator
//! understands. Its snake_case wire names must stay identical to the
//! `PropertyOperator` enum in `schema/property_operator.schema.json`; the
//! `flagprop-parity` tool checks this, so keep each variant on its own line.

use crate::canonical::pascal_to_snake;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    // Equality
    Exact,
    IsNot,

    // String containment
    /// Case-insensitive substring
    Icontains,
    NotIcontains,
    Regex,
    NotRegex,

    // Ordering
    Gt,
    Gte,
    Lt,
    Lte,

    // Presence
    IsSet,
    IsNotSet,

    // Dates
    IsDateExact,
    IsDateBefore,
    IsDateAfter,

    // Semantic versions
    SemverEq,
    SemverNeq,
    SemverGt,
    SemverGte,
    SemverLt,
    SemverLte,
    /// `~1.2.3` is `>=1.2.3 <1.3.0`
    SemverTilde,
    /// `^1.2.3` is `>=1.2.3 <2.0.0`
    SemverCaret,
    /// `1.2.*`
    SemverWildcard,

    // Dependencies
    FlagEvaluatesTo,
    InCohort,
    NotInCohort,
}

/// Number of operands an operator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// No operand, only the subject is inspected (`is_set`)
    Zero,
    /// One target value (`exact`, `gte`)
    Single,
    /// Two operands (`between`); only the query layer defines these
    Range,
}

/// Type the target value is expected to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Numeric,
    DateTime,
    Boolean,
    Any,
}

/// Operator family, one comparison routine per family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorFamily {
    Presence,
    Equality,
    Containment,
    Ordering,
    Date,
    Semver,
    FlagDependency,
    Cohort,
}

impl OperatorKind {
    /// Every operator, in declaration order
    pub const ALL: [OperatorKind; 27] = [
        OperatorKind::Exact,
        OperatorKind::IsNot,
        OperatorKind::Icontains,
        OperatorKind::NotIcontains,
        OperatorKind::Regex,
        OperatorKind::NotRegex,
        OperatorKind::Gt,
        OperatorKind::Gte,
        OperatorKind::Lt,
        OperatorKind::Lte,
        OperatorKind::IsSet,
        OperatorKind::IsNotSet,
        OperatorKind::IsDateExact,
        OperatorKind::IsDateBefore,
        OperatorKind::IsDateAfter,
        OperatorKind::SemverEq,
        OperatorKind::SemverNeq,
        OperatorKind::SemverGt,
        OperatorKind::SemverGte,
        OperatorKind::SemverLt,
        OperatorKind::SemverLte,
        OperatorKind::SemverTilde,
        OperatorKind::SemverCaret,
        OperatorKind::SemverWildcard,
        OperatorKind::FlagEvaluatesTo,
        OperatorKind::InCohort,
        OperatorKind::NotInCohort,
    ];

    /// Canonical wire name (matches the serde representation)
    pub fn wire_name(&self) -> &'static str {
        match self {
            OperatorKind::Exact => "exact",
            OperatorKind::IsNot => "is_not",
            OperatorKind::Icontains => "icontains",
            OperatorKind::NotIcontains => "not_icontains",
            OperatorKind::Regex => "regex",
            OperatorKind::NotRegex => "not_regex",
            OperatorKind::Gt => "gt",
            OperatorKind::Gte => "gte",
            OperatorKind::Lt => "lt",
            OperatorKind::Lte => "lte",
            OperatorKind::IsSet => "is_set",
            OperatorKind::IsNotSet => "is_not_set",
            OperatorKind::IsDateExact => "is_date_exact",
            OperatorKind::IsDateBefore => "is_date_before",
            OperatorKind::IsDateAfter => "is_date_after",
            OperatorKind::SemverEq => "semver_eq",
            OperatorKind::SemverNeq => "semver_neq",
            OperatorKind::SemverGt => "semver_gt",
            OperatorKind::SemverGte => "semver_gte",
            OperatorKind::SemverLt => "semver_lt",
            OperatorKind::SemverLte => "semver_lte",
            OperatorKind::SemverTilde => "semver_tilde",
            OperatorKind::SemverCaret => "semver_caret",
            OperatorKind::SemverWildcard => "semver_wildcard",
            OperatorKind::FlagEvaluatesTo => "flag_evaluates_to",
            OperatorKind::InCohort => "in_cohort",
            OperatorKind::NotInCohort => "not_in_cohort",
        }
    }

    /// Look up an operator by wire name
    pub fn from_wire(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.wire_name() == name)
            .ok_or_else(|| {
                log::debug!("Rejected unknown operator wire name: {}", name);
                CoreError::UnknownOperator(name.to_string())
            })
    }

    /// Look up an operator by its PascalCase variant name
    pub fn from_variant_name(name: &str) -> Result<Self> {
        Self::from_wire(&pascal_to_snake(name))
    }

    pub fn family(&self) -> OperatorFamily {
        use OperatorKind::*;
        match self {
            IsSet | IsNotSet => OperatorFamily::Presence,
            Exact | IsNot => OperatorFamily::Equality,
            Icontains | NotIcontains | Regex | NotRegex => OperatorFamily::Containment,
            Gt | Gte | Lt | Lte => OperatorFamily::Ordering,
            IsDateExact | IsDateBefore | IsDateAfter => OperatorFamily::Date,
            SemverEq | SemverNeq | SemverGt | SemverGte | SemverLt | SemverLte | SemverTilde
            | SemverCaret | SemverWildcard => OperatorFamily::Semver,
            FlagEvaluatesTo => OperatorFamily::FlagDependency,
            InCohort | NotInCohort => OperatorFamily::Cohort,
        }
    }

    pub fn arity(&self) -> Arity {
        match self.family() {
            OperatorFamily::Presence => Arity::Zero,
            _ => Arity::Single,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self.family() {
            OperatorFamily::Presence
            | OperatorFamily::Equality
            | OperatorFamily::FlagDependency
            | OperatorFamily::Cohort => ValueType::Any,
            OperatorFamily::Containment | OperatorFamily::Semver => ValueType::String,
            OperatorFamily::Ordering => ValueType::Numeric,
            OperatorFamily::Date => ValueType::DateTime,
        }
    }

    /// Returns true if this operator is the negated form of another
    pub fn is_negated(&self) -> bool {
        matches!(
            self,
            OperatorKind::IsNot
                | OperatorKind::NotIcontains
                | OperatorKind::NotRegex
                | OperatorKind::IsNotSet
                | OperatorKind::SemverNeq
                | OperatorKind::NotInCohort
        )
    }

    /// Returns true if the operator needs the property to carry a value
    pub fn requires_value(&self) -> bool {
        !matches!(
            self.family(),
            OperatorFamily::Presence | OperatorFamily::FlagDependency | OperatorFamily::Cohort
        )
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for OperatorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_wire(s)
    }
}
