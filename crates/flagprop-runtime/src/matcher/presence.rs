//! Presence operators (`is_set`, `is_not_set`)
//!
//! The subject arrives already filtered by `PropertyContext::value_of`, so an
//! explicit null reaches this module as `None`, the same as an absent key.

use flagprop_core::{MatchResult, Value};

pub(super) fn is_set(subject: Option<&Value>) -> MatchResult {
    MatchResult::from_bool(subject.is_some())
}
