//! String containment operators (`icontains`, `regex` and their negations)
//!
//! Both sides are compared through their canonical string form, so numbers
//! and booleans participate (`42` contains `"4"`).

use dashmap::DashMap;
use flagprop_core::{IndeterminateReason, MatchResult, Value};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Upper bound on compiled pattern size
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Patterns kept compiled; the cache is dropped wholesale when full
const REGEX_CACHE_CAPACITY: usize = 1024;

/// Compiled patterns by source text. `None` marks a pattern that failed to
/// compile.
static REGEX_CACHE: Lazy<DashMap<String, Option<Regex>>> = Lazy::new(DashMap::new);

pub(super) fn icontains(subject: &Value, target: &Value) -> MatchResult {
    let (haystack, needle) = match operands(subject, target) {
        Ok(pair) => pair,
        Err(reason) => return MatchResult::Indeterminate(reason),
    };

    MatchResult::from_bool(haystack.to_lowercase().contains(&needle.to_lowercase()))
}

pub(super) fn regex(subject: &Value, target: &Value) -> MatchResult {
    let (haystack, pattern) = match operands(subject, target) {
        Ok(pair) => pair,
        Err(reason) => return MatchResult::Indeterminate(reason),
    };

    match compiled(&pattern) {
        Some(re) => MatchResult::from_bool(re.is_match(&haystack)),
        None => MatchResult::Indeterminate(IndeterminateReason::InvalidRegex),
    }
}

/// Compile `pattern`, reusing an earlier compilation when there is one
fn compiled(pattern: &str) -> Option<Regex> {
    if let Some(entry) = REGEX_CACHE.get(pattern) {
        return entry.value().clone();
    }

    let re = match RegexBuilder::new(pattern).size_limit(REGEX_SIZE_LIMIT).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!("Invalid regex {:?}: {}", pattern, e);
            None
        }
    };

    if REGEX_CACHE.len() >= REGEX_CACHE_CAPACITY {
        REGEX_CACHE.clear();
    }
    REGEX_CACHE.insert(pattern.to_string(), re.clone());
    re
}

fn operands(subject: &Value, target: &Value) -> Result<(String, String), IndeterminateReason> {
    let haystack = subject
        .to_canonical_string()
        .ok_or(IndeterminateReason::TypeMismatch)?;
    let needle = target
        .to_canonical_string()
        .ok_or(IndeterminateReason::InvalidValue)?;
    Ok((haystack, needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icontains_case_insensitive() {
        assert_eq!(
            icontains(&Value::from("Alice@Example.com"), &Value::from("@example.")),
            MatchResult::Matched
        );
        assert_eq!(icontains(&Value::from("alice"), &Value::from("bob")), MatchResult::NotMatched);
    }

    #[test]
    fn test_icontains_canonical_numbers() {
        assert_eq!(icontains(&Value::Number(1024.0), &Value::from("02")), MatchResult::Matched);
        assert_eq!(icontains(&Value::Number(2.0), &Value::from("2.0")), MatchResult::NotMatched);
        assert_eq!(icontains(&Value::Bool(true), &Value::from("TRU")), MatchResult::Matched);
    }

    #[test]
    fn test_icontains_wrong_shapes() {
        assert_eq!(
            icontains(&Value::Array(vec![]), &Value::from("x")),
            MatchResult::Indeterminate(IndeterminateReason::TypeMismatch)
        );
        assert_eq!(
            icontains(&Value::from("x"), &Value::from(vec!["x"])),
            MatchResult::Indeterminate(IndeterminateReason::InvalidValue)
        );
    }

    #[test]
    fn test_regex() {
        assert_eq!(
            regex(&Value::from("user-1234"), &Value::from(r"^user-\d+$")),
            MatchResult::Matched
        );
        assert_eq!(regex(&Value::from("admin"), &Value::from("^user")), MatchResult::NotMatched);
    }

    #[test]
    fn test_regex_invalid_pattern() {
        assert_eq!(
            regex(&Value::from("abc"), &Value::from("(unclosed")),
            MatchResult::Indeterminate(IndeterminateReason::InvalidRegex)
        );
    }

    #[test]
    fn test_compiled_patterns_are_reused() {
        let pattern = r"^cached-\d{3}$";
        assert_eq!(regex(&Value::from("cached-123"), &Value::from(pattern)), MatchResult::Matched);
        assert!(REGEX_CACHE.get(pattern).is_some_and(|entry| entry.is_some()));
        assert_eq!(regex(&Value::from("cached-12"), &Value::from(pattern)), MatchResult::NotMatched);

        let broken = "[cached";
        assert!(regex(&Value::from("x"), &Value::from(broken)).is_indeterminate());
        assert!(REGEX_CACHE.get(broken).is_some_and(|entry| entry.is_none()));
        assert_eq!(
            regex(&Value::from("x"), &Value::from(broken)),
            MatchResult::Indeterminate(IndeterminateReason::InvalidRegex)
        );
    }
}
