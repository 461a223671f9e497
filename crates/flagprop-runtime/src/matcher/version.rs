//! Semantic version operators (`semver_*`)
//!
//! Versions are read leniently: a leading `v` is dropped and a missing minor
//! or patch component is taken as `0` (`v1.2` is `1.2.0`). Ordering follows
//! semver precedence, so pre-releases sort before their release and build
//! metadata is ignored.

use flagprop_core::{IndeterminateReason, MatchResult, Value};
use semver::Version;
use std::cmp::Ordering;

/// Parse a version string leniently
fn parse_version(input: &str) -> Option<Version> {
    let s = input.trim();
    let s = s
        .strip_prefix('v')
        .or_else(|| s.strip_prefix('V'))
        .unwrap_or(s);

    let split = s.find(|c: char| c == '-' || c == '+').unwrap_or(s.len());
    let (core, suffix) = s.split_at(split);

    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty()
        || parts.len() > 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);

    Version::parse(&padded).ok()
}

/// Semver precedence, ignoring build metadata
fn precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch)
        .cmp(&(b.major, b.minor, b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

fn subject_version(subject: &Value) -> Result<Version, IndeterminateReason> {
    let text = subject
        .to_canonical_string()
        .ok_or(IndeterminateReason::TypeMismatch)?;
    parse_version(&text).ok_or(IndeterminateReason::InvalidSemver)
}

fn target_version(target: &Value) -> Result<Version, IndeterminateReason> {
    let text = target
        .to_canonical_string()
        .ok_or(IndeterminateReason::InvalidValue)?;
    parse_version(&text).ok_or(IndeterminateReason::InvalidSemver)
}

pub(super) fn compare(subject: &Value, target: &Value) -> Result<Ordering, IndeterminateReason> {
    let subject = subject_version(subject)?;
    let target = target_version(target)?;
    Ok(precedence(&subject, &target))
}

/// `~1.2.3` accepts `>=1.2.3, <1.3.0`
pub(super) fn tilde(subject: &Value, target: &Value) -> MatchResult {
    in_range(subject, target, |lower| {
        Some(Version::new(lower.major, lower.minor.checked_add(1)?, 0))
    })
}

/// `^1.2.3` accepts `>=1.2.3, <2.0.0`; the first non-zero component is held
/// fixed (`^0.2.3` < `0.3.0`, `^0.0.3` < `0.0.4`)
pub(super) fn caret(subject: &Value, target: &Value) -> MatchResult {
    in_range(subject, target, |lower| {
        let upper = if lower.major > 0 {
            Version::new(lower.major.checked_add(1)?, 0, 0)
        } else if lower.minor > 0 {
            Version::new(0, lower.minor.checked_add(1)?, 0)
        } else {
            Version::new(0, 0, lower.patch.checked_add(1)?)
        };
        Some(upper)
    })
}

/// `upper` returns `None` when the exclusive bound does not fit in a
/// version component; the range is then reported as an invalid version.
fn in_range(
    subject: &Value,
    target: &Value,
    upper: impl FnOnce(&Version) -> Option<Version>,
) -> MatchResult {
    let subject = match subject_version(subject) {
        Ok(v) => v,
        Err(reason) => return MatchResult::Indeterminate(reason),
    };
    let lower = match target_version(target) {
        Ok(v) => v,
        Err(reason) => return MatchResult::Indeterminate(reason),
    };
    let Some(upper) = upper(&lower) else {
        return MatchResult::Indeterminate(IndeterminateReason::InvalidSemver);
    };

    MatchResult::from_bool(
        precedence(&subject, &lower) != Ordering::Less
            && precedence(&subject, &upper) == Ordering::Less,
    )
}

/// `1.2.*`, `1.*`, `1.x` or `*`: the given leading components must match
pub(super) fn wildcard(subject: &Value, target: &Value) -> MatchResult {
    let subject = match subject_version(subject) {
        Ok(v) => v,
        Err(reason) => return MatchResult::Indeterminate(reason),
    };
    let Some(pattern) = target.to_canonical_string() else {
        return MatchResult::Indeterminate(IndeterminateReason::InvalidValue);
    };
    let Some(prefix) = parse_wildcard(&pattern) else {
        return MatchResult::Indeterminate(IndeterminateReason::InvalidSemver);
    };

    let actual = [subject.major, subject.minor, subject.patch];
    let matched = prefix.iter().zip(actual.iter()).all(|(want, got)| want == got)
        && (prefix.len() == 3 || subject.pre.is_empty());

    MatchResult::from_bool(matched)
}

/// Leading numeric components of a wildcard pattern
fn parse_wildcard(pattern: &str) -> Option<Vec<u64>> {
    let s = pattern.trim();
    let s = s
        .strip_prefix('v')
        .or_else(|| s.strip_prefix('V'))
        .unwrap_or(s);

    let mut prefix = Vec::new();
    let mut wildcard_seen = false;
    for part in s.split('.') {
        match part {
            "*" | "x" | "X" => wildcard_seen = true,
            _ if wildcard_seen => return None,
            _ => prefix.push(part.parse::<u64>().ok()?),
        }
    }

    if prefix.len() > 3 || (!wildcard_seen && prefix.is_empty()) {
        return None;
    }
    Some(prefix)
}
