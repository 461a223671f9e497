//! Date operators (`is_date_exact`, `is_date_before`, `is_date_after`)
//!
//! Subjects accept RFC 3339 timestamps, naive `YYYY-MM-DD[ T]HH:MM[:SS[.f]]`
//! datetimes (read as UTC), plain `YYYY-MM-DD` dates and Unix epoch seconds
//! (numbers, or digit strings of at least ten digits).
//! Targets accept the same forms plus relative offsets such as `-7d`, which
//! resolve against the evaluation time passed to the matcher.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use flagprop_core::{IndeterminateReason, MatchResult, Value};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Shortest digit string read as epoch seconds (2001-09-09 onwards)
const MIN_EPOCH_STRING_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DateCheck {
    Exact,
    Before,
    After,
}

/// A parsed point in time; `date_only` when the input carried no time part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Instant {
    at: DateTime<Utc>,
    date_only: bool,
}

pub(super) fn compare(
    subject: &Value,
    target: &Value,
    now: DateTime<Utc>,
    check: DateCheck,
) -> MatchResult {
    let Some(subject) = parse_instant(subject) else {
        return MatchResult::Indeterminate(IndeterminateReason::InvalidDate);
    };
    let Some(target) = parse_target(target, now) else {
        return MatchResult::Indeterminate(IndeterminateReason::InvalidDate);
    };

    let matched = match check {
        DateCheck::Before => subject.at < target.at,
        DateCheck::After => subject.at > target.at,
        // a date-only target matches the whole calendar day
        DateCheck::Exact if target.date_only => subject.at.date_naive() == target.at.date_naive(),
        DateCheck::Exact => subject.at == target.at,
    };

    MatchResult::from_bool(matched)
}

fn parse_target(value: &Value, now: DateTime<Utc>) -> Option<Instant> {
    if let Value::String(s) = value {
        if let Some(at) = parse_relative(s.trim(), now) {
            return Some(Instant {
                at,
                date_only: false,
            });
        }
    }
    parse_instant(value)
}

fn parse_instant(value: &Value) -> Option<Instant> {
    match value {
        Value::Number(secs) => from_epoch(*secs),
        Value::String(s) => parse_str(s.trim()),
        _ => None,
    }
}

fn parse_str(s: &str) -> Option<Instant> {
    if s.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(Instant {
            at: at.with_timezone(&Utc),
            date_only: false,
        });
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Instant {
                at: naive.and_utc(),
                date_only: false,
            });
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Instant {
            at: date.and_hms_opt(0, 0, 0)?.and_utc(),
            date_only: true,
        });
    }

    parse_epoch_str(s)
}

/// Epoch seconds written as a string. Short digit runs such as `"2024"`
/// are rejected: they are far more likely a year than a 1970 timestamp.
fn parse_epoch_str(s: &str) -> Option<Instant> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, "0"));
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if whole.len() < MIN_EPOCH_STRING_DIGITS || !digits(whole) || !digits(fraction) {
        return None;
    }
    s.parse::<f64>().ok().and_then(from_epoch)
}

fn from_epoch(secs: f64) -> Option<Instant> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    let at = DateTime::from_timestamp(whole as i64, nanos)?;
    Some(Instant {
        at,
        date_only: false,
    })
}

/// `-<N><unit>` (or `<N><unit>`), unit one of `h`, `d`, `w`, `m`, `y`
fn parse_relative(s: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let body = s.strip_prefix('-').unwrap_or(s);
    let unit = body.chars().last()?;
    let digits = &body[..body.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u32 = digits.parse().ok()?;

    match unit {
        'h' => now.checked_sub_signed(TimeDelta::try_hours(amount.into())?),
        'd' => now.checked_sub_signed(TimeDelta::try_days(amount.into())?),
        'w' => now.checked_sub_signed(TimeDelta::try_weeks(amount.into())?),
        'm' => now.checked_sub_months(Months::new(amount)),
        'y' => now.checked_sub_months(Months::new(amount.checked_mul(12)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        for input in [
            "2024-03-01T08:30:00Z",
            "2024-03-01T10:30:00+02:00",
            "2024-03-01T08:30:00",
            "2024-03-01 08:30:00",
            "2024-03-01T08:30",
        ] {
            let parsed = parse_str(input).unwrap_or_else(|| panic!("failed to parse {}", input));
            assert_eq!(parsed.at, expected, "{}", input);
            assert!(!parsed.date_only);
        }

        let date = parse_str("2024-03-01").unwrap();
        assert!(date.date_only);
        assert_eq!(date.at, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_epoch() {
        let parsed = parse_instant(&Value::Number(1_700_000_000.0)).unwrap();
        assert_eq!(parsed.at, DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        assert!(parse_instant(&Value::from("1700000000")).is_some());
        assert!(parse_instant(&Value::from("1700000000.25")).is_some());
    }

    #[test]
    fn test_short_numeric_strings_are_not_epochs() {
        for input in ["2024", "0", "123456789", "-1700000000", "1700000000."] {
            assert!(parse_str(input).is_none(), "{} should not parse", input);
        }
        assert!(parse_instant(&Value::Number(2024.0)).is_some());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_str("not a date").is_none());
        assert!(parse_str("2024-13-45").is_none());
        assert!(parse_str("").is_none());
        assert!(parse_instant(&Value::Bool(true)).is_none());
    }

    #[test]
    fn test_relative() {
        assert_eq!(
            parse_relative("-7d", now()),
            Some(Utc.with_ymd_and_hms(2024, 6, 8, 12, 0, 0).unwrap())
        );
        assert_eq!(
            parse_relative("-3h", now()),
            Some(Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap())
        );
        assert_eq!(
            parse_relative("2w", now()),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(
            parse_relative("-1m", now()),
            Some(Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap())
        );
        assert_eq!(
            parse_relative("-1y", now()),
            Some(Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap())
        );
        assert_eq!(parse_relative("-7x", now()), None);
        assert_eq!(parse_relative("-d", now()), None);
        assert_eq!(parse_relative("2024-01-01", now()), None);
    }

    #[test]
    fn test_compare_before_after() {
        let subject = Value::from("2024-06-10");
        assert_eq!(
            compare(&subject, &Value::from("-3d"), now(), DateCheck::Before),
            MatchResult::Matched
        );
        assert_eq!(
            compare(&subject, &Value::from("-7d"), now(), DateCheck::After),
            MatchResult::Matched
        );
        assert_eq!(
            compare(&subject, &Value::from("2024-06-10T00:00:01Z"), now(), DateCheck::Before),
            MatchResult::Matched
        );
    }

    #[test]
    fn test_compare_exact_date_only_target_matches_day() {
        let subject = Value::from("2024-06-10T18:45:00Z");
        assert_eq!(
            compare(&subject, &Value::from("2024-06-10"), now(), DateCheck::Exact),
            MatchResult::Matched
        );
        assert_eq!(
            compare(&subject, &Value::from("2024-06-10T18:00:00Z"), now(), DateCheck::Exact),
            MatchResult::NotMatched
        );
    }

    #[test]
    fn test_compare_unparseable() {
        assert_eq!(
            compare(&Value::from("yesterday"), &Value::from("-1d"), now(), DateCheck::Before),
            MatchResult::Indeterminate(IndeterminateReason::InvalidDate)
        );
        assert_eq!(
            compare(&Value::from("2024-01-01"), &Value::from("soon"), now(), DateCheck::After),
            MatchResult::Indeterminate(IndeterminateReason::InvalidDate)
        );
    }
}
