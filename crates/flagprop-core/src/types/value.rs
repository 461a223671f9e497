//! Property value types
//!
//! The `Value` enum represents any JSON-shaped property value carried by a
//! context or a condition target.
//!
//! Numbers are held as `f64`. JSON integers beyond 2^53 would lose digits
//! there, so they are kept as their decimal `String` instead, and numeric
//! coercion only succeeds when it is lossless.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Largest integer magnitude an `f64` represents exactly
const MAX_SAFE_INTEGER: i128 = 1 << 53;

/// Significant decimal digits that survive a round trip through `f64`
const F64_DECIMAL_DIGITS: usize = 15;

/// Property value type
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value map)
    Object(HashMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical, locale-independent stringification of a scalar.
    ///
    /// Numbers render without trailing zeros (`1.0` -> `"1"`), booleans as
    /// `true`/`false`. Null, arrays and objects have no scalar form.
    pub fn to_canonical_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_finite() => Some(format!("{}", n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric coercion: finite numbers as-is, and strings whose `f64`
    /// reading keeps every digit (integers up to 2^53, decimals with at most
    /// 15 significant digits). `"12345678901234567890"` has no numeric
    /// form here; compare it with [`Value::as_integer`] instead.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::String(s) => {
                let s = s.trim();
                if let Some(i) = parse_integer(s) {
                    return is_safe_integer(i).then_some(i as f64);
                }
                if significant_digits(s) > F64_DECIMAL_DIGITS {
                    return None;
                }
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Exact integer reading: integral numbers up to 2^53 and integer
    /// strings of any length that fit `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Number(n)
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER as f64 =>
            {
                Some(*n as i128)
            }
            Value::String(s) => parse_integer(s.trim()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value is a scalar (string, number or bool)
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::String(_) | Value::Number(_) | Value::Bool(_))
    }
}

/// Optionally signed run of ASCII digits
fn parse_integer(s: &str) -> Option<i128> {
    let digits = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i128>().ok()
}

fn is_safe_integer(i: i128) -> bool {
    i.unsigned_abs() <= MAX_SAFE_INTEGER as u128
}

/// Significant digits of a decimal literal's mantissa
fn significant_digits(s: &str) -> usize {
    let mantissa = s.split(|c: char| c == 'e' || c == 'E').next().unwrap_or("");
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.trim_start_matches('0').trim_end_matches('0').len()
}

fn from_json_number(n: &serde_json::Number) -> Value {
    if n.is_i64() || n.is_u64() {
        let text = n.to_string();
        return match parse_integer(&text) {
            Some(i) if is_safe_integer(i) => Value::Number(i as f64),
            _ => Value::String(text),
        };
    }
    n.as_f64().map(Value::Number).unwrap_or(Value::Null)
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => from_json_number(&n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}
