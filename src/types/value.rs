//! Raw input and parsed value representations
//!
//! `RawValue` is what a front-end hands to the parser. `Value` is what a
//! row stores after parsing.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display format for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between interval bounds in the display form
pub const INTERVAL_SEPARATOR: &str = " to ";

/// Unparsed input for a single attribute.
///
/// Deserializes from JSON as: integer, non-integral number,
/// two-element integer array, or string. Any other JSON shape lands in
/// `Other` so the parser, not the request decoder, rejects it. `Date` is
/// only constructed programmatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Pair(i64, i64),
    Text(String),
    Date(NaiveDate),
    /// Must stay last: untagged variants are tried in order
    Other(serde_json::Value),
}

impl RawValue {
    /// Shorthand for a text input
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Text(s.into())
    }

    /// Returns true for an empty text input
    pub fn is_empty_text(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.is_empty())
    }

    /// Returns the representation name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Integer(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::Pair(_, _) => "pair",
            RawValue::Text(_) => "text",
            RawValue::Date(_) => "date",
            RawValue::Other(serde_json::Value::Array(_)) => "array",
            RawValue::Other(serde_json::Value::Bool(_)) => "boolean",
            RawValue::Other(serde_json::Value::Object(_)) => "object",
            RawValue::Other(_) => "json value",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(n) => write!(f, "{}", n),
            RawValue::Float(x) => write!(f, "{:?}", x),
            RawValue::Pair(a, b) => write!(f, "({}, {})", a, b),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            RawValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Integer(n)
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Float(x)
    }
}

impl From<(i64, i64)> for RawValue {
    fn from((start, end): (i64, i64)) -> Self {
        RawValue::Pair(start, end)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(d: NaiveDate) -> Self {
        RawValue::Date(d)
    }
}

/// A parsed attribute value.
///
/// Equality and hashing cover `Real` as well: `-0.0` equals `0.0` and all
/// NaNs equal each other, so rows can live in hash sets.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Char(char),
    /// Text for both `string` and `file` attributes
    Text(String),
    Date(NaiveDate),
    /// Canonical `<start> to <end>` form
    Interval(String),
}

impl Value {
    /// Builds the canonical interval value from two bounds
    pub fn interval(start: impl fmt::Display, end: impl fmt::Display) -> Self {
        Value::Interval(format!("{}{}{}", start, INTERVAL_SEPARATOR, end))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Interval(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    fn real_bits(x: f64) -> u64 {
        if x.is_nan() {
            u64::MAX
        } else if x == 0.0 {
            0
        } else {
            x.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => Self::real_bits(*a) == Self::real_bits(*b),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Interval(a), Value::Interval(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Integer(n) => {
                0u8.hash(state);
                n.hash(state);
            }
            Value::Real(x) => {
                1u8.hash(state);
                Self::real_bits(*x).hash(state);
            }
            Value::Char(c) => {
                2u8.hash(state);
                c.hash(state);
            }
            Value::Text(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            Value::Date(d) => {
                4u8.hash(state);
                d.hash(state);
            }
            Value::Interval(s) => {
                5u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(x) => write!(f, "{:?}", x),
            Value::Char(c) => write!(f, "{}", c),
            Value::Text(s) | Value::Interval(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// Converts a stored value back to the input form the parser accepts,
/// so stored rows can be re-validated.
impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Integer(n) => RawValue::Integer(*n),
            Value::Real(x) => RawValue::Float(*x),
            Value::Char(c) => RawValue::Text(c.to_string()),
            Value::Text(s) | Value::Interval(s) => RawValue::Text(s.clone()),
            Value::Date(d) => RawValue::Date(*d),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_raw_value_from_json() {
        let raw: RawValue = serde_json::from_str("7").unwrap();
        assert_eq!(raw, RawValue::Integer(7));

        let raw: RawValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(raw, RawValue::Float(2.5));

        let raw: RawValue = serde_json::from_str("[1, 10]").unwrap();
        assert_eq!(raw, RawValue::Pair(1, 10));

        let raw: RawValue = serde_json::from_str("\"2024-01-05\"").unwrap();
        assert_eq!(raw, RawValue::text("2024-01-05"));
    }

    #[test]
    fn test_real_equality_is_hash_consistent() {
        assert_eq!(Value::Real(0.0), Value::Real(-0.0));
        assert_eq!(Value::Real(f64::NAN), Value::Real(f64::NAN));
        assert_ne!(Value::Real(1.0), Value::Integer(1));

        let mut set = HashSet::new();
        set.insert(Value::Real(0.0));
        assert!(set.contains(&Value::Real(-0.0)));
    }

    #[test]
    fn test_value_serializes_plain() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(serde_json::to_string(&Value::Date(date)).unwrap(), "\"2024-01-05\"");
        assert_eq!(serde_json::to_string(&Value::Char('x')).unwrap(), "\"x\"");
        assert_eq!(serde_json::to_string(&Value::interval(1, 10)).unwrap(), "\"1 to 10\"");
        assert_eq!(serde_json::to_string(&Value::Integer(3)).unwrap(), "3");
    }

    #[test]
    fn test_display_matches_canonical_forms() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-01-05");
        assert_eq!(Value::interval(-3, 4).to_string(), "-3 to 4");
        assert_eq!(RawValue::Pair(1, 2).to_string(), "(1, 2)");
    }
}
