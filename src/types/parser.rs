//! Raw value parsing and validation
//!
//! Each `DataType` has one parse function, selected by exhaustive match.
//! Absent or empty input is rejected before dispatch, whatever the type.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::data_type::DataType;
use super::errors::{ParseError, ParseResult};
use super::value::{RawValue, Value, DATE_FORMAT, INTERVAL_SEPARATOR};

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

static DATE_SHAPE: OnceLock<Option<Regex>> = OnceLock::new();

/// Compiled `YYYY-MM-DD` shape. `None` only if `DATE_PATTERN` fails to
/// compile, in which case every date string is rejected.
fn date_shape() -> Option<&'static Regex> {
    DATE_SHAPE
        .get_or_init(|| Regex::new(DATE_PATTERN).ok())
        .as_ref()
}

/// Parses a raw value as the given type.
///
/// # Errors
///
/// - `Empty` if `raw` is absent or an empty string
/// - `Malformed` if the input has an accepted shape but bad content
/// - `UnsupportedRepresentation` if the type never accepts this shape
pub fn parse_value(raw: Option<&RawValue>, data_type: DataType) -> ParseResult<Value> {
    let raw = match raw {
        None => return Err(ParseError::empty(data_type)),
        Some(raw) if raw.is_empty_text() => return Err(ParseError::empty(data_type)),
        Some(raw) => raw,
    };

    match data_type {
        DataType::Integer => parse_integer(raw),
        DataType::Real => parse_real(raw),
        DataType::Char => parse_char(raw),
        DataType::String | DataType::File => parse_text(raw, data_type),
        DataType::Date => parse_date(raw),
        DataType::IntInterval => parse_interval(raw),
    }
}

/// Returns whether `raw` parses as `data_type`. Never fails.
pub fn validate_value(raw: Option<&RawValue>, data_type: DataType) -> bool {
    parse_value(raw, data_type).is_ok()
}

/// Parses against a textual type tag.
///
/// Unknown tags fail with `UnknownType`. Emptiness is still checked first.
pub fn parse_tagged(raw: Option<&RawValue>, tag: &str) -> ParseResult<Value> {
    let data_type = tag.parse::<DataType>();
    match (raw, data_type) {
        (None, _) => Err(ParseError::empty_for_tag(tag)),
        (Some(r), _) if r.is_empty_text() => Err(ParseError::empty_for_tag(tag)),
        (Some(_), Err(e)) => Err(e),
        (Some(r), Ok(ty)) => parse_value(Some(r), ty),
    }
}

/// Tag-based counterpart of [`validate_value`]
pub fn validate_tagged(raw: Option<&RawValue>, tag: &str) -> bool {
    parse_tagged(raw, tag).is_ok()
}

fn parse_integer(raw: &RawValue) -> ParseResult<Value> {
    match raw {
        RawValue::Integer(n) => Ok(Value::Integer(*n)),
        RawValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| ParseError::malformed(s.as_str(), DataType::Integer, e.to_string())),
        RawValue::Float(x) if x.fract() == 0.0 && x.is_finite() => {
            if *x >= i64::MIN as f64 && *x < i64::MAX as f64 {
                Ok(Value::Integer(*x as i64))
            } else {
                Err(ParseError::malformed(raw.to_string(), DataType::Integer, "number out of range"))
            }
        }
        RawValue::Float(_) => Err(ParseError::malformed(
            raw.to_string(),
            DataType::Integer,
            "fractional number is not an integer",
        )),
        RawValue::Pair(..) | RawValue::Date(_) | RawValue::Other(_) => {
            Err(ParseError::unsupported(
                raw.to_string(),
                DataType::Integer,
                format!("cannot read an integer from a {}", raw.kind_name()),
            ))
        }
    }
}

fn parse_real(raw: &RawValue) -> ParseResult<Value> {
    match raw {
        RawValue::Float(x) => Ok(Value::Real(*x)),
        RawValue::Integer(n) => Ok(Value::Real(*n as f64)),
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|e| ParseError::malformed(s.as_str(), DataType::Real, e.to_string())),
        RawValue::Pair(..) | RawValue::Date(_) | RawValue::Other(_) => {
            Err(ParseError::unsupported(
                raw.to_string(),
                DataType::Real,
                format!("cannot read a real from a {}", raw.kind_name()),
            ))
        }
    }
}

/// Scalars pass through as their text form; arrays, objects and booleans
/// are not text.
fn parse_text(raw: &RawValue, data_type: DataType) -> ParseResult<Value> {
    match raw {
        RawValue::Other(_) => Err(ParseError::unsupported(
            raw.to_string(),
            data_type,
            format!("cannot read text from a {}", raw.kind_name()),
        )),
        _ => Ok(Value::Text(raw.to_string())),
    }
}

fn parse_char(raw: &RawValue) -> ParseResult<Value> {
    let RawValue::Text(s) = raw else {
        return Err(ParseError::unsupported(
            raw.to_string(),
            DataType::Char,
            format!("cannot read a char from a {}", raw.kind_name()),
        ));
    };

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Char(c)),
        _ => Err(ParseError::malformed(
            s.as_str(),
            DataType::Char,
            "char must be a single character",
        )),
    }
}

fn parse_date(raw: &RawValue) -> ParseResult<Value> {
    match raw {
        RawValue::Date(d) => Ok(Value::Date(*d)),
        RawValue::Text(s) => {
            let invalid = || {
                ParseError::malformed(
                    s.as_str(),
                    DataType::Date,
                    format!("invalid date format: {}, expected 'YYYY-MM-DD'", s),
                )
            };
            if !date_shape().is_some_and(|shape| shape.is_match(s)) {
                return Err(invalid());
            }
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|_| invalid())
        }
        _ => Err(ParseError::unsupported(
            raw.to_string(),
            DataType::Date,
            format!("expected a date string or date value, got {}", raw.kind_name()),
        )),
    }
}

/// Pairs are canonicalized; strings are split on `" to "` and rebuilt
/// without checking that either half is an integer.
fn parse_interval(raw: &RawValue) -> ParseResult<Value> {
    match raw {
        RawValue::Pair(start, end) => Ok(Value::interval(start, end)),
        RawValue::Text(s) => {
            let parts: Vec<&str> = s.split(INTERVAL_SEPARATOR).collect();
            match parts.as_slice() {
                [start, end] => Ok(Value::interval(start, end)),
                _ => Err(ParseError::malformed(
                    s.as_str(),
                    DataType::IntInterval,
                    "int interval must be in 'int to int' format",
                )),
            }
        }
        RawValue::Other(serde_json::Value::Array(_)) => Err(ParseError::malformed(
            raw.to_string(),
            DataType::IntInterval,
            "int interval must be a pair of exactly two integers",
        )),
        _ => Err(ParseError::unsupported(
            raw.to_string(),
            DataType::IntInterval,
            "expected a pair of two integers or a string in 'int to int' format",
        )),
    }
}
