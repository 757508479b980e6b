//! Supported attribute types
//!
//! Tags accepted on input:
//! - integer (alias: int)
//! - real
//! - char
//! - string (alias: str)
//! - date
//! - int_interval
//! - file

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{ParseError, ParseResult};
use super::parser;
use super::value::{RawValue, Value};

/// Declared type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DataType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Real,
    /// Exactly one character
    Char,
    /// UTF-8 text
    String,
    /// Calendar date, rendered `YYYY-MM-DD`
    Date,
    /// Integer interval, rendered `<start> to <end>`
    IntInterval,
    /// Opaque file content held as text
    File,
}

impl DataType {
    /// Every supported type, in declaration order
    pub const ALL: [DataType; 7] = [
        DataType::Integer,
        DataType::Real,
        DataType::Char,
        DataType::String,
        DataType::Date,
        DataType::IntInterval,
        DataType::File,
    ];

    /// Returns the canonical tag
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::Real => "real",
            DataType::Char => "char",
            DataType::String => "string",
            DataType::Date => "date",
            DataType::IntInterval => "int_interval",
            DataType::File => "file",
        }
    }

    /// Returns the alternate tags that resolve to this type
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            DataType::Integer => &["int"],
            DataType::String => &["str"],
            _ => &[],
        }
    }

    /// Parses a raw value as this type
    pub fn parse(&self, raw: Option<&RawValue>) -> ParseResult<Value> {
        parser::parse_value(raw, *self)
    }

    /// Returns whether a raw value parses as this type
    pub fn validate(&self, raw: Option<&RawValue>) -> bool {
        parser::validate_value(raw, *self)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FromStr for DataType {
    type Err = ParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "integer" | "int" => Ok(DataType::Integer),
            "real" => Ok(DataType::Real),
            "char" => Ok(DataType::Char),
            "string" | "str" => Ok(DataType::String),
            "date" => Ok(DataType::Date),
            "int_interval" => Ok(DataType::IntInterval),
            "file" => Ok(DataType::File),
            other => Err(ParseError::unknown_type(other)),
        }
    }
}

impl TryFrom<String> for DataType {
    type Error = ParseError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}
