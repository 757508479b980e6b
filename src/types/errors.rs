//! Parse error types
//!
//! Error codes:
//! - TAB_PARSE_EMPTY (absent or empty input)
//! - TAB_PARSE_MALFORMED (input has the right shape but bad content)
//! - TAB_PARSE_UNSUPPORTED (input representation not accepted by the type)
//! - TAB_UNKNOWN_DATA_TYPE (type tag not recognized)

use std::fmt;

use thiserror::Error;

use super::data_type::DataType;

/// Why a raw value could not be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Value was absent or an empty string
    Empty,
    /// Value could not be converted to the declared type
    Malformed,
    /// Value's representation is not one the type accepts
    UnsupportedRepresentation,
    /// Type tag names no supported data type
    UnknownType,
}

impl ParseErrorKind {
    /// Returns the string code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::Empty => "TAB_PARSE_EMPTY",
            ParseErrorKind::Malformed => "TAB_PARSE_MALFORMED",
            ParseErrorKind::UnsupportedRepresentation => "TAB_PARSE_UNSUPPORTED",
            ParseErrorKind::UnknownType => "TAB_UNKNOWN_DATA_TYPE",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A raw value failed to parse as its declared type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error parsing value '{value}' as {target}: {reason}")]
pub struct ParseError {
    kind: ParseErrorKind,
    value: String,
    target: String,
    reason: String,
}

impl ParseError {
    /// Absent or empty input
    pub fn empty(data_type: DataType) -> Self {
        Self {
            kind: ParseErrorKind::Empty,
            value: String::new(),
            target: data_type.to_string(),
            reason: format!("value cannot be empty, expected {}", data_type),
        }
    }

    /// Absent or empty input against a tag that may not be a known type
    pub fn empty_for_tag(tag: &str) -> Self {
        Self {
            kind: ParseErrorKind::Empty,
            value: String::new(),
            target: tag.to_string(),
            reason: format!("value cannot be empty, expected {}", tag),
        }
    }

    /// Input of an accepted shape with content the type rejects
    pub fn malformed(
        value: impl Into<String>,
        data_type: DataType,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: ParseErrorKind::Malformed,
            value: value.into(),
            target: data_type.to_string(),
            reason: reason.into(),
        }
    }

    /// Input whose representation the type never accepts
    pub fn unsupported(
        value: impl Into<String>,
        data_type: DataType,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: ParseErrorKind::UnsupportedRepresentation,
            value: value.into(),
            target: data_type.to_string(),
            reason: reason.into(),
        }
    }

    /// Tag that does not name a supported type
    pub fn unknown_type(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            kind: ParseErrorKind::UnknownType,
            reason: format!("unknown data type: {}", tag),
            value: tag,
            target: "data type".into(),
        }
    }

    /// Returns the failure kind
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the rejected input as text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the reason without the value prefix
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;
