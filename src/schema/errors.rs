//! Schema validation error
//!
//! Error code: TAB_VALIDATION_FAILED

use thiserror::Error;

use crate::types::{DataType, ParseError};

/// A row value failed its attribute's type check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid data for attribute '{attribute}', expected {expected}: {cause}")]
pub struct ValidationError {
    attribute: String,
    expected: DataType,
    #[source]
    cause: ParseError,
}

impl ValidationError {
    pub fn new(attribute: impl Into<String>, expected: DataType, cause: ParseError) -> Self {
        Self {
            attribute: attribute.into(),
            expected,
            cause,
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        "TAB_VALIDATION_FAILED"
    }

    /// Name of the offending attribute
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Declared type of the offending attribute
    pub fn expected(&self) -> DataType {
        self.expected
    }

    /// Underlying parse failure
    pub fn cause(&self) -> &ParseError {
        &self.cause
    }
}

/// Result type for schema validation
pub type SchemaResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_attribute_and_type() {
        let err = ValidationError::new("age", DataType::Integer, ParseError::empty(DataType::Integer));
        let display = err.to_string();
        assert!(display.contains("'age'"));
        assert!(display.contains("integer"));
        assert_eq!(err.code(), "TAB_VALIDATION_FAILED");
    }
}
