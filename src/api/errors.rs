//! API error types
//!
//! API errors are pass-through: store and parse errors keep their own
//! codes. The API adds:
//! - TAB_INVALID_REQUEST (request JSON malformed or missing fields)
//! - TAB_INTERNAL (response could not be built)

use std::fmt;

use crate::store::StoreError;
use crate::types::ParseError;

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    InvalidRequest,
    Internal,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::InvalidRequest => "TAB_INVALID_REQUEST",
            ApiErrorCode::Internal => "TAB_INTERNAL",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with the originating error code preserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::InvalidRequest.code(),
            message: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal(reason: impl fmt::Display) -> Self {
        Self {
            code: ApiErrorCode::Internal.code(),
            message: reason.to_string(),
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
