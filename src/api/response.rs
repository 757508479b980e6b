//! API response types
//!
//! `{"status":"ok","data":...}` or
//! `{"status":"error","code":"TAB_...","message":"..."}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ApiError;

/// Success response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub status: String,
    pub data: Value,
}

impl SuccessResponse {
    pub fn new(data: Value) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: "error".to_string(),
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

/// Unified response type
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn success(data: Value) -> Self {
        Response::Success(SuccessResponse::new(data))
    }

    pub fn error(err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Returns the payload of a success response
    pub fn data(&self) -> Option<&Value> {
        match self {
            Response::Success(s) => Some(&s.data),
            Response::Error(_) => None,
        }
    }

    /// Returns the code of an error response
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(e) => Some(&e.code),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Response::Success(s) => serde_json::json!({ "status": s.status, "data": s.data }),
            Response::Error(e) => serde_json::json!({
                "status": e.status,
                "code": e.code,
                "message": e.message,
            }),
        }
    }

    /// Single-line JSON
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}
