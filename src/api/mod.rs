//! API layer for tablestore
//!
//! Translates JSON requests into catalog operations and results or errors
//! back into JSON responses.
//!
//! # Design Principles
//!
//! - The catalog is passed in by exclusive reference, never global
//! - Error codes from lower layers pass through unchanged
//! - Every request gets exactly one response

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult};
pub use handler::ApiHandler;
pub use request::{build_schema, AttributeSpec, Request};
pub use response::{ErrorResponse, Response, SuccessResponse};
