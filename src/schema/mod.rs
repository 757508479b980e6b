//! Schemas for tablestore
//!
//! A schema is an ordered list of typed attributes. Tables validate every
//! inserted or updated row against their schema.
//!
//! # Known gaps
//!
//! - Attribute names are not required to be unique within a schema
//! - Extra row keys outside the schema are tolerated

mod errors;
mod types;
mod validator;

pub use errors::{SchemaResult, ValidationError};
pub use types::{Attribute, Schema};
pub use validator::{RawRow, SchemaValidator};
