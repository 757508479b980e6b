//! Typed values for tablestore
//!
//! Converts raw front-end input into canonical typed values, or rejects it.
//!
//! # Canonical forms
//!
//! - date: `YYYY-MM-DD`
//! - int_interval: `<start> to <end>`
//!
//! Both forms round-trip losslessly through the parser.

mod data_type;
mod errors;
mod parser;
mod value;

pub use data_type::DataType;
pub use errors::{ParseError, ParseErrorKind, ParseResult};
pub use parser::{parse_tagged, parse_value, validate_tagged, validate_value};
pub use value::{RawValue, Value, DATE_FORMAT, INTERVAL_SEPARATOR};
