//! tablestore - an in-memory tabular data store
//!
//! Typed attributes, schemas, validated rows, named tables grouped into
//! databases, and the cross product of two tables.

pub mod api;
pub mod cli;
pub mod observability;
pub mod relational;
pub mod schema;
pub mod store;
pub mod types;
