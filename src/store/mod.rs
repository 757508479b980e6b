//! In-memory store for tablestore
//!
//! # Structure
//!
//! - `Catalog`: all databases, keyed by unique name
//! - `Database`: tables keyed by unique name
//! - `Table`: schema plus ordered rows
//! - `Row`: parsed values keyed by attribute name
//!
//! # Guarantees
//!
//! - A row write either fully succeeds or leaves the table unchanged
//! - Names are unique within their container
//! - Lookups return `Option`; absence is not an error at this level
//!
//! All state lives for the process only. Callers needing shared access
//! across threads must wrap the catalog in their own lock.

mod catalog;
mod database;
mod errors;
mod row;
mod table;

pub use catalog::{Catalog, QualifiedName};
pub use database::Database;
pub use errors::{ObjectKind, StoreError, StoreResult};
pub use row::Row;
pub use table::Table;
