//! Store error types
//!
//! Error codes:
//! - TAB_VALIDATION_FAILED (row violates schema)
//! - TAB_INDEX_OUT_OF_RANGE (positional access past the end)
//! - TAB_DUPLICATE_NAME (database or table name taken)
//! - TAB_SCHEMA_CHANGE_REJECTED (schema edit on a non-empty table)
//! - TAB_NOT_FOUND (missing database or table)
//! - TAB_ROW_NOT_FOUND (no row equal to the given one)
//! - TAB_INVALID_QUALIFIED_NAME (not `db.table`)

use std::fmt;

use thiserror::Error;

use crate::schema::ValidationError;

/// What kind of named object an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Database,
    Table,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Database => write!(f, "database"),
            ObjectKind::Table => write!(f, "table"),
        }
    }
}

/// Errors raised by tables, databases and the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Row failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Row position outside `[0, len)`
    #[error("row index {index} out of range for table with {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    /// Name already in use
    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: ObjectKind, name: String },

    /// Schema edit attempted while rows exist
    #[error("cannot modify schema of table '{table}' while it contains data, delete all rows first")]
    SchemaChange { table: String },

    /// Named object does not exist
    #[error("{kind} '{name}' not found")]
    NotFound { kind: ObjectKind, name: String },

    /// No stored row equals the given one
    #[error("no matching row in table '{table}'")]
    RowNotFound { table: String },

    /// Qualified table name not in `db.table` form
    #[error("table name '{0}' must be in 'db_name.table_name' format")]
    InvalidQualifiedName(String),
}

impl StoreError {
    pub fn duplicate_database(name: impl Into<String>) -> Self {
        StoreError::DuplicateName {
            kind: ObjectKind::Database,
            name: name.into(),
        }
    }

    pub fn duplicate_table(name: impl Into<String>) -> Self {
        StoreError::DuplicateName {
            kind: ObjectKind::Table,
            name: name.into(),
        }
    }

    pub fn database_not_found(name: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: ObjectKind::Database,
            name: name.into(),
        }
    }

    pub fn table_not_found(name: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: ObjectKind::Table,
            name: name.into(),
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Validation(e) => e.code(),
            StoreError::IndexOutOfRange { .. } => "TAB_INDEX_OUT_OF_RANGE",
            StoreError::DuplicateName { .. } => "TAB_DUPLICATE_NAME",
            StoreError::SchemaChange { .. } => "TAB_SCHEMA_CHANGE_REJECTED",
            StoreError::NotFound { .. } => "TAB_NOT_FOUND",
            StoreError::RowNotFound { .. } => "TAB_ROW_NOT_FOUND",
            StoreError::InvalidQualifiedName(_) => "TAB_INVALID_QUALIFIED_NAME",
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
