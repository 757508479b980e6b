//! Table: a named, schema-bound, ordered collection of rows
//!
//! Invariants:
//! - Every stored row passed schema validation when it was written
//! - Stored rows hold parsed values, so equality ignores how a row was built
//! - A failed insert, update or delete leaves `rows` untouched
//! - Row order is insertion order; positions shift down after a delete
//! - The schema can only be replaced while the table is empty

use std::collections::HashSet;
use std::sync::Arc;

use crate::schema::{RawRow, Schema, SchemaValidator};

use super::errors::{StoreError, StoreResult};
use super::row::Row;

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Only the owning database renames tables, so it can check collisions.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Shared handle to the schema
    pub fn schema_handle(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Validated row with schema attributes in parsed form
    fn canonical(&self, row: &Row) -> StoreResult<Row> {
        Ok(SchemaValidator::new(&self.schema).canonicalize(row)?)
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.rows.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    /// Parses raw input into a row using this table's schema.
    ///
    /// The row is not stored.
    pub fn parse_row(&self, input: &RawRow) -> StoreResult<Row> {
        Ok(SchemaValidator::new(&self.schema).parse_row(input)?)
    }

    /// Validates and appends a row, stored in canonical form.
    pub fn insert(&mut self, row: Row) -> StoreResult<()> {
        let row = self.canonical(&row)?;
        self.rows.push(row);
        Ok(())
    }

    /// Validates a row, then replaces the row at `index`.
    ///
    /// Validation runs before the index check, so an invalid row reports
    /// a validation error even when the index is also bad.
    pub fn update(&mut self, index: usize, row: Row) -> StoreResult<()> {
        let row = self.canonical(&row)?;
        self.check_index(index)?;
        self.rows[index] = row;
        Ok(())
    }

    /// Removes and returns the row at `index`.
    pub fn delete_at(&mut self, index: usize) -> StoreResult<Row> {
        self.check_index(index)?;
        Ok(self.rows.remove(index))
    }

    /// Removes and returns the first row equal to `row`.
    ///
    /// `row` is validated against the schema first, even though nothing
    /// is written, and compared in canonical form.
    pub fn delete_matching(&mut self, row: &Row) -> StoreResult<Row> {
        let probe = self.canonical(row)?;
        let position = self
            .rows
            .iter()
            .position(|stored| *stored == probe)
            .ok_or_else(|| StoreError::RowNotFound {
                table: self.name.clone(),
            })?;
        Ok(self.rows.remove(position))
    }

    /// Replaces the schema. Rejected unless the table is empty.
    pub fn replace_schema(&mut self, schema: impl Into<Arc<Schema>>) -> StoreResult<()> {
        if !self.rows.is_empty() {
            return Err(StoreError::SchemaChange {
                table: self.name.clone(),
            });
        }
        self.schema = schema.into();
        Ok(())
    }

    /// Rows equal to some earlier row, in table order. A row appearing
    /// three times is reported twice.
    pub fn find_duplicates(&self) -> Vec<Row> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|row| !seen.insert(*row))
            .cloned()
            .collect()
    }

    /// For each duplicate, removes the first row equal to it. Returns the
    /// number of rows removed.
    ///
    /// Because the first occurrence goes, the surviving copy of a repeated
    /// row is its last one.
    pub fn delete_duplicates(&mut self) -> StoreResult<usize> {
        let duplicates = self.find_duplicates();
        for row in &duplicates {
            self.delete_matching(row)?;
        }
        Ok(duplicates.len())
    }
}
