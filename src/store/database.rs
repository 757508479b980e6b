//! Database: a named collection of tables keyed by unique name

use std::collections::BTreeMap;

use super::errors::{StoreError, StoreResult};
use super::table::Table;

#[derive(Debug, Clone)]
pub struct Database {
    name: String,
    tables: BTreeMap<String, Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Registers a table under its own name.
    ///
    /// # Errors
    ///
    /// `DuplicateName` if a table with that name already exists.
    pub fn create_table(&mut self, table: Table) -> StoreResult<()> {
        if self.tables.contains_key(table.name()) {
            return Err(StoreError::duplicate_table(table.name()));
        }
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    /// Looks up a table. Absence is not an error.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in sorted order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Renames a table, checking the new name is free before committing.
    /// Renaming to the current name is a no-op.
    pub fn rename_table(&mut self, name: &str, new_name: &str) -> StoreResult<()> {
        if !self.tables.contains_key(name) {
            return Err(StoreError::table_not_found(name));
        }
        if name == new_name {
            return Ok(());
        }
        if self.tables.contains_key(new_name) {
            return Err(StoreError::duplicate_table(new_name));
        }
        if let Some(mut table) = self.tables.remove(name) {
            table.set_name(new_name);
            self.tables.insert(new_name.to_string(), table);
        }
        Ok(())
    }

    /// Removes and returns a table.
    pub fn remove_table(&mut self, name: &str) -> StoreResult<Table> {
        self.tables
            .remove(name)
            .ok_or_else(|| StoreError::table_not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Schema};
    use crate::types::DataType;

    fn table(name: &str) -> Table {
        Table::new(name, Schema::new(vec![Attribute::new("id", DataType::Integer)]))
    }

    #[test]
    fn test_create_and_get() {
        let mut db = Database::new("shop");
        db.create_table(table("items")).unwrap();

        assert!(db.table("items").is_some());
        assert!(db.table("orders").is_none());
        assert_eq!(db.table_names(), vec!["items"]);
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut db = Database::new("shop");
        db.create_table(table("items")).unwrap();

        let err = db.create_table(table("items")).unwrap_err();
        assert_eq!(err, StoreError::duplicate_table("items"));
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_rename_checks_collision() {
        let mut db = Database::new("shop");
        db.create_table(table("items")).unwrap();
        db.create_table(table("orders")).unwrap();

        let err = db.rename_table("items", "orders").unwrap_err();
        assert_eq!(err.code(), "TAB_DUPLICATE_NAME");
        assert!(db.contains_table("items"));

        db.rename_table("items", "stock").unwrap();
        assert!(!db.contains_table("items"));
        assert_eq!(db.table("stock").unwrap().name(), "stock");

        db.rename_table("stock", "stock").unwrap();
        assert!(db.contains_table("stock"));
    }

    #[test]
    fn test_rename_missing_table() {
        let mut db = Database::new("shop");
        let err = db.rename_table("ghost", "spirit").unwrap_err();
        assert_eq!(err, StoreError::table_not_found("ghost"));
    }

    #[test]
    fn test_remove_table() {
        let mut db = Database::new("shop");
        db.create_table(table("items")).unwrap();

        let removed = db.remove_table("items").unwrap();
        assert_eq!(removed.name(), "items");
        assert!(db.is_empty());
        assert!(db.remove_table("items").is_err());
    }
}
