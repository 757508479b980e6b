//! Catalog: every database in the process
//!
//! The catalog is an explicit object owned by whoever serves requests and
//! handed to handlers by reference. There is no global store.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::relational;

use super::database::Database;
use super::errors::{StoreError, StoreResult};
use super::table::Table;

/// A `db.table` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub database: String,
    pub table: String,
}

impl QualifiedName {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }

    /// Parses `db.table`. Exactly one `.` is allowed.
    pub fn parse(s: &str) -> StoreResult<Self> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(database), Some(table), None) => Ok(Self::new(database, table)),
            _ => Err(StoreError::InvalidQualifiedName(s.to_string())),
        }
    }
}

impl FromStr for QualifiedName {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.table)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    databases: BTreeMap<String, Database>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty database.
    pub fn create_database(&mut self, name: &str) -> StoreResult<&mut Database> {
        if self.databases.contains_key(name) {
            return Err(StoreError::duplicate_database(name));
        }
        Ok(self
            .databases
            .entry(name.to_string())
            .or_insert_with(|| Database::new(name)))
    }

    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.get(name)
    }

    pub fn database_mut(&mut self, name: &str) -> Option<&mut Database> {
        self.databases.get_mut(name)
    }

    /// Like [`database`](Self::database) but absence is an error
    pub fn require_database(&self, name: &str) -> StoreResult<&Database> {
        self.database(name)
            .ok_or_else(|| StoreError::database_not_found(name))
    }

    pub fn require_database_mut(&mut self, name: &str) -> StoreResult<&mut Database> {
        self.database_mut(name)
            .ok_or_else(|| StoreError::database_not_found(name))
    }

    pub fn contains_database(&self, name: &str) -> bool {
        self.databases.contains_key(name)
    }

    /// Database names in sorted order
    pub fn database_names(&self) -> Vec<&str> {
        self.databases.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.databases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Renames a database. Renaming to the current name is a no-op.
    pub fn rename_database(&mut self, name: &str, new_name: &str) -> StoreResult<()> {
        if !self.databases.contains_key(name) {
            return Err(StoreError::database_not_found(name));
        }
        if name == new_name {
            return Ok(());
        }
        if self.databases.contains_key(new_name) {
            return Err(StoreError::duplicate_database(new_name));
        }
        if let Some(mut db) = self.databases.remove(name) {
            db.set_name(new_name);
            self.databases.insert(new_name.to_string(), db);
        }
        Ok(())
    }

    /// Removes and returns a database with all its tables.
    pub fn drop_database(&mut self, name: &str) -> StoreResult<Database> {
        self.databases
            .remove(name)
            .ok_or_else(|| StoreError::database_not_found(name))
    }

    /// Every table as `db.table`, sorted by database then table
    pub fn qualified_table_names(&self) -> Vec<QualifiedName> {
        self.databases
            .values()
            .flat_map(|db| {
                db.table_names()
                    .into_iter()
                    .map(move |t| QualifiedName::new(db.name(), t))
            })
            .collect()
    }

    pub fn resolve_table(&self, name: &QualifiedName) -> StoreResult<&Table> {
        self.require_database(&name.database)?
            .table(&name.table)
            .ok_or_else(|| StoreError::table_not_found(name.to_string()))
    }

    pub fn resolve_table_mut(&mut self, name: &QualifiedName) -> StoreResult<&mut Table> {
        let display = name.to_string();
        self.require_database_mut(&name.database)?
            .table_mut(&name.table)
            .ok_or_else(|| StoreError::table_not_found(display))
    }

    /// Computes `left × right` and registers it as `destination.new_name`.
    ///
    /// All lookups and the destination name collision are checked before
    /// the product is built.
    pub fn product_into(
        &mut self,
        left: &QualifiedName,
        right: &QualifiedName,
        destination: &str,
        new_name: &str,
    ) -> StoreResult<()> {
        let left_table = self.resolve_table(left)?;
        let right_table = self.resolve_table(right)?;
        if self.require_database(destination)?.contains_table(new_name) {
            return Err(StoreError::duplicate_table(new_name));
        }

        let result = relational::product(left_table, right_table, new_name)?;
        self.require_database_mut(destination)?.create_table(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Schema};
    use crate::store::Row;
    use crate::types::DataType;

    fn catalog_with_tables() -> Catalog {
        let mut catalog = Catalog::new();
        let shop = catalog.create_database("shop").unwrap();

        let mut items = Table::new("items", Schema::new(vec![Attribute::new("id", DataType::Integer)]));
        items.insert(Row::from_pairs([("id", 1i64)])).unwrap();
        items.insert(Row::from_pairs([("id", 2i64)])).unwrap();
        shop.create_table(items).unwrap();

        let mut tags = Table::new("tags", Schema::new(vec![Attribute::new("tag", DataType::String)]));
        tags.insert(Row::from_pairs([("tag", "new")])).unwrap();
        shop.create_table(tags).unwrap();

        catalog.create_database("archive").unwrap();
        catalog
    }

    #[test]
    fn test_qualified_name_parsing() {
        let name = QualifiedName::parse("shop.items").unwrap();
        assert_eq!(name, QualifiedName::new("shop", "items"));
        assert_eq!(name.to_string(), "shop.items");

        for bad in ["shop", "a.b.c", ""] {
            let err = QualifiedName::parse(bad).unwrap_err();
            assert_eq!(err.code(), "TAB_INVALID_QUALIFIED_NAME");
        }
    }

    #[test]
    fn test_duplicate_database_rejected() {
        let mut catalog = Catalog::new();
        catalog.create_database("shop").unwrap();
        assert!(matches!(
            catalog.create_database("shop"),
            Err(StoreError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_rename_database() {
        let mut catalog = catalog_with_tables();

        let err = catalog.rename_database("shop", "archive").unwrap_err();
        assert_eq!(err.code(), "TAB_DUPLICATE_NAME");

        catalog.rename_database("shop", "store").unwrap();
        assert!(catalog.database("shop").is_none());
        let store = catalog.database("store").unwrap();
        assert_eq!(store.name(), "store");
        assert_eq!(store.table_names(), vec!["items", "tags"]);
    }

    #[test]
    fn test_qualified_table_listing() {
        let catalog = catalog_with_tables();
        let names: Vec<String> = catalog
            .qualified_table_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["shop.items", "shop.tags"]);
    }

    #[test]
    fn test_product_into_destination() {
        let mut catalog = catalog_with_tables();
        let left = QualifiedName::new("shop", "items");
        let right = QualifiedName::new("shop", "tags");

        catalog.product_into(&left, &right, "archive", "tagged").unwrap();
        let result = catalog.resolve_table(&QualifiedName::new("archive", "tagged")).unwrap();
        assert_eq!(result.len(), 2);

        let err = catalog.product_into(&left, &right, "archive", "tagged").unwrap_err();
        assert_eq!(err.code(), "TAB_DUPLICATE_NAME");
    }

    #[test]
    fn test_product_into_missing_inputs() {
        let mut catalog = catalog_with_tables();
        let err = catalog
            .product_into(
                &QualifiedName::new("shop", "ghost"),
                &QualifiedName::new("shop", "tags"),
                "archive",
                "x",
            )
            .unwrap_err();
        assert_eq!(err.code(), "TAB_NOT_FOUND");

        let err = catalog
            .product_into(
                &QualifiedName::new("shop", "items"),
                &QualifiedName::new("shop", "tags"),
                "nowhere",
                "x",
            )
            .unwrap_err();
        assert_eq!(err, StoreError::database_not_found("nowhere"));
    }
}
