//! API Handler for tablestore
//!
//! Applies requests to a borrowed `Catalog`. The exclusive borrow is the
//! only mutual-exclusion boundary: one handler, one request at a time.
//!
//! Flow per request:
//! 1. Parse JSON into a `Request`
//! 2. Resolve database and table
//! 3. Parse raw row input against the table schema
//! 4. Apply the core operation
//! 5. Log the outcome and build the response

use serde::Serialize;
use serde_json::{json, Value};

use crate::observability::{Event, Logger};
use crate::schema::RawRow;
use crate::store::{Catalog, QualifiedName, StoreError, Table};

use super::errors::{ApiError, ApiResult};
use super::request::{build_schema, AttributeSpec, Request};
use super::response::Response;

pub struct ApiHandler<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> ApiHandler<'a> {
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self { catalog }
    }

    /// Read access to the underlying catalog
    pub fn catalog(&self) -> &Catalog {
        &*self.catalog
    }

    /// Handle a raw JSON request string
    pub fn handle(&mut self, json_request: &str) -> Response {
        let request = match Request::parse(json_request) {
            Ok(r) => r,
            Err(e) => {
                Logger::warn(
                    Event::RequestRejected.as_str(),
                    &[("code", e.code()), ("op", "unknown")],
                );
                return Response::error(&e);
            }
        };
        self.handle_request(request)
    }

    /// Handle an already-parsed request
    pub fn handle_request(&mut self, request: Request) -> Response {
        let op = request.op();
        match self.execute(request) {
            Ok(data) => {
                Logger::trace(Event::RequestHandled.as_str(), &[("op", op)]);
                Response::success(data)
            }
            Err(e) => {
                Logger::warn(
                    Event::RequestRejected.as_str(),
                    &[("code", e.code()), ("message", e.message()), ("op", op)],
                );
                Response::error(&e)
            }
        }
    }

    /// Apply a request, returning its response payload
    pub fn execute(&mut self, request: Request) -> ApiResult<Value> {
        match request {
            Request::CreateDatabase { name } => {
                self.catalog.create_database(&name)?;
                Ok(json!({ "created": name }))
            }
            Request::ListDatabases => Ok(json!(self.catalog.database_names())),
            Request::DescribeDatabase { name } => {
                let db = self.catalog.require_database(&name)?;
                Ok(json!({ "name": db.name(), "tables": db.table_names() }))
            }
            Request::RenameDatabase { name, new_name } => {
                self.catalog.rename_database(&name, &new_name)?;
                Ok(json!({ "renamed": name, "to": new_name }))
            }
            Request::DropDatabase { name } => {
                self.catalog.drop_database(&name)?;
                Ok(json!({ "dropped": name }))
            }
            Request::CreateTable {
                database,
                table,
                attributes,
            } => {
                let schema = build_schema(&attributes)?;
                self.catalog
                    .require_database_mut(&database)?
                    .create_table(Table::new(table.clone(), schema))?;
                Ok(json!({ "created": QualifiedName::new(database, table).to_string() }))
            }
            Request::ListTables { database } => {
                let db = self.catalog.require_database(&database)?;
                Ok(json!(db.table_names()))
            }
            Request::ListAllTables => {
                let names: Vec<String> = self
                    .catalog
                    .qualified_table_names()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                Ok(json!(names))
            }
            Request::DescribeTable { database, table } => {
                let table = self.table(&database, &table)?;
                Ok(json!({
                    "name": table.name(),
                    "schema": to_json(table.schema())?,
                    "rows_count": table.len(),
                }))
            }
            Request::AlterTable {
                database,
                table,
                new_name,
                attributes,
            } => self.alter_table(&database, &table, new_name, attributes),
            Request::DropTable { database, table } => {
                self.catalog
                    .require_database_mut(&database)?
                    .remove_table(&table)?;
                Ok(json!({ "dropped": QualifiedName::new(database, table).to_string() }))
            }
            Request::InsertRow {
                database,
                table,
                data,
            } => {
                let table = self.table_mut(&database, &table)?;
                let row = table.parse_row(&data)?;
                table.insert(row)?;
                Ok(json!({ "index": table.len() - 1 }))
            }
            Request::ListRows { database, table } => {
                let table = self.table(&database, &table)?;
                to_json(table.rows())
            }
            Request::GetRow {
                database,
                table,
                index,
            } => {
                let table = self.table(&database, &table)?;
                let row = table.get(index).ok_or(StoreError::IndexOutOfRange {
                    index,
                    len: table.len(),
                })?;
                to_json(row)
            }
            Request::UpdateRow {
                database,
                table,
                index,
                data,
            } => {
                let table = self.table_mut(&database, &table)?;
                let row = table.parse_row(&data)?;
                table.update(index, row)?;
                Ok(json!({ "index": index }))
            }
            Request::DeleteRow {
                database,
                table,
                index,
            } => {
                let removed = self.table_mut(&database, &table)?.delete_at(index)?;
                Ok(json!({ "deleted": to_json(&removed)? }))
            }
            Request::DeleteMatchingRow {
                database,
                table,
                data,
            } => self.delete_matching(&database, &table, &data),
            Request::FindDuplicates { database, table } => {
                let table = self.table(&database, &table)?;
                to_json(&table.find_duplicates())
            }
            Request::DeleteDuplicates { database, table } => {
                let removed = self.table_mut(&database, &table)?.delete_duplicates()?;
                Ok(json!({ "removed": removed }))
            }
            Request::Product {
                left,
                right,
                database,
                table,
            } => {
                let left = QualifiedName::parse(&left)?;
                let right = QualifiedName::parse(&right)?;
                self.catalog.product_into(&left, &right, &database, &table)?;
                let rows = self.table(&database, &table)?.len();
                Ok(json!({
                    "created": QualifiedName::new(database, table).to_string(),
                    "rows_count": rows,
                }))
            }
        }
    }

    fn table(&self, database: &str, table: &str) -> ApiResult<&Table> {
        Ok(self
            .catalog
            .resolve_table(&QualifiedName::new(database, table))?)
    }

    fn table_mut(&mut self, database: &str, table: &str) -> ApiResult<&mut Table> {
        Ok(self
            .catalog
            .resolve_table_mut(&QualifiedName::new(database, table))?)
    }

    /// Rename collisions and unknown type tags are checked before anything
    /// is applied. An empty attribute list or empty new name means no
    /// change to that part.
    fn alter_table(
        &mut self,
        database: &str,
        table: &str,
        new_name: Option<String>,
        attributes: Option<Vec<AttributeSpec>>,
    ) -> ApiResult<Value> {
        let schema = match attributes.filter(|a| !a.is_empty()) {
            Some(specs) => Some(build_schema(&specs)?),
            None => None,
        };
        let new_name = new_name.filter(|n| !n.is_empty() && n != table);

        let db = self.catalog.require_database_mut(database)?;
        if !db.contains_table(table) {
            return Err(StoreError::table_not_found(QualifiedName::new(database, table).to_string()).into());
        }
        if let Some(ref new_name) = new_name {
            if db.contains_table(new_name) {
                return Err(StoreError::duplicate_table(new_name.as_str()).into());
            }
        }

        if let Some(schema) = schema {
            if let Some(t) = db.table_mut(table) {
                t.replace_schema(schema)?;
            }
        }
        let final_name = match new_name {
            Some(new_name) => {
                db.rename_table(table, &new_name)?;
                new_name
            }
            None => table.to_string(),
        };
        Ok(json!({ "table": QualifiedName::new(database, final_name).to_string() }))
    }

    fn delete_matching(&mut self, database: &str, table: &str, data: &RawRow) -> ApiResult<Value> {
        let table = self.table_mut(database, table)?;
        let row = table.parse_row(data)?;
        let removed = table.delete_matching(&row)?;
        Ok(json!({ "deleted": to_json(&removed)? }))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(ApiError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(handler: &mut ApiHandler<'_>, request: Value) -> Response {
        handler.handle(&request.to_string())
    }

    fn setup(catalog: &mut Catalog) {
        let mut handler = ApiHandler::new(catalog);
        for request in [
            json!({ "op": "create_database", "name": "shop" }),
            json!({ "op": "create_table", "database": "shop", "table": "items",
                    "attributes": [{ "name": "id", "data_type": "integer" },
                                   { "name": "label", "data_type": "string" }] }),
        ] {
            assert!(run(&mut handler, request).is_success());
        }
    }

    #[test]
    fn test_insert_and_list_rows() {
        let mut catalog = Catalog::new();
        setup(&mut catalog);
        let mut handler = ApiHandler::new(&mut catalog);

        let response = run(&mut handler, json!({ "op": "insert_row", "database": "shop",
            "table": "items", "data": { "id": "1", "label": "pen" } }));
        assert_eq!(response.data(), Some(&json!({ "index": 0 })));

        let response = run(&mut handler, json!({ "op": "list_rows", "database": "shop", "table": "items" }));
        assert_eq!(response.data(), Some(&json!([{ "id": 1, "label": "pen" }])));
    }

    #[test]
    fn test_insert_invalid_value() {
        let mut catalog = Catalog::new();
        setup(&mut catalog);
        let mut handler = ApiHandler::new(&mut catalog);

        let response = run(&mut handler, json!({ "op": "insert_row", "database": "shop",
            "table": "items", "data": { "id": "one", "label": "pen" } }));
        assert_eq!(response.error_code(), Some("TAB_VALIDATION_FAILED"));
        assert_eq!(handler.catalog().resolve_table(&QualifiedName::new("shop", "items")).unwrap().len(), 0);
    }

    #[test]
    fn test_missing_table() {
        let mut catalog = Catalog::new();
        setup(&mut catalog);
        let mut handler = ApiHandler::new(&mut catalog);

        let response = run(&mut handler, json!({ "op": "list_rows", "database": "shop", "table": "ghost" }));
        assert_eq!(response.error_code(), Some("TAB_NOT_FOUND"));
    }

    #[test]
    fn test_alter_table_rename_collision_applies_nothing() {
        let mut catalog = Catalog::new();
        setup(&mut catalog);
        let mut handler = ApiHandler::new(&mut catalog);
        assert!(run(&mut handler, json!({ "op": "create_table", "database": "shop", "table": "orders",
            "attributes": [{ "name": "n", "data_type": "int" }] })).is_success());

        let response = run(&mut handler, json!({ "op": "alter_table", "database": "shop", "table": "items",
            "new_name": "orders", "attributes": [{ "name": "code", "data_type": "char" }] }));
        assert_eq!(response.error_code(), Some("TAB_DUPLICATE_NAME"));

        let items = handler.catalog().resolve_table(&QualifiedName::new("shop", "items")).unwrap();
        assert_eq!(items.schema().len(), 2);
    }

    #[test]
    fn test_alter_table_schema_and_name() {
        let mut catalog = Catalog::new();
        setup(&mut catalog);
        let mut handler = ApiHandler::new(&mut catalog);

        let response = run(&mut handler, json!({ "op": "alter_table", "database": "shop", "table": "items",
            "new_name": "stock", "attributes": [{ "name": "code", "data_type": "char" }] }));
        assert_eq!(response.data(), Some(&json!({ "table": "shop.stock" })));

        let stock = handler.catalog().resolve_table(&QualifiedName::new("shop", "stock")).unwrap();
        assert_eq!(stock.schema().names().collect::<Vec<_>>(), vec!["code"]);
    }
}
