//! API request types
//!
//! One JSON object per request, tagged by `"op"`.

use serde::{Deserialize, Serialize};

use crate::schema::{Attribute, RawRow, Schema};
use crate::types::{DataType, ParseResult};

use super::errors::{ApiError, ApiResult};

/// Attribute definition as sent by clients.
///
/// `data_type` stays a string so an unknown tag is reported as a parse
/// error rather than a malformed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub data_type: String,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    pub fn to_attribute(&self) -> ParseResult<Attribute> {
        let data_type = self.data_type.parse::<DataType>()?;
        Ok(Attribute::new(self.name.clone(), data_type))
    }
}

/// Builds a schema, failing on the first unknown type tag
pub fn build_schema(specs: &[AttributeSpec]) -> ParseResult<Schema> {
    specs.iter().map(AttributeSpec::to_attribute).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    CreateDatabase {
        name: String,
    },
    ListDatabases,
    DescribeDatabase {
        name: String,
    },
    RenameDatabase {
        name: String,
        new_name: String,
    },
    DropDatabase {
        name: String,
    },
    CreateTable {
        database: String,
        table: String,
        attributes: Vec<AttributeSpec>,
    },
    ListTables {
        database: String,
    },
    ListAllTables,
    DescribeTable {
        database: String,
        table: String,
    },
    AlterTable {
        database: String,
        table: String,
        #[serde(default)]
        new_name: Option<String>,
        #[serde(default)]
        attributes: Option<Vec<AttributeSpec>>,
    },
    DropTable {
        database: String,
        table: String,
    },
    InsertRow {
        database: String,
        table: String,
        data: RawRow,
    },
    ListRows {
        database: String,
        table: String,
    },
    GetRow {
        database: String,
        table: String,
        index: usize,
    },
    UpdateRow {
        database: String,
        table: String,
        index: usize,
        data: RawRow,
    },
    DeleteRow {
        database: String,
        table: String,
        index: usize,
    },
    DeleteMatchingRow {
        database: String,
        table: String,
        data: RawRow,
    },
    FindDuplicates {
        database: String,
        table: String,
    },
    DeleteDuplicates {
        database: String,
        table: String,
    },
    Product {
        left: String,
        right: String,
        database: String,
        table: String,
    },
}

impl Request {
    /// Parse a request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid request: {}", e)))
    }

    /// Returns the `op` tag, for logging
    pub fn op(&self) -> &'static str {
        match self {
            Request::CreateDatabase { .. } => "create_database",
            Request::ListDatabases => "list_databases",
            Request::DescribeDatabase { .. } => "describe_database",
            Request::RenameDatabase { .. } => "rename_database",
            Request::DropDatabase { .. } => "drop_database",
            Request::CreateTable { .. } => "create_table",
            Request::ListTables { .. } => "list_tables",
            Request::ListAllTables => "list_all_tables",
            Request::DescribeTable { .. } => "describe_table",
            Request::AlterTable { .. } => "alter_table",
            Request::DropTable { .. } => "drop_table",
            Request::InsertRow { .. } => "insert_row",
            Request::ListRows { .. } => "list_rows",
            Request::GetRow { .. } => "get_row",
            Request::UpdateRow { .. } => "update_row",
            Request::DeleteRow { .. } => "delete_row",
            Request::DeleteMatchingRow { .. } => "delete_matching_row",
            Request::FindDuplicates { .. } => "find_duplicates",
            Request::DeleteDuplicates { .. } => "delete_duplicates",
            Request::Product { .. } => "product",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawValue;

    #[test]
    fn test_parse_create_table() {
        let json = r#"{"op":"create_table","database":"shop","table":"items",
            "attributes":[{"name":"id","data_type":"integer"},{"name":"label","data_type":"str"}]}"#;
        let request = Request::parse(json).unwrap();
        assert_eq!(request.op(), "create_table");

        let Request::CreateTable { attributes, .. } = request else {
            panic!("wrong variant");
        };
        let schema = build_schema(&attributes).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.attributes()[1].data_type(), DataType::String);
    }

    #[test]
    fn test_unknown_type_tag_is_parse_error() {
        let specs = vec![AttributeSpec::new("price", "money")];
        let err = build_schema(&specs).unwrap_err();
        assert_eq!(err.code(), "TAB_UNKNOWN_DATA_TYPE");
    }

    #[test]
    fn test_parse_insert_with_raw_values() {
        let json = r#"{"op":"insert_row","database":"shop","table":"items",
            "data":{"id":"1","qty":3,"span":[1,10],"note":null}}"#;
        let Request::InsertRow { data, .. } = Request::parse(json).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(data["id"], Some(RawValue::text("1")));
        assert_eq!(data["qty"], Some(RawValue::Integer(3)));
        assert_eq!(data["span"], Some(RawValue::Pair(1, 10)));
        assert_eq!(data["note"], None);
    }

    #[test]
    fn test_alter_table_fields_optional() {
        let json = r#"{"op":"alter_table","database":"shop","table":"items","new_name":"stock"}"#;
        let request = Request::parse(json).unwrap();
        assert_eq!(
            request,
            Request::AlterTable {
                database: "shop".into(),
                table: "items".into(),
                new_name: Some("stock".into()),
                attributes: None,
            }
        );
    }

    #[test]
    fn test_invalid_requests() {
        for json in [
            "not json",
            r#"{"op":"teleport"}"#,
            r#"{"op":"create_database"}"#,
            r#"{"op":"get_row","database":"a","table":"b","index":-1}"#,
        ] {
            let err = Request::parse(json).unwrap_err();
            assert_eq!(err.code(), "TAB_INVALID_REQUEST", "input {}", json);
        }
    }
}
