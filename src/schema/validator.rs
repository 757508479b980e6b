//! Row validation against a schema
//!
//! Validation semantics:
//! - Every schema attribute is checked, in declaration order
//! - A missing attribute is treated as absent input and fails
//! - Keys not declared by the schema are ignored
//! - The first failing attribute aborts validation
//!
//! The validator never mutates the row.

use std::collections::BTreeMap;

use crate::store::Row;
use crate::types::{parse_value, RawValue};

use super::errors::{SchemaResult, ValidationError};
use super::types::Schema;

/// Unparsed row input keyed by attribute name. `None` marks an explicit null.
pub type RawRow = BTreeMap<String, Option<RawValue>>;

/// Checks rows against one schema.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator for the given schema.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates an already-built row.
    ///
    /// Each stored value is re-run through its attribute's parser, so a
    /// value accepted here is one the parser would accept as input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first attribute whose value is
    /// missing or does not parse as the declared type.
    pub fn validate_row(&self, row: &Row) -> SchemaResult<()> {
        self.canonicalize(row).map(|_| ())
    }

    /// Validates a row and returns it with every schema attribute replaced
    /// by its parsed value.
    ///
    /// Text in a `char` or `int_interval` column becomes `Char` or
    /// `Interval`, so rows built from different value variants compare
    /// equal once canonical. Keys outside the schema are kept as given.
    ///
    /// # Errors
    ///
    /// Same as [`validate_row`](Self::validate_row).
    pub fn canonicalize(&self, row: &Row) -> SchemaResult<Row> {
        let mut canonical = row.clone();
        for attribute in self.schema {
            let raw = row.get(attribute.name()).map(RawValue::from);
            let value = parse_value(raw.as_ref(), attribute.data_type()).map_err(|cause| {
                ValidationError::new(attribute.name(), attribute.data_type(), cause)
            })?;
            canonical.set(attribute.name(), value);
        }
        Ok(canonical)
    }

    /// Returns whether the row passes [`validate_row`](Self::validate_row).
    pub fn is_valid(&self, row: &Row) -> bool {
        self.validate_row(row).is_ok()
    }

    /// Parses raw input into a row holding exactly the schema's attributes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first attribute that is missing,
    /// null, or unparseable.
    pub fn parse_row(&self, input: &RawRow) -> SchemaResult<Row> {
        let mut row = Row::empty();
        for attribute in self.schema {
            let raw = input.get(attribute.name()).and_then(Option::as_ref);
            let value = parse_value(raw, attribute.data_type()).map_err(|cause| {
                ValidationError::new(attribute.name(), attribute.data_type(), cause)
            })?;
            row.set(attribute.name(), value);
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;
    use crate::types::{DataType, ParseErrorKind, Value};

    fn items_schema() -> Schema {
        Schema::new(vec![
            Attribute::new("id", DataType::Integer),
            Attribute::new("label", DataType::String),
        ])
    }

    fn raw(pairs: &[(&str, Option<RawValue>)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_valid_row_passes() {
        let schema = items_schema();
        let validator = SchemaValidator::new(&schema);
        let row = Row::from_pairs([("id", Value::Integer(1)), ("label", Value::from("pen"))]);
        assert!(validator.validate_row(&row).is_ok());
    }

    #[test]
    fn test_missing_attribute_fails() {
        let schema = items_schema();
        let validator = SchemaValidator::new(&schema);
        let row = Row::from_pairs([("id", Value::Integer(1))]);

        let err = validator.validate_row(&row).unwrap_err();
        assert_eq!(err.attribute(), "label");
        assert_eq!(err.expected(), DataType::String);
        assert_eq!(err.cause().kind(), ParseErrorKind::Empty);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let schema = items_schema();
        let validator = SchemaValidator::new(&schema);
        let row = Row::from_pairs([
            ("id", Value::Integer(1)),
            ("label", Value::from("pen")),
            ("colour", Value::from("blue")),
        ]);
        assert!(validator.is_valid(&row));
    }

    #[test]
    fn test_stored_value_is_reparsed() {
        let schema = items_schema();
        let validator = SchemaValidator::new(&schema);

        // Text that reads as an integer is accepted for an integer attribute
        let row = Row::from_pairs([("id", Value::from("7")), ("label", Value::from("pen"))]);
        assert!(validator.is_valid(&row));

        let row = Row::from_pairs([("id", Value::from("seven")), ("label", Value::from("pen"))]);
        let err = validator.validate_row(&row).unwrap_err();
        assert_eq!(err.attribute(), "id");
    }

    #[test]
    fn test_canonicalize_folds_text_into_typed_values() {
        let schema = Schema::new(vec![
            Attribute::new("grade", DataType::Char),
            Attribute::new("span", DataType::IntInterval),
            Attribute::new("id", DataType::Integer),
        ]);
        let validator = SchemaValidator::new(&schema);
        let row = Row::from_pairs([
            ("grade", Value::from("a")),
            ("span", Value::from("1 to 10")),
            ("id", Value::from("7")),
            ("note", Value::from("kept")),
        ]);

        let canonical = validator.canonicalize(&row).unwrap();
        assert_eq!(canonical.get("grade"), Some(&Value::Char('a')));
        assert_eq!(canonical.get("span"), Some(&Value::interval(1, 10)));
        assert_eq!(canonical.get("id"), Some(&Value::Integer(7)));
        assert_eq!(canonical.get("note"), Some(&Value::from("kept")));
    }

    #[test]
    fn test_parse_row_keeps_schema_attributes_only() {
        let schema = items_schema();
        let validator = SchemaValidator::new(&schema);
        let input = raw(&[
            ("id", Some(RawValue::text("3"))),
            ("label", Some(RawValue::text("cup"))),
            ("ignored", Some(RawValue::text("x"))),
        ]);

        let row = validator.parse_row(&input).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("id"), Some(&Value::Integer(3)));
        assert_eq!(row.get("label"), Some(&Value::from("cup")));
    }

    #[test]
    fn test_parse_row_rejects_null() {
        let schema = items_schema();
        let validator = SchemaValidator::new(&schema);
        let input = raw(&[("id", Some(RawValue::text("3"))), ("label", None)]);

        let err = validator.parse_row(&input).unwrap_err();
        assert_eq!(err.attribute(), "label");
    }
}
