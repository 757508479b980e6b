//! Attribute and schema definitions
//!
//! Both are immutable once built. Changing a table's shape means
//! replacing its whole `Schema`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::DataType;

/// Named, typed column definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    data_type: DataType,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Returns the attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// Ordered list of attributes describing a table's shape.
///
/// Attribute names are expected to be unique but this is not enforced;
/// see [`Schema::duplicate_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    /// Create a schema from attributes, in order
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Returns the attributes in declaration order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// First attribute with the given name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attribute names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// This schema's attributes followed by `other`'s, without
    /// deduplicating names.
    pub fn concat(&self, other: &Schema) -> Schema {
        let mut attributes = self.attributes.clone();
        attributes.extend(other.attributes.iter().cloned());
        Schema { attributes }
    }

    /// Names declared more than once, each reported once, in order of
    /// their second appearance
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for name in self.names() {
            if !seen.insert(name) && reported.insert(name) {
                duplicates.push(name);
            }
        }
        duplicates
    }
}

impl FromIterator<Attribute> for Schema {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Schema::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
