//! Row: parsed values keyed by attribute name
//!
//! Equality and hashing cover the full key/value content, independent of
//! insertion order. Construction does not validate; the owning table
//! does that at mutation time.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Value;

/// One record of parsed values
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Row {
    data: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(data: BTreeMap<String, Value>) -> Self {
        Self { data }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a row from `(name, value)` pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Sets a value, returning the previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(name.into(), value.into())
    }

    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> BTreeMap<String, Value> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// This row's entries overlaid by `other`'s. On a shared key the value
    /// from `other` wins.
    pub fn merged(&self, other: &Row) -> Row {
        let mut data = self.data.clone();
        data.extend(other.data.iter().map(|(k, v)| (k.clone(), v.clone())));
        Row { data }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Row {
            data: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for Row {
    fn from(data: BTreeMap<String, Value>) -> Self {
        Row { data }
    }
}
