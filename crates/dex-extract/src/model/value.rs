//! Decoded field values and records.

use indexmap::IndexMap;
use serde::Serialize;

/// A typed value decoded from one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<String>),
    /// Map values keep their source text; numbers are not parsed.
    Map(IndexMap<String, String>),
    ListMap(IndexMap<String, Vec<String>>),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, String>> {
        match self {
            FieldValue::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_map(&self) -> Option<&IndexMap<String, Vec<String>>> {
        match self {
            FieldValue::ListMap(v) => Some(v),
            _ => None,
        }
    }
}

/// A sparse, ordered mapping from field name to decoded value.
///
/// A missing name means the field was not present in the source, which is
/// distinct from a present-but-empty list or map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodedRecord {
    fields: IndexMap<String, FieldValue>,
}

impl DecodedRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Returns the value decoded for `name`, if the field was present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns true if the field was present in the source.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of decoded fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field matched.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in field-table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    pub fn map(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.get(name).and_then(FieldValue::as_map)
    }

    pub fn list_map(&self, name: &str) -> Option<&IndexMap<String, Vec<String>>> {
        self.get(name).and_then(FieldValue::as_list_map)
    }
}

impl<'a> IntoIterator for &'a DecodedRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
