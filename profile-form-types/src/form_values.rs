use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter};
use serde::Serialize;

use crate::{FieldId, FieldValue};

/// Error type for value access operations.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("Missing value for field: {0}")]
    Missing(FieldId),

    #[error("Type mismatch at field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: FieldId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// A flat, ordered mapping of field id to value.
///
/// Used both for a single section's snapshot and for the merged result of a
/// submission. Absent optional fields have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    values: IndexMap<FieldId, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Insert a value, returning the previous one.
    pub fn insert(
        &mut self,
        id: impl Into<FieldId>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.values.insert(id.into(), value.into())
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Remove a value, keeping the order of the remaining entries.
    pub fn remove(&mut self, id: &str) -> Option<FieldValue> {
        self.values.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values as a JSON object, dates as epoch seconds.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(id, value)| (id.to_string(), value.to_json()))
                .collect(),
        )
    }

    // === Convenience accessors ===

    /// Get a text value.
    pub fn get_text(&self, id: &str) -> Result<&str, ValueError> {
        match self.get(id) {
            Some(FieldValue::Text(s)) => Ok(s),
            Some(other) => Err(ValueError::TypeMismatch {
                field: id.into(),
                expected: "Text",
                actual: other.type_name(),
            }),
            None => Err(ValueError::Missing(id.into())),
        }
    }

    /// Get a checkbox value.
    pub fn get_bool(&self, id: &str) -> Result<bool, ValueError> {
        match self.get(id) {
            Some(FieldValue::Bool(b)) => Ok(*b),
            Some(other) => Err(ValueError::TypeMismatch {
                field: id.into(),
                expected: "Bool",
                actual: other.type_name(),
            }),
            None => Err(ValueError::Missing(id.into())),
        }
    }

    /// Get a date value.
    pub fn get_date(&self, id: &str) -> Result<chrono::NaiveDate, ValueError> {
        match self.get(id) {
            Some(FieldValue::Date(d)) => Ok(*d),
            Some(other) => Err(ValueError::TypeMismatch {
                field: id.into(),
                expected: "Date",
                actual: other.type_name(),
            }),
            None => Err(ValueError::Missing(id.into())),
        }
    }
}

impl<K: Into<FieldId>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(id, value)| (id.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for FormValues {
    type Item = (FieldId, FieldValue);
    type IntoIter = IntoIter<FieldId, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a FieldId, &'a FieldValue);
    type IntoIter = Iter<'a, FieldId, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// A batch of edits to one section, as delivered by a renderer.
///
/// `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdates {
    updates: IndexMap<FieldId, Option<FieldValue>>,
}

impl FieldUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a value.
    pub fn set(mut self, id: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        self.updates.insert(id.into(), Some(value.into()));
        self
    }

    /// Clear a field.
    pub fn clear(mut self, id: impl Into<FieldId>) -> Self {
        self.updates.insert(id.into(), None);
        self
    }

    /// Set or clear depending on `value`.
    pub fn assign(mut self, id: impl Into<FieldId>, value: Option<FieldValue>) -> Self {
        self.updates.insert(id.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl From<FormValues> for FieldUpdates {
    fn from(values: FormValues) -> Self {
        Self {
            updates: values
                .into_iter()
                .map(|(id, value)| (id, Some(value)))
                .collect(),
        }
    }
}

impl IntoIterator for FieldUpdates {
    type Item = (FieldId, Option<FieldValue>);
    type IntoIter = IntoIter<FieldId, Option<FieldValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.into_iter()
    }
}
