use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a field, e.g. `"s_country"`.
///
/// Unique within its section. The same id appearing in two sections is
/// allowed while editing but rejected when the sections are merged on submit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Create a new field id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the id is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for FieldId {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

/// Key of a form section, e.g. `"C"` (contact), `"B"` (billing), `"S"` (shipping).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKey(String);

impl SectionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SectionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
