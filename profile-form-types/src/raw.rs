//! The field description payload as delivered by the storefront API.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FieldId, SectionKey};

/// Section key to raw section, in payload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDescription {
    sections: IndexMap<SectionKey, RawSection>,
}

impl RawDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Add a section, replacing any section with the same key.
    pub fn with_section(mut self, key: impl Into<SectionKey>, section: RawSection) -> Self {
        self.sections.insert(key.into(), section);
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawSection> {
        self.sections.get(key)
    }

    /// Drop a section, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<RawSection> {
        self.sections.shift_remove(key)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&SectionKey, &RawSection)> {
        self.sections.iter()
    }

    pub fn into_sections(self) -> impl Iterator<Item = (SectionKey, RawSection)> {
        self.sections.into_iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of fields across all sections.
    pub fn field_count(&self) -> usize {
        self.sections.values().map(|s| s.fields.len()).sum()
    }
}

/// One section of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fields: Vec<RawField>,
}

impl RawSection {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: RawField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// One field of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub field_id: FieldId,

    pub field_type: FieldTypeCode,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Value table: a mapping for choices, a mapping of mappings for states.
    /// Some servers send an empty sequence instead of an empty mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,

    /// Pre-filled value. Dates are epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl RawField {
    pub fn new(field_id: impl Into<FieldId>, field_type: FieldTypeCode) -> Self {
        Self {
            field_id: field_id.into(),
            field_type,
            description: None,
            required: false,
            values: None,
            value: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_values(mut self, values: Value) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Single-character field type code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldTypeCode {
    /// `D`
    Date,
    /// `C`
    Checkbox,
    /// `S`
    SelectBox,
    /// `R`
    Radio,
    /// `W`
    Password,
    /// `I`
    Input,
    /// `O`
    Country,
    /// `A`
    State,
    /// Any code outside the known set.
    Other(String),
}

impl FieldTypeCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "D" => Self::Date,
            "C" => Self::Checkbox,
            "S" => Self::SelectBox,
            "R" => Self::Radio,
            "W" => Self::Password,
            "I" => Self::Input,
            "O" => Self::Country,
            "A" => Self::State,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Date => "D",
            Self::Checkbox => "C",
            Self::SelectBox => "S",
            Self::Radio => "R",
            Self::Password => "W",
            Self::Input => "I",
            Self::Country => "O",
            Self::State => "A",
            Self::Other(code) => code,
        }
    }

    /// Whether fields of this type hold a scalar usable as a dependency key.
    pub fn supplies_scalar_key(&self) -> bool {
        matches!(
            self,
            Self::SelectBox | Self::Radio | Self::Password | Self::Input | Self::Country
        )
    }
}

impl From<String> for FieldTypeCode {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<FieldTypeCode> for String {
    fn from(code: FieldTypeCode) -> Self {
        code.code().to_string()
    }
}
