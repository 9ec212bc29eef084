//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{FieldId, SectionKey};

/// How raw descriptions are turned into a form.
///
/// Deserializable so hosts can ship it alongside their other settings; every
/// field falls back to the storefront defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Section precedence. Keys not listed sort last in payload order.
    pub section_order: Vec<SectionKey>,

    /// Sibling ids a state field looks for, in priority order.
    pub country_keys: Vec<FieldId>,

    /// Sections dropped before building (the checkout step skips `E`).
    pub excluded_sections: Vec<SectionKey>,

    /// `chrono` format used to display dates.
    pub date_format: String,

    /// Editing an existing profile: section titles are shown and the submit
    /// label reads "Save".
    pub edit_mode: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            section_order: ["E", "C", "B", "S"].into_iter().map(SectionKey::from).collect(),
            country_keys: ["s_country", "b_country"].into_iter().map(FieldId::from).collect(),
            excluded_sections: Vec::new(),
            date_format: "%m/%d/%Y".to_string(),
            edit_mode: false,
        }
    }
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The checkout delivery step: custom profile fields are left out.
    pub fn checkout() -> Self {
        Self::default().excluding("E")
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_edit_mode(mut self, edit_mode: bool) -> Self {
        self.edit_mode = edit_mode;
        self
    }

    pub fn with_section_order<I, K>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<SectionKey>,
    {
        self.section_order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_country_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldId>,
    {
        self.country_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn excluding(mut self, key: impl Into<SectionKey>) -> Self {
        self.excluded_sections.push(key.into());
        self
    }

    pub fn excludes(&self, key: &SectionKey) -> bool {
        self.excluded_sections.contains(key)
    }

    /// Sort rank of a section key; unlisted keys share the last rank.
    pub fn section_rank(&self, key: &SectionKey) -> usize {
        self.section_order
            .iter()
            .position(|k| k == key)
            .unwrap_or(self.section_order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FormConfig::default();
        assert_eq!(config.section_rank(&"E".into()), 0);
        assert_eq!(config.section_rank(&"S".into()), 3);
        assert_eq!(config.section_rank(&"X".into()), 4);
        assert!(!config.excludes(&"E".into()));
        assert!(FormConfig::checkout().excludes(&"E".into()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FormConfig::from_json_str(r#"{"edit_mode": true, "section_order": ["S", "B"]}"#)
            .unwrap();
        assert!(config.edit_mode);
        assert_eq!(config.section_rank(&"S".into()), 0);
        assert_eq!(config.section_rank(&"C".into()), 2);
        assert_eq!(config.date_format, "%m/%d/%Y");
        assert_eq!(config.country_keys.len(), 2);
    }
}
