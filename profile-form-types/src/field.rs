use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{FieldId, FieldValue};

/// A single input in a form section.
///
/// Values and dependent value sets are owned by the form engine; a renderer
/// only ever sees a shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    id: FieldId,

    /// The kind of field (determines widget and accepted values).
    kind: FieldKind,

    required: bool,

    /// Display label, opaque to the engine.
    label: String,

    /// Empty for required fields, the translated optional marker otherwise.
    help_text: String,

    /// Translated prompt for pickers ("Select country"), empty for plain inputs.
    placeholder: String,

    current_value: Option<FieldValue>,
}

impl FieldSpec {
    /// Create an optional field with no label.
    pub fn new(id: impl Into<FieldId>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            required: false,
            label: String::new(),
            help_text: String::new(),
            placeholder: String::new(),
            current_value: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_value(mut self, value: Option<FieldValue>) -> Self {
        self.current_value = value;
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut FieldKind {
        &mut self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn current_value(&self) -> Option<&FieldValue> {
        self.current_value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<FieldValue>) {
        self.current_value = value;
    }

    /// Relax this field to unconstrained free text, keeping its value.
    pub fn degrade_to_text(&mut self) {
        self.kind = FieldKind::Text;
        self.placeholder.clear();
    }

    /// The value set currently constraining this field, if any.
    pub fn value_set(&self) -> Option<&ValueTable> {
        self.kind.value_set()
    }

    /// Map the effective kind to the widget a renderer should show.
    pub fn widget(&self) -> Widget<'_> {
        match &self.kind {
            FieldKind::Date(date) => Widget::DatePicker {
                format: &date.display_format,
            },
            FieldKind::Checkbox => Widget::Toggle,
            FieldKind::Password => Widget::TextInput { secure: true },
            FieldKind::Text => Widget::TextInput { secure: false },
            FieldKind::Choice(choice) | FieldKind::Country(choice) => Widget::Select {
                values: &choice.values,
                placeholder: &self.placeholder,
                allow_none: !self.required,
            },
            FieldKind::DependentChoice(dependent) => match &dependent.resolved.value_set {
                Some(values) => Widget::Select {
                    values,
                    placeholder: &self.placeholder,
                    allow_none: !self.required,
                },
                None => Widget::TextInput { secure: false },
            },
        }
    }

    /// Text inputs offer a clear button while editing.
    pub fn clear_while_editing(&self) -> bool {
        matches!(self.widget(), Widget::TextInput { .. })
    }
}

/// The kind of field, determining accepted values and widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Calendar date picker.
    Date(DateField),

    /// Yes/no toggle.
    Checkbox,

    /// Pick one value from a static table (select boxes and radio groups).
    Choice(ChoiceField),

    /// Masked text input.
    Password,

    /// Single-line free text.
    Text,

    /// Pick a country from a static table.
    Country(ChoiceField),

    /// Pick one value from a table selected by another field's value.
    DependentChoice(DependentChoiceField),
}

impl FieldKind {
    /// Whether a field of this kind can act as the key of a dependent choice.
    pub fn supplies_scalar_key(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Password | Self::Choice(_) | Self::Country(_)
        )
    }

    /// The value set currently constraining fields of this kind, if any.
    pub fn value_set(&self) -> Option<&ValueTable> {
        match self {
            Self::Choice(choice) | Self::Country(choice) => Some(&choice.values),
            Self::DependentChoice(dependent) => dependent.resolved.value_set.as_ref(),
            Self::Date(_) | Self::Checkbox | Self::Password | Self::Text => None,
        }
    }

    pub fn is_dependent(&self) -> bool {
        matches!(self, Self::DependentChoice(_))
    }

    /// Name of the value type this kind accepts, for error messages.
    pub fn value_type_name(&self) -> &'static str {
        match self {
            Self::Date(_) => "Date",
            Self::Checkbox => "Bool",
            Self::Choice(_)
            | Self::Password
            | Self::Text
            | Self::Country(_)
            | Self::DependentChoice(_) => "Text",
        }
    }
}

/// Configuration for a date field.
#[derive(Debug, Clone, PartialEq)]
pub struct DateField {
    /// `chrono` format string used to display and parse dates.
    pub display_format: String,
}

impl DateField {
    pub fn new(display_format: impl Into<String>) -> Self {
        Self {
            display_format: display_format.into(),
        }
    }
}

/// Configuration for a field picking from a static table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceField {
    pub values: ValueTable,
}

impl ChoiceField {
    pub fn new(values: ValueTable) -> Self {
        Self { values }
    }
}

/// Configuration for a field whose value set depends on another field.
///
/// The dependency edge is resolved once when the section is built and stored
/// here; it is never rediscovered from sibling keys afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DependentChoiceField {
    /// The field whose value selects the table.
    pub depends_on: FieldId,

    /// Value tables keyed by the dependency's value (e.g. country code).
    pub tables: IndexMap<String, ValueTable>,

    /// The effective kind for the dependency's current value.
    pub resolved: ResolvedValues,
}

impl DependentChoiceField {
    /// Create an unresolved dependent field.
    pub fn new(depends_on: impl Into<FieldId>, tables: IndexMap<String, ValueTable>) -> Self {
        Self {
            depends_on: depends_on.into(),
            tables,
            resolved: ResolvedValues::unconstrained(),
        }
    }

    pub fn table_for(&self, key: &str) -> Option<&ValueTable> {
        self.tables.get(key)
    }
}

/// Whether a dependent field currently behaves as a choice or as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveKind {
    FreeText,
    Choice,
}

/// Outcome of resolving a dependent field against its dependency's value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValues {
    pub effective: EffectiveKind,
    pub value_set: Option<ValueTable>,
}

impl ResolvedValues {
    pub fn unconstrained() -> Self {
        Self {
            effective: EffectiveKind::FreeText,
            value_set: None,
        }
    }

    pub fn constrained(values: ValueTable) -> Self {
        Self {
            effective: EffectiveKind::Choice,
            value_set: Some(values),
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.value_set.is_some()
    }

    /// Whether `value` may stay selected under this resolution.
    ///
    /// Unconstrained resolutions admit anything.
    pub fn admits(&self, value: &FieldValue) -> bool {
        match &self.value_set {
            None => true,
            Some(set) => value.as_key().is_some_and(|key| set.contains(&key)),
        }
    }
}

/// Ordered mapping of value to display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    entries: IndexMap<String, String>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(value.into(), label.into());
    }

    pub fn label(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Position of `value` in display order.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.entries.get_index_of(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The input widget a renderer should map a field to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget<'a> {
    TextInput {
        secure: bool,
    },
    DatePicker {
        format: &'a str,
    },
    Toggle,
    Select {
        values: &'a ValueTable,
        placeholder: &'a str,
        allow_none: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> ValueTable {
        [("CA", "California"), ("NY", "New York")].into_iter().collect()
    }

    #[test]
    fn table_keeps_order() {
        let table: ValueTable = [("NY", "New York"), ("CA", "California")].into_iter().collect();
        assert_eq!(table.keys().collect::<Vec<_>>(), ["NY", "CA"]);
        assert_eq!(table.position("CA"), Some(1));
        assert_eq!(table.label("NY"), Some("New York"));
    }

    #[test]
    fn unresolved_dependent_renders_as_text() {
        let mut tables = IndexMap::new();
        tables.insert("US".to_string(), states());
        let field = FieldSpec::new(
            "s_state",
            FieldKind::DependentChoice(DependentChoiceField::new("s_country", tables)),
        );

        assert_eq!(field.widget(), Widget::TextInput { secure: false });
        assert!(field.clear_while_editing());
        assert!(field.value_set().is_none());
    }

    #[test]
    fn resolved_dependent_renders_as_select() {
        let mut dependent = DependentChoiceField::new("s_country", IndexMap::new());
        dependent.resolved = ResolvedValues::constrained(states());
        let field = FieldSpec::new("s_state", FieldKind::DependentChoice(dependent))
            .with_required(true)
            .with_placeholder("Select state");

        match field.widget() {
            Widget::Select {
                values,
                placeholder,
                allow_none,
            } => {
                assert_eq!(values.len(), 2);
                assert_eq!(placeholder, "Select state");
                assert!(!allow_none);
            }
            other => panic!("Expected select widget, got {other:?}"),
        }
    }

    #[test]
    fn admits() {
        assert!(ResolvedValues::unconstrained().admits(&"anything".into()));
        let resolved = ResolvedValues::constrained(states());
        assert!(resolved.admits(&"CA".into()));
        assert!(!resolved.admits(&"ON".into()));
        assert!(!resolved.admits(&"".into()));
    }

    #[test]
    fn degrade_keeps_value() {
        let mut field = FieldSpec::new("gender", FieldKind::Choice(ChoiceField::new(states())))
            .with_placeholder("Pick")
            .with_value(Some("CA".into()));
        field.degrade_to_text();
        assert_eq!(field.kind(), &FieldKind::Text);
        assert_eq!(field.placeholder(), "");
        assert_eq!(field.current_value(), Some(&"CA".into()));
    }

    #[test]
    fn scalar_key_suppliers() {
        assert!(FieldKind::Text.supplies_scalar_key());
        assert!(FieldKind::Country(ChoiceField::new(states())).supplies_scalar_key());
        assert!(!FieldKind::Checkbox.supplies_scalar_key());
        assert!(!FieldKind::Date(DateField::new("%m/%d/%Y")).supplies_scalar_key());
    }
}
