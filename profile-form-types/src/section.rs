use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::{
    FieldError, FieldErrorKind, FieldId, FieldKind, FieldSpec, FieldValue, FormValues,
    SchemaBuildError, SectionKey,
};

/// One logical sub-form (contact details, billing address, ...).
///
/// Fields are kept in render and validation order; the ordered id list is the
/// key order of the field map, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSchema {
    key: SectionKey,
    description: String,
    fields: IndexMap<FieldId, FieldSpec>,
}

impl SectionSchema {
    pub fn new(key: impl Into<SectionKey>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn key(&self) -> &SectionKey {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Append a field. Field ids are unique within a section.
    pub fn push_field(&mut self, field: FieldSpec) -> Result<(), SchemaBuildError> {
        match self.fields.entry(field.id().clone()) {
            Entry::Occupied(entry) => Err(SchemaBuildError::DuplicateField {
                section: self.key.clone(),
                field: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(field);
                Ok(())
            }
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.get(id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldSpec> {
        self.fields.get_mut(id)
    }

    /// Fields in render order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn ordered_field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a renderer shows this section's title.
    pub fn shows_header(&self, is_edit_mode: bool) -> bool {
        is_edit_mode && !self.description.is_empty()
    }

    /// Snapshot of the current, unvalidated values.
    pub fn values(&self) -> FormValues {
        self.fields
            .values()
            .filter_map(|field| {
                field
                    .current_value()
                    .map(|value| (field.id().clone(), value.clone()))
            })
            .collect()
    }

    /// Produce the validated values of this section or every field error.
    pub fn validated_values(&self) -> Result<FormValues, Vec<FieldError>> {
        self.validated_values_with(&|_, _, _| Ok(()))
    }

    /// Like [`validated_values`](Self::validated_values), additionally running
    /// `validate` on every present value. The validator sees the values
    /// validated so far in this section.
    pub fn validated_values_with(
        &self,
        validate: &dyn Fn(&FieldSpec, &FieldValue, &FormValues) -> Result<(), String>,
    ) -> Result<FormValues, Vec<FieldError>> {
        let mut values = FormValues::new();
        let mut errors = Vec::new();

        for field in self.fields.values() {
            match check_field(field) {
                Ok(Some(value)) => match validate(field, value, &values) {
                    Ok(()) => {
                        values.insert(field.id().clone(), value.clone());
                    }
                    Err(message) => errors.push(FieldError::new(
                        field.id().clone(),
                        FieldErrorKind::Rejected(message),
                    )),
                },
                Ok(None) => {}
                Err(kind) => errors.push(FieldError::new(field.id().clone(), kind)),
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }
}

/// Check one field's current value against its kind.
///
/// Blank text counts as absent. Absent optional fields yield `Ok(None)`.
fn check_field(field: &FieldSpec) -> Result<Option<&FieldValue>, FieldErrorKind> {
    let Some(value) = field.current_value().filter(|value| !value.is_blank()) else {
        return if field.is_required() {
            Err(FieldErrorKind::Missing)
        } else {
            Ok(None)
        };
    };

    let accepted = match (field.kind(), value) {
        (FieldKind::Date(_), FieldValue::Date(_))
        | (FieldKind::Checkbox, FieldValue::Bool(_))
        | (FieldKind::Text | FieldKind::Password, FieldValue::Text(_)) => true,
        (FieldKind::Choice(_) | FieldKind::Country(_) | FieldKind::DependentChoice(_), _) => {
            match field.value_set() {
                Some(set) => {
                    return match value.as_key() {
                        Some(key) if set.contains(&key) => Ok(Some(value)),
                        _ => Err(FieldErrorKind::NotAnOption(display_value(value))),
                    };
                }
                // Degraded dependent field: free text.
                None => matches!(value, FieldValue::Text(_)),
            }
        }
        _ => false,
    };

    if accepted {
        Ok(Some(value))
    } else {
        Err(FieldErrorKind::TypeMismatch {
            expected: field.kind().value_type_name(),
            actual: value.type_name(),
        })
    }
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{ChoiceField, DateField, ValueTable};

    fn genders() -> ValueTable {
        [("M", "Male"), ("F", "Female")].into_iter().collect()
    }

    fn contact_section() -> SectionSchema {
        let mut section = SectionSchema::new("C", "Contact information");
        section
            .push_field(
                FieldSpec::new("name", FieldKind::Text)
                    .with_required(true)
                    .with_value(Some("Ann".into())),
            )
            .unwrap();
        section
            .push_field(FieldSpec::new("gender", FieldKind::Choice(ChoiceField::new(genders()))))
            .unwrap();
        section
            .push_field(FieldSpec::new("birthday", FieldKind::Date(DateField::new("%m/%d/%Y"))))
            .unwrap();
        section
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut section = contact_section();
        let err = section
            .push_field(FieldSpec::new("name", FieldKind::Text))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaBuildError::DuplicateField {
                section: "C".into(),
                field: "name".into(),
            }
        );
        assert_eq!(section.len(), 3);
    }

    #[test]
    fn ordered_ids_follow_insertion() {
        let section = contact_section();
        let ids: Vec<_> = section.ordered_field_ids().map(FieldId::as_str).collect();
        assert_eq!(ids, ["name", "gender", "birthday"]);
    }

    #[test]
    fn header_only_in_edit_mode_with_description() {
        assert!(contact_section().shows_header(true));
        assert!(!contact_section().shows_header(false));
        assert!(!SectionSchema::new("E", "").shows_header(true));
    }

    #[test]
    fn optional_absent_fields_are_omitted() {
        let values = contact_section().validated_values().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get_text("name").unwrap(), "Ann");
    }

    #[test]
    fn blank_required_text_is_missing() {
        let mut section = contact_section();
        section.field_mut("name").unwrap().set_value(Some("   ".into()));
        let errors = section.validated_values().unwrap_err();
        assert_eq!(errors, [FieldError::new("name", FieldErrorKind::Missing)]);
    }

    #[test]
    fn choice_must_be_offered() {
        let mut section = contact_section();
        section.field_mut("gender").unwrap().set_value(Some("X".into()));
        let errors = section.validated_values().unwrap_err();
        assert_eq!(
            errors,
            [FieldError::new("gender", FieldErrorKind::NotAnOption("X".into()))]
        );
    }

    #[test]
    fn type_mismatch() {
        let mut section = contact_section();
        section.field_mut("birthday").unwrap().set_value(Some("yesterday".into()));
        let errors = section.validated_values().unwrap_err();
        assert_eq!(
            errors,
            [FieldError::new(
                "birthday",
                FieldErrorKind::TypeMismatch {
                    expected: "Date",
                    actual: "Text",
                }
            )]
        );

        let date = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
        section.field_mut("birthday").unwrap().set_value(Some(date.into()));
        assert_eq!(section.validated_values().unwrap().get_date("birthday").unwrap(), date);
    }

    #[test]
    fn custom_validator_sees_earlier_values() {
        let mut section = contact_section();
        section.field_mut("gender").unwrap().set_value(Some("F".into()));

        let errors = section
            .validated_values_with(&|field, _, so_far| {
                if field.id().as_str() == "gender" && so_far.contains("name") {
                    Err("not today".to_string())
                } else {
                    Ok(())
                }
            })
            .unwrap_err();

        assert_eq!(
            errors,
            [FieldError::new("gender", FieldErrorKind::Rejected("not today".into()))]
        );
    }
}
