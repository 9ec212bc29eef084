//! Submission: validate every section, then merge into one flat mapping.

use tracing::{info, warn};

use crate::{
    FieldSpec, FieldValue, FormInstance, FormValues, SectionFailure, ValidationFailure,
};

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every section validated; the merged values in form order.
    Merged(FormValues),

    /// At least one section failed or field ids collided. Nothing was merged.
    Rejected(ValidationFailure),
}

impl SubmitOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(_))
    }

    pub fn into_result(self) -> Result<FormValues, ValidationFailure> {
        match self {
            Self::Merged(values) => Ok(values),
            Self::Rejected(failure) => Err(failure),
        }
    }
}

impl From<Result<FormValues, ValidationFailure>> for SubmitOutcome {
    fn from(result: Result<FormValues, ValidationFailure>) -> Self {
        match result {
            Ok(values) => Self::Merged(values),
            Err(failure) => Self::Rejected(failure),
        }
    }
}

/// Validate every section of `form` and merge the results.
pub fn validate_and_merge(form: &FormInstance) -> Result<FormValues, ValidationFailure> {
    validate_and_merge_with(form, &|_, _, _| Ok(()))
}

/// Like [`validate_and_merge`], additionally running `validate` on every
/// present value.
///
/// Every section is validated so the failure lists all failing sections.
/// Nothing is merged unless all of them pass.
pub fn validate_and_merge_with(
    form: &FormInstance,
    validate: &dyn Fn(&FieldSpec, &FieldValue, &FormValues) -> Result<(), String>,
) -> Result<FormValues, ValidationFailure> {
    let mut merged = FormValues::new();
    let mut failure = ValidationFailure::default();

    for (index, section) in form.sections().iter().enumerate() {
        match section.validated_values_with(validate) {
            Ok(values) => {
                for (id, value) in values {
                    if merged.contains(id.as_str()) {
                        if !failure.collisions.contains(&id) {
                            failure.collisions.push(id);
                        }
                    } else {
                        merged.insert(id, value);
                    }
                }
            }
            Err(errors) => failure.sections.push(SectionFailure {
                index,
                key: section.key().clone(),
                errors,
            }),
        }
    }

    if failure.is_empty() {
        info!(fields = merged.len(), "form submitted");
        Ok(merged)
    } else {
        warn!(
            failed_sections = failure.sections.len(),
            collisions = failure.collisions.len(),
            "form rejected"
        );
        Err(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldErrorKind, FieldId, FieldKind, SectionSchema};

    fn section(key: &str, fields: &[(&str, bool, Option<&str>)]) -> SectionSchema {
        let mut section = SectionSchema::new(key, "");
        for (id, required, value) in fields {
            section
                .push_field(
                    FieldSpec::new(*id, FieldKind::Text)
                        .with_required(*required)
                        .with_value(value.map(FieldValue::from)),
                )
                .unwrap();
        }
        section
    }

    #[test]
    fn merges_in_form_order() {
        let form = FormInstance::new(vec![
            section("C", &[("email", true, Some("a@b.c")), ("phone", false, None)]),
            section("S", &[("s_name", true, Some("Ada"))]),
        ]);

        let merged = validate_and_merge(&form).unwrap();
        assert_eq!(
            merged.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>(),
            ["email", "s_name"]
        );
        assert!(!merged.contains("phone"));
    }

    #[test]
    fn lists_every_failing_section() {
        let form = FormInstance::new(vec![
            section("C", &[("email", true, None)]),
            section("B", &[("b_name", true, Some("Ada"))]),
            section("S", &[("s_name", true, Some("  "))]),
        ]);

        let failure = validate_and_merge(&form).unwrap_err();
        assert_eq!(failure.failed_sections().collect::<Vec<_>>(), [0, 2]);
        assert_eq!(failure.section(2).unwrap().errors[0].kind, FieldErrorKind::Missing);
        assert!(failure.collisions.is_empty());
    }

    #[test]
    fn reports_collisions() {
        let form = FormInstance::new(vec![
            section("B", &[("name", true, Some("Ada"))]),
            section("S", &[("name", true, Some("Grace"))]),
        ]);

        let failure = validate_and_merge(&form).unwrap_err();
        assert!(failure.sections.is_empty());
        assert_eq!(failure.collisions, vec![FieldId::from("name")]);
    }

    #[test]
    fn custom_validator_rejects() {
        let form = FormInstance::new(vec![section("C", &[("email", true, Some("nope"))])]);
        let failure = validate_and_merge_with(&form, &|field, value, _| {
            match (field.id().as_str(), value.as_str()) {
                ("email", Some(text)) if !text.contains('@') => Err("invalid email".to_string()),
                _ => Ok(()),
            }
        })
        .unwrap_err();

        assert_eq!(
            failure.section(0).unwrap().errors[0].kind,
            FieldErrorKind::Rejected("invalid email".to_string())
        );
    }

    #[test]
    fn outcome_converts() {
        let outcome = SubmitOutcome::from(validate_and_merge(&FormInstance::default()));
        assert!(outcome.is_merged());
        assert!(outcome.into_result().unwrap().is_empty());
    }
}
