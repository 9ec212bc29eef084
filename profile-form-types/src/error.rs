use crate::{FieldId, SectionKey};

/// A field description that is internally inconsistent.
///
/// Never surfaced to callers: the section builder degrades the field to free
/// text and logs the error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedFieldError {
    #[error("field '{field}' has no value table")]
    MissingValues { field: FieldId },

    #[error("field '{field}' has a non-text label for value '{value}'")]
    InvalidLabel { field: FieldId, value: String },
}

/// A section description that cannot be rendered safely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("section '{section}' declares field '{field}' more than once")]
    DuplicateField { section: SectionKey, field: FieldId },
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldErrorKind {
    #[error("a value is required")]
    Missing,

    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{0}' is not one of the offered values")]
    NotAnOption(String),

    /// Rejected by a caller-supplied validator.
    #[error("{0}")]
    Rejected(String),
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: FieldId,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<FieldId>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

/// A section that failed validation, with every failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    /// Position of the section in the form.
    pub index: usize,
    pub key: SectionKey,
    pub errors: Vec<FieldError>,
}

/// Submission was rejected; nothing was merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error(
    "form rejected: {} failing section(s), {} colliding field id(s)",
    .sections.len(),
    .collisions.len()
)]
pub struct ValidationFailure {
    /// Failing sections in form order.
    pub sections: Vec<SectionFailure>,

    /// Field ids valid in more than one section.
    pub collisions: Vec<FieldId>,
}

impl ValidationFailure {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.collisions.is_empty()
    }

    /// Indices of the failing sections.
    pub fn failed_sections(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections.iter().map(|s| s.index)
    }

    /// The failure for the section at `index`, if it failed.
    pub fn section(&self, index: usize) -> Option<&SectionFailure> {
        self.sections.iter().find(|s| s.index == index)
    }

    /// Every field error across all sections.
    pub fn field_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.sections.iter().flat_map(|s| s.errors.iter())
    }
}

/// Error type for form engine operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Schema(#[from] SchemaBuildError),

    #[error("No section at index {0}")]
    UnknownSection(usize),

    /// The field description could not be fetched.
    #[error("Field source error: {0}")]
    Source(anyhow::Error),

    /// Renderer failure or the user aborted after a rejection.
    #[error("Backend error: {0}")]
    Backend(anyhow::Error),
}

impl FormError {
    /// Create a field source error from any error type.
    pub fn fetch(err: impl Into<anyhow::Error>) -> Self {
        Self::Source(err.into())
    }

    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_summary() {
        let failure = ValidationFailure {
            sections: vec![SectionFailure {
                index: 1,
                key: "B".into(),
                errors: vec![FieldError::new("b_state", FieldErrorKind::Missing)],
            }],
            collisions: Vec::new(),
        };

        assert_eq!(
            failure.to_string(),
            "form rejected: 1 failing section(s), 0 colliding field id(s)"
        );
        assert_eq!(failure.failed_sections().collect::<Vec<_>>(), [1]);
        assert!(failure.section(0).is_none());
        assert_eq!(
            failure.field_errors().next().unwrap().to_string(),
            "b_state: a value is required"
        );
    }

    #[test]
    fn duplicate_field_message() {
        let err = SchemaBuildError::DuplicateField {
            section: "C".into(),
            field: "email".into(),
        };
        assert_eq!(
            err.to_string(),
            "section 'C' declares field 'email' more than once"
        );
    }
}
