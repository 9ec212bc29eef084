//! Core types for the profile-form crate.
//!
//! This crate provides the foundational types for data-driven forms:
//! - `RawDescription` - The field description payload as sent by the storefront API
//! - `FieldSpec` and `FieldKind` - Individual fields and their kinds
//! - `SectionSchema` and `FormInstance` - Sub-forms and the form presented to a renderer
//! - `FieldValue`, `FormValues` and `FieldUpdates` - Live values and edits
//! - `Translator` and `FieldSource` traits - Collaborators supplied by the host

mod field_id;
pub use field_id::{FieldId, SectionKey};

mod field_value;
pub use field_value::FieldValue;

mod form_values;
pub use form_values::{FieldUpdates, FormValues, ValueError};

mod field;
pub use field::{
    ChoiceField, DateField, DependentChoiceField, EffectiveKind, FieldKind, FieldSpec,
    ResolvedValues, ValueTable, Widget,
};

mod section;
pub use section::SectionSchema;

mod form;
pub use form::FormInstance;

pub mod raw;
pub use raw::{FieldTypeCode, RawDescription, RawField, RawSection};

mod error;
pub use error::{
    FieldError, FieldErrorKind, FormError, MalformedFieldError, SchemaBuildError,
    SectionFailure, ValidationFailure,
};

mod traits;
pub use traits::{FieldSource, RequestContext, Translator, Untranslated};
