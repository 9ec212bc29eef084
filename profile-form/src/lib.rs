//! # profile-form
//!
//! Dependency-aware form schema engine for data-driven storefront forms.
//! Backend-agnostic.
//!
//! The storefront API describes the profile and checkout forms as data:
//! sections of fields with single-letter type codes, value tables, required
//! flags and pre-filled values. This crate turns that payload into a
//! [`FormInstance`] a renderer can draw, keeps dependent fields (a state
//! list that depends on the selected country) consistent while the user
//! edits, and validates and merges every section on submit.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use profile_form::{FieldUpdates, FormConfig, FormEngine, RawDescription, SubmitOutcome};
//!
//! let raw = RawDescription::from_json_str(payload)?;
//! let mut engine = FormEngine::initialize(raw, FormConfig::checkout())?;
//!
//! // Report edits as the user makes them
//! engine.on_fields_changed(0, FieldUpdates::new().set("s_country", "US"))?;
//!
//! match engine.submit() {
//!     SubmitOutcome::Merged(values) => send_order(values.to_json()),
//!     SubmitOutcome::Rejected(failure) => show_errors(&failure),
//! }
//! ```
//!
//! ## Field types
//!
//! - `D` - Date picker, values are epoch seconds
//! - `C` - Checkbox
//! - `S` / `R` - Select box / radio group over a value table
//! - `W` - Password
//! - `I` - Free text
//! - `O` - Country picker
//! - `A` - State picker, its table chosen by the country field's value
//!
//! ## Backends
//!
//! Renderers implement [`FormBackend`] and drive a [`FormEngine`] edit by edit:
//! - `profile-form-dialoguer` - Terminal prompts via dialoguer
//! - [`TestBackend`] - Scripted edits for tests

// Re-export all types from profile-form-types
pub use profile_form_types::*;

mod backend;
pub use backend::FormBackend;

mod builder;
pub use builder::{build_section, build_section_with_values, order_sections};

mod config;
pub use config::FormConfig;

mod engine;
pub use engine::{FormEngine, FormPhase};

mod logging;
pub use logging::init_tracing;

pub mod messages;

mod normalize;
pub use normalize::{BuildContext, degraded, normalize};

mod resolve;
pub use resolve::resolve_dependent_values;

mod source;
pub use source::{SourceError, StaticFieldSource};

mod submit;
pub use submit::{SubmitOutcome, validate_and_merge, validate_and_merge_with};

// Test backend for driving forms without user interaction
mod test_backend;
pub use test_backend::{TestBackend, TestBackendError};
