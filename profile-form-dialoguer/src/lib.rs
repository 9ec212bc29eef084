//! # profile-form-dialoguer
//!
//! Dialoguer backend for profile-form.
//!
//! This crate renders a [`FormEngine`](profile_form::FormEngine) as a
//! sequence of terminal prompts using the `dialoguer` library. Answers are
//! reported to the engine one at a time, so dependent pickers (states of the
//! chosen country) are always up to date.
//!
//! ## Example
//!
//! ```rust,ignore
//! use profile_form::{FormConfig, FormEngine, RawDescription};
//! use profile_form_dialoguer::DialoguerBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let raw = RawDescription::from_json_str(PAYLOAD)?;
//!     let mut engine = FormEngine::initialize(raw, FormConfig::checkout())?;
//!     let values = engine.run(DialoguerBackend::new())?;
//!     println!("{}", values.to_json());
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerBackend, DialoguerError};
