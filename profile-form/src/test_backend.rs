//! Test backend for driving forms without user interaction.
//!
//! `TestBackend` replays scripted edits through
//! [`FormEngine::on_fields_changed`], exactly as an interactive renderer
//! would report them.
//!
//! # Example
//!
//! ```rust,ignore
//! use profile_form::{FormConfig, FormEngine, TestBackend};
//!
//! let mut engine = FormEngine::initialize(payload, FormConfig::default())?;
//! let values = engine.run(
//!     TestBackend::new()
//!         .with_response("s_name", "Ada")
//!         .with_response("s_country", "US")
//!         .with_response("s_state", "NY"),
//! )?;
//!
//! assert_eq!(values.get_text("s_state")?, "NY");
//! ```

use std::cell::Cell;

use crate::{
    FieldId, FieldUpdates, FieldValue, FormBackend, FormEngine, FormError, ValidationFailure,
};

/// A backend that applies pre-configured edits.
///
/// Edits are grouped in rounds. Each call to `fill` replays the next round;
/// a rejection is accepted (and the form retried) while rounds remain.
#[derive(Debug, Clone)]
pub struct TestBackend {
    rounds: Vec<Vec<Edit>>,
    next_round: Cell<usize>,
}

#[derive(Debug, Clone)]
enum Edit {
    /// Edit whichever section declares the field.
    Field { id: FieldId, value: Option<FieldValue> },

    /// A batch of edits to one section.
    Section { index: usize, updates: FieldUpdates },
}

/// Error type for TestBackend.
#[derive(Debug, thiserror::Error)]
pub enum TestBackendError {
    #[error("No section declares field '{0}'")]
    UnknownField(FieldId),

    #[error("Form rejected: {0}")]
    Rejected(ValidationFailure),

    #[error("No scripted edits left")]
    Exhausted,

    #[error(transparent)]
    Engine(#[from] FormError),
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBackend {
    /// Create a backend with a single, empty round.
    pub fn new() -> Self {
        Self {
            rounds: vec![Vec::new()],
            next_round: Cell::new(0),
        }
    }

    fn push(mut self, edit: Edit) -> Self {
        if let Some(round) = self.rounds.last_mut() {
            round.push(edit);
        }
        self
    }

    /// Set a field, wherever it lives in the form.
    pub fn with_response(self, id: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        self.push(Edit::Field {
            id: id.into(),
            value: Some(value.into()),
        })
    }

    /// Clear a field, wherever it lives in the form.
    pub fn with_cleared(self, id: impl Into<FieldId>) -> Self {
        self.push(Edit::Field {
            id: id.into(),
            value: None,
        })
    }

    /// Set a field in the section at `index`.
    pub fn with_value(
        self,
        index: usize,
        id: impl Into<FieldId>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.with_edit(index, FieldUpdates::new().set(id, value))
    }

    /// Apply a batch of edits to the section at `index` in one change event.
    pub fn with_edit(self, index: usize, updates: FieldUpdates) -> Self {
        self.push(Edit::Section { index, updates })
    }

    /// Start the round replayed after the previous one was rejected.
    pub fn then(mut self) -> Self {
        self.rounds.push(Vec::new());
        self
    }

    /// Number of rounds replayed so far.
    pub fn rounds_played(&self) -> usize {
        self.next_round.get()
    }
}

impl FormBackend for TestBackend {
    type Error = TestBackendError;

    fn fill(&self, engine: &mut FormEngine) -> Result<(), Self::Error> {
        let round = self.next_round.get();
        let edits = self.rounds.get(round).ok_or(TestBackendError::Exhausted)?;
        self.next_round.set(round + 1);

        for edit in edits {
            match edit {
                Edit::Field { id, value } => {
                    let (index, _) = engine
                        .form()
                        .find_field(id.as_str())
                        .ok_or_else(|| TestBackendError::UnknownField(id.clone()))?;
                    engine.on_fields_changed(
                        index,
                        FieldUpdates::new().assign(id.clone(), value.clone()),
                    )?;
                }
                Edit::Section { index, updates } => {
                    engine.on_fields_changed(*index, updates.clone())?;
                }
            }
        }
        Ok(())
    }

    fn show_failure(&self, failure: &ValidationFailure) -> Result<(), Self::Error> {
        if self.next_round.get() < self.rounds.len() {
            Ok(())
        } else {
            Err(TestBackendError::Rejected(failure.clone()))
        }
    }
}
