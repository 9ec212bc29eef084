use crate::{FormEngine, ValidationFailure};

/// Trait for renderers that let a user fill in a form.
///
/// A backend reads the current [`FormInstance`](crate::FormInstance) through
/// the engine and reports every edit back with
/// [`FormEngine::on_fields_changed`], so dependent fields are re-resolved
/// while the user is still typing. It never mutates fields directly.
pub trait FormBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Let the user fill in the form.
    ///
    /// Returns when the user asks to submit, or with an error on
    /// cancellation or backend failure.
    fn fill(&self, engine: &mut FormEngine) -> Result<(), Self::Error>;

    /// Show a rejected submission.
    ///
    /// Returning `Ok(())` lets the user correct the form and try again; an
    /// error aborts [`FormEngine::run`].
    fn show_failure(&self, failure: &ValidationFailure) -> Result<(), Self::Error>;
}

impl<B: FormBackend + ?Sized> FormBackend for &B {
    type Error = B::Error;

    fn fill(&self, engine: &mut FormEngine) -> Result<(), Self::Error> {
        (**self).fill(engine)
    }

    fn show_failure(&self, failure: &ValidationFailure) -> Result<(), Self::Error> {
        (**self).show_failure(failure)
    }
}
