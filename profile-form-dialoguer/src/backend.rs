//! Dialoguer backend implementation for the FormBackend trait.

use chrono::NaiveDate;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, FuzzySelect, Input, Password, Select};
use profile_form::{
    FieldId, FieldSpec, FieldUpdates, FieldValue, FormBackend, FormEngine, FormError,
    ValidationFailure, ValueTable, Widget,
};
use thiserror::Error;

/// Value tables longer than this get a fuzzy-search picker.
const FUZZY_THRESHOLD: usize = 10;

/// Error type for the Dialoguer backend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the form (e.g., pressed Ctrl+C or Escape).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The engine refused an edit.
    #[error(transparent)]
    Engine(#[from] FormError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Dialoguer backend for interactive CLI prompts.
///
/// Fields are asked one at a time, section by section. Every answer is
/// reported to the engine before the next field is shown, so a state picker
/// already offers the states of the country chosen just before it.
#[derive(Debug, Default, Clone)]
pub struct DialoguerBackend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerBackend {
    /// Create a new Dialoguer backend with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a backend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Ask for one field and return the value to report.
    fn ask_field(&self, field: &FieldSpec) -> Result<Option<FieldValue>, DialoguerError> {
        let prompt = if field.help_text().is_empty() {
            field.label().to_string()
        } else {
            format!("{} {}", field.label(), field.help_text())
        };

        match field.widget() {
            Widget::TextInput { secure: false } => self.ask_text(&prompt, field),
            Widget::TextInput { secure: true } => self.ask_password(&prompt, field),
            Widget::DatePicker { format } => self.ask_date(&prompt, format, field),
            Widget::Toggle => self.ask_toggle(&prompt, field),
            Widget::Select {
                values,
                placeholder,
                allow_none,
            } => self.ask_choice(&prompt, values, placeholder, allow_none, field),
        }
    }

    fn ask_text(&self, prompt: &str, field: &FieldSpec) -> Result<Option<FieldValue>, DialoguerError> {
        let theme = self.theme();
        let mut builder: Input<String> = Input::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .allow_empty(!field.is_required());

        if let Some(FieldValue::Text(current)) = field.current_value() {
            builder = builder.default(current.clone());
        }

        let value = builder.interact_text().map_err(prompt_error)?;
        Ok(non_empty(value))
    }

    fn ask_password(
        &self,
        prompt: &str,
        field: &FieldSpec,
    ) -> Result<Option<FieldValue>, DialoguerError> {
        let theme = self.theme();
        let value = Password::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .allow_empty_password(!field.is_required())
            .interact()
            .map_err(prompt_error)?;
        Ok(non_empty(value))
    }

    fn ask_date(
        &self,
        prompt: &str,
        format: &str,
        field: &FieldSpec,
    ) -> Result<Option<FieldValue>, DialoguerError> {
        let theme = self.theme();
        loop {
            let mut builder: Input<String> = Input::with_theme(theme.as_ref())
                .with_prompt(format!("{prompt} ({})", field.placeholder()))
                .allow_empty(!field.is_required());

            if let Some(date) = field.current_value().and_then(FieldValue::as_date) {
                builder = builder.default(date.format(format).to_string());
            }

            let input = builder.interact_text().map_err(prompt_error)?;
            if input.trim().is_empty() {
                return Ok(None);
            }

            match NaiveDate::parse_from_str(input.trim(), format) {
                Ok(date) => return Ok(Some(FieldValue::Date(date))),
                Err(err) => println!("Error: {err}"),
            }
        }
    }

    fn ask_toggle(&self, prompt: &str, field: &FieldSpec) -> Result<Option<FieldValue>, DialoguerError> {
        let theme = self.theme();
        let current = field.current_value().and_then(FieldValue::as_bool);
        let value = Confirm::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .default(current.unwrap_or(false))
            .interact()
            .map_err(prompt_error)?;
        Ok(Some(FieldValue::Bool(value)))
    }

    fn ask_choice(
        &self,
        prompt: &str,
        values: &ValueTable,
        placeholder: &str,
        allow_none: bool,
        field: &FieldSpec,
    ) -> Result<Option<FieldValue>, DialoguerError> {
        let mut items: Vec<&str> = Vec::with_capacity(values.len() + 1);
        if allow_none {
            items.push(if placeholder.is_empty() { "-" } else { placeholder });
        }
        items.extend(values.iter().map(|(_, label)| label));

        let offset = usize::from(allow_none);
        let default = field
            .current_value()
            .and_then(FieldValue::as_key)
            .and_then(|key| values.position(&key))
            .map_or(0, |position| position + offset);

        let theme = self.theme();
        let selection = if values.len() > FUZZY_THRESHOLD {
            FuzzySelect::with_theme(theme.as_ref())
                .with_prompt(prompt)
                .items(items.as_slice())
                .default(default)
                .interact()
        } else {
            Select::with_theme(theme.as_ref())
                .with_prompt(prompt)
                .items(items.as_slice())
                .default(default)
                .interact()
        }
        .map_err(prompt_error)?;

        Ok(selection
            .checked_sub(offset)
            .and_then(|index| values.keys().nth(index))
            .map(FieldValue::from))
    }
}

fn non_empty(value: String) -> Option<FieldValue> {
    if value.trim().is_empty() {
        None
    } else {
        Some(FieldValue::Text(value))
    }
}

impl FormBackend for DialoguerBackend {
    type Error = DialoguerError;

    fn fill(&self, engine: &mut FormEngine) -> Result<(), Self::Error> {
        for index in 0..engine.form().len() {
            let Some(section) = engine.section(index) else {
                continue;
            };

            if engine.form().shows_header(index) {
                println!();
                println!("{}", section.description());
            }

            let ids: Vec<FieldId> = section.ordered_field_ids().cloned().collect();
            for id in ids {
                // The section is rebuilt after every answer; look the field up again.
                let Some(field) = engine.section(index).and_then(|s| s.field(id.as_str())) else {
                    continue;
                };
                let value = self.ask_field(field)?;
                engine.on_fields_changed(index, FieldUpdates::new().assign(id, value))?;
            }
        }
        Ok(())
    }

    fn show_failure(&self, failure: &ValidationFailure) -> Result<(), Self::Error> {
        println!();
        for section in &failure.sections {
            println!("Please correct section {}:", section.key);
            for error in &section.errors {
                println!("  {error}");
            }
        }
        for id in &failure.collisions {
            println!("Field '{id}' appears in more than one section");
        }

        let theme = self.theme();
        let retry = Confirm::with_theme(theme.as_ref())
            .with_prompt("Edit the form again?")
            .default(true)
            .interact()
            .map_err(prompt_error)?;

        if retry {
            Ok(())
        } else {
            Err(DialoguerError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let _backend = DialoguerBackend::new();
        let _plain = DialoguerBackend::plain();
    }

    #[test]
    fn error_types() {
        let err = DialoguerError::Cancelled;
        assert_eq!(err.to_string(), "Form cancelled by user");

        let err = DialoguerError::from(FormError::UnknownSection(3));
        assert_eq!(err.to_string(), "No section at index 3");
    }

    #[test]
    fn interrupted_io_is_cancellation() {
        let interrupted = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(matches!(prompt_error(interrupted), DialoguerError::Cancelled));

        let broken = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(prompt_error(broken), DialoguerError::Dialoguer(_)));
    }

    #[test]
    fn blank_text_clears() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("Ada".to_string()), Some(FieldValue::from("Ada")));
    }
}
