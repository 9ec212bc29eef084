//! The form state engine: owns the form, applies edits, submits.

use std::fmt;

use tracing::{debug, info, warn};

use crate::backend::FormBackend;
use crate::builder::{build_section, build_section_with_values, order_sections};
use crate::config::FormConfig;
use crate::messages;
use crate::normalize::BuildContext;
use crate::submit::{SubmitOutcome, validate_and_merge};
use crate::{
    FieldId, FieldKind, FieldSource, FieldUpdates, FormError, FormInstance, FormValues,
    RawDescription, RawSection, RequestContext, SchemaBuildError, SectionKey, SectionSchema,
    Translator, Untranslated, ValidationFailure,
};

/// Where a form is in its edit/submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting edits.
    Ready,

    /// Validating and merging. Only observable from inside a submit call.
    Submitting,

    /// The last submit succeeded.
    Merged,

    /// The last submit was rejected.
    Rejected,
}

/// Owns a [`FormInstance`] and keeps it consistent as the user edits it.
///
/// The raw payload of every section is kept so that an edit rebuilds just
/// the affected section from scratch with the live values applied.
pub struct FormEngine {
    raw: Vec<(SectionKey, RawSection)>,
    form: FormInstance,
    config: FormConfig,
    translator: Box<dyn Translator + Send + Sync>,
    phase: FormPhase,
}

impl FormEngine {
    /// Build the form with untranslated texts.
    pub fn initialize(raw: RawDescription, config: FormConfig) -> Result<Self, SchemaBuildError> {
        Self::initialize_with(raw, config, Untranslated)
    }

    /// Build the form, translating help texts and placeholders with `translator`.
    pub fn initialize_with(
        raw: RawDescription,
        config: FormConfig,
        translator: impl Translator + Send + Sync + 'static,
    ) -> Result<Self, SchemaBuildError> {
        let translator: Box<dyn Translator + Send + Sync> = Box::new(translator);
        let raw = order_sections(raw, &config);

        let sections = {
            let ctx = BuildContext::new(&config, translator.as_ref());
            raw.iter()
                .map(|(key, section)| build_section(key, section, &ctx))
                .collect::<Result<Vec<_>, _>>()?
        };
        let form = FormInstance::new(sections).with_edit_mode(config.edit_mode);

        info!(
            sections = form.len(),
            fields = form.field_ids().count(),
            edit_mode = config.edit_mode,
            "form initialized"
        );

        Ok(Self {
            raw,
            form,
            config,
            translator,
            phase: FormPhase::Ready,
        })
    }

    /// Fetch the field description from `source`, then build the form.
    pub fn load<S: FieldSource>(
        source: &S,
        context: &RequestContext,
        config: FormConfig,
    ) -> Result<Self, FormError> {
        Self::load_with(source, context, config, Untranslated)
    }

    /// Like [`load`](Self::load), with a translator.
    pub fn load_with<S: FieldSource>(
        source: &S,
        context: &RequestContext,
        config: FormConfig,
        translator: impl Translator + Send + Sync + 'static,
    ) -> Result<Self, FormError> {
        debug!(location = %context.location, action = %context.action, "fetching field description");
        let raw = source.fetch(context).map_err(FormError::fetch)?;
        Ok(Self::initialize_with(raw, config, translator)?)
    }

    pub fn form(&self) -> &FormInstance {
        &self.form
    }

    pub fn section(&self, index: usize) -> Option<&SectionSchema> {
        self.form.section(index)
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// "Save" when editing an existing profile, "Register" otherwise.
    pub fn submit_label(&self, translator: &dyn Translator) -> String {
        let msgid = if self.form.is_edit_mode() {
            messages::SAVE
        } else {
            messages::REGISTER
        };
        translator.gettext(msgid)
    }

    /// Apply a batch of edits to the section at `index`.
    ///
    /// `None` clears a field; ids the section does not declare are ignored.
    /// When a field another field depends on changes, the dependent field is
    /// re-resolved and loses a value its new value set no longer offers. Only
    /// this section is rebuilt.
    pub fn on_fields_changed(
        &mut self,
        index: usize,
        updates: FieldUpdates,
    ) -> Result<(), FormError> {
        let section = self
            .form
            .section(index)
            .ok_or(FormError::UnknownSection(index))?;

        let mut values = section.values();
        let mut changed = Vec::new();

        for (id, value) in updates {
            if section.field(id.as_str()).is_none() {
                warn!(section = %section.key(), field = %id, "ignoring edit of unknown field");
                continue;
            }
            if values.get(id.as_str()) != value.as_ref() {
                changed.push(id.clone());
            }
            match value {
                Some(value) => {
                    values.insert(id, value);
                }
                None => {
                    values.remove(id.as_str());
                }
            }
        }

        let (key, raw) = &self.raw[index];
        let ctx = BuildContext::new(&self.config, self.translator.as_ref());
        let mut rebuilt = build_section_with_values(key, raw, Some(&values), &ctx)?;

        for id in stale_dependents(&rebuilt, &changed) {
            debug!(section = %key, field = %id, "clearing value no longer offered");
            if let Some(field) = rebuilt.field_mut(id.as_str()) {
                field.set_value(None);
            }
        }

        debug!(section = %key, changed = changed.len(), "section rebuilt");
        self.form.replace_section(index, rebuilt);
        self.phase = FormPhase::Ready;
        Ok(())
    }

    /// Validate every section and merge the values.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.phase = FormPhase::Submitting;
        let outcome = SubmitOutcome::from(validate_and_merge(&self.form));
        self.phase = match outcome {
            SubmitOutcome::Merged(_) => FormPhase::Merged,
            SubmitOutcome::Rejected(_) => FormPhase::Rejected,
        };
        outcome
    }

    /// Submit and hand the merged values to `on_success`.
    ///
    /// `on_success` runs exactly once on success and never on rejection.
    pub fn submit_with<F>(&mut self, on_success: F) -> Result<(), ValidationFailure>
    where
        F: FnOnce(FormValues),
    {
        self.submit().into_result().map(on_success)
    }

    /// Let `backend` fill the form until it submits successfully.
    ///
    /// After a rejection the backend is shown the failure; it either lets the
    /// user retry or aborts with an error.
    pub fn run<B: FormBackend>(&mut self, backend: B) -> Result<FormValues, FormError> {
        loop {
            backend.fill(self).map_err(FormError::backend)?;
            match self.submit() {
                SubmitOutcome::Merged(values) => return Ok(values),
                SubmitOutcome::Rejected(failure) => {
                    backend.show_failure(&failure).map_err(FormError::backend)?;
                }
            }
        }
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("form", &self.form)
            .field("config", &self.config)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Dependent fields whose dependency is among `changed` and whose value is
/// not admitted by their freshly resolved value set.
fn stale_dependents(section: &SectionSchema, changed: &[FieldId]) -> Vec<FieldId> {
    section
        .fields()
        .filter_map(|field| match field.kind() {
            FieldKind::DependentChoice(dependent)
                if changed.contains(&dependent.depends_on)
                    && field
                        .current_value()
                        .is_some_and(|value| !dependent.resolved.admits(value)) =>
            {
                Some(field.id().clone())
            }
            _ => None,
        })
        .collect()
}
