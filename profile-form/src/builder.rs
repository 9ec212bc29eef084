//! Section building: a raw section plus live values to a [`SectionSchema`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::FormConfig;
use crate::normalize::{BuildContext, degraded, normalize};
use crate::resolve::resolve_dependent_values;
use crate::{
    FieldId, FieldKind, FieldValue, FormValues, RawDescription, RawField, RawSection,
    SchemaBuildError, SectionKey, SectionSchema,
};

/// Build a section from its payload, seeding values from the payload.
pub fn build_section(
    key: &SectionKey,
    raw: &RawSection,
    ctx: &BuildContext<'_>,
) -> Result<SectionSchema, SchemaBuildError> {
    build_section_with_values(key, raw, None, ctx)
}

/// Build a section from its payload.
///
/// With `live` values, those replace the payload's pre-filled values
/// entirely: a field absent from `live` is empty. Dependent fields are
/// resolved against the seeded values of their dependency.
pub fn build_section_with_values(
    key: &SectionKey,
    raw: &RawSection,
    live: Option<&FormValues>,
    ctx: &BuildContext<'_>,
) -> Result<SectionSchema, SchemaBuildError> {
    let mut section = SectionSchema::new(key.clone(), raw.description());

    for field in &raw.fields {
        let mut spec = match normalize(field, &raw.fields, ctx) {
            Ok(spec) => spec,
            Err(err) => {
                // Already reported when the section was first built.
                if live.is_none() {
                    warn!(section = %key, error = %err, "malformed field, using free text");
                }
                degraded(field, ctx)
            }
        };

        let value = match live {
            Some(values) => values.get(field.field_id.as_str()).cloned(),
            None => seed_value(field, spec.kind()),
        };
        spec.set_value(value);
        section.push_field(spec)?;
    }

    resolve_dependents(&mut section);
    debug!(section = %key, fields = section.len(), "built section");
    Ok(section)
}

/// Order the payload's sections by configured precedence, dropping excluded
/// sections. Unlisted keys keep payload order after the listed ones.
pub fn order_sections(raw: RawDescription, config: &FormConfig) -> Vec<(SectionKey, RawSection)> {
    let mut sections: Vec<_> = raw
        .into_sections()
        .filter(|(key, _)| !config.excludes(key))
        .collect();
    sections.sort_by_key(|(key, _)| config.section_rank(key));
    sections
}

fn seed_value(raw: &RawField, kind: &FieldKind) -> Option<FieldValue> {
    let value = raw.value.as_ref()?;
    match kind {
        FieldKind::Date(_) => epoch_seconds(value).and_then(FieldValue::date_from_epoch),
        _ => FieldValue::from_json(value),
    }
}

/// Dates arrive as epoch seconds, as a number or a numeric string. Zero and
/// empty strings mean "not set".
fn epoch_seconds(value: &Value) -> Option<i64> {
    let seconds = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (seconds != 0).then_some(seconds)
}

fn resolve_dependents(section: &mut SectionSchema) {
    let dependents: Vec<(FieldId, FieldId)> = section
        .fields()
        .filter_map(|field| match field.kind() {
            FieldKind::DependentChoice(dependent) => {
                Some((field.id().clone(), dependent.depends_on.clone()))
            }
            _ => None,
        })
        .collect();

    for (id, depends_on) in dependents {
        let key_value = section
            .field(depends_on.as_str())
            .filter(|dependency| dependency.kind().supplies_scalar_key())
            .map(|dependency| dependency.current_value().cloned());

        let Some(field) = section.field_mut(id.as_str()) else {
            continue;
        };

        match key_value {
            Some(value) => {
                if let FieldKind::DependentChoice(dependent) = field.kind_mut() {
                    dependent.resolved = resolve_dependent_values(dependent, value.as_ref());
                }
            }
            None => {
                warn!(field = %id, depends_on = %depends_on, "dependency cannot supply a key, using free text");
                field.degrade_to_text();
            }
        }
    }
}
