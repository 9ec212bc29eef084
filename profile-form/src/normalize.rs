//! Field descriptor normalization: one raw payload field to a canonical [`FieldSpec`].

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::FormConfig;
use crate::messages;
use crate::{
    ChoiceField, DateField, DependentChoiceField, FieldId, FieldKind, FieldSpec, FieldTypeCode,
    MalformedFieldError, RawField, Translator, ValueTable,
};

/// Everything normalization and section building need besides the payload.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a FormConfig,
    pub translator: &'a dyn Translator,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a FormConfig, translator: &'a dyn Translator) -> Self {
        Self { config, translator }
    }

    fn tr(&self, msgid: &str) -> String {
        self.translator.gettext(msgid)
    }
}

/// Normalize `raw` into a field spec. `siblings` are the raw fields of the
/// same section (including `raw` itself) and are only consulted to pick the
/// dependency of a state field.
///
/// Pure. Errors are meant to be recovered with [`degraded`].
pub fn normalize(
    raw: &RawField,
    siblings: &[RawField],
    ctx: &BuildContext<'_>,
) -> Result<FieldSpec, MalformedFieldError> {
    let mut placeholder = String::new();

    let kind = match &raw.field_type {
        FieldTypeCode::Date => {
            placeholder = ctx.tr(messages::SELECT_DATE);
            FieldKind::Date(DateField::new(ctx.config.date_format.clone()))
        }
        FieldTypeCode::Checkbox => FieldKind::Checkbox,
        FieldTypeCode::SelectBox | FieldTypeCode::Radio => {
            FieldKind::Choice(ChoiceField::new(static_table(raw)?))
        }
        FieldTypeCode::Password => FieldKind::Password,
        FieldTypeCode::Input => FieldKind::Text,
        FieldTypeCode::Country => {
            placeholder = ctx.tr(messages::SELECT_COUNTRY);
            FieldKind::Country(ChoiceField::new(static_table(raw)?))
        }
        FieldTypeCode::State => match dependent_choice(raw, siblings, ctx)? {
            Some(dependent) => {
                placeholder = ctx.tr(messages::SELECT_STATE);
                FieldKind::DependentChoice(dependent)
            }
            None => FieldKind::Text,
        },
        FieldTypeCode::Other(code) => {
            warn!(field = %raw.field_id, code = %code, "unknown field type, using free text");
            FieldKind::Text
        }
    };

    Ok(base_spec(raw, kind, ctx).with_placeholder(placeholder))
}

/// The free-text field a malformed description degrades to.
pub fn degraded(raw: &RawField, ctx: &BuildContext<'_>) -> FieldSpec {
    base_spec(raw, FieldKind::Text, ctx)
}

fn base_spec(raw: &RawField, kind: FieldKind, ctx: &BuildContext<'_>) -> FieldSpec {
    let help_text = if raw.required {
        String::new()
    } else {
        ctx.tr(messages::OPTIONAL)
    };

    FieldSpec::new(raw.field_id.clone(), kind)
        .with_required(raw.required)
        .with_label(raw.label())
        .with_help_text(help_text)
}

fn static_table(raw: &RawField) -> Result<ValueTable, MalformedFieldError> {
    match &raw.values {
        Some(Value::Object(entries)) if !entries.is_empty() => table_from(&raw.field_id, entries),
        _ => Err(MalformedFieldError::MissingValues {
            field: raw.field_id.clone(),
        }),
    }
}

fn table_from(field: &FieldId, entries: &Map<String, Value>) -> Result<ValueTable, MalformedFieldError> {
    entries
        .iter()
        .map(|(value, label)| match label {
            Value::String(label) => Ok((value.clone(), label.clone())),
            Value::Number(label) => Ok((value.clone(), label.to_string())),
            _ => Err(MalformedFieldError::InvalidLabel {
                field: field.clone(),
                value: value.clone(),
            }),
        })
        .collect()
}

/// Build the dependent choice for a state field, or `None` to fall back to
/// free text (no country sibling, or a table not keyed by country code).
fn dependent_choice(
    raw: &RawField,
    siblings: &[RawField],
    ctx: &BuildContext<'_>,
) -> Result<Option<DependentChoiceField>, MalformedFieldError> {
    let Some(country) = country_sibling(raw, siblings, ctx.config) else {
        debug!(field = %raw.field_id, "no country field to depend on, using free text");
        return Ok(None);
    };

    let Some(Value::Object(by_country)) = &raw.values else {
        return Ok(None);
    };

    let mut tables = IndexMap::new();
    for (code, entries) in by_country {
        match entries {
            Value::Object(entries) if !entries.is_empty() => {
                tables.insert(code.clone(), table_from(&raw.field_id, entries)?);
            }
            // A country without states.
            Value::Object(_) | Value::Array(_) => {}
            _ => {
                debug!(field = %raw.field_id, "value table is not keyed by country, using free text");
                return Ok(None);
            }
        }
    }

    if tables.is_empty() {
        return Ok(None);
    }

    Ok(Some(DependentChoiceField::new(
        country.field_id.clone(),
        tables,
    )))
}

/// The configured country keys win in order; failing those, the section's
/// only country-typed field. Several country fields and no configured key
/// means no dependency.
fn country_sibling<'a>(
    raw: &RawField,
    siblings: &'a [RawField],
    config: &FormConfig,
) -> Option<&'a RawField> {
    let eligible = |f: &&RawField| f.field_id != raw.field_id && f.field_type.supplies_scalar_key();

    config
        .country_keys
        .iter()
        .find_map(|key| siblings.iter().filter(eligible).find(|f| &f.field_id == key))
        .or_else(|| {
            let mut countries = siblings
                .iter()
                .filter(eligible)
                .filter(|f| f.field_type == FieldTypeCode::Country);
            match (countries.next(), countries.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Untranslated, Widget};

    fn ctx(config: &FormConfig) -> BuildContext<'_> {
        BuildContext::new(config, &Untranslated)
    }

    fn state_values() -> Value {
        json!({
            "US": {"CA": "California", "NY": "New York"},
            "CA": {"ON": "Ontario", "QC": "Quebec"},
            "DE": []
        })
    }

    #[test]
    fn maps_type_codes() {
        let config = FormConfig::default();
        let cases = [
            (FieldTypeCode::Checkbox, FieldKind::Checkbox),
            (FieldTypeCode::Password, FieldKind::Password),
            (FieldTypeCode::Input, FieldKind::Text),
            (FieldTypeCode::Other("Z".into()), FieldKind::Text),
        ];
        for (code, expected) in cases {
            let raw = RawField::new("f", code);
            let spec = normalize(&raw, std::slice::from_ref(&raw), &ctx(&config)).unwrap();
            assert_eq!(spec.kind(), &expected);
        }
    }

    #[test]
    fn select_and_radio_are_both_choices() {
        let config = FormConfig::default();
        for code in [FieldTypeCode::SelectBox, FieldTypeCode::Radio] {
            let raw = RawField::new("gender", code).with_values(json!({"M": "Male", "F": "Female"}));
            let spec = normalize(&raw, &[], &ctx(&config)).unwrap();
            let FieldKind::Choice(choice) = spec.kind() else {
                panic!("Expected choice, got {:?}", spec.kind());
            };
            assert_eq!(choice.values.keys().collect::<Vec<_>>(), ["M", "F"]);
        }
    }

    #[test]
    fn help_text_marks_optional_fields() {
        let config = FormConfig::default();
        let marker = |msgid: &str| format!("<{msgid}>");
        let ctx = BuildContext::new(&config, &marker);

        let optional = normalize(&RawField::new("fax", FieldTypeCode::Input), &[], &ctx).unwrap();
        assert_eq!(optional.help_text(), "<(Optional)>");

        let required = normalize(
            &RawField::new("email", FieldTypeCode::Input).required(true),
            &[],
            &ctx,
        )
        .unwrap();
        assert_eq!(required.help_text(), "");
    }

    #[test]
    fn choice_without_table_is_malformed() {
        let config = FormConfig::default();
        for values in [None, Some(json!([])), Some(json!({}))] {
            let mut raw = RawField::new("size", FieldTypeCode::SelectBox);
            raw.values = values;
            assert_eq!(
                normalize(&raw, &[], &ctx(&config)).unwrap_err(),
                MalformedFieldError::MissingValues { field: "size".into() }
            );
        }
    }

    #[test]
    fn country_with_bad_label_is_malformed() {
        let config = FormConfig::default();
        let raw = RawField::new("b_country", FieldTypeCode::Country).with_values(json!({"US": {}}));
        assert!(matches!(
            normalize(&raw, &[], &ctx(&config)),
            Err(MalformedFieldError::InvalidLabel { .. })
        ));
    }

    #[test]
    fn state_prefers_shipping_country() {
        let config = FormConfig::default();
        let siblings = [
            RawField::new("b_country", FieldTypeCode::Country).with_values(json!({"US": "United States"})),
            RawField::new("s_country", FieldTypeCode::Country).with_values(json!({"US": "United States"})),
            RawField::new("state", FieldTypeCode::State).with_values(state_values()),
        ];

        let spec = normalize(&siblings[2], &siblings, &ctx(&config)).unwrap();
        let FieldKind::DependentChoice(dependent) = spec.kind() else {
            panic!("Expected dependent choice, got {:?}", spec.kind());
        };
        assert_eq!(dependent.depends_on.as_str(), "s_country");
        assert_eq!(dependent.tables.len(), 2);
        assert!(!dependent.resolved.is_constrained());
        assert_eq!(spec.placeholder(), "Select state");
    }

    #[test]
    fn state_falls_back_to_only_country_field() {
        let config = FormConfig::default();
        let siblings = [
            RawField::new("country", FieldTypeCode::Country).with_values(json!({"US": "United States"})),
            RawField::new("state", FieldTypeCode::State).with_values(state_values()),
        ];

        let spec = normalize(&siblings[1], &siblings, &ctx(&config)).unwrap();
        assert!(matches!(
            spec.kind(),
            FieldKind::DependentChoice(dependent) if dependent.depends_on.as_str() == "country"
        ));
    }

    #[test]
    fn state_without_country_is_free_text() {
        let config = FormConfig::default();
        let siblings = [
            RawField::new("name", FieldTypeCode::Input),
            RawField::new("state", FieldTypeCode::State).with_values(state_values()),
        ];

        let spec = normalize(&siblings[1], &siblings, &ctx(&config)).unwrap();
        assert_eq!(spec.kind(), &FieldKind::Text);
        assert_eq!(spec.widget(), Widget::TextInput { secure: false });
    }

    #[test]
    fn state_with_ambiguous_countries_is_free_text() {
        let config = FormConfig::default();
        let siblings = [
            RawField::new("home_country", FieldTypeCode::Country).with_values(json!({"US": "US"})),
            RawField::new("work_country", FieldTypeCode::Country).with_values(json!({"US": "US"})),
            RawField::new("state", FieldTypeCode::State).with_values(state_values()),
        ];

        let spec = normalize(&siblings[2], &siblings, &ctx(&config)).unwrap();
        assert_eq!(spec.kind(), &FieldKind::Text);
    }

    #[test]
    fn flat_state_table_is_free_text() {
        let config = FormConfig::default();
        let siblings = [
            RawField::new("s_country", FieldTypeCode::Country).with_values(json!({"US": "United States"})),
            RawField::new("s_state", FieldTypeCode::State).with_values(json!({"CA": "California"})),
        ];

        let spec = normalize(&siblings[1], &siblings, &ctx(&config)).unwrap();
        assert_eq!(spec.kind(), &FieldKind::Text);
    }

    #[test]
    fn checkbox_cannot_be_a_dependency() {
        let config = FormConfig::default();
        let siblings = [
            RawField::new("s_country", FieldTypeCode::Checkbox),
            RawField::new("s_state", FieldTypeCode::State).with_values(state_values()),
        ];

        let spec = normalize(&siblings[1], &siblings, &ctx(&config)).unwrap();
        assert_eq!(spec.kind(), &FieldKind::Text);
    }

    #[test]
    fn date_uses_configured_format() {
        let config = FormConfig::default().with_date_format("%d.%m.%Y");
        let raw = RawField::new("birthday", FieldTypeCode::Date);
        let spec = normalize(&raw, &[], &ctx(&config)).unwrap();
        assert_eq!(spec.widget(), Widget::DatePicker { format: "%d.%m.%Y" });
        assert_eq!(spec.placeholder(), "Select date");
    }
}
