//! Conditional value resolution for dependent choice fields.

use crate::{DependentChoiceField, FieldValue, ResolvedValues};

/// Resolve the value set of `field` for the dependency's current value.
///
/// A present key with a table yields a constrained choice. An absent value,
/// a blank value, or a key without a table yields free text. Pure.
pub fn resolve_dependent_values(
    field: &DependentChoiceField,
    dependency_value: Option<&FieldValue>,
) -> ResolvedValues {
    dependency_value
        .and_then(FieldValue::as_key)
        .and_then(|key| field.table_for(&key).cloned())
        .map_or_else(ResolvedValues::unconstrained, ResolvedValues::constrained)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::{EffectiveKind, ValueTable};

    fn state_field() -> DependentChoiceField {
        let mut tables = IndexMap::new();
        tables.insert(
            "US".to_string(),
            [("CA", "California"), ("NY", "New York")].into_iter().collect::<ValueTable>(),
        );
        tables.insert(
            "CA".to_string(),
            [("ON", "Ontario"), ("QC", "Quebec")].into_iter().collect::<ValueTable>(),
        );
        DependentChoiceField::new("s_country", tables)
    }

    #[test]
    fn known_key_constrains() {
        let resolved = resolve_dependent_values(&state_field(), Some(&"CA".into()));
        assert_eq!(resolved.effective, EffectiveKind::Choice);
        let values = resolved.value_set.unwrap();
        assert_eq!(values.keys().collect::<Vec<_>>(), ["ON", "QC"]);
    }

    #[test]
    fn missing_or_unknown_key_is_free_text() {
        let field = state_field();
        let cases: [Option<FieldValue>; 5] = [
            None,
            Some("".into()),
            Some("  ".into()),
            Some("FR".into()),
            Some(true.into()),
        ];
        for value in cases {
            let resolved = resolve_dependent_values(&field, value.as_ref());
            assert_eq!(resolved, ResolvedValues::unconstrained(), "{value:?}");
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let field = state_field();
        let value = FieldValue::from("US");
        assert_eq!(
            resolve_dependent_values(&field, Some(&value)),
            resolve_dependent_values(&field, Some(&value))
        );
    }
}
