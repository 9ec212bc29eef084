use profile_form_types::RawDescription;
use serde_json::json;

/// A single address section whose fields are named without prefixes, so the
/// state field finds its country by type alone.
pub fn address() -> serde_json::Result<RawDescription> {
    RawDescription::from_value(json!({
        "S": {
            "description": "Address",
            "fields": [
                {"field_id": "name", "field_type": "I", "description": "Name", "required": true},
                {
                    "field_id": "country",
                    "field_type": "O",
                    "description": "Country",
                    "required": true,
                    "values": {"US": "United States", "CA": "Canada", "FR": "France"}
                },
                {
                    "field_id": "state",
                    "field_type": "A",
                    "description": "State",
                    "required": true,
                    "values": {
                        "US": {"CA": "California", "NY": "New York"},
                        "CA": {"ON": "Ontario", "QC": "Quebec"}
                    }
                }
            ]
        }
    }))
}

/// A payload that repeats a field id inside one section.
pub fn duplicate_field() -> serde_json::Result<RawDescription> {
    RawDescription::from_value(json!({
        "C": {
            "description": "Contact information",
            "fields": [
                {"field_id": "email", "field_type": "I", "description": "E-mail", "required": true},
                {"field_id": "email", "field_type": "I", "description": "E-mail again", "required": true}
            ]
        }
    }))
}
