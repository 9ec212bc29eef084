use profile_form_types::RawDescription;
use serde_json::json;

/// Sign-up form: contact details plus credentials. Sections carry no titles,
/// so none are shown.
pub fn registration() -> serde_json::Result<RawDescription> {
    RawDescription::from_value(json!({
        "C": {
            "description": "",
            "fields": [
                {"field_id": "email", "field_type": "I", "description": "E-mail", "required": true},
                {"field_id": "password1", "field_type": "W", "description": "Password", "required": true},
                {"field_id": "password2", "field_type": "W", "description": "Confirm password", "required": true},
                {
                    "field_id": "account_type",
                    "field_type": "S",
                    "description": "Account type",
                    "required": true,
                    "values": {"personal": "Personal", "business": "Business"}
                },
                {"field_id": "terms", "field_type": "C", "description": "I accept the terms and conditions", "required": true}
            ]
        }
    }))
}
