use profile_form_types::RawDescription;
use serde_json::{Value, json};

/// Countries offered by the demo storefront.
pub fn countries() -> Value {
    json!({
        "US": "United States",
        "CA": "Canada",
        "DE": "Germany",
        "FR": "France"
    })
}

/// States per country. Germany is sent without states; France is missing.
pub fn states() -> Value {
    json!({
        "US": {"CA": "California", "NY": "New York", "TX": "Texas"},
        "CA": {"BC": "British Columbia", "ON": "Ontario", "QC": "Quebec"},
        "DE": []
    })
}

fn address_fields(prefix: &str) -> Value {
    json!([
        {"field_id": format!("{prefix}_firstname"), "field_type": "I", "description": "First name", "required": true},
        {"field_id": format!("{prefix}_lastname"), "field_type": "I", "description": "Last name", "required": true},
        {"field_id": format!("{prefix}_address"), "field_type": "I", "description": "Address", "required": true},
        {"field_id": format!("{prefix}_city"), "field_type": "I", "description": "City", "required": true},
        {
            "field_id": format!("{prefix}_country"),
            "field_type": "O",
            "description": "Country",
            "required": true,
            "values": countries()
        },
        {
            "field_id": format!("{prefix}_state"),
            "field_type": "A",
            "description": "State/province",
            "required": true,
            "values": states()
        },
        {"field_id": format!("{prefix}_zipcode"), "field_type": "I", "description": "Zip/postal code", "required": true}
    ])
}

/// The profile-fields payload for the checkout step, in the order the
/// storefront sends it.
pub fn checkout_profile_json() -> Value {
    json!({
        "C": {
            "description": "Contact information",
            "fields": [
                {"field_id": "firstname", "field_type": "I", "description": "First name", "required": true},
                {"field_id": "lastname", "field_type": "I", "description": "Last name", "required": true},
                {"field_id": "email", "field_type": "I", "description": "E-mail", "required": true},
                {"field_id": "phone", "field_type": "I", "description": "Phone", "required": false},
                {
                    "field_id": "gender",
                    "field_type": "R",
                    "description": "Gender",
                    "required": false,
                    "values": {"M": "Male", "F": "Female"}
                }
            ]
        },
        "B": {
            "description": "Billing address",
            "fields": address_fields("b")
        },
        "S": {
            "description": "Shipping address",
            "fields": address_fields("s")
        },
        "E": {
            "description": "Additional information",
            "fields": [
                {"field_id": "birthday", "field_type": "D", "description": "Birthday", "required": false, "value": ""},
                {"field_id": "newsletter", "field_type": "C", "description": "Subscribe to our newsletter", "required": false, "value": false},
                {
                    "field_id": "referral",
                    "field_type": "S",
                    "description": "How did you hear about us?",
                    "required": false,
                    "values": {"search": "Search engine", "friend": "A friend", "ad": "Advertisement"}
                }
            ]
        }
    })
}

pub fn checkout_profile() -> serde_json::Result<RawDescription> {
    RawDescription::from_value(checkout_profile_json())
}

/// The same payload for a returning customer, with every section pre-filled.
pub fn edit_profile() -> serde_json::Result<RawDescription> {
    let mut payload = checkout_profile_json();

    let prefill = [
        ("C", "firstname", json!("Ada")),
        ("C", "lastname", json!("Lovelace")),
        ("C", "email", json!("ada@example.com")),
        ("C", "gender", json!("F")),
        ("B", "b_firstname", json!("Ada")),
        ("B", "b_lastname", json!("Lovelace")),
        ("B", "b_address", json!("12 St James's Square")),
        ("B", "b_city", json!("Toronto")),
        ("B", "b_country", json!("CA")),
        ("B", "b_state", json!("ON")),
        ("B", "b_zipcode", json!("M5V 2T6")),
        ("S", "s_firstname", json!("Ada")),
        ("S", "s_lastname", json!("Lovelace")),
        ("S", "s_address", json!("350 Fifth Avenue")),
        ("S", "s_city", json!("New York")),
        ("S", "s_country", json!("US")),
        ("S", "s_state", json!("NY")),
        ("S", "s_zipcode", json!("10118")),
        ("E", "birthday", json!(-4_861_728_000_i64)),
        ("E", "newsletter", json!(true)),
    ];

    for (section, field_id, value) in prefill {
        let fields = payload[section]["fields"].as_array_mut();
        let field = fields
            .into_iter()
            .flatten()
            .find(|field| field["field_id"] == field_id);
        if let Some(field) = field {
            field["value"] = value;
        }
    }

    RawDescription::from_value(payload)
}
