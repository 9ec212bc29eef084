use profile_form_types::{FieldSpec, FieldValue, FormValues};

/// Checks a storefront applies on top of the field types.
///
/// Pass to `validate_and_merge_with`. `validated` holds the values of the
/// same section validated so far, so the confirmation password is compared
/// against the first one.
pub fn storefront_rules(
    field: &FieldSpec,
    value: &FieldValue,
    validated: &FormValues,
) -> Result<(), String> {
    let Some(text) = value.as_str() else {
        return Ok(());
    };

    match field.id().as_str() {
        "email" => validate_email(text),
        "password1" => validate_password(text),
        "password2" => passwords_match(validated.get_text("password1").ok(), text),
        _ => Ok(()),
    }
}

pub fn validate_email(email: &str) -> Result<(), String> {
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("Please enter a valid e-mail address".to_string()),
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok(())
}

pub fn passwords_match(first: Option<&str>, confirmation: &str) -> Result<(), String> {
    match first {
        Some(first) if first == confirmation => Ok(()),
        _ => Err("Passwords do not match".to_string()),
    }
}
