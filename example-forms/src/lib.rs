//! Canned storefront payloads shared by tests and demos.

pub mod address;
pub mod checkout_profile;
pub mod registration;
pub mod validation;

pub use address::{address, duplicate_field};
pub use checkout_profile::{checkout_profile, checkout_profile_json, countries, edit_profile, states};
pub use registration::registration;
pub use validation::{passwords_match, storefront_rules, validate_email, validate_password};
