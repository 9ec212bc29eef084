//! In-memory field sources.

use std::collections::HashMap;

use tracing::debug;

use crate::{FieldSource, RawDescription, RequestContext};

/// Error type for [`StaticFieldSource`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("No field description for location '{0}'")]
    UnknownLocation(String),

    #[error("Location '{0}' requires a logged-in customer")]
    Unauthenticated(String),
}

/// Serves canned field descriptions keyed by request location.
///
/// Stands in for the storefront's profile-fields endpoint in tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticFieldSource {
    descriptions: HashMap<String, RawDescription>,
    fallback: Option<RawDescription>,
    authenticated_only: Vec<String>,
}

impl StaticFieldSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `description` for requests whose location is `location`.
    pub fn with_location(mut self, location: impl Into<String>, description: RawDescription) -> Self {
        self.descriptions.insert(location.into(), description);
        self
    }

    /// Serve `description` for any location without its own entry.
    pub fn with_fallback(mut self, description: RawDescription) -> Self {
        self.fallback = Some(description);
        self
    }

    /// Refuse requests for `location` that carry no auth token.
    pub fn requiring_auth(mut self, location: impl Into<String>) -> Self {
        self.authenticated_only.push(location.into());
        self
    }
}

impl FieldSource for StaticFieldSource {
    type Error = SourceError;

    fn fetch(&self, context: &RequestContext) -> Result<RawDescription, Self::Error> {
        if !context.is_authenticated() && self.authenticated_only.contains(&context.location) {
            return Err(SourceError::Unauthenticated(context.location.clone()));
        }

        let description = self
            .descriptions
            .get(&context.location)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| SourceError::UnknownLocation(context.location.clone()))?;

        debug!(
            location = %context.location,
            sections = description.len(),
            fields = description.field_count(),
            "served field description"
        );
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawSection;

    fn description(title: &str) -> RawDescription {
        RawDescription::new().with_section("C", RawSection::new(title))
    }

    #[test]
    fn serves_by_location() {
        let source = StaticFieldSource::new()
            .with_location("checkout", description("Checkout"))
            .with_location("profile", description("Profile"));

        let context = RequestContext::new("key").for_location("profile", "update");
        let served = source.fetch(&context).unwrap();
        assert_eq!(served.get("C").unwrap().description(), "Profile");
    }

    #[test]
    fn unknown_location() {
        let source = StaticFieldSource::new().with_location("checkout", description("Checkout"));
        let context = RequestContext::new("key").for_location("signup", "add");
        assert!(matches!(
            source.fetch(&context),
            Err(SourceError::UnknownLocation(location)) if location == "signup"
        ));

        let source = source.with_fallback(description("Default"));
        assert_eq!(source.fetch(&context).unwrap().get("C").unwrap().description(), "Default");
    }

    #[test]
    fn auth_required() {
        let source = StaticFieldSource::new()
            .with_location("profile", description("Profile"))
            .requiring_auth("profile");

        let anonymous = RequestContext::new("key").for_location("profile", "update");
        assert!(matches!(source.fetch(&anonymous), Err(SourceError::Unauthenticated(_))));

        let customer = anonymous.with_auth_token("token");
        assert!(source.fetch(&customer).is_ok());
    }
}
