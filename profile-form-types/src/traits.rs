use crate::RawDescription;

/// Translation function supplied by the host application.
///
/// The engine asks for a handful of fixed message ids ("(Optional)",
/// "Select country", ...) and never looks strings up itself.
pub trait Translator {
    fn gettext(&self, msgid: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn gettext(&self, msgid: &str) -> String {
        self(msgid)
    }
}

/// Identity translator: every message id is its own translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn gettext(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

/// Request parameters for collaborators that talk to the storefront API.
///
/// Passed explicitly to every call; nothing here is process-global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Storefront API access key.
    pub api_key: String,

    /// Session token of a logged-in customer.
    pub auth_token: Option<String>,

    /// Language code, e.g. `"en"`.
    pub locale: String,

    /// Where the form is shown, e.g. `"checkout"` or `"profile"`.
    pub location: String,

    /// What the form does there, e.g. `"update"` or `"add"`.
    pub action: String,
}

impl RequestContext {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn for_location(mut self, location: impl Into<String>, action: impl Into<String>) -> Self {
        self.location = location.into();
        self.action = action.into();
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }
}

/// Source of field description payloads (the profile-fields endpoint).
///
/// Transport is the implementor's business; the engine only consumes the
/// returned description.
pub trait FieldSource {
    /// The error type for this source.
    type Error: Into<anyhow::Error>;

    /// Fetch the field description for the location named in `context`.
    fn fetch(&self, context: &RequestContext) -> Result<RawDescription, Self::Error>;
}
