//! Message ids handed to the host's [`Translator`](crate::Translator).

/// Help text of optional fields.
pub const OPTIONAL: &str = "(Optional)";

pub const SELECT_DATE: &str = "Select date";

pub const SELECT_COUNTRY: &str = "Select country";

pub const SELECT_STATE: &str = "Select state";

/// Submit label when editing an existing profile.
pub const SAVE: &str = "Save";

/// Submit label when registering.
pub const REGISTER: &str = "Register";
