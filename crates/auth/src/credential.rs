use serde::{Deserialize, Serialize};

/// Opaque bearer credential for the current session.
///
/// `Debug` and `Display` are redacted: the raw token must never reach
/// logs or error messages. Transport code reads it via
/// [`Credential::expose`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Access the raw token for transport (e.g. an `Authorization`
    /// header). Nothing else should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl core::fmt::Display for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("<redacted>")
    }
}
