//! Startup configuration error model.

use thiserror::Error;

/// Fatal configuration error.
///
/// Raised only while the process wires itself together; nothing in the
/// request path constructs these. A process that got past startup holds a
/// fully validated configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required configuration value was absent or empty.
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    /// A configuration value was present but unusable.
    #[error("invalid configuration for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    /// The same admin resource was registered twice.
    #[error("duplicate admin resource registration: '{0}'")]
    DuplicateResource(String),
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}
