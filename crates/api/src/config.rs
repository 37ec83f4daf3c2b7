//! Process configuration, explicitly constructed and passed down.
//!
//! Nothing outside [`ApiConfig::from_env`] reads the environment; tests
//! build these values directly.

use chrono::Duration;

use vendora_auth::Role;
use vendora_core::{ConfigError, SubjectId};

/// One protected path: exact match, evaluated in listed order, first
/// match wins. Unmatched paths are unrestricted by the doc gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedPathRule {
    /// Exact request path (no prefix or glob matching).
    pub path: String,
    /// Additional role the caller's session must hold, if any.
    pub required_role: Option<Role>,
}

impl ProtectedPathRule {
    pub fn exact(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_role: None,
        }
    }

    pub fn with_role(path: impl Into<String>, role: Role) -> Self {
        Self {
            path: path.into(),
            required_role: Some(role),
        }
    }
}

/// Doc-gate configuration: the shared secret plus the ordered rule set.
#[derive(Clone)]
pub struct GateConfig {
    secret: String,
    rules: Vec<ProtectedPathRule>,
}

impl GateConfig {
    /// A non-empty rule set without a secret must fail closed at startup,
    /// never fall back to "no protection".
    pub fn new(
        secret: impl Into<String>,
        rules: Vec<ProtectedPathRule>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() && !rules.is_empty() {
            return Err(ConfigError::Missing("VENDORA_DOC_SECRET"));
        }
        Ok(Self { secret, rules })
    }

    /// The default protected set: the API documentation endpoints.
    /// Extending it is a configuration change, not a code change.
    pub fn default_rules() -> Vec<ProtectedPathRule> {
        vec![
            ProtectedPathRule::exact("/api/doc"),
            ProtectedPathRule::exact("/api/doc.json"),
        ]
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn rules(&self) -> &[ProtectedPathRule] {
        &self.rules
    }
}

impl core::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GateConfig")
            .field("secret", &"<redacted>")
            .field("rules", &self.rules)
            .finish()
    }
}

/// A configured console account (the platform's user directory stand-in).
#[derive(Clone)]
pub struct AdminAccount {
    pub subject: SubjectId,
    pub email: String,
    pub display_name: String,
    /// PHC-format argon2 hash of the account password.
    pub password_hash: String,
    pub roles: Vec<Role>,
}

impl AdminAccount {
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        password_hash: impl Into<String>,
        roles: Vec<Role>,
    ) -> Self {
        Self {
            subject: SubjectId::new(),
            email: email.into(),
            display_name: display_name.into(),
            password_hash: password_hash.into(),
            roles,
        }
    }
}

impl core::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("subject", &self.subject)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("password_hash", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Full API process configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub session_secret: String,
    pub session_ttl: Duration,
    pub gate: GateConfig,
    pub accounts: Vec<AdminAccount>,
}

impl ApiConfig {
    /// Build configuration from the process environment.
    ///
    /// Missing secrets are a [`ConfigError`]: the process aborts rather
    /// than starting silently insecure.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr =
            std::env::var("VENDORA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let session_secret = require_env("VENDORA_SESSION_SECRET")?;
        let doc_secret = require_env("VENDORA_DOC_SECRET")?;
        let gate = GateConfig::new(doc_secret, GateConfig::default_rules())?;

        let email = require_env("VENDORA_ADMIN_EMAIL")?;
        let password_hash = require_env("VENDORA_ADMIN_PASSWORD_HASH")?;
        if !vendora_auth::password::is_phc_hash(&password_hash) {
            return Err(ConfigError::invalid(
                "VENDORA_ADMIN_PASSWORD_HASH",
                "not a parseable PHC hash string",
            ));
        }
        let display_name =
            std::env::var("VENDORA_ADMIN_NAME").unwrap_or_else(|_| email.clone());

        Ok(Self {
            bind_addr,
            session_secret,
            session_ttl: Duration::hours(8),
            gate,
            accounts: vec![AdminAccount::new(
                email,
                display_name,
                password_hash,
                vec![Role::ADMIN],
            )],
        })
    }
}

fn require_env(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}
