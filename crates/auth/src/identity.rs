use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::SubjectId;

use crate::{Credential, Role};

/// An authenticated principal as seen by the client session layer.
///
/// Created on a successful login exchange, destroyed on logout or expiry
/// detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject: SubjectId,
    pub display_name: String,
    pub roles: Vec<Role>,
    pub credential: Credential,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// An identity whose credential has expired must be treated as absent
    /// by every reader.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(exp) if now >= exp)
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
