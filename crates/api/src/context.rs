use vendora_auth::Role;
use vendora_core::SubjectId;

/// Authenticated session context for a request.
///
/// Inserted by the session middleware; immutable for the lifetime of the
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    subject: SubjectId,
    display_name: String,
    roles: Vec<Role>,
}

impl SessionContext {
    pub fn new(subject: SubjectId, display_name: String, roles: Vec<Role>) -> Self {
        Self {
            subject,
            display_name,
            roles,
        }
    }

    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
