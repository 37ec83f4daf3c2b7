//! Protected view gate: render / redirect / forbid per navigable view.

use tokio::sync::watch;

use vendora_auth::Role;

use crate::session::{SessionAuthority, SessionState};

/// Capability a guarded view requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Any signed-in identity.
    Authenticated,
    /// A signed-in identity holding the given role.
    Role(Role),
}

/// What the shell should do with a guarded view right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the guarded view unchanged.
    Render,
    /// No identity: send the user to login, preserving where they were
    /// headed for the post-login redirect.
    RedirectToLogin { return_to: String },
    /// Signed in but lacking the required role: render an explicit
    /// forbidden state, never partial protected content.
    Forbidden,
}

/// Gate for one guarded view.
///
/// Holds a live subscription to the session authority, so decisions are
/// re-evaluated on every state change, not only at navigation time.
pub struct ViewGate {
    capability: Capability,
    rx: watch::Receiver<SessionState>,
}

impl ViewGate {
    pub fn new(capability: Capability, authority: &SessionAuthority) -> Self {
        Self {
            capability,
            rx: authority.subscribe(),
        }
    }

    /// Decide for the current state. Pure read; never blocks.
    pub fn decision(&self, destination: &str) -> GateDecision {
        decide(&self.capability, &self.rx.borrow(), destination)
    }

    /// Wait for the next state change and return the fresh decision.
    ///
    /// Returns `None` once the authority has gone away.
    pub async fn changed(&mut self, destination: &str) -> Option<GateDecision> {
        self.rx.changed().await.ok()?;
        let state = self.rx.borrow_and_update();
        Some(decide(&self.capability, &state, destination))
    }
}

fn decide(capability: &Capability, state: &SessionState, destination: &str) -> GateDecision {
    let Some(identity) = state.identity() else {
        return GateDecision::RedirectToLogin {
            return_to: destination.to_string(),
        };
    };

    match capability {
        Capability::Authenticated => GateDecision::Render,
        Capability::Role(role) if identity.has_role(role) => GateDecision::Render,
        Capability::Role(_) => GateDecision::Forbidden,
    }
}
