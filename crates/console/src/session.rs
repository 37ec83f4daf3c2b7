//! Session authority: the single source of truth for "who is signed in".
//!
//! Reads are synchronous and never block; login/logout are the only
//! mutators and commit under a single-writer discipline so subscribers
//! observe state changes in order.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, watch};

use vendora_auth::{Identity, Role};

use crate::backend::{AuthBackend, BackendError, Credentials};
use crate::error::SessionError;
use crate::store::CredentialStore;

/// Snapshot of the session state observed by subscribers.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    identity: Option<Identity>,
    generation: u64,
}

impl SessionState {
    /// The signed-in identity, with expiry applied: an expired credential
    /// reads as absent.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.identity {
            Some(identity) if !identity.is_expired(Utc::now()) => Some(identity),
            _ => None,
        }
    }

    /// Monotonic mutation counter; advances on every committed
    /// login/logout.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct SessionAuthority {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn CredentialStore>,
    /// Serializes login attempts; a `try_lock` failure maps to `Busy`.
    op: AsyncMutex<()>,
    /// Guards commits (generation check + store write + publication).
    commit: Mutex<()>,
    state: watch::Sender<SessionState>,
}

impl SessionAuthority {
    /// Create the authority, hydrating any persisted session.
    ///
    /// An expired or unreadable persisted credential is treated as absent
    /// and cleared before the state is first observable.
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<dyn CredentialStore>) -> Self {
        let identity = match store.load() {
            Some(identity) if identity.is_expired(Utc::now()) => {
                tracing::info!("persisted session has expired; clearing");
                store.clear();
                None
            }
            other => other,
        };

        let (state, _) = watch::channel(SessionState {
            identity,
            generation: 0,
        });

        Self {
            backend,
            store,
            op: AsyncMutex::new(()),
            commit: Mutex::new(()),
            state,
        }
    }

    /// Exchange credentials for a session.
    ///
    /// At most one login is in flight at a time; a concurrent call gets
    /// [`SessionError::Busy`]. A success that lands after a logout has
    /// superseded it commits nothing.
    pub async fn login(&self, credentials: Credentials) -> Result<Identity, SessionError> {
        let _op = self.op.try_lock().map_err(|_| SessionError::Busy)?;

        let started_at = self.state.borrow().generation;

        let identity = self
            .backend
            .login(&credentials)
            .await
            .map_err(|err| match err {
                BackendError::InvalidCredentials => SessionError::AuthenticationFailed,
                BackendError::Service(msg) => SessionError::Backend(msg),
            })?;

        let _commit = self.commit.lock().unwrap();
        if self.state.borrow().generation != started_at {
            // A logout won the race; the late success must not resurrect
            // the session.
            return Err(SessionError::Cancelled);
        }

        self.store.save(&identity);
        self.state.send_modify(|state| {
            state.identity = Some(identity.clone());
            state.generation += 1;
        });

        Ok(identity)
    }

    /// Clear the session. Idempotent, and effective immediately even
    /// while a login is in flight: the generation always advances, so any
    /// pending login is superseded.
    pub fn logout(&self) {
        let _commit = self.commit.lock().unwrap();
        self.store.clear();
        self.state.send_modify(|state| {
            state.identity = None;
            state.generation += 1;
        });
    }

    /// Synchronous read of the current identity; never blocks.
    pub fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    /// Whether the current identity holds `role`; absent implies false
    /// for every role.
    pub fn has_role(&self, role: &Role) -> bool {
        self.state
            .borrow()
            .identity()
            .is_some_and(|identity| identity.has_role(role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().identity().is_some()
    }

    /// Subscribe to state changes. Subscribers observe mutations in the
    /// order they committed and never a stale value after a completed
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}
