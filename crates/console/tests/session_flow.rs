use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Notify;

use vendora_auth::{Credential, Identity, Role};
use vendora_console::{
    AuthBackend, BackendError, Capability, CredentialStore, Credentials, GateDecision,
    MemoryCredentialStore, SessionAuthority, SessionError, ViewGate,
};
use vendora_core::SubjectId;

fn identity(expires_in: Option<Duration>) -> Identity {
    Identity {
        subject: SubjectId::new(),
        display_name: "Ops".to_string(),
        roles: vec![Role::ADMIN],
        credential: Credential::new("tok-123"),
        expires_at: expires_in.map(|d| Utc::now() + d),
    }
}

fn credentials() -> Credentials {
    Credentials {
        email: "ops@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

/// Resolves immediately with a fixed identity.
struct OkBackend {
    identity: Identity,
}

#[async_trait]
impl AuthBackend for OkBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<Identity, BackendError> {
        Ok(self.identity.clone())
    }
}

/// Rejects every credential.
struct RejectBackend;

#[async_trait]
impl AuthBackend for RejectBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<Identity, BackendError> {
        Err(BackendError::InvalidCredentials)
    }
}

/// Parks until released, then resolves with a fixed identity.
struct BlockingBackend {
    release: Notify,
    identity: Identity,
}

#[async_trait]
impl AuthBackend for BlockingBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<Identity, BackendError> {
        self.release.notified().await;
        Ok(self.identity.clone())
    }
}

fn authority(backend: Arc<dyn AuthBackend>) -> (Arc<SessionAuthority>, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let authority = Arc::new(SessionAuthority::new(backend, store.clone()));
    (authority, store)
}

#[tokio::test]
async fn login_publishes_and_persists_the_identity() {
    let (authority, store) = authority(Arc::new(OkBackend {
        identity: identity(Some(Duration::minutes(10))),
    }));

    assert!(authority.current_identity().is_none());
    assert!(!authority.has_role(&Role::ADMIN));

    let signed_in = authority.login(credentials()).await.unwrap();
    assert_eq!(signed_in.display_name, "Ops");

    assert!(authority.is_authenticated());
    assert!(authority.has_role(&Role::ADMIN));
    assert!(!authority.has_role(&Role::new("auditor")));
    assert_eq!(store.load().unwrap().display_name, "Ops");
}

#[tokio::test]
async fn failed_login_leaves_store_and_state_untouched() {
    let (authority, store) = authority(Arc::new(RejectBackend));

    let err = authority.login(credentials()).await.unwrap_err();
    assert!(matches!(err, SessionError::AuthenticationFailed));

    assert!(authority.current_identity().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn logout_is_idempotent() {
    let (authority, store) = authority(Arc::new(OkBackend {
        identity: identity(Some(Duration::minutes(10))),
    }));

    authority.login(credentials()).await.unwrap();
    assert!(authority.is_authenticated());

    authority.logout();
    assert!(authority.current_identity().is_none());
    assert!(store.load().is_none());

    // Second logout: same end state, no error.
    authority.logout();
    assert!(authority.current_identity().is_none());
}

#[tokio::test]
async fn concurrent_login_is_rejected_with_busy() {
    let backend = Arc::new(BlockingBackend {
        release: Notify::new(),
        identity: identity(Some(Duration::minutes(10))),
    });
    let (authority, _store) = authority(backend.clone());

    let pending = tokio::spawn({
        let authority = authority.clone();
        async move { authority.login(credentials()).await }
    });
    // Let the pending login reach the backend call.
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    let err = authority.login(credentials()).await.unwrap_err();
    assert!(matches!(err, SessionError::Busy));

    backend.release.notify_one();
    pending.await.unwrap().unwrap();
    assert!(authority.is_authenticated());
}

#[tokio::test]
async fn logout_supersedes_a_pending_login() {
    let backend = Arc::new(BlockingBackend {
        release: Notify::new(),
        identity: identity(Some(Duration::minutes(10))),
    });
    let (authority, store) = authority(backend.clone());

    let pending = tokio::spawn({
        let authority = authority.clone();
        async move { authority.login(credentials()).await }
    });
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    // Logout while the login is still in flight.
    authority.logout();

    // Then let the login "succeed". The late success must not resurrect
    // the session.
    backend.release.notify_one();
    let result = pending.await.unwrap();
    assert!(matches!(result, Err(SessionError::Cancelled)));

    assert!(authority.current_identity().is_none());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn expired_persisted_credential_hydrates_as_absent_and_is_cleared() {
    let store = Arc::new(MemoryCredentialStore::with_identity(identity(Some(
        Duration::minutes(-5),
    ))));
    let authority = SessionAuthority::new(Arc::new(RejectBackend), store.clone());

    assert!(authority.current_identity().is_none());
    assert!(store.load().is_none(), "stale entry should be cleared");
}

#[tokio::test]
async fn valid_persisted_credential_hydrates_as_current() {
    let store = Arc::new(MemoryCredentialStore::with_identity(identity(Some(
        Duration::minutes(10),
    ))));
    let authority = SessionAuthority::new(Arc::new(RejectBackend), store.clone());

    assert!(authority.is_authenticated());
    assert!(authority.has_role(&Role::ADMIN));
}

#[tokio::test]
async fn gate_redirects_anonymous_sessions_preserving_the_destination() {
    let (authority, _store) = authority(Arc::new(RejectBackend));
    let gate = ViewGate::new(Capability::Authenticated, &authority);

    assert_eq!(
        gate.decision("/admin/products"),
        GateDecision::RedirectToLogin {
            return_to: "/admin/products".to_string()
        }
    );
}

#[tokio::test]
async fn gate_forbids_a_session_without_the_required_role() {
    let mut signed_in = identity(Some(Duration::minutes(10)));
    signed_in.roles = vec![Role::new("viewer")];

    let (authority, _store) = authority(Arc::new(OkBackend {
        identity: signed_in,
    }));
    authority.login(credentials()).await.unwrap();

    let gate = ViewGate::new(Capability::Role(Role::ADMIN), &authority);
    assert_eq!(gate.decision("/admin/products"), GateDecision::Forbidden);

    // Plain authentication is still enough for unprivileged views.
    let gate = ViewGate::new(Capability::Authenticated, &authority);
    assert_eq!(gate.decision("/admin"), GateDecision::Render);
}

#[tokio::test]
async fn logout_revokes_a_rendered_view_without_navigation() {
    let (authority, _store) = authority(Arc::new(OkBackend {
        identity: identity(Some(Duration::minutes(10))),
    }));
    authority.login(credentials()).await.unwrap();

    let mut gate = ViewGate::new(Capability::Role(Role::ADMIN), &authority);
    assert_eq!(gate.decision("/admin/products"), GateDecision::Render);

    authority.logout();

    // The standing subscription observes the change without re-navigation.
    let revoked = gate.changed("/admin/products").await.unwrap();
    assert_eq!(
        revoked,
        GateDecision::RedirectToLogin {
            return_to: "/admin/products".to_string()
        }
    );
    assert_eq!(gate.decision("/admin/products"), revoked);
}

#[tokio::test]
async fn subscribers_observe_mutations_in_order() {
    let (authority, _store) = authority(Arc::new(OkBackend {
        identity: identity(Some(Duration::minutes(10))),
    }));
    let mut rx = authority.subscribe();
    assert_eq!(rx.borrow_and_update().generation(), 0);

    authority.login(credentials()).await.unwrap();
    rx.changed().await.unwrap();
    {
        let state = rx.borrow_and_update();
        assert_eq!(state.generation(), 1);
        assert!(state.identity().is_some());
    }

    authority.logout();
    rx.changed().await.unwrap();
    {
        let state = rx.borrow_and_update();
        assert_eq!(state.generation(), 2);
        assert!(state.identity().is_none());
    }
}
