//! Persisted credential store: the single source of truth consulted by
//! every UI decision.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use vendora_auth::Identity;

/// Current on-disk blob version. Bump when the layout changes; unknown
/// versions hydrate as "no session".
const BLOB_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    version: u32,
    identity: Identity,
}

/// Storage seam for the current session's credential.
///
/// Mutated only by login/logout/hydration; holds at most one identity.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<Identity>;
    fn save(&self, identity: &Identity);
    fn clear(&self);
}

/// JSON-file store under the OS app data directory.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store at the platform default location:
    /// `{app_data_dir}/vendora/session.json`.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self {
            path: session_path()?,
        })
    }

    /// Store at an explicit path (tests, portable installs).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, identity: &Identity) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session directory at {parent:?}"))?;
        }

        let blob = serde_json::to_string(&PersistedSession {
            version: BLOB_VERSION,
            identity: identity.clone(),
        })
        .context("failed to serialize session")?;

        fs::write(&self.path, blob)
            .with_context(|| format!("failed to write session at {:?}", self.path))?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Identity> {
        let raw = fs::read_to_string(&self.path).ok()?;

        // A blob we cannot understand is "no session", never a crash; the
        // stale entry is removed so later loads stay cheap.
        let parsed: PersistedSession = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("discarding unreadable session blob: {err}");
                self.clear();
                return None;
            }
        };

        if parsed.version != BLOB_VERSION {
            tracing::warn!(
                version = parsed.version,
                "discarding session blob with unknown version"
            );
            self.clear();
            return None;
        }

        Some(parsed.identity)
    }

    fn save(&self, identity: &Identity) {
        if let Err(err) = self.write(identity) {
            tracing::error!("failed to persist session: {err:?}");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::error!("failed to clear persisted session: {err}"),
        }
    }
}

/// Resolve `{app_data_dir}/vendora/session.json`.
fn session_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        })
        .context("failed to resolve OS app data directory")?;

    let mut path = base;
    path.push("vendora");
    path.push("session.json");
    Ok(path)
}

/// In-memory store for tests and fixtures.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<Identity>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            inner: Mutex::new(Some(identity)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Identity> {
        self.inner.lock().unwrap().clone()
    }

    fn save(&self, identity: &Identity) {
        *self.inner.lock().unwrap() = Some(identity.clone());
    }

    fn clear(&self) {
        *self.inner.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use vendora_auth::{Credential, Role};
    use vendora_core::SubjectId;

    use super::*;

    fn identity() -> Identity {
        Identity {
            subject: SubjectId::new(),
            display_name: "Ops".to_string(),
            roles: vec![Role::ADMIN],
            credential: Credential::new("tok"),
            expires_at: None,
        }
    }

    fn scratch_store(name: &str) -> FileCredentialStore {
        let path = std::env::temp_dir().join(format!(
            "vendora-store-test-{}-{name}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        FileCredentialStore::at_path(path)
    }

    #[test]
    fn save_load_clear_roundtrip() {
        let store = scratch_store("roundtrip");
        assert!(store.load().is_none());

        let id = identity();
        store.save(&id);
        assert_eq!(store.load(), Some(id));

        store.clear();
        assert!(store.load().is_none());

        // Clearing an already-empty store is a no-op.
        store.clear();
    }

    #[test]
    fn corrupt_blob_hydrates_as_no_session_and_is_removed() {
        let store = scratch_store("corrupt");
        fs::write(&store.path, "{not json").unwrap();

        assert!(store.load().is_none());
        assert!(!store.path.exists(), "stale blob should be cleared");
    }

    #[test]
    fn unknown_version_hydrates_as_no_session_and_is_removed() {
        let store = scratch_store("version");
        let blob = serde_json::json!({"version": 99, "identity": identity()});
        fs::write(&store.path, serde_json::to_string(&blob).unwrap()).unwrap();

        assert!(store.load().is_none());
        assert!(!store.path.exists(), "stale blob should be cleared");
    }
}
