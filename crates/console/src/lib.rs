//! `vendora-console`
//!
//! **Responsibility:** client-side session layer for the Vendora admin
//! console.
//!
//! This crate provides:
//! - The persisted credential store (single source of truth for "who is
//!   signed in")
//! - The session authority (login/logout, role checks, state subscription)
//! - The protected view gate consulted before rendering any console route
//!
//! The console is a **thin shell** around the Vendora API.

pub mod backend;
pub mod error;
pub mod gate;
pub mod session;
pub mod store;

pub use backend::{AuthBackend, BackendError, Credentials, HttpAuthBackend};
pub use error::SessionError;
pub use gate::{Capability, GateDecision, ViewGate};
pub use session::{SessionAuthority, SessionState};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
