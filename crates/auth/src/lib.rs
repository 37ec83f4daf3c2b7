//! `vendora-auth` — pure authentication domain (zero-trust boundary).
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod credential;
pub mod identity;
pub mod password;
pub mod roles;
pub mod token;

pub use credential::Credential;
pub use identity::Identity;
pub use password::{hash_password, verify_password};
pub use roles::Role;
pub use token::{Hs256TokenCodec, SessionClaims, TokenError, TokenVerifier, validate_claims};
