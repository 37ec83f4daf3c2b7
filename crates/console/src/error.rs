use thiserror::Error;

/// Session-mutation failures surfaced to the UI layer as prompts, never
/// as crashes.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend understood the request and rejected the credentials.
    #[error("authentication failed: invalid credentials")]
    AuthenticationFailed,

    /// The authentication service was unreachable or failed; retrying may
    /// help.
    #[error("authentication service error: {0}")]
    Backend(String),

    /// Another session-mutating operation is already in flight.
    #[error("a session operation is already in progress")]
    Busy,

    /// The operation was superseded by a logout before it completed and
    /// committed nothing.
    #[error("login superseded by logout")]
    Cancelled,
}
