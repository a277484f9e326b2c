// Error taxonomy. Validation errors carry the exact user-facing strings the
// stores surface inline; storage errors never cross a store's public API.

/// Account and session errors. User-caused, recoverable, shown inline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Signup with an email that matches an existing user case-insensitively.
    #[error("Email already registered.")]
    DuplicateEmail,

    /// Login with an unknown email or a mismatched password. Deliberately
    /// indistinguishable from the caller's side.
    #[error("Invalid email or password.")]
    InvalidCredentials,
}

/// Ticket store errors. Caller-caused; should not occur under correct UI
/// flow and surface as a generic failure toast.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("Ticket not found")]
    NotFound(u64),
}

/// Internal storage failures. Recovered by reseeding on read and logged on
/// write; consumers never see these.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage operation failed: {0}")]
    Backend(String),
}
