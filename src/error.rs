//! src/error.rs
//!
//! Error types shared by the analysis engine, the account store and the exporter.

/// Raised before the analysis pipeline starts when the submitted URL is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No URL was provided")]
    Empty,
    #[error("'{input}' is not a valid URL: {reason}")]
    Malformed { input: String, reason: String },
    #[error("'{0}' has no host name")]
    MissingHost(String),
}

/// Failures of the persistence layer behind the account store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A history write was attempted while nobody is signed in.
    #[error("No account is signed in")]
    NoActiveAccount,
}

/// Reasons a login or registration was refused.
///
/// A refused call never changes the active session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    AlreadyExists,
    #[error("Password must be at least {0} characters long")]
    WeakCredential(usize),
    #[error("Email and name must not be empty")]
    InvalidInput,
    #[error("Account storage error: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
