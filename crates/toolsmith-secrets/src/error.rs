//! Secrets error types.

/// Result type alias for secrets operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur when talking to the credential store.
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    /// No entry exists under (namespace, name).
    #[error("secret not found: {namespace}/{name}")]
    NotFound { namespace: String, name: String },

    /// The credential store itself is unreachable, locked, or rejected the
    /// operation. Distinct from [`SecretsError::NotFound`] so callers can
    /// tell a missing key apart from a broken environment.
    #[error("credential store error: {0}")]
    Storage(String),

    /// No credential store backend exists for this platform.
    #[error("no credential store available on this platform")]
    Unsupported,
}

impl SecretsError {
    /// Construct a `NotFound` for (namespace, name).
    pub fn not_found(namespace: &str, name: &str) -> Self {
        SecretsError::NotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// True when the error is the missing-key case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SecretsError::NotFound { .. })
    }
}
