//! Error types for OAuth profile storage and token exchange.

use toolsmith_secrets::SecretsError;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, OAuthError>;

/// Errors that can occur while managing profiles or exchanging tokens.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// No profile stored under this name. Expected and user-correctable.
    #[error("profile '{0}' not found")]
    NotFound(String),

    /// The credential store failed for a reason other than a missing key.
    #[error("credential store error ({context}): {source}")]
    Storage {
        context: String,
        source: SecretsError,
    },

    /// The stored blob is not a valid profile. Data corruption or a
    /// cross-version mismatch, never a missing key.
    #[error("stored profile '{profile}' is not valid JSON: {source}")]
    Serialization {
        profile: String,
        source: serde_json::Error,
    },

    /// The token endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The token endpoint rejected the request or returned a malformed
    /// response.
    #[error("token exchange failed: {0}")]
    Exchange(String),
}

impl OAuthError {
    /// Map a secrets-layer error into this crate's taxonomy, attaching the
    /// profile name as context.
    pub(crate) fn from_secrets(profile: &str, err: SecretsError) -> Self {
        if err.is_not_found() {
            OAuthError::NotFound(profile.to_string())
        } else {
            OAuthError::Storage {
                context: format!("profile '{}'", profile),
                source: err,
            }
        }
    }
}
