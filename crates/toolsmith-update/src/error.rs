//! Update error types.

/// Result type alias for update operations.
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors that can occur during a self-update.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// No release binaries are published for this OS/architecture.
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The release index could not be reached.
    #[error("release index request failed: {0}")]
    Network(String),

    /// The release index answered with a non-success status.
    #[error("release index returned status {0}")]
    IndexStatus(u16),

    /// The release index body was not the expected JSON listing.
    #[error("failed to decode release index: {0}")]
    IndexDecode(String),

    /// The index held no binary for this platform.
    #[error("no binary found for {0}")]
    NoRelease(String),

    /// The new binary could not be downloaded.
    #[error("failed to download binary: {0}")]
    Download(String),

    /// The running binary could not be swapped for the new one.
    #[error("failed to replace binary: {0}")]
    Replace(String),
}
