//! Plugin error types.

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors that can occur when dispatching to a plugin.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The plugin executable could not be started.
    #[error("failed to launch plugin '{name}': {source}")]
    Launch {
        name: String,
        source: std::io::Error,
    },
}
