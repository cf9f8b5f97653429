//! Configuration error types.

use toolsmith_secrets::SecretsError;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading, editing, or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write the config file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse or serialize YAML.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The requested key is not present in the section.
    #[error("config key '{section}.{key}' not found")]
    KeyNotFound { section: String, key: String },

    /// Could not determine the user config directory.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// A secret reference could not be resolved through the secrets provider.
    #[error("secret reference {namespace}/{name} could not be resolved: {source}")]
    Secret {
        namespace: String,
        name: String,
        source: SecretsError,
    },
}
