//! YAML configuration store for toolsmith.
//!
//! Non-sensitive settings live in `<config_dir>/toolsmith/config.yaml`,
//! grouped into sections keyed by command namespace. Sensitive values never
//! land in the file; a section may instead carry a [`SecretRef`] pointing at
//! an entry in the secrets provider.
//!
//! Provides:
//! - Load/save with a missing file treated as an empty config
//! - Per-section get/set/delete of values
//! - Schema validation (wildcard dot-path patterns) and namespace reset

pub mod error;
pub mod secret_ref;
pub mod store;

pub use error::{ConfigError, Result};
pub use secret_ref::SecretRef;
pub use store::{config_dir, config_path, Config, Section};
