//! Secrets provider for toolsmith.
//!
//! A small capability interface over the OS-native credential store:
//! - macOS Keychain (generic passwords)
//! - Linux Secret Service (default collection)
//! - [`MemoryStore`] for test isolation
//!
//! Entries are keyed by `(namespace, name)` and stored under the service
//! identifier `cli.toolsmith.<namespace>` with `name` as the account
//! attribute. Writing an existing key replaces its value.
//!
//! Callers construct a store explicitly ([`default_store`] or
//! [`MemoryStore`]) and pass it down — there is no global default provider.

pub mod error;
pub mod memory;
pub mod store;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;

pub use error::{Result, SecretsError};
pub use memory::MemoryStore;
pub use store::{service_name, SecretStore};

#[cfg(target_os = "linux")]
pub use linux::SecretServiceStore;
#[cfg(target_os = "macos")]
pub use macos::KeychainStore;

/// Construct the credential store for the current platform.
#[cfg(target_os = "macos")]
pub fn default_store() -> Result<Box<dyn SecretStore>> {
    Ok(Box::new(KeychainStore::new()))
}

/// Construct the credential store for the current platform.
#[cfg(target_os = "linux")]
pub fn default_store() -> Result<Box<dyn SecretStore>> {
    Ok(Box::new(SecretServiceStore::new()))
}

/// Construct the credential store for the current platform.
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub fn default_store() -> Result<Box<dyn SecretStore>> {
    Err(SecretsError::Unsupported)
}
