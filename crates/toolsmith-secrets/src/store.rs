//! The secrets provider contract.

use async_trait::async_trait;

use crate::error::Result;

/// Vendor prefix for service identifiers in the OS credential store.
const SERVICE_PREFIX: &str = "cli.toolsmith";

/// Build the service identifier for a namespace: `cli.toolsmith.<namespace>`.
pub fn service_name(namespace: &str) -> String {
    format!("{}.{}", SERVICE_PREFIX, namespace)
}

/// Generic interface for secrets operations.
///
/// Platform adapters and the in-memory test store implement this contract
/// with identical observable behavior; only the underlying system call
/// differs. All implementations must keep the not-found vs storage-failure
/// distinction so callers stay platform-agnostic.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Upsert `value` under (namespace, name).
    async fn write(&self, namespace: &str, name: &str, value: &str) -> Result<()>;

    /// Read the value under (namespace, name).
    ///
    /// Fails with `NotFound` when the key does not exist, `Storage` when the
    /// store itself is inaccessible.
    async fn read(&self, namespace: &str, name: &str) -> Result<String>;

    /// List all entry names under a namespace. An empty namespace yields an
    /// empty vec, not an error.
    async fn list(&self, namespace: &str) -> Result<Vec<String>>;

    /// Remove the entry under (namespace, name). Deleting a missing entry
    /// is `NotFound`, not success.
    async fn delete(&self, namespace: &str, name: &str) -> Result<()>;
}

#[async_trait]
impl SecretStore for Box<dyn SecretStore> {
    async fn write(&self, namespace: &str, name: &str, value: &str) -> Result<()> {
        (**self).write(namespace, name, value).await
    }

    async fn read(&self, namespace: &str, name: &str) -> Result<String> {
        (**self).read(namespace, name).await
    }

    async fn list(&self, namespace: &str) -> Result<Vec<String>> {
        (**self).list(namespace).await
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        (**self).delete(namespace, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_format() {
        assert_eq!(service_name("jwt"), "cli.toolsmith.jwt");
        assert_eq!(service_name("jira"), "cli.toolsmith.jira");
    }
}
