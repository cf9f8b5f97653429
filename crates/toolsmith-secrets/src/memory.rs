//! In-memory secrets store for test isolation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, SecretsError};
use crate::store::SecretStore;

/// In-memory [`SecretStore`] implementation.
///
/// Exists purely so callers can be exercised without touching the real OS
/// credential store. Reproduces the same error distinctions as the platform
/// adapters: missing keys are `NotFound`, and a simulated outage
/// ([`MemoryStore::set_failing`]) turns every operation into `Storage`.
///
/// Clones share the same underlying map, so a test can keep a handle while
/// handing a clone to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<(String, String), String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable credential store: while set, every operation
    /// fails with `Storage`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SecretsError::Storage(
                "simulated credential store outage".to_string(),
            ));
        }
        Ok(())
    }

    fn key(namespace: &str, name: &str) -> (String, String) {
        (namespace.to_string(), name.to_string())
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn write(&self, namespace: &str, name: &str, value: &str) -> Result<()> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        entries.insert(Self::key(namespace, name), value.to_string());
        Ok(())
    }

    async fn read(&self, namespace: &str, name: &str) -> Result<String> {
        self.check_available()?;
        let entries = self.entries.read().await;
        entries
            .get(&Self::key(namespace, name))
            .cloned()
            .ok_or_else(|| SecretsError::not_found(namespace, name))
    }

    async fn list(&self, namespace: &str) -> Result<Vec<String>> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        entries
            .remove(&Self::key(namespace, name))
            .map(|_| ())
            .ok_or_else(|| SecretsError::not_found(namespace, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let store = MemoryStore::new();
        store.write("jwt", "acme", "hunter2").await.unwrap();
        assert_eq!(store.read("jwt", "acme").await.unwrap(), "hunter2");
    }

    #[tokio::test]
    async fn test_write_replaces_existing_value() {
        let store = MemoryStore::new();
        store.write("jwt", "acme", "old").await.unwrap();
        store.write("jwt", "acme", "new").await.unwrap();
        assert_eq!(store.read("jwt", "acme").await.unwrap(), "new");
        assert_eq!(store.list("jwt").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.read("jwt", "nope").await.unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err}");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete("jwt", "nope").await.unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err}");
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let store = MemoryStore::new();
        store.write("jwt", "acme", "v").await.unwrap();
        store.delete("jwt", "acme").await.unwrap();
        let err = store.read("jwt", "acme").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_empty_namespace_is_empty_vec() {
        let store = MemoryStore::new();
        assert!(store.list("jwt").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_scoped_to_namespace() {
        let store = MemoryStore::new();
        store.write("jwt", "a", "1").await.unwrap();
        store.write("jwt", "b", "2").await.unwrap();
        store.write("jira", "c", "3").await.unwrap();

        let mut names = store.list("jwt").await.unwrap();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failing_store_reports_storage_error() {
        let store = MemoryStore::new();
        store.write("jwt", "acme", "v").await.unwrap();
        store.set_failing(true);

        let err = store.read("jwt", "acme").await.unwrap_err();
        assert!(matches!(err, SecretsError::Storage(_)));
        let err = store.list("jwt").await.unwrap_err();
        assert!(matches!(err, SecretsError::Storage(_)));

        store.set_failing(false);
        assert_eq!(store.read("jwt", "acme").await.unwrap(), "v");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.write("jwt", "acme", "v").await.unwrap();
        assert_eq!(handle.read("jwt", "acme").await.unwrap(), "v");
    }
}
