//! Explicit references from config into the secrets provider.
//!
//! Config files hold non-sensitive settings only. Where a setting is
//! sensitive, the file stores a structured reference to a credential-store
//! entry instead of the value itself, keeping the two stores cleanly
//! separated.

use serde::{Deserialize, Serialize};
use toolsmith_secrets::SecretStore;

use crate::error::{ConfigError, Result};

/// Pointer from non-sensitive config to an entry in the secrets provider.
///
/// Serialized structurally as `{secret: {namespace, name}}` so readers can
/// tell a reference apart from a plain value without magic string prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRef {
    pub namespace: String,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
struct Tagged {
    secret: SecretRef,
}

impl SecretRef {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Read the referenced value from the secrets provider.
    pub async fn resolve<S: SecretStore>(&self, store: &S) -> Result<String> {
        store
            .read(&self.namespace, &self.name)
            .await
            .map_err(|e| ConfigError::Secret {
                namespace: self.namespace.clone(),
                name: self.name.clone(),
                source: e,
            })
    }

    /// The config-file representation of this reference.
    pub fn to_value(&self) -> Result<serde_yaml::Value> {
        Ok(serde_yaml::to_value(Tagged {
            secret: self.clone(),
        })?)
    }

    /// Parse a config value back into a reference, if it is one.
    pub fn from_value(value: &serde_yaml::Value) -> Option<Self> {
        serde_yaml::from_value::<Tagged>(value.clone())
            .ok()
            .map(|t| t.secret)
    }
}

#[cfg(test)]
mod tests {
    use toolsmith_secrets::{MemoryStore, SecretsError};

    use super::*;

    #[test]
    fn test_value_round_trip() {
        let secret_ref = SecretRef::new("jwt", "acme-client-secret");
        let value = secret_ref.to_value().unwrap();
        assert_eq!(SecretRef::from_value(&value), Some(secret_ref));
    }

    #[test]
    fn test_plain_value_is_not_a_ref() {
        let value = serde_yaml::Value::String("secret:acme-client-secret".to_string());
        assert_eq!(SecretRef::from_value(&value), None);
    }

    #[tokio::test]
    async fn test_resolve_reads_through_store() {
        let store = MemoryStore::new();
        store.write("jwt", "acme-client-secret", "hunter2").await.unwrap();

        let secret_ref = SecretRef::new("jwt", "acme-client-secret");
        assert_eq!(secret_ref.resolve(&store).await.unwrap(), "hunter2");
    }

    #[tokio::test]
    async fn test_resolve_missing_carries_not_found_cause() {
        let store = MemoryStore::new();
        let secret_ref = SecretRef::new("jwt", "ghost");
        let err = secret_ref.resolve(&store).await.unwrap_err();
        match err {
            ConfigError::Secret { source, .. } => assert!(source.is_not_found()),
            other => panic!("expected Secret error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_surfaces_storage_failure() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let secret_ref = SecretRef::new("jwt", "acme-client-secret");
        let err = secret_ref.resolve(&store).await.unwrap_err();
        match err {
            ConfigError::Secret { source, .. } => {
                assert!(matches!(source, SecretsError::Storage(_)))
            }
            other => panic!("expected Secret error, got {other}"),
        }
    }
}
