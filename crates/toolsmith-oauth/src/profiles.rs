//! Named OAuth profiles persisted in the secrets provider.
//!
//! One fixed namespace, the profile name as the entry key, and the
//! [`OAuthClient`] serialized as a compact JSON blob. The store stays
//! agnostic to the shape of the record, so future credential kinds can
//! reuse the same (namespace, name) contract.

use toolsmith_secrets::SecretStore;

use crate::client::OAuthClient;
use crate::error::{OAuthError, Result};

/// Secrets namespace holding all OAuth profiles.
pub const PROFILE_NAMESPACE: &str = "jwt";

/// Profile store layered on a [`SecretStore`].
///
/// The store is injected at construction; there is no shared global.
pub struct ProfileStore<S> {
    store: S,
}

impl<S: SecretStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serialize and persist a profile. Re-configuring overwrites.
    pub async fn store(&self, profile: &str, client: &OAuthClient) -> Result<()> {
        let payload = serde_json::to_string(client).map_err(|e| OAuthError::Serialization {
            profile: profile.to_string(),
            source: e,
        })?;
        self.store
            .write(PROFILE_NAMESPACE, profile, &payload)
            .await
            .map_err(|e| OAuthError::from_secrets(profile, e))?;
        tracing::debug!(profile = %profile, "stored OAuth profile");
        Ok(())
    }

    /// Read and deserialize a profile.
    pub async fn fetch(&self, profile: &str) -> Result<OAuthClient> {
        let payload = self
            .store
            .read(PROFILE_NAMESPACE, profile)
            .await
            .map_err(|e| OAuthError::from_secrets(profile, e))?;
        serde_json::from_str(&payload).map_err(|e| OAuthError::Serialization {
            profile: profile.to_string(),
            source: e,
        })
    }

    /// List all stored profile names. Order is not significant.
    pub async fn list(&self) -> Result<Vec<String>> {
        self.store
            .list(PROFILE_NAMESPACE)
            .await
            .map_err(|e| OAuthError::Storage {
                context: "listing profiles".to_string(),
                source: e,
            })
    }

    /// Remove a profile. Deleting a name that was never stored is
    /// [`OAuthError::NotFound`].
    pub async fn delete(&self, profile: &str) -> Result<()> {
        self.store
            .delete(PROFILE_NAMESPACE, profile)
            .await
            .map_err(|e| OAuthError::from_secrets(profile, e))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use toolsmith_secrets::MemoryStore;

    use super::*;

    fn acme_client() -> OAuthClient {
        OAuthClient {
            client_id: "id1".to_string(),
            client_secret: "sec1".to_string(),
            token_url: "https://x/token".to_string(),
            scopes: "read".to_string(),
            audience: "aud1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_then_fetch_round_trips_all_fields() {
        let profiles = ProfileStore::new(MemoryStore::new());
        let client = acme_client();
        profiles.store("acme", &client).await.unwrap();

        let fetched = profiles.fetch("acme").await.unwrap();
        assert_eq!(fetched, client);
    }

    #[tokio::test]
    async fn test_fetch_unknown_profile_is_not_found() {
        let profiles = ProfileStore::new(MemoryStore::new());
        let err = profiles.fetch("ghost").await.unwrap_err();
        assert!(matches!(err, OAuthError::NotFound(ref name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_fetch_after_delete_is_not_found() {
        let profiles = ProfileStore::new(MemoryStore::new());
        profiles.store("acme", &acme_client()).await.unwrap();
        profiles.delete("acme").await.unwrap();

        let err = profiles.fetch("acme").await.unwrap_err();
        assert!(matches!(err, OAuthError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_profile_leaves_store_unchanged() {
        let profiles = ProfileStore::new(MemoryStore::new());
        profiles.store("acme", &acme_client()).await.unwrap();

        let err = profiles.delete("ghost").await.unwrap_err();
        assert!(matches!(err, OAuthError::NotFound(_)));
        assert_eq!(profiles.list().await.unwrap(), vec!["acme"]);
    }

    #[tokio::test]
    async fn test_list_returns_exactly_stored_names() {
        let profiles = ProfileStore::new(MemoryStore::new());
        for name in ["a", "b", "c"] {
            profiles.store(name, &acme_client()).await.unwrap();
        }

        let names: BTreeSet<String> = profiles.list().await.unwrap().into_iter().collect();
        let expected: BTreeSet<String> =
            ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_list_on_empty_store_is_empty() {
        let profiles = ProfileStore::new(MemoryStore::new());
        assert!(profiles.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reconfigure_overwrites() {
        let profiles = ProfileStore::new(MemoryStore::new());
        profiles.store("acme", &acme_client()).await.unwrap();

        let mut updated = acme_client();
        updated.client_secret = "sec2".to_string();
        profiles.store("acme", &updated).await.unwrap();

        assert_eq!(profiles.fetch("acme").await.unwrap(), updated);
        assert_eq!(profiles.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_serialization_error() {
        let secrets = MemoryStore::new();
        secrets
            .write(PROFILE_NAMESPACE, "acme", "not json at all")
            .await
            .unwrap();

        let profiles = ProfileStore::new(secrets);
        let err = profiles.fetch("acme").await.unwrap_err();
        assert!(matches!(err, OAuthError::Serialization { ref profile, .. } if profile == "acme"));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_storage_error() {
        let secrets = MemoryStore::new();
        secrets.set_failing(true);

        let profiles = ProfileStore::new(secrets);
        let err = profiles.fetch("acme").await.unwrap_err();
        assert!(matches!(err, OAuthError::Storage { .. }));
        let err = profiles.list().await.unwrap_err();
        assert!(matches!(err, OAuthError::Storage { .. }));
    }
}
