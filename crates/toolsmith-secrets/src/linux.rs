//! Linux Secret Service adapter.
//!
//! Talks to the freedesktop Secret Service (GNOME Keyring, KWallet) over
//! D-Bus. Entries live in the default collection with `service` and
//! `account` attributes mirroring the macOS adapter's keychain layout. A
//! fresh session is opened per operation; the tool runs one command and
//! exits, so there is nothing to pool.

use std::collections::HashMap;

use async_trait::async_trait;
use secret_service::{Collection, EncryptionType, SecretService};

use crate::error::{Result, SecretsError};
use crate::store::{service_name, SecretStore};

/// [`SecretStore`] backed by the Linux Secret Service API.
#[derive(Debug, Clone, Default)]
pub struct SecretServiceStore;

impl SecretServiceStore {
    pub fn new() -> Self {
        Self
    }
}

fn storage_error(context: &str, err: secret_service::Error) -> SecretsError {
    SecretsError::Storage(format!("{}: {}", context, err))
}

async fn connect() -> Result<SecretService<'static>> {
    SecretService::connect(EncryptionType::Dh)
        .await
        .map_err(|e| storage_error("failed to connect to secret service", e))
}

async fn unlocked_default_collection<'a>(ss: &'a SecretService<'static>) -> Result<Collection<'a>> {
    let collection = ss
        .get_default_collection()
        .await
        .map_err(|e| storage_error("failed to open default collection", e))?;
    let locked = collection
        .is_locked()
        .await
        .map_err(|e| storage_error("failed to query collection lock state", e))?;
    if locked {
        collection
            .unlock()
            .await
            .map_err(|e| storage_error("failed to unlock default collection", e))?;
    }
    Ok(collection)
}

fn entry_attributes<'a>(service: &'a str, name: &'a str) -> HashMap<&'a str, &'a str> {
    HashMap::from([("service", service), ("account", name)])
}

#[async_trait]
impl SecretStore for SecretServiceStore {
    async fn write(&self, namespace: &str, name: &str, value: &str) -> Result<()> {
        let service = service_name(namespace);
        let ss = connect().await?;
        let collection = unlocked_default_collection(&ss).await?;

        let label = format!("{} - {}", service, name);
        collection
            .create_item(
                &label,
                entry_attributes(&service, name),
                value.as_bytes(),
                true, // replace an existing item with the same attributes
                "text/plain",
            )
            .await
            .map_err(|e| storage_error("failed to store secret", e))?;
        tracing::debug!(service = %service, name = %name, "stored secret service item");
        Ok(())
    }

    async fn read(&self, namespace: &str, name: &str) -> Result<String> {
        let service = service_name(namespace);
        let ss = connect().await?;
        let collection = unlocked_default_collection(&ss).await?;

        let items = collection
            .search_items(entry_attributes(&service, name))
            .await
            .map_err(|e| storage_error("failed to search secret service", e))?;
        let item = items
            .first()
            .ok_or_else(|| SecretsError::not_found(namespace, name))?;

        let data = item
            .get_secret()
            .await
            .map_err(|e| storage_error("failed to retrieve secret", e))?;
        String::from_utf8(data)
            .map_err(|_| SecretsError::Storage("secret is not valid UTF-8".to_string()))
    }

    async fn list(&self, namespace: &str) -> Result<Vec<String>> {
        let service = service_name(namespace);
        let ss = connect().await?;
        let collection = unlocked_default_collection(&ss).await?;

        let items = collection
            .search_items(HashMap::from([("service", service.as_str())]))
            .await
            .map_err(|e| storage_error("failed to search secret service", e))?;

        let mut names = Vec::new();
        for item in items {
            let attrs = match item.get_attributes().await {
                Ok(attrs) => attrs,
                Err(_) => continue,
            };
            if let Some(account) = attrs.get("account") {
                names.push(account.clone());
            }
        }
        Ok(names)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        let service = service_name(namespace);
        let ss = connect().await?;
        let collection = unlocked_default_collection(&ss).await?;

        let items = collection
            .search_items(entry_attributes(&service, name))
            .await
            .map_err(|e| storage_error("failed to search secret service", e))?;
        let item = items
            .first()
            .ok_or_else(|| SecretsError::not_found(namespace, name))?;

        item.delete()
            .await
            .map_err(|e| storage_error("failed to delete secret", e))?;
        tracing::debug!(service = %service, name = %name, "deleted secret service item");
        Ok(())
    }
}
