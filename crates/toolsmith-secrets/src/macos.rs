//! macOS Keychain adapter.
//!
//! Direct mapping onto Security.framework generic-password items: the
//! service attribute carries `cli.toolsmith.<namespace>` and the account
//! attribute carries the entry name.

use async_trait::async_trait;
use security_framework::base::Error as KeychainError;
use security_framework::item::{ItemClass, ItemSearchOptions, Limit};
use security_framework::passwords::{
    delete_generic_password, get_generic_password, set_generic_password,
};

use crate::error::{Result, SecretsError};
use crate::store::{service_name, SecretStore};

/// `errSecItemNotFound` from Security.framework.
const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;

/// [`SecretStore`] backed by the macOS Keychain.
#[derive(Debug, Clone, Default)]
pub struct KeychainStore;

impl KeychainStore {
    pub fn new() -> Self {
        Self
    }
}

fn map_error(namespace: &str, name: &str, err: KeychainError) -> SecretsError {
    if err.code() == ERR_SEC_ITEM_NOT_FOUND {
        SecretsError::not_found(namespace, name)
    } else {
        SecretsError::Storage(format!("keychain error: {}", err))
    }
}

#[async_trait]
impl SecretStore for KeychainStore {
    async fn write(&self, namespace: &str, name: &str, value: &str) -> Result<()> {
        let service = service_name(namespace);
        // set_generic_password updates in place when the item already exists.
        set_generic_password(&service, name, value.as_bytes())
            .map_err(|e| SecretsError::Storage(format!("keychain error: {}", e)))?;
        tracing::debug!(service = %service, name = %name, "stored keychain item");
        Ok(())
    }

    async fn read(&self, namespace: &str, name: &str) -> Result<String> {
        let service = service_name(namespace);
        let data =
            get_generic_password(&service, name).map_err(|e| map_error(namespace, name, e))?;
        String::from_utf8(data)
            .map_err(|_| SecretsError::Storage("keychain item is not valid UTF-8".to_string()))
    }

    async fn list(&self, namespace: &str) -> Result<Vec<String>> {
        let service = service_name(namespace);
        let results = match ItemSearchOptions::new()
            .class(ItemClass::generic_password())
            .service(&service)
            .load_attributes(true)
            .limit(Limit::All)
            .search()
        {
            Ok(results) => results,
            // No matching items is an empty namespace, not an error.
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => return Ok(Vec::new()),
            Err(e) => return Err(SecretsError::Storage(format!("keychain error: {}", e))),
        };

        let mut names = Vec::new();
        for result in results {
            if let Some(attrs) = result.simplify_dict() {
                if let Some(account) = attrs.get("acct") {
                    names.push(account.clone());
                }
            }
        }
        Ok(names)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        let service = service_name(namespace);
        delete_generic_password(&service, name).map_err(|e| map_error(namespace, name, e))?;
        tracing::debug!(service = %service, name = %name, "deleted keychain item");
        Ok(())
    }
}
