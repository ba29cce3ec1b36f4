//! Platform keychain backend for the credential store

use keyring::Entry;
use tracing::debug;

use super::traits::{CredentialStore, CredentialStoreError};

/// Credential store backed by the platform keychain
/// (macOS Keychain, Windows Credential Manager, Linux Secret Service)
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Create a store scoped to the given keychain service name
    /// (e.g. "com.positivevoice.app")
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry, CredentialStoreError> {
        Entry::new(&self.service, key).map_err(|e| CredentialStoreError::Storage(e.to_string()))
    }
}

impl CredentialStore for KeyringStore {
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        debug!(key = %key, "storing secret");
        self.entry(key)?
            .set_password(value)
            .map_err(|e| CredentialStoreError::Storage(e.to_string()))
    }

    fn get(&self, key: &str) -> Result<Option<String>, CredentialStoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialStoreError::Storage(e.to_string())),
        }
    }

    fn delete(&self, key: &str) -> Result<(), CredentialStoreError> {
        debug!(key = %key, "deleting secret");
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CredentialStoreError::Storage(e.to_string())),
        }
    }
}
