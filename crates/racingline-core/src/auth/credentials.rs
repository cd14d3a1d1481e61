use anyhow::{Context, Result};
use keyring::Entry;

use super::KeyProvider;

const SERVICE_NAME: &str = "racingline";

/// Default keychain account the access key is stored under
pub const DEFAULT_ACCOUNT: &str = "data-access-key";

/// Access key kept in the OS keychain.
pub struct CredentialStore {
    account: String,
}

impl CredentialStore {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &self.account).context("Failed to create keyring entry")
    }

    /// Store the access key in the OS keychain
    pub fn store(&self, key: &str) -> Result<()> {
        self.entry()?
            .set_password(key)
            .context("Failed to store access key in keychain")
    }

    pub fn get(&self) -> Result<String> {
        self.entry()?
            .get_password()
            .context("Failed to retrieve access key from keychain")
    }

    pub fn delete(&self) -> Result<()> {
        self.entry()?
            .delete_credential()
            .context("Failed to delete access key from keychain")
    }

    pub fn has_key(&self) -> bool {
        self.get().is_ok()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT)
    }
}

impl KeyProvider for CredentialStore {
    fn access_key(&self) -> Result<String> {
        self.get()
    }
}
