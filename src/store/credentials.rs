//! Credential store: one YAML mapping from username to password hash.

use crate::auth::password;
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;

/// Usernames name on-disk documents, so they must be safe as file names.
fn filename_safe(username: &str) -> bool {
    !username.starts_with('.')
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// File-backed username → password-hash mapping.
///
/// The lock serializes every read-modify-write against the backing file.
pub struct CredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the directory holding the credentials file is reachable.
    ///
    /// # Errors
    /// Returns an error when the parent directory is missing or unreadable.
    pub async fn ping(&self) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        tokio::fs::metadata(parent)
            .await
            .with_context(|| format!("credential directory unavailable: {}", parent.display()))?;
        Ok(())
    }

    /// Load the full mapping. A missing file is an empty mapping.
    ///
    /// # Errors
    /// Returns an error when the file is unreadable or not valid YAML.
    pub async fn load_all(&self) -> Result<BTreeMap<String, String>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// # Errors
    /// Returns an error on storage failure.
    pub async fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.load_all().await?.contains_key(username))
    }

    /// True iff the username exists and the hash verifier accepts the
    /// plaintext. Never compares hash strings directly.
    ///
    /// # Errors
    /// Returns an error on storage failure or a malformed stored hash.
    pub async fn verify(&self, username: &str, plaintext: &SecretString) -> Result<bool> {
        let users = self.load_all().await?;
        match users.get(username) {
            Some(hash) => password::verify_password(plaintext.expose_secret(), hash),
            None => Ok(false),
        }
    }

    /// Add a new entry, hashing the password. Returns `false` without
    /// touching the file when the username is taken, either input is
    /// empty, or the username is not filename-safe.
    ///
    /// # Errors
    /// Returns an error on storage failure.
    pub async fn add(&self, username: &str, plaintext: &SecretString) -> Result<bool> {
        if username.is_empty() || plaintext.expose_secret().is_empty() || !filename_safe(username) {
            return Ok(false);
        }

        let _guard = self.lock.lock().await;
        let mut users = self.read().await?;
        if users.contains_key(username) {
            return Ok(false);
        }

        let hash = password::hash_password(plaintext.expose_secret())?;
        users.insert(username.to_string(), hash);
        super::write_document(&self.path, &users).await?;
        Ok(true)
    }

    /// Remove an entry. Used to roll back a signup whose contact-document
    /// write failed.
    ///
    /// # Errors
    /// Returns an error on storage failure.
    pub(crate) async fn remove(&self, username: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut users = self.read().await?;
        if users.remove(username).is_some() {
            super::write_document(&self.path, &users).await?;
        }
        Ok(())
    }

    async fn read(&self) -> Result<BTreeMap<String, String>> {
        Ok(super::read_document(&self.path).await?.unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn store(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("users.yml"))
    }

    #[tokio::test]
    async fn test_load_all_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_exists_and_verify() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(store.add("admin", &secret("secret")).await.unwrap());
        assert!(store.exists("admin").await.unwrap());
        assert!(!store.exists("nobody").await.unwrap());

        assert!(store.verify("admin", &secret("secret")).await.unwrap());
        assert!(!store.verify("admin", &secret("wrong")).await.unwrap());
        assert!(!store.verify("nobody", &secret("secret")).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_duplicate_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(store.add("admin", &secret("secret")).await.unwrap());
        let before = store.load_all().await.unwrap();

        assert!(!store.add("admin", &secret("other")).await.unwrap());
        assert_eq!(store.load_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_add_rejects_empty_and_unsafe_usernames() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(!store.add("", &secret("secret")).await.unwrap());
        assert!(!store.add("admin", &secret("")).await.unwrap());
        assert!(!store.add("../escape", &secret("secret")).await.unwrap());
        assert!(!store.add("a/b", &secret("secret")).await.unwrap());
        assert!(!store.add(".hidden", &secret("secret")).await.unwrap());

        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stored_value_is_a_hash_not_the_plaintext() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.add("admin", &secret("secret")).await.unwrap();
        let users = store.load_all().await.unwrap();
        let hash = users.get("admin").unwrap();

        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_remove_deletes_the_entry() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.add("admin", &secret("secret")).await.unwrap();
        store.remove("admin").await.unwrap();
        assert!(!store.exists("admin").await.unwrap());
    }
}
