//! Signup and signin flows over the credential and contact stores.
//!
//! This layer is session-agnostic: handlers establish the session identity
//! after a successful outcome.

pub mod password;

use crate::contacts::ContactBook;
use crate::store::{contacts::ContactStore, credentials::CredentialStore};
use anyhow::Result;
use secrecy::SecretString;
use tracing::warn;

/// Outcome when attempting to create a new account.
///
/// Rejection is deliberately coarse: a taken username, an empty username
/// or an empty password are indistinguishable to the caller.
#[derive(Debug, Eq, PartialEq)]
pub enum SignupOutcome {
    Created,
    Rejected,
}

/// Create a new account and its empty contact document.
///
/// If the contact document cannot be written, the credential entry is
/// rolled back so the two stores stay consistent.
///
/// # Errors
/// Returns an error on storage failure.
pub async fn signup(
    credentials: &CredentialStore,
    contacts: &ContactStore,
    username: &str,
    password: &SecretString,
) -> Result<SignupOutcome> {
    if !credentials.add(username, password).await? {
        return Ok(SignupOutcome::Rejected);
    }

    if let Err(err) = contacts.save_for_user(username, &ContactBook::default()).await {
        if let Err(rollback) = credentials.remove(username).await {
            warn!("failed to roll back credentials for {username}: {rollback:#}");
        }
        return Err(err);
    }

    Ok(SignupOutcome::Created)
}

/// Verify a username/password pair.
///
/// # Errors
/// Returns an error on storage failure; an unknown username or a wrong
/// password is `Ok(false)`.
pub async fn signin(
    credentials: &CredentialStore,
    username: &str,
    password: &SecretString,
) -> Result<bool> {
    credentials.verify(username, password).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stores(dir: &TempDir) -> (CredentialStore, ContactStore) {
        (
            CredentialStore::new(dir.path().join("users.yml")),
            ContactStore::new(dir.path().join("contacts")),
        )
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[tokio::test]
    async fn test_signup_creates_account_and_empty_document() {
        let dir = TempDir::new().unwrap();
        let (credentials, contacts) = stores(&dir);

        let outcome = signup(&credentials, &contacts, "admin", &secret("secret"))
            .await
            .unwrap();
        assert_eq!(outcome, SignupOutcome::Created);

        assert!(credentials.exists("admin").await.unwrap());
        let book = contacts.load_for_user("admin").await.unwrap();
        assert_eq!(book, ContactBook::default());
    }

    #[tokio::test]
    async fn test_signup_twice_rejects_and_keeps_original_hash() {
        let dir = TempDir::new().unwrap();
        let (credentials, contacts) = stores(&dir);

        signup(&credentials, &contacts, "admin", &secret("secret"))
            .await
            .unwrap();
        let original = credentials.load_all().await.unwrap();

        let outcome = signup(&credentials, &contacts, "admin", &secret("other"))
            .await
            .unwrap();
        assert_eq!(outcome, SignupOutcome::Rejected);
        assert_eq!(credentials.load_all().await.unwrap(), original);

        // The original password still verifies, the attempted one does not.
        assert!(signin(&credentials, "admin", &secret("secret")).await.unwrap());
        assert!(!signin(&credentials, "admin", &secret("other")).await.unwrap());
    }

    #[tokio::test]
    async fn test_signup_rejects_empty_fields() {
        let dir = TempDir::new().unwrap();
        let (credentials, contacts) = stores(&dir);

        for (username, password) in [("", "secret"), ("admin", "")] {
            let outcome = signup(&credentials, &contacts, username, &secret(password))
                .await
                .unwrap();
            assert_eq!(outcome, SignupOutcome::Rejected);
        }
    }

    #[tokio::test]
    async fn test_signin_matches_only_the_original_plaintext() {
        let dir = TempDir::new().unwrap();
        let (credentials, contacts) = stores(&dir);

        signup(&credentials, &contacts, "ana", &secret("passw0rd"))
            .await
            .unwrap();

        assert!(signin(&credentials, "ana", &secret("passw0rd")).await.unwrap());
        assert!(!signin(&credentials, "ana", &secret("Passw0rd")).await.unwrap());
        assert!(!signin(&credentials, "nobody", &secret("passw0rd")).await.unwrap());
    }
}
