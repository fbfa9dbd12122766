//! Contact store: one YAML document per user.

use crate::contacts::ContactBook;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// File-backed contact documents, one `<username>.yml` per user under a
/// single directory.
pub struct ContactStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl ContactStore {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check that the contacts directory is reachable.
    ///
    /// # Errors
    /// Returns an error when the directory is missing or unreadable.
    pub async fn ping(&self) -> Result<()> {
        tokio::fs::metadata(&self.dir)
            .await
            .with_context(|| format!("contact directory unavailable: {}", self.dir.display()))?;
        Ok(())
    }

    /// Load one user's document. A missing file is an empty document.
    ///
    /// # Errors
    /// Returns an error when the file is unreadable or not valid YAML.
    pub async fn load_for_user(&self, username: &str) -> Result<ContactBook> {
        let _guard = self.lock.lock().await;
        self.read(username).await
    }

    /// Fully rewrite one user's document.
    ///
    /// # Errors
    /// Returns an error on storage failure.
    pub async fn save_for_user(&self, username: &str, book: &ContactBook) -> Result<()> {
        let _guard = self.lock.lock().await;
        super::write_document(&self.user_path(username), book).await
    }

    /// Scoped-lock read-modify-write: load the document, apply `mutate`,
    /// and persist the result when the document changed. The lock is held
    /// for the whole cycle, so interleaved updates cannot lose writes.
    ///
    /// # Errors
    /// Returns an error on storage failure.
    pub async fn update_for_user<F, R>(&self, username: &str, mutate: F) -> Result<R>
    where
        F: FnOnce(&mut ContactBook) -> R,
    {
        let _guard = self.lock.lock().await;
        let mut book = self.read(username).await?;
        let before = book.clone();

        let result = mutate(&mut book);
        if book != before {
            super::write_document(&self.user_path(username), &book).await?;
        }
        Ok(result)
    }

    fn user_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}.yml"))
    }

    async fn read(&self, username: &str) -> Result<ContactBook> {
        Ok(super::read_document(&self.user_path(username))
            .await?
            .unwrap_or_default())
    }
}
