//! Flat-file YAML persistence for the credential and contact documents.
//!
//! Both stores follow the same load-mutate-store discipline: the whole
//! document is read on each access and rewritten on each mutation, with a
//! per-store lock serializing every read-modify-write.

pub mod contacts;
pub mod credentials;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{io::ErrorKind, path::Path};

/// Read one YAML document. A missing or empty file is `Ok(None)`.
pub(crate) async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid document: {}", path.display()))?;
    Ok(Some(value))
}

/// Serialize and fully rewrite one YAML document.
pub(crate) async fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let raw = serde_yaml::to_string(value).context("failed to serialize document")?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    tokio::fs::write(path, raw)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let value: Option<BTreeMap<String, String>> =
            read_document(&dir.path().join("absent.yml")).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.yml");
        tokio::fs::write(&path, "\n").await.unwrap();

        let value: Option<BTreeMap<String, String>> = read_document(&path).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yml");
        tokio::fs::write(&path, "key: [unclosed").await.unwrap();

        let result: Result<Option<BTreeMap<String, String>>> = read_document(&path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("doc.yml");

        let mut value = BTreeMap::new();
        value.insert("key".to_string(), "value".to_string());
        write_document(&path, &value).await.unwrap();

        let read: Option<BTreeMap<String, String>> = read_document(&path).await.unwrap();
        assert_eq!(read.unwrap(), value);
    }
}
