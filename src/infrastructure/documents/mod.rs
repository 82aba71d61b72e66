//! License document storage
//!
//! The provisioning flow needs a durable reference (URL + content
//! identifier) for a Doctor's license proof. `DocumentStore` abstracts
//! the backend; the filesystem implementation below is the default and
//! a cloud-backed store can be swapped in behind the same trait.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Accepted media type for license documents.
pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    /// Directory for stored documents.
    pub dir: String,
    /// Upper bound on a single store operation, in seconds.
    pub upload_timeout_secs: u64,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            dir: "./documents".to_string(),
            upload_timeout_secs: 30,
        }
    }
}

/// An uploaded file as received from the HTTP layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Durable reference returned by the store.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub url: String,
    pub content_id: String,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a license document keyed by the pending owner's identity
    /// and display name, returning its durable reference.
    async fn store_license(
        &self,
        file: &UploadedFile,
        owner_id: &str,
        owner_name: &str,
    ) -> Result<StoredDocument, DocumentError>;
}

/// Filesystem-backed document store.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn slug(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    out.trim_matches('-').to_string()
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn store_license(
        &self,
        file: &UploadedFile,
        owner_id: &str,
        owner_name: &str,
    ) -> Result<StoredDocument, DocumentError> {
        let content_id = uuid::Uuid::new_v4().to_string();
        let file_name = format!("{}-{}-{}.pdf", owner_id, slug(owner_name), content_id);
        let path = self.root.join(&file_name);

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, &file.bytes).await?;

        info!(owner_id = %owner_id, path = %path.display(), "License document stored");

        Ok(StoredDocument {
            url: format!("file://{}", path.display()),
            content_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_normalizes_names() {
        assert_eq!(slug("Amira Haddad"), "amira-haddad");
        assert_eq!(slug("  Dr.  J.  "), "dr-j");
    }

    #[tokio::test]
    async fn stores_bytes_and_returns_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());

        let file = UploadedFile {
            file_name: "license.pdf".to_string(),
            content_type: PDF_MIME.to_string(),
            bytes: b"%PDF-1.7 fake".to_vec(),
        };

        let stored = store
            .store_license(&file, "user-1", "Amira Haddad")
            .await
            .unwrap();

        assert!(stored.url.starts_with("file://"));
        assert!(!stored.content_id.is_empty());

        let path = stored.url.trim_start_matches("file://");
        let on_disk = tokio::fs::read(path).await.unwrap();
        assert_eq!(on_disk, b"%PDF-1.7 fake");
    }
}
