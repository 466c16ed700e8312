//! Upload storage for résumé PDFs.
//!
//! Files are stored under generated ids (`<uuid>.pdf`), never under the name the
//! client sent, so concurrent users cannot overwrite each other's retry targets.
//! The id travels back to the browser in the `existing_filename` form field.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

const PDF_EXTENSION: &str = ".pdf";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write upload {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A résumé persisted for this request (and a possible retry).
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub id: String,
    pub original_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Opens the store, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: root.display().to_string(),
                source,
            })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, StorageError> {
        let id = format!("{}{PDF_EXTENSION}", Uuid::new_v4());
        let path = self.root.join(&id);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.display().to_string(),
                source,
            })?;

        let original_name = base_name(original_name).to_string();
        info!(
            "Stored upload {} ({} bytes, original name {:?})",
            id,
            bytes.len(),
            original_name
        );

        Ok(StoredUpload {
            id,
            original_name,
            path,
        })
    }

    /// Resolves a previously issued id. Unknown or malformed ids resolve to `None`.
    pub async fn resolve(&self, id: &str) -> Option<PathBuf> {
        if !is_valid_upload_id(id) {
            return None;
        }
        let path = self.root.join(id);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(path),
            _ => None,
        }
    }
}

/// Accepts only names this store could have issued: `[A-Za-z0-9-]+.pdf`.
pub fn is_valid_upload_id(id: &str) -> bool {
    id.strip_suffix(PDF_EXTENSION)
        .map(|stem| {
            !stem.is_empty() && stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
        .unwrap_or(false)
}

/// True when the client-side filename claims to be a PDF.
pub fn is_pdf_filename(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(PDF_EXTENSION)
}

/// Drops any directory components a browser may have sent along with the name.
fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_upload_ids() {
        assert!(is_valid_upload_id("0f8fad5b-d9cb-469f-a165-70867728950e.pdf"));
        assert!(is_valid_upload_id("abc123.pdf"));
    }

    #[test]
    fn test_traversal_and_odd_ids_are_rejected() {
        for id in [
            "../etc/passwd",
            "../secret.pdf",
            "..\\secret.pdf",
            "/abs/path.pdf",
            "sub/dir.pdf",
            ".pdf",
            "resume.PDF.exe",
            "my resume.pdf",
            "",
        ] {
            assert!(!is_valid_upload_id(id), "{id:?} must be rejected");
        }
    }

    #[test]
    fn test_pdf_filename_is_case_insensitive() {
        assert!(is_pdf_filename("CV.PDF"));
        assert!(is_pdf_filename("resume.pdf"));
        assert!(!is_pdf_filename("resume.docx"));
        assert!(!is_pdf_filename(""));
    }

    #[test]
    fn test_base_name_strips_directories() {
        assert_eq!(base_name("C:\\Users\\me\\cv.pdf"), "cv.pdf");
        assert_eq!(base_name("../../cv.pdf"), "cv.pdf");
        assert_eq!(base_name("cv.pdf"), "cv.pdf");
    }

    #[tokio::test]
    async fn test_save_then_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path().join("uploads")).await.unwrap();

        let stored = store.save("../My CV.pdf", b"%PDF-1.4").await.unwrap();
        assert!(is_valid_upload_id(&stored.id));
        assert_eq!(stored.original_name, "My CV.pdf");
        assert!(stored.path.starts_with(store.root()));
        assert_eq!(store.resolve(&stored.id).await, Some(stored.path.clone()));
        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_same_original_name_never_collides() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path()).await.unwrap();

        let first = store.save("resume.pdf", b"first").await.unwrap();
        let second = store.save("resume.pdf", b"second").await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(tokio::fs::read(&first.path).await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_resolve_unknown_or_malicious_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path().join("uploads")).await.unwrap();
        tokio::fs::write(dir.path().join("outside.pdf"), b"x")
            .await
            .unwrap();

        assert_eq!(store.resolve("missing.pdf").await, None);
        assert_eq!(store.resolve("../outside.pdf").await, None);
    }
}
