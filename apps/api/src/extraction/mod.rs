//! Text extraction: turns an uploaded résumé into plain text for the prompt.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default backend is
//! `PdfTextExtractor`, which concatenates the text of every page with no
//! layout awareness.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF {path}: {message}")]
    Parse { path: String, message: String },

    #[error("PDF parser crashed while reading {path}")]
    Crashed { path: String },
}

/// Swap backends without touching the handler.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backend. Parsing runs on the blocking pool; a parser panic
/// becomes `ExtractionError::Crashed` instead of unwinding into the request.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let path_label = path.display().to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ExtractionError::Io {
                path: path_label.clone(),
                source,
            })?;

        let parsed = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await;

        match parsed {
            Ok(Ok(text)) => {
                debug!("Extracted {} chars from {}", text.len(), path_label);
                Ok(text)
            }
            Ok(Err(message)) => Err(ExtractionError::Parse {
                path: path_label,
                message,
            }),
            Err(_) => Err(ExtractionError::Crashed { path: path_label }),
        }
    }
}
