use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::storage::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutable; requests only share the upload directory.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: UploadStore,
    /// Pluggable extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub analyzer: ResumeAnalyzer,
}
