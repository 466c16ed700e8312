mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod render;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::UploadStore;

/// Used when `RUST_LOG` is unset. Keeps request traces and caught panics visible.
fn default_log_directive(level: &str) -> String {
    format!("{}={level},tower_http=info", env!("CARGO_CRATE_NAME"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GOOGLE_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(default_log_directive(&config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {config:?}");

    // Upload directory must exist before the first request
    let uploads = UploadStore::open(config.upload_folder.clone()).await?;
    info!("Upload folder ready at {}", uploads.root().display());

    // Initialize Gemini client
    let llm = GeminiClient::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?
    .with_base_url(&config.gemini_base_url);
    info!("Gemini client initialized (model: {})", llm.model());

    let analyzer = ResumeAnalyzer::new(
        llm,
        Duration::from_secs(config.diagnostics_timeout_secs),
    );

    let state = AppState {
        config: config.clone(),
        uploads,
        extractor: Arc::new(PdfTextExtractor),
        analyzer,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_directive_includes_http_layer() {
        let directive = default_log_directive("debug");
        assert!(directive.starts_with("resume_analyzer=debug"));
        assert!(directive.contains("tower_http=info"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }
}
