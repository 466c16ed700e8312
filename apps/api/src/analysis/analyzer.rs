//! Résumé Analyzer: prompt → single model call → schema validation → typed result.
//!
//! Failures never escape as errors: they are shaped into an [`ErrorPayload`] the page
//! can show. Provider failures that look like quota or credential exhaustion become
//! `RESOURCE_EXHAUSTED` (the user can retry with their own key); everything else
//! becomes a generic failure with a best-effort list of usable models attached.

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::analysis::payload::{Diagnostics, ErrorPayload};
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::result::AnalysisResult;
use crate::analysis::schema::{
    analysis_schema, gemini_schema, validate_against_schema, SchemaViolation,
};
use crate::llm_client::{GeminiClient, LlmError};

/// Substrings of provider errors that mean "quota exhausted or key unusable".
pub const QUOTA_MARKERS: [&str; 4] = [
    "429",
    "RESOURCE_EXHAUSTED",
    "API key expired",
    "API_KEY_INVALID",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    QuotaExhausted,
    Generic,
}

/// Classifies a provider error by its text.
pub fn classify_failure(error_text: &str) -> FailureKind {
    if QUOTA_MARKERS
        .iter()
        .any(|marker| error_text.contains(marker))
    {
        FailureKind::QuotaExhausted
    } else {
        FailureKind::Generic
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Model output violates the analysis schema: {0}")]
    Schema(#[from] SchemaViolation),

    #[error("Model output does not match the analysis result: {0}")]
    Shape(serde_json::Error),
}

impl AnalysisError {
    /// Only failures reported by the provider (or the transport) are classified;
    /// a malformed document is always a generic failure, whatever text it contains.
    fn kind(&self) -> FailureKind {
        match self {
            AnalysisError::Llm(e) if e.is_provider_failure() => classify_failure(&e.to_string()),
            _ => FailureKind::Generic,
        }
    }
}

#[derive(Clone)]
pub struct ResumeAnalyzer {
    llm: GeminiClient,
    diagnostics_timeout: Duration,
}

impl ResumeAnalyzer {
    pub fn new(llm: GeminiClient, diagnostics_timeout: Duration) -> Self {
        Self {
            llm,
            diagnostics_timeout,
        }
    }

    /// Runs one analysis. `api_key` overrides the default credential when non-blank.
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
        api_key: Option<&str>,
    ) -> Result<AnalysisResult, ErrorPayload> {
        match self.try_analyze(resume_text, job_description, api_key).await {
            Ok(result) => {
                info!(
                    "Analysis complete: ats_score={}, decision={:?}",
                    result.ats_analysis.overall_score, result.recruiter_review.decision
                );
                Ok(result)
            }
            Err(e) => Err(self.failure_payload(e, api_key).await),
        }
    }

    async fn try_analyze(
        &self,
        resume_text: &str,
        job_description: &str,
        api_key: Option<&str>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_analysis_prompt(resume_text, job_description);
        let document: serde_json::Value = self.llm.call_json(&prompt, gemini_schema(), api_key).await?;
        validate_against_schema(&document, analysis_schema())?;
        serde_json::from_value(document).map_err(AnalysisError::Shape)
    }

    async fn failure_payload(&self, err: AnalysisError, api_key: Option<&str>) -> ErrorPayload {
        let error_text = err.to_string();
        match err.kind() {
            FailureKind::QuotaExhausted => {
                warn!("Gemini quota or credential exhausted: {error_text}");
                ErrorPayload::resource_exhausted(error_text)
            }
            FailureKind::Generic => {
                error!("AI analysis failed: {error_text}");
                let available_models = self.available_models(api_key).await;
                ErrorPayload::analysis_failed(
                    &error_text,
                    Diagnostics {
                        current_model: self.llm.model().to_string(),
                        available_models,
                    },
                )
            }
        }
    }

    /// Time-bounded model listing. Any failure here is logged and swallowed.
    async fn available_models(&self, api_key: Option<&str>) -> Vec<String> {
        let listing = tokio::time::timeout(
            self.diagnostics_timeout,
            self.llm.list_generation_models(api_key),
        )
        .await;

        match listing {
            Ok(Ok(models)) => {
                info!("[diagnostics] available models: {}", models.join(", "));
                models
            }
            Ok(Err(e)) => {
                warn!("[diagnostics] failed to list models: {e}");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "[diagnostics] model listing timed out after {}ms",
                    self.diagnostics_timeout.as_millis()
                );
                Vec::new()
            }
        }
    }
}
