//! Axum route handlers for the analysis pipeline.
//!
//! Flow per submission: intake (new upload or stored id) → extract text →
//! analyze → render. Every request runs to completion on its own; the only
//! thing shared between requests is the upload directory.

use std::path::PathBuf;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Html,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::AnalysisResult;
use crate::errors::{AppError, UPLOAD_NOT_FOUND, UPLOAD_REQUIRED};
use crate::render::{render_page, Outcome, PageView};
use crate::state::AppState;
use crate::storage::{is_pdf_filename, UploadStore};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// The multipart form, as submitted.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub resume: Option<UploadedFile>,
    pub job_description: String,
    pub api_key: Option<String>,
    /// Stored upload id from a previous `RESOURCE_EXHAUSTED` response.
    pub existing_filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
}

fn invalid_form(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::TooLarge(
            "The upload is larger than the allowed size. Please upload a smaller PDF.".to_string(),
        )
    } else {
        AppError::Validation(format!("Invalid form submission: {}", e.body_text()))
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads fields into `form` as they arrive. On error, fields read before the failing
/// one stay in `form` so the page can still echo them.
pub async fn read_form(mut multipart: Multipart, form: &mut AnalysisForm) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(invalid_form)?;
                form.resume = Some(UploadedFile { file_name, bytes });
            }
            "job_description" => {
                form.job_description = field.text().await.map_err(invalid_form)?;
            }
            "api_key" => {
                form.api_key = non_blank(field.text().await.map_err(invalid_form)?);
            }
            "existing_filename" => {
                form.existing_filename = non_blank(field.text().await.map_err(invalid_form)?);
            }
            _ => {}
        }
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Picks the résumé for this request: a fresh PDF upload wins over a stored id.
async fn resolve_resume(
    uploads: &UploadStore,
    form: &AnalysisForm,
) -> Result<(String, PathBuf), AppError> {
    let fresh_upload = form
        .resume
        .as_ref()
        .filter(|file| is_pdf_filename(&file.file_name) && !file.bytes.is_empty());

    if let Some(file) = fresh_upload {
        let stored = uploads.save(&file.file_name, &file.bytes).await?;
        info!("Analyzing new upload {} ({:?})", stored.id, stored.original_name);
        return Ok((stored.id, stored.path));
    }

    match form.existing_filename.as_deref() {
        Some(id) => match uploads.resolve(id).await {
            Some(path) => {
                info!("Re-using stored upload {id}");
                Ok((id.to_string(), path))
            }
            None => Err(AppError::NotFound(UPLOAD_NOT_FOUND.to_string())),
        },
        None => Err(AppError::Validation(UPLOAD_REQUIRED.to_string())),
    }
}

/// Runs intake → extraction → analysis for one submission.
///
/// On `RESOURCE_EXHAUSTED` the error carries the stored upload id so the client can
/// resubmit with its own key without re-uploading; on any other outcome it is dropped.
pub async fn run_analysis(state: &AppState, form: &AnalysisForm) -> Result<AnalysisResult, AppError> {
    let (upload_id, path) = resolve_resume(&state.uploads, form).await?;

    let resume_text = state.extractor.extract(&path).await?;
    info!(
        "Extracted {} chars from upload {}, starting analysis",
        resume_text.len(),
        upload_id
    );

    state
        .analyzer
        .analyze(
            &resume_text,
            &form.job_description,
            form.api_key.as_deref(),
        )
        .await
        .map_err(|payload| {
            let retry_upload = payload.is_resource_exhausted().then_some(upload_id);
            AppError::Analysis {
                payload,
                retry_upload,
            }
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render_page(&PageView::empty()))
}

/// POST /
///
/// Always answers with the page; failures are rendered into it.
pub async fn handle_submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Html<String> {
    let mut form = AnalysisForm::default();
    let outcome = match multipart {
        Ok(multipart) => match read_form(multipart, &mut form).await {
            Ok(()) => run_analysis(&state, &form).await,
            Err(e) => Err(e),
        },
        // Not a multipart body at all, so there cannot be a file in it.
        Err(_) => Err(AppError::Validation(UPLOAD_REQUIRED.to_string())),
    };
    let job_description = form.job_description.as_str();

    let page = match &outcome {
        Ok(result) => render_page(&PageView {
            job_description,
            existing_filename: None,
            outcome: Some(Outcome::Analysis(result)),
        }),
        Err(e) => {
            e.report();
            let payload = e.to_payload();
            render_page(&PageView {
                job_description,
                existing_filename: e.retry_upload(),
                outcome: Some(Outcome::Error(&payload)),
            })
        }
    };

    Html(page)
}

/// POST /api/v1/analyze
pub async fn handle_api_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut form = AnalysisForm::default();
    read_form(multipart, &mut form).await?;
    let result = run_analysis(&state, &form).await?;
    Ok(Json(AnalyzeResponse { result }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
