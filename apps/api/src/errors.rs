use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::analysis::ErrorPayload;
use crate::extraction::ExtractionError;
use crate::storage::StorageError;

pub const UPLOAD_REQUIRED: &str = "Please upload a PDF resume.";
pub const UPLOAD_NOT_FOUND: &str = "File not found. Please upload again.";

/// Application-level error type.
///
/// The HTML page turns it into an [`ErrorPayload`] via [`AppError::to_payload`];
/// the JSON API uses the `IntoResponse` impl.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TooLarge(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The model call failed; the analyzer already shaped the payload.
    /// `retry_upload` is set only for `RESOURCE_EXHAUSTED`.
    #[error("AI analysis error: {}", .payload.error)]
    Analysis {
        payload: ErrorPayload,
        retry_upload: Option<String>,
    },
}

#[derive(Serialize)]
struct ApiErrorBody {
    #[serde(flatten)]
    payload: ErrorPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_filename: Option<String>,
}

impl AppError {
    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::TooLarge(msg) => {
                ErrorPayload::new(msg.clone())
            }
            AppError::Extraction(e) => ErrorPayload::new(format!("Internal System Error: {e}")),
            AppError::Storage(e) => ErrorPayload::new(format!("Internal System Error: {e}")),
            AppError::Analysis { payload, .. } => payload.clone(),
        }
    }

    /// Stored upload id the client may resubmit with, if any.
    pub fn retry_upload(&self) -> Option<&str> {
        match self {
            AppError::Analysis { retry_upload, .. } => retry_upload.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Analysis { payload, .. } if payload.is_resource_exhausted() => {
                StatusCode::TOO_MANY_REQUESTS
            }
            AppError::Analysis { .. } => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the failure once, at the boundary that turns it into a response.
    pub fn report(&self) {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::TooLarge(msg) => {
                tracing::info!("Rejected submission: {msg}");
            }
            AppError::Extraction(e) => tracing::error!("Extraction error: {e:?}"),
            AppError::Storage(e) => tracing::error!("Storage error: {e:?}"),
            // The analyzer logs provider failures where they are classified.
            AppError::Analysis { .. } => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();

        let status = self.status();
        let body = Json(ApiErrorBody {
            payload: self.to_payload(),
            existing_filename: self.retry_upload().map(String::from),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_keep_their_message() {
        let err = AppError::Validation(UPLOAD_REQUIRED.to_string());
        assert_eq!(err.to_payload(), ErrorPayload::new(UPLOAD_REQUIRED));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::NotFound(UPLOAD_NOT_FOUND.to_string());
        assert_eq!(err.to_payload().error, UPLOAD_NOT_FOUND);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_oversized_upload_is_413() {
        let err = AppError::TooLarge("too big".to_string());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_payload().error, "too big");
    }

    #[test]
    fn test_extraction_error_surfaces_as_internal_error_text() {
        let err = AppError::from(ExtractionError::Parse {
            path: "x.pdf".to_string(),
            message: "invalid xref".to_string(),
        });
        let payload = err.to_payload();
        assert!(payload.error.starts_with("Internal System Error:"));
        assert!(payload.error.contains("invalid xref"));
        assert_eq!(err.retry_upload(), None);
    }

    #[test]
    fn test_quota_analysis_error_keeps_retry_upload() {
        let err = AppError::Analysis {
            payload: ErrorPayload::resource_exhausted("429"),
            retry_upload: Some("abc.pdf".to_string()),
        };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.retry_upload(), Some("abc.pdf"));
    }

    #[test]
    fn test_api_body_flattens_payload() {
        let body = ApiErrorBody {
            payload: ErrorPayload::resource_exhausted("429"),
            existing_filename: Some("abc.pdf".to_string()),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["error"], "RESOURCE_EXHAUSTED");
        assert_eq!(value["existing_filename"], "abc.pdf");
    }
}
