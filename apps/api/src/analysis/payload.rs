use serde::{Deserialize, Serialize};

/// Error code that unlocks the bring-your-own-key retry flow.
pub const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

pub const QUOTA_REMEDIATION: &str = "The system's API key is invalid, expired, or quota exhausted. \
    Please provide your own Gemini API Key to continue.";

/// Error shape shown to the user in place of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// Best-effort context attached to generic provider failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub current_model: String,
    pub available_models: Vec<String>,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
            diagnostics: None,
        }
    }

    pub fn resource_exhausted(details: impl Into<String>) -> Self {
        Self {
            error: RESOURCE_EXHAUSTED.to_string(),
            message: Some(QUOTA_REMEDIATION.to_string()),
            details: Some(details.into()),
            diagnostics: None,
        }
    }

    pub fn analysis_failed(error_text: &str, diagnostics: Diagnostics) -> Self {
        Self {
            error: format!("AI Analysis Failed: {error_text}"),
            message: None,
            details: None,
            diagnostics: Some(diagnostics),
        }
    }

    pub fn is_resource_exhausted(&self) -> bool {
        self.error == RESOURCE_EXHAUSTED
    }
}
