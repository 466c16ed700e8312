use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Clone)]
pub struct Config {
    /// Default Gemini credential, used when the caller does not supply one.
    pub google_api_key: String,
    pub upload_folder: PathBuf,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub diagnostics_timeout_secs: u64,
    pub max_upload_mb: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            upload_folder: PathBuf::from(
                std::env::var("UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".to_string()),
            ),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            llm_timeout_secs: parse_or(
                "LLM_TIMEOUT_SECS",
                std::env::var("LLM_TIMEOUT_SECS").ok(),
                120,
            )?,
            diagnostics_timeout_secs: parse_or(
                "DIAGNOSTICS_TIMEOUT_SECS",
                std::env::var("DIAGNOSTICS_TIMEOUT_SECS").ok(),
                5,
            )?,
            max_upload_mb: parse_or("MAX_UPLOAD_MB", std::env::var("MAX_UPLOAD_MB").ok(), 16)?,
            port: parse_or("PORT", std::env::var("PORT").ok(), 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

// The API key never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("google_api_key", &"<redacted>")
            .field("upload_folder", &self.upload_folder)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("diagnostics_timeout_secs", &self.diagnostics_timeout_secs)
            .field("max_upload_mb", &self.max_upload_mb)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let port: u16 = parse_or("PORT", None, 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_or_parses_trimmed_value() {
        let secs: u64 = parse_or("LLM_TIMEOUT_SECS", Some(" 30 ".to_string()), 120).unwrap();
        assert_eq!(secs, 30);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        let err = parse_or::<u16>("PORT", Some("eighty".to_string()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            google_api_key: "super-secret".to_string(),
            upload_folder: PathBuf::from("uploads"),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            llm_timeout_secs: 120,
            diagnostics_timeout_secs: 5,
            max_upload_mb: 16,
            port: 8080,
            rust_log: "info".to_string(),
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert_eq!(config.max_upload_bytes(), 16 * 1024 * 1024);
    }
}
