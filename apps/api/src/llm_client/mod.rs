/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// One request per call. Retrying is left to the user (bring-your-own-key flow).
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Sampling temperature for every structured-output call.
pub const TEMPERATURE: f32 = 0.7;
const GENERATE_CONTENT_METHOD: &str = "generateContent";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rendered like the provider SDKs do (`429 RESOURCE_EXHAUSTED. {...}`) so the
    /// status name and any reason codes in the body stay visible to classification.
    #[error("{code} {status}. {body}")]
    Api {
        code: u16,
        status: String,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content (reason: {0})")]
    EmptyContent(String),
}

impl LlmError {
    /// True for failures that come from the provider or the transport,
    /// as opposed to failures to make sense of a successful response.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, LlmError::Http(_) | LlmError::Api { .. })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn empty_reason(&self) -> String {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .or_else(|| {
                self.candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
            })
            .unwrap_or_else(|| "no candidates".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    status: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client used by the service.
/// Holds the default credential; every call may override it with a caller key.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    default_api_key: String,
}

impl GeminiClient {
    pub fn new(default_api_key: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            default_api_key,
        })
    }

    /// Points the client at a different API host (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// A blank override counts as no override.
    fn resolve_key<'a>(&'a self, api_key: Option<&'a str>) -> &'a str {
        api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.default_api_key)
    }

    /// Makes a single `generateContent` call constrained by `response_schema`.
    pub async fn call(
        &self,
        prompt: &str,
        response_schema: &Value,
        api_key: Option<&str>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
                temperature: TEMPERATURE,
            },
        };

        let url = format!(
            "{}/{API_VERSION}/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.resolve_key(api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            return Err(api_error(status, body));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }

    /// Calls the model and deserializes the text response as JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        response_schema: &Value,
        api_key: Option<&str>,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, response_schema, api_key).await?;

        let text = response
            .text()
            .ok_or_else(|| LlmError::EmptyContent(response.empty_reason()))?;

        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }

    /// Lists the models the credential can use for `generateContent`.
    pub async fn list_generation_models(&self, api_key: Option<&str>) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/{API_VERSION}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("pageSize", "1000")])
            .header(API_KEY_HEADER, self.resolve_key(api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, body));
        }

        let listing: ListModelsResponse = response.json().await?;
        Ok(listing
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == GENERATE_CONTENT_METHOD)
            })
            .map(|m| m.name)
            .collect())
    }
}

fn api_error(status: StatusCode, body: String) -> LlmError {
    let provider_status = serde_json::from_str::<GoogleError>(&body)
        .ok()
        .and_then(|e| e.error.status)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("UNKNOWN").to_string());
    LlmError::Api {
        code: status.as_u16(),
        status: provider_status,
        body,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            "default-key".to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(server.uri())
    }

    fn generate_path() -> String {
        format!("/v1beta/models/{DEFAULT_MODEL}:generateContent")
    }

    fn candidate_body(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": {"parts": [{"text": text}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20}
        })
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_request_serializes_generation_config_in_camel_case() {
        let schema = json!({"type": "OBJECT"});
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
                temperature: TEMPERATURE,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_api_error_display_carries_provider_status() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = api_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        let text = err.to_string();
        assert!(text.starts_with("429 RESOURCE_EXHAUSTED."));
        assert!(text.contains("Quota exceeded"));
        assert!(err.is_provider_failure());
    }

    #[test]
    fn test_api_error_falls_back_to_http_reason() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "502 Bad Gateway. upstream down");
    }

    #[tokio::test]
    async fn test_call_json_uses_default_key_and_parses_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .and(header(API_KEY_HEADER, "default-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(
                "```json\n{\"answer\": 42}\n```",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let value: Value = client_for(&server)
            .call_json("prompt", &json!({"type": "OBJECT"}), None)
            .await
            .unwrap();
        assert_eq!(value["answer"], 42);
    }

    #[tokio::test]
    async fn test_call_prefers_caller_key_over_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .and(header(API_KEY_HEADER, "user-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let value: Value = client_for(&server)
            .call_json("prompt", &json!({}), Some("  user-key "))
            .await
            .unwrap();
        assert!(value.as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_call_json_reports_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [],
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .call_json::<Value>("prompt", &json!({}), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent(ref reason) if reason == "SAFETY"));
        assert!(!err.is_provider_failure());
    }

    #[tokio::test]
    async fn test_call_surfaces_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .call("prompt", &json!({}), None)
            .await
            .unwrap_err();
        match err {
            LlmError::Api { code, status, .. } => {
                assert_eq!(code, 429);
                assert_eq!(status, "RESOURCE_EXHAUSTED");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_generation_models_filters_by_method() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    {"name": "models/gemini-2.5-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]},
                    {"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]}
                ]
            })))
            .mount(&server)
            .await;

        let models = client_for(&server).list_generation_models(None).await.unwrap();
        assert_eq!(models, vec!["models/gemini-2.5-flash".to_string()]);
    }
}
