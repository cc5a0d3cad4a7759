//! Generative-language API client.
//!
//! The core treats the API as a black box: one prompt in, one text out.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::{Result, StackError};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API credential.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Single-shot text generation.
pub trait GenerativeClient: Send + Sync {
    /// Generate a text response for `prompt` with `model`.
    ///
    /// Any transport, status or payload problem is an
    /// [`StackError::ExternalCall`].
    fn generate_content(&self, credential: &str, model: &str, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| StackError::Config(format!("ai http client: {err}")))?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &AiConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(StackError::Config(
                "ai endpoint is empty; set [ai].endpoint".to_string(),
            ));
        }
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs.max(1)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.endpoint)
    }
}

impl GenerativeClient for GeminiClient {
    fn generate_content(&self, credential: &str, model: &str, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.url_for(model))
            .header(API_KEY_HEADER, credential)
            .json(&request)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    StackError::ExternalCall(format!("{model} request timed out"))
                } else {
                    StackError::ExternalCall(format!("{model} request failed: {err}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| StackError::ExternalCall(format!("{model} response read: {err}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| match parsed.error.status {
                    Some(code) => format!("{code}: {}", parsed.error.message),
                    None => parsed.error.message,
                })
                .unwrap_or_else(|_| body.trim().to_string());
            return Err(StackError::ExternalCall(format!(
                "{model} HTTP {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|err| StackError::ExternalCall(format!("{model} response parse: {err}")))?;
        extract_text(parsed)
            .ok_or_else(|| StackError::ExternalCall(format!("{model} returned no text")))
    }
}

fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "Hello" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "Hello"}]}]}));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(extract_text(response).is_none());
        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(extract_text(blocked).is_none());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost:9/v1beta/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url_for("gemini-2.0-flash"),
            "http://localhost:9/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
