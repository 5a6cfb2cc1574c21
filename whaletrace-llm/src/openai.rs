//! OpenAI-compatible chat completion provider

use crate::ChatProvider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use whaletrace_core::{ChatMessage, LlmError, WhaletraceResult};

const PROVIDER: &str = "openai";

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

/// Error envelope the API returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Chat completion provider for OpenAI-compatible endpoints.
pub struct OpenAiChatProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiChatProvider {
    /// Create a new provider with the default endpoint and a 15s timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: model.into(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Override the endpoint base URL (for proxies and compatible servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> WhaletraceResult<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: Some(512),
            temperature: Some(0.7),
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                message: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        if status.is_success() {
            let completion: CompletionResponse =
                response.json().await.map_err(|e| LlmError::InvalidResponse {
                    provider: PROVIDER.to_string(),
                    reason: format!("Failed to parse response: {}", e),
                })?;
            return completion
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| {
                    LlmError::InvalidResponse {
                        provider: PROVIDER.to_string(),
                        reason: "No completion in response".to_string(),
                    }
                    .into()
                });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(map_error(status, &body).into())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Map a non-2xx status and error body to the LlmError taxonomy.
///
/// Quota exhaustion arrives as HTTP 429 with an `insufficient_quota` code,
/// so the body is checked before the status.
fn map_error(status: StatusCode, body: &str) -> LlmError {
    let parsed: Option<ErrorBody> = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error);

    if let Some(error) = &parsed {
        let code = error.code.as_deref().unwrap_or("");
        let error_type = error.error_type.as_deref().unwrap_or("");
        if code == "insufficient_quota" || error_type == "insufficient_quota" {
            return LlmError::QuotaExhausted {
                provider: PROVIDER.to_string(),
            };
        }
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            provider: PROVIDER.to_string(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::InvalidApiKey {
            provider: PROVIDER.to_string(),
        },
        _ => LlmError::RequestFailed {
            provider: PROVIDER.to_string(),
            message: parsed.map(|e| e.message).unwrap_or_else(|| body.to_string()),
        },
    }
}

impl std::fmt::Debug for OpenAiChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_rate_limited() {
        let err = map_error(StatusCode::TOO_MANY_REQUESTS, "{}");
        assert!(matches!(err, LlmError::RateLimited { .. }));
    }

    #[test]
    fn test_map_error_quota_exhausted_beats_429() {
        let body = r#"{"error":{"message":"You exceeded your current quota","code":"insufficient_quota"}}"#;
        let err = map_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, LlmError::QuotaExhausted { .. }));
    }

    #[test]
    fn test_map_error_quota_exhausted_by_type() {
        let body = r#"{"error":{"message":"quota","type":"insufficient_quota"}}"#;
        let err = map_error(StatusCode::PAYMENT_REQUIRED, body);
        assert!(matches!(err, LlmError::QuotaExhausted { .. }));
    }

    #[test]
    fn test_map_error_invalid_key() {
        assert!(matches!(
            map_error(StatusCode::UNAUTHORIZED, "{}"),
            LlmError::InvalidApiKey { .. }
        ));
        assert!(matches!(
            map_error(StatusCode::FORBIDDEN, "{}"),
            LlmError::InvalidApiKey { .. }
        ));
    }

    #[test]
    fn test_map_error_uses_body_message() {
        let body = r#"{"error":{"message":"model overloaded"}}"#;
        let err = map_error(StatusCode::INTERNAL_SERVER_ERROR, body);
        match err {
            LlmError::RequestFailed { message, .. } => assert_eq!(message, "model overloaded"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_map_error_unparseable_body() {
        let err = map_error(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        match err {
            LlmError::RequestFailed { message, .. } => assert!(message.contains("nope")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![WireMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            max_tokens: Some(512),
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 512);
        assert!(json.get("temperature").is_none());
    }
}
