//! Cloudflare Workers AI client.
//!
//! Implements [`CompletionClient`] against the Workers AI REST endpoint:
//! `POST {base}/accounts/{account_id}/ai/run/{model}` with a bearer token
//! and a JSON body of role/content messages. The reply arrives in the
//! standard Cloudflare envelope with the generated text at
//! `result.response`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::error::CompletionError;
use super::trait_def::{ChatMessage, CompletionClient};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for [`WorkersAiClient`].
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    /// API base URL; override for tests or proxies.
    pub base_url: String,
    pub timeout: Duration,
}

impl WorkersAiConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Cloudflare envelope around a Workers AI run result.
#[derive(Debug, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    success: bool,
    result: Option<RunResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

pub struct WorkersAiClient {
    http: Client,
    account_id: String,
    api_token: String,
    base_url: String,
}

impl WorkersAiClient {
    pub fn new(config: &WorkersAiConfig) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CompletionError::Network)?;

        Ok(Self {
            http,
            account_id: config.account_id.clone(),
            api_token: config.api_token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn run_url(&self, model: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, model
        )
    }
}

/// Flatten the Cloudflare error list into one message for display.
fn join_api_errors(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} (code {})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl CompletionClient for WorkersAiClient {
    fn name(&self) -> &str {
        "workers-ai"
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let url = self.run_url(model);
        debug!(%model, message_count = messages.len(), "workers-ai completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&json!({ "messages": messages }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: RunEnvelope = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedPayload(e.to_string()))?;

        if !envelope.success {
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: join_api_errors(&envelope.errors),
            });
        }

        let text = envelope
            .result
            .and_then(|r| r.response)
            .ok_or_else(|| {
                CompletionError::MalformedPayload("result.response missing".to_string())
            })?;

        debug!(reply_len = text.len(), "workers-ai completion reply");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WorkersAiClient {
        WorkersAiClient::new(&WorkersAiConfig::new("acct-123", "token")).unwrap()
    }

    #[test]
    fn run_url_shape() {
        let client = test_client();
        assert_eq!(
            client.run_url("@cf/meta/llama-3.3-70b-instruct-fp8-fast"),
            "https://api.cloudflare.com/client/v4/accounts/acct-123/ai/run/@cf/meta/llama-3.3-70b-instruct-fp8-fast"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut config = WorkersAiConfig::new("a", "t");
        config.base_url = "http://localhost:9999/".to_string();
        let client = WorkersAiClient::new(&config).unwrap();
        assert_eq!(client.run_url("m"), "http://localhost:9999/accounts/a/ai/run/m");
    }

    #[test]
    fn envelope_parses_success_reply() {
        let body = r#"{"result": {"response": "hello"}, "success": true, "errors": [], "messages": []}"#;
        let envelope: RunEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.result.unwrap().response.unwrap(), "hello");
    }

    #[test]
    fn envelope_parses_error_reply() {
        let body = r#"{"result": null, "success": false, "errors": [{"code": 10000, "message": "Authentication error"}]}"#;
        let envelope: RunEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.success);
        assert_eq!(
            join_api_errors(&envelope.errors),
            "Authentication error (code 10000)"
        );
    }

    #[test]
    fn join_api_errors_handles_empty_list() {
        assert_eq!(join_api_errors(&[]), "unknown error");
    }
}
