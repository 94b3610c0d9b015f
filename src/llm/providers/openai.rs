//! OpenAI-compatible chat completion provider (`/v1/chat/completions`).
//!
//! Exposes a single `generate(&str, &GenerateOptions) -> String` interface
//! matching the rest of the `LlmProvider` abstraction. All wire types are
//! private to this module — callers never see them. The request is blocking:
//! the session has one thread of control and never more than one call in
//! flight.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::llm::{GenerateOptions, ProviderError};

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for any HTTP endpoint implementing `/v1/chat/completions`.
///
/// Covers OpenAI, OpenAI-compatible local servers (Ollama, LM Studio…),
/// and hosted alternatives. Constructed once at startup.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    api_base_url: String,
    api_key: Option<String>,
}

impl OpenAiProvider {
    /// Build a provider from config values and an optional API key.
    ///
    /// `api_key` is `None` for keyless local endpoints. When present it is
    /// sent as `Authorization: Bearer <key>` on every request.
    pub fn new(
        api_base_url: String,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_base_url, api_key })
    }

    /// One round-trip: `prompt` as the user message, the role instruction as
    /// the system message. History management is the session's
    /// responsibility — this provider is stateless.
    pub fn generate(&self, prompt: &str, opts: &GenerateOptions) -> Result<String, ProviderError> {
        let payload = ChatCompletionRequest {
            model: opts.model.clone(),
            messages: vec![
                Message { role: "system".to_string(), content: opts.role_instruction.clone() },
                Message { role: "user".to_string(), content: prompt.to_string() },
            ],
            max_tokens: opts.max_output_tokens,
            temperature: opts.temperature,
        };

        debug!(
            model = %payload.model,
            temperature = payload.temperature,
            prompt_len = prompt.len(),
            "sending generation request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full request payload");
        }

        let mut req = self.client.post(&self.api_base_url).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().map_err(|e| {
            error!(url = %self.api_base_url, error = %e, "HTTP request failed (transport)");
            ProviderError::Request(e.to_string())
        })?;

        let response = check_status(response)?;

        let parsed = response.json::<ChatCompletionResponse>().map_err(|e| {
            error!(error = %e, "failed to deserialize response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        debug!(choices = parsed.choices.len(), "received generation response");

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::Request("empty or missing content in response".into()))
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Error envelope used by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Consume the response and return it if successful, or a structured error.
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(&body) {
        let code = env
            .error
            .code
            .map(|v| match v {
                serde_json::Value::String(s) => format!(" [code={s}]"),
                other => format!(" [code={other}]"),
            })
            .unwrap_or_default();
        format!("HTTP {status}{code}: {}", env.error.message)
    } else {
        format!("HTTP {status}: {body}")
    };

    error!(%status, %message, "generation request returned HTTP error");
    Err(ProviderError::Request(message))
}
