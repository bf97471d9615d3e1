//! OpenAI-compatible chat completions client.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GeneratorError;

/// Default chat completions URL.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model name sent with each request.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default request timeout (60 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "GITSCRIBE_HTTP_TIMEOUT";

/// Error bodies are cut to this many characters before being surfaced.
const MAX_ERROR_BODY_CHARS: usize = 500;

const TEMPERATURE: f32 = 0.7;

/// Get the configured timeout duration.
///
/// Reads from GITSCRIBE_HTTP_TIMEOUT if set, otherwise uses the default of
/// 60 seconds. Logs a warning if the variable is set but invalid.
pub fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Sends a prompt to a remote text-generation endpoint.
///
/// This abstraction allows mocking the endpoint in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `prompt` authenticated with the bearer `token`; return the reply text.
    async fn complete(&self, prompt: &str, token: &str) -> Result<String, GeneratorError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, GeneratorError> {
        let http = reqwest::Client::builder()
            .timeout(get_timeout())
            .user_agent(concat!("gitscribe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GeneratorError::Http)?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, prompt: &str, token: &str) -> Result<String, GeneratorError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        debug!("POST {} (model {})", self.endpoint, self.model);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(GeneratorError::Http)?;

        let status = response.status();
        debug!("Endpoint responded with HTTP {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GeneratorError::InvalidResponse("response contained no choices".into()))
    }
}

/// Map a non-success HTTP status and body onto the generator taxonomy.
fn classify_failure(status: u16, body: &str) -> GeneratorError {
    let body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();

    match status {
        401 | 403 => GeneratorError::Unauthorized(status),
        413 => GeneratorError::PayloadTooLarge(if body.is_empty() {
            "HTTP 413".to_string()
        } else {
            body
        }),
        400 if body.contains("context_length_exceeded") => GeneratorError::PayloadTooLarge(body),
        _ => GeneratorError::Api { status, body },
    }
}
