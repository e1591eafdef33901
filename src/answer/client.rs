//! Chat-model collaborator.
//!
//! The selector only supplies the context; everything about talking to the
//! hosted model lives behind [`Generator`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::prompt::{build_messages, ChatMessage};
use crate::config::LlmConfig;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Insufficient quota: {0}")]
    QuotaExceeded(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerateError {
    /// Momentary rate limits are worth retrying; an exhausted quota is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }

    /// Map a non-success HTTP reply onto the error taxonomy.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = error_message(body);

        if status == StatusCode::TOO_MANY_REQUESTS {
            if is_quota_error(body) {
                return Self::QuotaExceeded(message);
            }
            return Self::RateLimited(message);
        }

        Self::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn is_quota_error(body: &str) -> bool {
    body.to_lowercase().contains("quota")
}

// `{"error": {"message": ...}}` when the body has that shape, the raw body
// otherwise.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// A hosted language model answering one question from one context.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        context: &str,
        question: &str,
    ) -> Result<String, GenerateError>;
}

/// OpenAI chat-completions client.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiChatClient {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, GenerateError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerateError::MissingApiKey);
        }

        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generator for OpenAiChatClient {
    async fn generate(
        &self,
        system_prompt: &str,
        context: &str,
        question: &str,
    ) -> Result<String, GenerateError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: build_messages(system_prompt, context, question),
        };

        debug!(model = %self.model, context_chars = context.chars().count(), "Calling chat model");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::from_status(status, &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerateError::InvalidResponse("no message content in reply".to_string()))
    }
}
