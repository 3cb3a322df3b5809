//! Text-generation client abstraction and its OpenAI-compatible implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::{ApiKey, OpenAiSettings},
    data,
    error::{ServiceError, ServiceResult},
};

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Anything that can turn a chat request into text.
///
/// The credential is passed per call so that implementations never read it
/// from ambient state.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, key: &ApiKey, messages: &[ChatMessage]) -> ServiceResult<String>;
}

/// Client for `POST {base}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(settings: &OpenAiSettings) -> anyhow::Result<Self> {
        Ok(Self {
            client: data::http_client()?,
            endpoint: format!("{}/chat/completions", settings.base_url),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(skip_all, fields(messages = messages.len()))]
    async fn generate(&self, key: &ApiKey, messages: &[ChatMessage]) -> ServiceResult<String> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ServiceError::from_status(status.as_u16(), &text));
        }

        let completion: CompletionResponse =
            serde_json::from_str(&text).map_err(|err| ServiceError::Malformed(err.to_string()))?;
        debug!(model = %self.model, choices = completion.choices.len(), "received completion");
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ServiceError::EmptyCompletion)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
