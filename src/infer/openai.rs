use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Completion, CompletionParams, InferError, Message};
use crate::config::Config;

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Response parsing failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Error response from API ({status}): {message}")]
    ErrorResponse { status: u16, message: String },

    #[error("Response contained no completion text")]
    EmptyResponse,

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[cfg(feature = "openai-lib")]
    #[error("OpenAI client error: {0}")]
    Library(#[from] async_openai::error::OpenAIError),
}

#[derive(Debug, Serialize)]
pub struct OpenAIRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<OpenAIMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u16,
}

#[derive(Debug, Serialize)]
pub struct OpenAIMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for OpenAIMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role.as_role_str(),
            content: &message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

/// Talks to `<INFER_URL>/v1/chat/completions` directly with a bearer token.
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: Box<str>,
    api_token: Box<str>,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/v1/chat/completions", config.infer_url).into(),
            api_token: config.api_token.clone(),
        })
    }
}

impl Completion for HttpClient {
    async fn complete(
        &self,
        messages: &[Message],
        params: &CompletionParams<'_>,
    ) -> Result<Box<str>, InferError> {
        let openai_request = OpenAIRequest {
            model: params.model,
            messages: messages.iter().map(OpenAIMessage::from).collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&*self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&openai_request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<OpenAIErrorBody>(&response_text) {
                Ok(error_body) => error_body.error.message,
                Err(_) => response_text,
            };
            return Err(ApiError::ErrorResponse { status: status.as_u16(), message }.into());
        }

        let response: OpenAIResponse = serde_json::from_str(&response_text)?;
        first_choice_text(response.choices.into_iter().map(|choice| choice.message.content))
    }
}

/// Trimmed content of the first choice. A missing choice or missing content
/// is an error rather than an empty story.
pub(crate) fn first_choice_text<I>(contents: I) -> Result<Box<str>, InferError>
where
    I: IntoIterator<Item = Option<String>>,
{
    contents
        .into_iter()
        .next()
        .flatten()
        .map(|content| content.trim().into())
        .ok_or_else(|| ApiError::EmptyResponse.into())
}
