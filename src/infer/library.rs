use std::time::Duration;

use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};

use super::openai::{ApiError, first_choice_text};
use super::{Completion, CompletionParams, InferError, Message, MessageRole};
use crate::config::Config;

/// Goes through the `async-openai` client. Same endpoint, token and
/// request shape as [`super::openai::HttpClient`].
pub struct LibraryClient {
    client: Client<OpenAIConfig>,
    timeout: Duration,
}

impl LibraryClient {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_token.to_string())
            .with_api_base(format!("{}/v1", config.infer_url));
        // The library retries rate-limited calls by default; one attempt only.
        let no_retries = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Self {
            client: Client::with_config(openai_config).with_backoff(no_retries),
            timeout: config.timeout,
        }
    }
}

fn to_library_message(message: &Message) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    let content = message.content.to_string();
    Ok(match message.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    })
}

impl Completion for LibraryClient {
    async fn complete(
        &self,
        messages: &[Message],
        params: &CompletionParams<'_>,
    ) -> Result<Box<str>, InferError> {
        let messages = messages
            .iter()
            .map(to_library_message)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::from)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(params.model)
            .messages(messages)
            .temperature(params.temperature)
            .max_tokens(params.max_tokens)
            .build()
            .map_err(ApiError::from)?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| ApiError::Timeout(self.timeout))?
            .map_err(ApiError::from)?;

        first_choice_text(response.choices.into_iter().map(|choice| choice.message.content))
    }
}
