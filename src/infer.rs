use std::future::Future;

use crate::config::{Config, TransportChoice};

mod error;
pub use error::InferError;
pub mod openai;
pub use openai::ApiError;
#[cfg(feature = "openai-lib")]
pub mod library;
mod parsing;
pub use parsing::{FromLlmReply, PlainText, YesNoReply};

#[cfg(test)]
pub(crate) mod mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_role_str(self) -> &'static str {
        match self {
            Self::System => openai::ROLE_SYSTEM,
            Self::User => openai::ROLE_USER,
            Self::Assistant => openai::ROLE_ASSISTANT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: Box<str>,
}

impl Message {
    pub fn system(content: impl Into<Box<str>>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<Box<str>>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<Box<str>>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CompletionParams<'a> {
    pub model: &'a str,
    pub temperature: f32,
    pub max_tokens: u16,
}

/// One chat-completion round trip: the messages go out in order and the
/// trimmed text of the first returned choice comes back. A single attempt,
/// no retries.
pub trait Completion: Send + Sync {
    fn complete(
        &self,
        messages: &[Message],
        params: &CompletionParams<'_>,
    ) -> impl Future<Output = Result<Box<str>, InferError>> + Send;
}

/// The completion transport picked at startup.
pub enum Transport {
    Http(openai::HttpClient),
    #[cfg(feature = "openai-lib")]
    Library(library::LibraryClient),
}

impl Transport {
    pub fn select(config: &Config) -> Result<Self, InferError> {
        match config.transport {
            TransportChoice::Http => Ok(Self::Http(openai::HttpClient::new(config)?)),
            #[cfg(feature = "openai-lib")]
            TransportChoice::Auto | TransportChoice::Library => {
                Ok(Self::Library(library::LibraryClient::new(config)))
            }
            #[cfg(not(feature = "openai-lib"))]
            TransportChoice::Auto => Ok(Self::Http(openai::HttpClient::new(config)?)),
            #[cfg(not(feature = "openai-lib"))]
            TransportChoice::Library => Err(crate::config::ConfigError::LibraryUnavailable.into()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            #[cfg(feature = "openai-lib")]
            Self::Library(_) => "library",
        }
    }
}

impl Completion for Transport {
    async fn complete(
        &self,
        messages: &[Message],
        params: &CompletionParams<'_>,
    ) -> Result<Box<str>, InferError> {
        match self {
            Self::Http(client) => client.complete(messages, params).await,
            #[cfg(feature = "openai-lib")]
            Self::Library(client) => client.complete(messages, params).await,
        }
    }
}

/// A completion transport bound to the configured model.
pub struct Client<C = Transport> {
    completion: C,
    model: Box<str>,
}

impl<C: Completion> Client<C> {
    pub fn new(completion: C, model: impl Into<Box<str>>) -> Self {
        Self { completion, model: model.into() }
    }

    pub fn completion(&self) -> &C {
        &self.completion
    }

    pub async fn infer<T: FromLlmReply>(
        &self,
        messages: &[Message],
        temperature: f32,
        max_tokens: u16,
    ) -> Result<T, InferError> {
        let params = CompletionParams { model: &self.model, temperature, max_tokens };
        tracing::debug!(
            model = params.model,
            temperature,
            max_tokens,
            messages = messages.len(),
            "Requesting completion"
        );
        let reply = self.completion.complete(messages, &params).await?;
        Ok(T::from_reply(&reply))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::infer::mock::MockCompletion;

    fn config(transport: TransportChoice) -> Config {
        Config {
            api_token: "sk-test".into(),
            infer_url: "http://127.0.0.1:9".into(),
            model: "test-model".into(),
            timeout: Duration::from_secs(1),
            transport,
            port: 0,
            debug: false,
        }
    }

    #[test]
    fn maps_roles_to_wire_names() {
        assert_eq!(MessageRole::System.as_role_str(), "system");
        assert_eq!(MessageRole::User.as_role_str(), "user");
        assert_eq!(MessageRole::Assistant.as_role_str(), "assistant");
    }

    #[test]
    fn explicit_http_choice_selects_http() {
        let transport = Transport::select(&config(TransportChoice::Http)).unwrap();
        assert_eq!(transport.name(), "http");
    }

    #[cfg(not(feature = "openai-lib"))]
    #[test]
    fn auto_falls_back_to_http_without_library() {
        use crate::config::ConfigError;

        let transport = Transport::select(&config(TransportChoice::Auto)).unwrap();
        assert_eq!(transport.name(), "http");
        assert!(matches!(
            Transport::select(&config(TransportChoice::Library)),
            Err(InferError::Config(ConfigError::LibraryUnavailable))
        ));
    }

    #[cfg(feature = "openai-lib")]
    #[test]
    fn auto_prefers_library_when_available() {
        let transport = Transport::select(&config(TransportChoice::Auto)).unwrap();
        assert_eq!(transport.name(), "library");
    }

    #[tokio::test]
    async fn client_passes_model_and_sampling_through() {
        let client = Client::new(MockCompletion::replying("  hello  "), "test-model");
        let reply: PlainText = client
            .infer(&[Message::system("sys"), Message::user("hi")], 0.5, 42)
            .await
            .unwrap();
        assert_eq!(&*reply.get(), "hello");

        let calls = client.completion().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "test-model");
        assert_eq!(calls[0].temperature, 0.5);
        assert_eq!(calls[0].max_tokens, 42);
        assert_eq!(calls[0].messages, vec![Message::system("sys"), Message::user("hi")]);
    }
}
