use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
use serde_json::Value;

use super::{ApiError, Completion, CompletionParams, InferError, Message};
use crate::config::{Config, TransportChoice};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u16,
}

impl RecordedCall {
    pub fn prompt(&self) -> String {
        self.messages
            .iter()
            .map(|message| &*message.content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Records every call and answers with a canned reply or a canned failure.
pub(crate) struct MockCompletion {
    reply: Option<Box<str>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockCompletion {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Some(reply.into()), calls: Mutex::default() }
    }

    pub fn failing() -> Self {
        Self { reply: None, calls: Mutex::default() }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Completion for MockCompletion {
    async fn complete(
        &self,
        messages: &[Message],
        params: &CompletionParams<'_>,
    ) -> Result<Box<str>, InferError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            model: params.model.to_owned(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        });
        match &self.reply {
            Some(reply) => Ok(reply.trim().into()),
            None => Err(ApiError::ErrorResponse {
                status: 503,
                message: "The server is overloaded or not ready yet.".into(),
            }
            .into()),
        }
    }
}

/// Authorization header and JSON body of each request the stub received.
pub(crate) type Recorded = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// Serves `/v1/chat/completions` on a free local port with a fixed reply.
pub(crate) async fn spawn_stub(status: StatusCode, body: &'static str) -> (Config, Recorded) {
    let recorded: Recorded = Arc::default();
    let sink = recorded.clone();
    let router = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let sink = sink.clone();
            async move {
                let auth = headers
                    .get(http::header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);
                sink.lock().unwrap().push((auth, request));
                (status, [(http::header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (stub_config(format!("http://{addr}")), recorded)
}

pub(crate) fn stub_config(infer_url: String) -> Config {
    Config {
        api_token: "sk-test".into(),
        infer_url: infer_url.into(),
        model: "gpt-3.5-turbo".into(),
        timeout: Duration::from_secs(5),
        transport: TransportChoice::Http,
        port: 0,
        debug: false,
    }
}
