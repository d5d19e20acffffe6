use thiserror::Error;

use crate::config::ConfigError;
use crate::infer::openai::ApiError;

#[derive(Error, Debug)]
pub enum InferError {
    #[error("LLM API error: {0}")]
    ApiError(#[from] ApiError),

    #[error("Invalid transport configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for InferError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::from(err).into()
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::from(err).into()
    }
}
