use std::env::{self, VarError};
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_INFER_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("INFER_TRANSPORT=library requires the `openai-lib` feature")]
    LibraryUnavailable,
}

/// Which completion transport to use. `Auto` picks the library client when
/// it was compiled in and the plain HTTP client otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportChoice {
    #[default]
    Auto,
    Http,
    Library,
}

/// Settings loaded once at startup. Nothing mutates it afterwards.
#[derive(Clone)]
pub struct Config {
    pub api_token: Box<str>,
    pub infer_url: Box<str>,
    pub model: Box<str>,
    pub timeout: Duration,
    pub transport: TransportChoice,
    pub port: u16,
    pub debug: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("infer_url", &self.infer_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name))
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
    {
        let var = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name) {
                Ok(value) if value.trim().is_empty() => Ok(None),
                Ok(value) => Ok(Some(value.trim().to_owned())),
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(value)) => Err(ConfigError::Invalid {
                    name,
                    value: value.to_string_lossy().into_owned(),
                }),
            }
        };

        let api_token = var("OPENAI_TOKEN")?.ok_or(ConfigError::Missing("OPENAI_TOKEN"))?;

        let infer_url = var("INFER_URL")?
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_INFER_URL.to_owned());

        let model = var("DEFAULT_MODEL")?.unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        let timeout = match var("INFER_TIMEOUT_SECS")? {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::Invalid { name: "INFER_TIMEOUT_SECS", value }),
            },
            None => DEFAULT_TIMEOUT,
        };

        let transport = match var("INFER_TRANSPORT")? {
            Some(value) => match value.to_lowercase().as_str() {
                "auto" => TransportChoice::Auto,
                "http" => TransportChoice::Http,
                "library" => TransportChoice::Library,
                _ => return Err(ConfigError::Invalid { name: "INFER_TRANSPORT", value }),
            },
            None => TransportChoice::Auto,
        };

        let port = match var("PORT")? {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let debug = match var("DEBUG")? {
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(ConfigError::Invalid { name: "DEBUG", value }),
            },
            None => false,
        };

        Ok(Self {
            api_token: api_token.into(),
            infer_url: infer_url.into(),
            model: model.into(),
            timeout,
            transport,
            port,
            debug,
        })
    }
}
