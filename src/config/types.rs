//! Configuration types for the paystub underwriter.
//!
//! This module contains the strongly-typed settings deserialized from the
//! optional YAML configuration file and overridden from the environment.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use crate::error::{UnderwritingError, UnderwritingResult};

/// Default chat model used for income evaluation.
pub const DEFAULT_MODEL: &str = "gpt-4-1106-preview";
/// Default base URL of the OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default cap on tokens the model may generate per evaluation.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
/// Default environment variable holding the model API key.
pub const DEFAULT_CREDENTIAL_ENV: &str = "OPENAI_API_KEY";

/// A secret API key. Its `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key, returning `None` for blank input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the key for use in an authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Settings for the remote model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Chat model name sent with each request.
    pub model: String,
    /// Base URL of the OpenAI-compatible API, without a trailing slash.
    pub base_url: String,
    /// Maximum tokens the model may generate.
    pub max_output_tokens: u32,
    /// Name of the environment variable holding the API key.
    pub credential_env: String,
    /// The API key. Only ever read from the environment.
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            credential_env: DEFAULT_CREDENTIAL_ENV.to_string(),
            api_key: None,
        }
    }
}

impl ModelSettings {
    /// URL of the chat completions endpoint.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host or IP address to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerSettings {
    /// Resolves the bind address. `localhost` maps to the IPv4 loopback.
    pub fn socket_addr(&self) -> UnderwritingResult<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| UnderwritingError::InvalidSetting {
                key: "server.host".to_string(),
                message: format!("'{}' is not an IPv4 or IPv6 address", self.host),
            })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// The complete underwriter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwriterConfig {
    /// Remote model settings.
    pub model: ModelSettings,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Logging settings.
    pub telemetry: TelemetrySettings,
}
