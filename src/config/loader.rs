//! Configuration loading functionality.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables (after loading `.env` with `dotenvy`). The API key is
//! only ever taken from the environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::error::{UnderwritingError, UnderwritingResult};

use super::types::{ApiKey, UnderwriterConfig};

/// Overrides the chat model name.
pub const MODEL_ENV: &str = "UNDERWRITER_MODEL";
/// Overrides the API base URL.
pub const BASE_URL_ENV: &str = "UNDERWRITER_BASE_URL";
/// Overrides the server host.
pub const HOST_ENV: &str = "UNDERWRITER_HOST";
/// Overrides the server port.
pub const PORT_ENV: &str = "UNDERWRITER_PORT";
/// Overrides the default log filter.
pub const LOG_LEVEL_ENV: &str = "UNDERWRITER_LOG_LEVEL";

/// Loads the underwriter configuration.
///
/// # Example
///
/// ```no_run
/// use paystub_underwriter::config::ConfigLoader;
///
/// let config = ConfigLoader::load(Some("./config/underwriter.yaml"))?;
/// println!("Model: {}", config.model.model);
/// # Ok::<(), paystub_underwriter::error::UnderwritingError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from an optional YAML file and the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Returns
    ///
    /// Returns the configuration, or an error if:
    /// - The given file does not exist (`ConfigNotFound`)
    /// - The file is not valid YAML for [`UnderwriterConfig`] (`ConfigParseError`)
    /// - An environment override cannot be parsed (`InvalidSetting`)
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> UnderwritingResult<UnderwriterConfig> {
        dotenvy::dotenv().ok();
        Self::load_with(path, |key| env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the process environment.
    pub fn load_with<P, F>(path: Option<P>, lookup: F) -> UnderwritingResult<UnderwriterConfig>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_yaml(path.as_ref())?,
            None => UnderwriterConfig::default(),
        };

        Self::apply_env(&mut config, &lookup)?;
        Ok(config)
    }

    /// Loads and parses a YAML file.
    fn load_yaml(path: &Path) -> UnderwritingResult<UnderwriterConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| UnderwritingError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| UnderwritingError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn apply_env<F>(config: &mut UnderwriterConfig, lookup: &F) -> UnderwritingResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(MODEL_ENV) {
            config.model.model = model;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config.model.base_url = base_url;
        }
        if let Some(host) = lookup(HOST_ENV) {
            config.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| UnderwritingError::InvalidSetting {
                    key: PORT_ENV.to_string(),
                    message: format!("'{}' is not a valid port", port),
                })?;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            config.telemetry.log_level = level;
        }

        config.model.api_key = lookup(&config.model.credential_env).and_then(ApiKey::new);

        Ok(())
    }
}
