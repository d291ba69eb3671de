//! Configuration loading and management for the paystub underwriter.
//!
//! This module provides the layered settings (defaults, optional YAML file,
//! environment) for the remote model, the HTTP server and logging.
//!
//! # Example
//!
//! ```no_run
//! use paystub_underwriter::config::ConfigLoader;
//!
//! let config = ConfigLoader::load(None::<&str>).unwrap();
//! println!("Evaluating with model: {}", config.model.model);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, BASE_URL_ENV, HOST_ENV, LOG_LEVEL_ENV, MODEL_ENV, PORT_ENV};
pub use types::{
    ApiKey, ModelSettings, ServerSettings, TelemetrySettings, UnderwriterConfig, DEFAULT_BASE_URL,
    DEFAULT_CREDENTIAL_ENV, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
};
