//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::TelemetrySettings;
use crate::error::{UnderwritingError, UnderwritingResult};

/// Installs the global fmt subscriber, writing to stderr so command output on
/// stdout stays machine-readable.
///
/// `RUST_LOG` wins when set; otherwise the configured log level is used as the
/// filter directive.
pub fn init(settings: &TelemetrySettings) -> UnderwritingResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&settings.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| UnderwritingError::Telemetry {
            message: e.to_string(),
        })
}

fn build_filter(directive: &str) -> UnderwritingResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| UnderwritingError::Telemetry {
        message: format!("invalid log level/filter '{}': {}", directive, e),
    })
}
