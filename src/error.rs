//! Error types for the paystub underwriter.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Extraction has no error channel at all; evaluation errors never escape the
//! evaluator and are folded into a fallback [`IncomeDecision`] whose single
//! action item carries the error's display text.
//!
//! [`IncomeDecision`]: crate::models::IncomeDecision

use thiserror::Error;

/// The main error type for the paystub underwriter.
///
/// # Example
///
/// ```
/// use paystub_underwriter::error::UnderwritingError;
///
/// let error = UnderwritingError::MissingCredential {
///     variable: "OPENAI_API_KEY".to_string(),
/// };
/// assert_eq!(error.to_string(), "OPENAI_API_KEY not set");
/// ```
#[derive(Debug, Error)]
pub enum UnderwritingError {
    /// No credential for the remote model was available at startup.
    #[error("{variable} not set")]
    MissingCredential {
        /// The environment variable expected to hold the credential.
        variable: String,
    },

    /// The request to the model API could not be completed.
    #[error("Model request failed: {message}")]
    ModelTransport {
        /// A description of the transport failure.
        message: String,
    },

    /// The model API answered with a non-success status.
    #[error("Model API returned status {status}: {message}")]
    ModelStatus {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        message: String,
    },

    /// The model API response body did not have the expected shape.
    #[error("Malformed model response: {message}")]
    MalformedResponse {
        /// A description of what was wrong with the body.
        message: String,
    },

    /// The fact records could not be rendered into the prompt.
    #[error("Failed to encode prompt: {message}")]
    PromptEncoding {
        /// The serialization error.
        message: String,
    },

    /// The model answered without invoking any tool.
    #[error("Model response contained no tool call")]
    MissingToolCall,

    /// The tool call arguments could not be decoded as an income decision.
    #[error("Invalid tool call arguments: {message}")]
    InvalidDecision {
        /// The decode error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was present but unusable.
    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting {
        /// The setting or environment variable name.
        key: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The borrower record was not a JSON object.
    #[error("Invalid borrower record: {message}")]
    InvalidBorrower {
        /// A description of the problem.
        message: String,
    },

    /// A document or borrower file could not be read.
    #[error("Failed to read '{path}': {message}")]
    DocumentRead {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// The HTTP server could not bind or stopped with an error.
    #[error("Server error: {message}")]
    Server {
        /// The underlying I/O error.
        message: String,
    },

    /// A result could not be written to the output stream.
    #[error("Failed to write output: {message}")]
    Output {
        /// The underlying error.
        message: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("Telemetry error: {message}")]
    Telemetry {
        /// A description of the failure.
        message: String,
    },
}

impl From<reqwest::Error> for UnderwritingError {
    fn from(error: reqwest::Error) -> Self {
        UnderwritingError::ModelTransport {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return UnderwritingError.
pub type UnderwritingResult<T> = Result<T, UnderwritingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_displays_variable() {
        let error = UnderwritingError::MissingCredential {
            variable: "OPENAI_API_KEY".to_string(),
        };
        assert_eq!(error.to_string(), "OPENAI_API_KEY not set");
    }

    #[test]
    fn test_model_status_displays_status_and_body() {
        let error = UnderwritingError::ModelStatus {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Model API returned status 429: rate limited"
        );
    }

    #[test]
    fn test_missing_tool_call_display() {
        assert_eq!(
            UnderwritingError::MissingToolCall.to_string(),
            "Model response contained no tool call"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = UnderwritingError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_setting_displays_key_and_message() {
        let error = UnderwritingError::InvalidSetting {
            key: "UNDERWRITER_PORT".to_string(),
            message: "must be a valid u16".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid setting 'UNDERWRITER_PORT': must be a valid u16"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync>() {}
        assert_error::<UnderwritingError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_tool_call() -> UnderwritingResult<()> {
            Err(UnderwritingError::MissingToolCall)
        }

        fn propagates_error() -> UnderwritingResult<()> {
            returns_missing_tool_call()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
