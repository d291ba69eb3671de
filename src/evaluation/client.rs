//! Remote model capability and its OpenAI-compatible implementation.
//!
//! The evaluator only sees [`ModelClient`]: submit one tool-constrained request,
//! get back one tool invocation or an error. Tests substitute their own
//! implementations so no network is needed.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::{ApiKey, ModelSettings};
use crate::error::{UnderwritingError, UnderwritingResult};

use super::prompt::ChatMessage;
use super::schema::ToolDefinition;

/// Tool choice sent with every request; the model decides whether to call.
pub const TOOL_CHOICE_AUTO: &str = "auto";

/// A single tool-constrained chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    /// Role-tagged conversation.
    pub messages: Vec<ChatMessage>,
    /// The one tool offered to the model.
    pub tool: ToolDefinition,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

/// A structured function call returned by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Name of the function the model called.
    pub name: String,
    /// JSON-encoded arguments, exactly as the model produced them.
    pub arguments: String,
}

/// Capability to submit a tool-constrained request to a language model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Submits the request and returns the first tool invocation in the answer.
    async fn submit(&self, request: &ToolCallRequest) -> UnderwritingResult<ToolInvocation>;

    /// Name of the model behind this client, for logging.
    fn model_name(&self) -> &str;
}

/// Client for OpenAI-compatible `chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: ApiKey,
}

impl OpenAiClient {
    /// Creates a client for the configured endpoint.
    ///
    /// The underlying HTTP client is built once here and reused by every call.
    pub fn new(settings: &ModelSettings, api_key: ApiKey) -> UnderwritingResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            url: settings.chat_completions_url(),
            model: settings.model.clone(),
            api_key,
        })
    }

    fn request_body(&self, request: &ToolCallRequest) -> Value {
        json!({
            "model": self.model,
            "messages": request.messages,
            "tools": [request.tool.to_openai_tool()],
            "tool_choice": TOOL_CHOICE_AUTO,
            "max_tokens": request.max_output_tokens,
        })
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn submit(&self, request: &ToolCallRequest) -> UnderwritingResult<ToolInvocation> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(self.api_key.expose())
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UnderwritingError::ModelStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Model response received");
        first_tool_invocation(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

/// Pulls the first tool invocation out of a chat-completions response body.
///
/// # Example
///
/// ```
/// use paystub_underwriter::evaluation::first_tool_invocation;
///
/// let body = r#"{"choices": [{"message": {"tool_calls": [
///     {"id": "call_1", "type": "function",
///      "function": {"name": "underwrite_income", "arguments": "{}"}}
/// ]}}]}"#;
///
/// let invocation = first_tool_invocation(body).unwrap();
/// assert_eq!(invocation.name, "underwrite_income");
/// assert_eq!(invocation.arguments, "{}");
/// ```
pub fn first_tool_invocation(body: &str) -> UnderwritingResult<ToolInvocation> {
    let completion: ChatCompletion =
        serde_json::from_str(body).map_err(|e| UnderwritingError::MalformedResponse {
            message: e.to_string(),
        })?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| UnderwritingError::MalformedResponse {
            message: "response has no choices".to_string(),
        })?;

    let call = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(UnderwritingError::MissingToolCall)?;

    Ok(ToolInvocation {
        name: call.function.name,
        arguments: call.function.arguments,
    })
}
