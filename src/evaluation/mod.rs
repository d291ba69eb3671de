//! Income evaluation through a schema-constrained model call.
//!
//! The model receives a system message, a prompt embedding the payroll and
//! borrower records, and a single `underwrite_income` tool whose parameters
//! are the [`IncomeDecision`](crate::models::IncomeDecision) fields. Its tool
//! call arguments become the decision. When no credential is configured, or
//! anything about the call fails, a fixed fallback decision is returned.

mod client;
mod evaluator;
mod prompt;
mod schema;

pub use client::{
    first_tool_invocation, ModelClient, OpenAiClient, ToolCallRequest, ToolInvocation,
    TOOL_CHOICE_AUTO,
};
pub use evaluator::{DecisionSource, EvaluationOutcome, IncomeEvaluator};
pub use prompt::{build_messages, render_user_prompt, ChatMessage, Role, SYSTEM_PROMPT};
pub use schema::{underwrite_income_tool, ToolDefinition, TOOL_DESCRIPTION, TOOL_NAME};
