//! Prompt construction for income evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{UnderwritingError, UnderwritingResult};
use crate::models::{BorrowerFact, PayrollFact};

/// System message sent with every evaluation.
pub const SYSTEM_PROMPT: &str = "You are a mortgage underwriting assistant.";

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation.
    System,
    /// The request itself.
    User,
}

/// One role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Builds the user prompt embedding both fact records as pretty-printed JSON.
pub fn render_user_prompt(
    payroll: &PayrollFact,
    borrower: &BorrowerFact,
) -> UnderwritingResult<String> {
    let payroll_json = to_pretty_json(payroll)?;
    let borrower_json = to_pretty_json(borrower)?;

    Ok(format!(
        "You are an expert mortgage underwriting assistant following Fannie Mae guidelines.\n\
         \n\
         Use the following extracted paystub data and borrower application data to determine the qualifying monthly income.\n\
         \n\
         Paystub Data:\n\
         {payroll_json}\n\
         \n\
         Borrower Info:\n\
         {borrower_json}\n\
         \n\
         Respond with:\n\
         - Monthly qualifying income\n\
         - Income type (Salaried)\n\
         - Action items (e.g., missing docs, clarification needs)\n\
         - Guideline references (e.g., B3-3.1-05)\n"
    ))
}

/// Builds the system and user messages for one evaluation.
pub fn build_messages(
    payroll: &PayrollFact,
    borrower: &BorrowerFact,
) -> UnderwritingResult<Vec<ChatMessage>> {
    Ok(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(render_user_prompt(payroll, borrower)?),
    ])
}

fn to_pretty_json<T: Serialize>(value: &T) -> UnderwritingResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| UnderwritingError::PromptEncoding {
        message: e.to_string(),
    })
}
