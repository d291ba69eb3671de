//! The `underwrite_income` tool declaration.
//!
//! The model is never asked for free text. It must answer by calling this one
//! function, whose parameters mirror [`IncomeDecision`] field for field.
//!
//! [`IncomeDecision`]: crate::models::IncomeDecision

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::IncomeType;

/// Name of the function the model must call.
pub const TOOL_NAME: &str = "underwrite_income";

/// Description attached to the tool declaration.
pub const TOOL_DESCRIPTION: &str = "Calculates qualifying income and action items for salaried income based on Fannie Mae rules.";

/// A function tool offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Function name.
    pub name: String,
    /// What the function does, in the model's terms.
    pub description: String,
    /// JSON Schema of the function arguments.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Wraps the definition in the chat-completions `tools` entry shape.
    pub fn to_openai_tool(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// Builds the `underwrite_income` tool declaration.
///
/// `qualifying_income_monthly`, `income_type` and `action_items` are required;
/// `guideline_citations` is optional.
///
/// # Example
///
/// ```
/// use paystub_underwriter::evaluation::{underwrite_income_tool, TOOL_NAME};
///
/// let tool = underwrite_income_tool();
/// assert_eq!(tool.name, TOOL_NAME);
/// assert_eq!(tool.parameters["properties"]["income_type"]["enum"][0], "Salaried");
/// ```
pub fn underwrite_income_tool() -> ToolDefinition {
    let income_types: Vec<&str> = IncomeType::ALL.iter().map(IncomeType::as_str).collect();

    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: TOOL_DESCRIPTION.to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "qualifying_income_monthly": {
                    "type": "number",
                    "description": "Calculated monthly qualifying income"
                },
                "income_type": {
                    "type": "string",
                    "enum": income_types
                },
                "action_items": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Items underwriter should follow up on"
                },
                "guideline_citations": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Relevant Fannie Mae guideline references"
                }
            },
            "required": ["qualifying_income_monthly", "income_type", "action_items"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let tool = underwrite_income_tool();
        assert_eq!(
            tool.parameters["required"],
            json!(["qualifying_income_monthly", "income_type", "action_items"])
        );
    }

    #[test]
    fn test_properties_match_decision_fields() {
        let tool = underwrite_income_tool();
        let properties = tool.parameters["properties"].as_object().unwrap();
        let mut names: Vec<&str> = properties.keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "action_items",
                "guideline_citations",
                "income_type",
                "qualifying_income_monthly"
            ]
        );
    }

    #[test]
    fn test_income_type_enum_is_salaried_only() {
        let tool = underwrite_income_tool();
        assert_eq!(
            tool.parameters["properties"]["income_type"]["enum"],
            json!(["Salaried"])
        );
    }

    #[test]
    fn test_openai_tool_shape() {
        let wrapped = underwrite_income_tool().to_openai_tool();
        assert_eq!(wrapped["type"], "function");
        assert_eq!(wrapped["function"]["name"], "underwrite_income");
        assert_eq!(wrapped["function"]["parameters"]["type"], "object");
    }
}
