//! Income decision model.
//!
//! This module contains the [`IncomeDecision`] returned by the income evaluator,
//! together with the fallback constructors used when the model cannot be
//! consulted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::UnderwritingError;

/// Income classification reported by the model.
///
/// Only salaried income is underwritten today. Hourly, commission and
/// self-employed income would be added here and to the tool schema together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IncomeType {
    /// Fixed salary paid on a regular schedule.
    #[default]
    Salaried,
}

impl IncomeType {
    /// Every variant, in the order they appear in the tool schema.
    pub const ALL: [IncomeType; 1] = [IncomeType::Salaried];

    /// The wire name of this income type.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeType::Salaried => "Salaried",
        }
    }
}

impl std::fmt::Display for IncomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The qualifying income determination for one borrower.
///
/// This is the sole output contract of the pipeline: HTTP handlers and the CLI
/// serialize it as a flat JSON object.
///
/// # Example
///
/// ```
/// use paystub_underwriter::models::{IncomeDecision, IncomeType};
///
/// let decision: IncomeDecision = serde_json::from_str(r#"{
///     "qualifying_income_monthly": 5000,
///     "income_type": "Salaried",
///     "action_items": []
/// }"#).unwrap();
///
/// assert_eq!(decision.income_type, IncomeType::Salaried);
/// assert!(decision.guideline_citations.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDecision {
    /// Monthly income the lender may use to qualify the borrower.
    ///
    /// Held as the JSON number the model wrote, digit for digit; use
    /// [`qualifying_income`](Self::qualifying_income) for arithmetic.
    pub qualifying_income_monthly: Number,
    /// Classification of the income.
    pub income_type: IncomeType,
    /// Follow-ups for the underwriter.
    pub action_items: Vec<String>,
    /// Guideline references supporting the decision (e.g. "B3-3.1-05").
    #[serde(default)]
    pub guideline_citations: Vec<String>,
}

impl IncomeDecision {
    /// A zero-income decision carrying a single action item.
    pub fn fallback(action_item: impl Into<String>) -> Self {
        Self {
            qualifying_income_monthly: Number::from(0u32),
            income_type: IncomeType::Salaried,
            action_items: vec![action_item.into()],
            guideline_citations: Vec::new(),
        }
    }

    /// Fallback returned when no model credential is configured.
    ///
    /// ```
    /// use paystub_underwriter::models::IncomeDecision;
    ///
    /// let decision = IncomeDecision::missing_credential("OPENAI_API_KEY");
    /// assert_eq!(
    ///     decision.action_items,
    ///     vec!["Error: OPENAI_API_KEY not set. Please set the OPENAI_API_KEY environment variable."]
    /// );
    /// ```
    pub fn missing_credential(variable: &str) -> Self {
        let error = UnderwritingError::MissingCredential {
            variable: variable.to_string(),
        };
        Self::fallback(format!(
            "Error: {}. Please set the {} environment variable.",
            error, variable
        ))
    }

    /// Fallback returned when the model call or its decoding failed.
    pub fn review_manually(error: &UnderwritingError) -> Self {
        Self::fallback(format!("Error: {}. Please review manually.", error))
    }

    /// The monthly income as a `Decimal`.
    ///
    /// Returns `None` when the model's number does not fit a `Decimal`
    /// (for example `1e30`); the decision itself still carries it unchanged.
    pub fn qualifying_income(&self) -> Option<Decimal> {
        let text = self.qualifying_income_monthly.to_string();
        Decimal::from_str_exact(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }
}
