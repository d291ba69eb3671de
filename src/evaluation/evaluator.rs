//! The income evaluator.
//!
//! Wraps one remote model call and guarantees a complete [`IncomeDecision`]
//! on every path.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::ModelSettings;
use crate::error::{UnderwritingError, UnderwritingResult};
use crate::models::{BorrowerFact, IncomeDecision, PayrollFact};

use super::client::{ModelClient, OpenAiClient, ToolCallRequest};
use super::prompt::build_messages;
use super::schema::underwrite_income_tool;

/// Where an [`IncomeDecision`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Decoded from the model's tool call.
    Model,
    /// Substituted because the model could not be consulted or failed.
    Fallback,
}

/// A decision together with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationOutcome {
    /// The decision returned to the caller.
    pub decision: IncomeDecision,
    /// Whether the model or a fallback produced it.
    pub source: DecisionSource,
}

impl EvaluationOutcome {
    /// Returns true if the decision is a fallback.
    pub fn is_fallback(&self) -> bool {
        self.source == DecisionSource::Fallback
    }
}

enum Backend {
    /// No credential was available when the evaluator was built.
    Unconfigured { credential_env: String },
    Ready(Arc<dyn ModelClient>),
}

/// Produces qualifying income decisions from payroll and borrower facts.
///
/// An evaluator built without a credential stays unconfigured for its whole
/// lifetime: every call returns the missing-credential fallback without
/// touching the network. A configured evaluator makes exactly one model call
/// per evaluation, with no retries.
///
/// # Example
///
/// ```
/// use paystub_underwriter::evaluation::IncomeEvaluator;
/// use paystub_underwriter::models::{BorrowerFact, PayrollFact};
///
/// # #[tokio::main]
/// # async fn main() {
/// let evaluator = IncomeEvaluator::unconfigured("OPENAI_API_KEY");
/// let decision = evaluator
///     .evaluate(&PayrollFact::default(), &BorrowerFact::new())
///     .await;
///
/// assert_eq!(decision.qualifying_income_monthly.to_string(), "0");
/// assert_eq!(decision.action_items.len(), 1);
/// # }
/// ```
pub struct IncomeEvaluator {
    backend: Backend,
    max_output_tokens: u32,
}

impl IncomeEvaluator {
    /// Builds an evaluator from model settings.
    ///
    /// With an API key present this creates an [`OpenAiClient`]; without one
    /// the evaluator is unconfigured.
    pub fn from_settings(settings: &ModelSettings) -> UnderwritingResult<Self> {
        match &settings.api_key {
            Some(api_key) => {
                let client = OpenAiClient::new(settings, api_key.clone())?;
                Ok(Self::with_client(Arc::new(client), settings.max_output_tokens))
            }
            None => {
                warn!(
                    credential_env = %settings.credential_env,
                    "Model credential not set; income evaluation will return fallback decisions"
                );
                Ok(Self::unconfigured(&settings.credential_env))
            }
        }
    }

    /// Builds an evaluator that always reports the missing credential.
    pub fn unconfigured(credential_env: &str) -> Self {
        Self {
            backend: Backend::Unconfigured {
                credential_env: credential_env.to_string(),
            },
            max_output_tokens: crate::config::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Builds an evaluator around an existing model client.
    pub fn with_client(client: Arc<dyn ModelClient>, max_output_tokens: u32) -> Self {
        Self {
            backend: Backend::Ready(client),
            max_output_tokens,
        }
    }

    /// Returns true if a model client is available.
    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Evaluates qualifying income. Never fails.
    ///
    /// Any error from [`try_evaluate`](Self::try_evaluate) is converted into
    /// a fallback decision: zero income, `Salaried`, a single action item
    /// describing the failure and no citations.
    pub async fn evaluate(&self, payroll: &PayrollFact, borrower: &BorrowerFact) -> IncomeDecision {
        self.evaluate_outcome(payroll, borrower).await.decision
    }

    /// Like [`evaluate`](Self::evaluate), also reporting whether the decision
    /// is a fallback.
    pub async fn evaluate_outcome(
        &self,
        payroll: &PayrollFact,
        borrower: &BorrowerFact,
    ) -> EvaluationOutcome {
        let decision = match self.try_evaluate(payroll, borrower).await {
            Ok(decision) => {
                return EvaluationOutcome {
                    decision,
                    source: DecisionSource::Model,
                };
            }
            Err(UnderwritingError::MissingCredential { variable }) => {
                IncomeDecision::missing_credential(&variable)
            }
            Err(error) => {
                warn!(error = %error, "Income evaluation failed; returning fallback decision");
                IncomeDecision::review_manually(&error)
            }
        };

        EvaluationOutcome {
            decision,
            source: DecisionSource::Fallback,
        }
    }

    /// Evaluates qualifying income, surfacing the failure instead of a fallback.
    ///
    /// The decision is the model's tool call arguments decoded as-is.
    pub async fn try_evaluate(
        &self,
        payroll: &PayrollFact,
        borrower: &BorrowerFact,
    ) -> UnderwritingResult<IncomeDecision> {
        let client = match &self.backend {
            Backend::Ready(client) => client,
            Backend::Unconfigured { credential_env } => {
                return Err(UnderwritingError::MissingCredential {
                    variable: credential_env.clone(),
                });
            }
        };

        let request = ToolCallRequest {
            messages: build_messages(payroll, borrower)?,
            tool: underwrite_income_tool(),
            max_output_tokens: self.max_output_tokens,
        };

        let start_time = Instant::now();
        let invocation = client.submit(&request).await?;

        let decision: IncomeDecision = serde_json::from_str(&invocation.arguments).map_err(|e| {
            UnderwritingError::InvalidDecision {
                message: e.to_string(),
            }
        })?;

        info!(
            model = client.model_name(),
            tool = %invocation.name,
            qualifying_income_monthly = %decision.qualifying_income_monthly,
            action_items = decision.action_items.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Income decision received"
        );

        Ok(decision)
    }
}
