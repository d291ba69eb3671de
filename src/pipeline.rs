//! The extract-then-evaluate pipeline.
//!
//! This is the entry point transport layers call: document text and a
//! borrower record in, an [`IncomeDecision`](crate::models::IncomeDecision) out, wrapped in an
//! [`EvaluationOutcome`] that says whether it is a fallback. The pipeline holds no
//! per-request state, so one instance can serve concurrent requests.

use tracing::{debug, info};

use crate::config::UnderwriterConfig;
use crate::error::UnderwritingResult;
use crate::evaluation::{EvaluationOutcome, IncomeEvaluator};
use crate::extraction::{extract_from_documents, extract_payroll_facts};
use crate::models::{BorrowerFact, PayrollFact};

/// Composes the field extractor and the income evaluator.
pub struct UnderwritingPipeline {
    evaluator: IncomeEvaluator,
}

impl UnderwritingPipeline {
    /// Creates a pipeline around an evaluator.
    pub fn new(evaluator: IncomeEvaluator) -> Self {
        Self { evaluator }
    }

    /// Creates a pipeline from loaded configuration.
    pub fn from_config(config: &UnderwriterConfig) -> UnderwritingResult<Self> {
        Ok(Self::new(IncomeEvaluator::from_settings(&config.model)?))
    }

    /// Returns the evaluator used for the judgment step.
    pub fn evaluator(&self) -> &IncomeEvaluator {
        &self.evaluator
    }

    /// Runs the field extractor alone.
    pub fn extract(&self, document_text: &str) -> PayrollFact {
        extract_payroll_facts(document_text)
    }

    /// Extracts payroll facts from the document and evaluates qualifying income.
    pub async fn underwrite(
        &self,
        document_text: &str,
        borrower: &BorrowerFact,
    ) -> EvaluationOutcome {
        let payroll = extract_payroll_facts(document_text);
        self.evaluate(&payroll, borrower).await
    }

    /// Like [`underwrite`](Self::underwrite) for a borrower with several documents.
    pub async fn underwrite_documents<S: AsRef<str>>(
        &self,
        documents: &[S],
        borrower: &BorrowerFact,
    ) -> EvaluationOutcome {
        let payroll = extract_from_documents(documents);
        self.evaluate(&payroll, borrower).await
    }

    async fn evaluate(&self, payroll: &PayrollFact, borrower: &BorrowerFact) -> EvaluationOutcome {
        debug!(
            populated_fields = payroll.populated_field_count(),
            gross_found = payroll.gross_pay_per_period.is_some(),
            ytd_found = payroll.ytd_income.is_some(),
            period_found = payroll.has_pay_period(),
            "Payroll facts extracted"
        );

        let outcome = self.evaluator.evaluate_outcome(payroll, borrower).await;

        info!(
            fallback = outcome.is_fallback(),
            qualifying_income_monthly = %outcome.decision.qualifying_income_monthly,
            "Underwriting completed"
        );
        outcome
    }
}
