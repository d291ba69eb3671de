//! Core data models for the paystub underwriter.
//!
//! This module contains the three request-scoped records that flow through the
//! pipeline: payroll facts scanned from the document, the borrower record
//! supplied by the caller, and the income decision produced by the evaluator.

mod borrower_fact;
mod income_decision;
mod payroll_fact;

pub use borrower_fact::BorrowerFact;
pub use income_decision::{IncomeDecision, IncomeType};
pub use payroll_fact::{PayrollFact, DEFAULT_PAY_FREQUENCY, RAW_TEXT_EXCERPT_LIMIT};
