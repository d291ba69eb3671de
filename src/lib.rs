//! Paystub underwriting: field extraction and qualifying income evaluation.
//!
//! A paystub's plain text is scanned line by line for gross pay, year-to-date
//! income, the pay period and the employer ([`extraction`]). Those facts and a
//! borrower record are then handed to a language model through a single
//! `underwrite_income` tool call, producing an income decision ([`evaluation`]).
//! Evaluation never fails: without a credential, or when the model call goes
//! wrong, a zero-income decision with one explanatory action item is returned.
//!
//! ```
//! use paystub_underwriter::extraction::extract_payroll_facts;
//!
//! let fact = extract_payroll_facts("Employer: Acme Corp\nGross Pay: $2,000.00");
//! assert_eq!(fact.employer_name.as_deref(), Some("Acme Corp"));
//! assert_eq!(fact.pay_frequency, "Biweekly");
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod extraction;
pub mod models;
pub mod pipeline;
pub mod telemetry;
