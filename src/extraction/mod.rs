//! Paystub field extraction.
//!
//! This module turns document text, already pulled from the PDF text layer by
//! an external tool, into a [`PayrollFact`](crate::models::PayrollFact). It is
//! a best-effort line scanner rather than a layout analyser: OCR output is
//! noisy, so anything that does not parse is left unset instead of failing.

mod amount;
mod employer;
mod period;
mod scanner;

pub use amount::{parse_trailing_amount, CURRENCY_MARKER};
pub use employer::parse_employer_name;
pub use period::{
    fill_pay_period, parse_period_dates, DATE_FORMAT, DATE_SEPARATOR, RANGE_SEPARATOR,
};
pub use scanner::{
    extract_from_documents, extract_payroll_facts, EMPLOYER_KEYWORD, GROSS_KEYWORD,
    PERIOD_KEYWORD, YTD_KEYWORD,
};
