//! Line scanner that turns paystub text into a [`PayrollFact`].

use crate::models::{PayrollFact, RAW_TEXT_EXCERPT_LIMIT};

use super::amount::parse_trailing_amount;
use super::employer::parse_employer_name;
use super::period::{fill_pay_period, parse_period_dates};

/// Keyword marking a gross pay line.
pub const GROSS_KEYWORD: &str = "gross";
/// Keyword marking a year-to-date earnings line.
pub const YTD_KEYWORD: &str = "ytd";
/// Keyword marking a pay period line.
pub const PERIOD_KEYWORD: &str = "period";
/// Keyword marking an employer line.
pub const EMPLOYER_KEYWORD: &str = "employer";

/// Extracts payroll facts from paystub text.
///
/// The text is scanned line by line. Keywords are matched case-insensitively
/// and each field takes its value from the first line that yields one:
///
/// - gross pay: a line containing `gross` and `$`, see [`parse_trailing_amount`]
/// - year-to-date income: a line containing `ytd` and `$`
/// - pay period: a line containing `period` and `-`; dates fill start then
///   end, see [`parse_period_dates`]
/// - employer: a line containing `employer`, see [`parse_employer_name`]
///
/// `pay_frequency` is always the default, and `raw_text_excerpt` holds the
/// first [`RAW_TEXT_EXCERPT_LIMIT`] characters of the text, trimmed.
///
/// Extraction never fails: a line that does not parse leaves its field unset.
///
/// # Example
///
/// ```
/// use paystub_underwriter::extraction::extract_payroll_facts;
/// use chrono::NaiveDate;
///
/// let fact = extract_payroll_facts(
///     "Employer: Acme Corp\n\
///      Pay Period: 01/01/2024 - 01/14/2024\n\
///      Gross Pay: $1,234.56\n\
///      YTD Earnings $45,000.00",
/// );
///
/// assert_eq!(fact.employer_name.as_deref(), Some("Acme Corp"));
/// assert_eq!(fact.pay_period_start, NaiveDate::from_ymd_opt(2024, 1, 1));
/// assert_eq!(fact.gross_pay_per_period.unwrap().to_string(), "1234.56");
/// assert_eq!(fact.ytd_income.unwrap().to_string(), "45000.00");
/// assert_eq!(fact.pay_frequency, "Biweekly");
/// ```
pub fn extract_payroll_facts(document_text: &str) -> PayrollFact {
    let mut fact = PayrollFact {
        raw_text_excerpt: text_excerpt(document_text, RAW_TEXT_EXCERPT_LIMIT),
        ..PayrollFact::default()
    };

    for line in document_text.lines() {
        let lowered = line.to_lowercase();

        if fact.gross_pay_per_period.is_none() && lowered.contains(GROSS_KEYWORD) {
            fact.gross_pay_per_period = parse_trailing_amount(line);
        }

        if fact.ytd_income.is_none() && lowered.contains(YTD_KEYWORD) {
            fact.ytd_income = parse_trailing_amount(line);
        }

        if !fact.has_pay_period() && lowered.contains(PERIOD_KEYWORD) {
            let dates = parse_period_dates(line);
            fill_pay_period(&dates, &mut fact.pay_period_start, &mut fact.pay_period_end);
        }

        if fact.employer_name.is_none() && lowered.contains(EMPLOYER_KEYWORD) {
            fact.employer_name = parse_employer_name(line);
        }
    }

    fact
}

/// Extracts payroll facts from several documents belonging to one borrower.
///
/// The documents are joined with newlines and scanned as a single text, so
/// the first document that carries a field supplies it.
pub fn extract_from_documents<S: AsRef<str>>(documents: &[S]) -> PayrollFact {
    let joined = documents
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    extract_payroll_facts(&joined)
}

/// Returns at most `limit` leading characters of `text`, trimmed.
fn text_excerpt(text: &str, limit: usize) -> String {
    let prefix: String = text.chars().take(limit).collect();
    prefix.trim().to_string()
}
