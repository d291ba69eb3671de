//! Payroll fact model.
//!
//! This module contains the [`PayrollFact`] type produced by the field extractor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pay frequency assumed for every paystub; it is never read from the text.
pub const DEFAULT_PAY_FREQUENCY: &str = "Biweekly";

/// Maximum number of characters kept in [`PayrollFact::raw_text_excerpt`].
pub const RAW_TEXT_EXCERPT_LIMIT: usize = 1000;

/// Structured payroll fields scanned out of paystub text.
///
/// Every field is independently optional except `pay_frequency`, which always
/// holds [`DEFAULT_PAY_FREQUENCY`], and `raw_text_excerpt`, which is always
/// present but may be empty.
///
/// Amounts serialize as JSON numbers with their decimal digits intact (`2000.00`
/// stays `2000.00`) and dates as `YYYY-MM-DD`, so the record reads naturally
/// when embedded in a model prompt.
///
/// # Example
///
/// ```
/// use paystub_underwriter::models::{PayrollFact, DEFAULT_PAY_FREQUENCY};
///
/// let fact = PayrollFact::default();
/// assert_eq!(fact.pay_frequency, DEFAULT_PAY_FREQUENCY);
/// assert!(fact.gross_pay_per_period.is_none());
/// assert!(fact.raw_text_excerpt.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFact {
    /// Gross pay for a single pay period.
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", default)]
    pub gross_pay_per_period: Option<Decimal>,
    /// Year-to-date earnings.
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", default)]
    pub ytd_income: Option<Decimal>,
    /// How often the employee is paid.
    pub pay_frequency: String,
    /// First day of the pay period (inclusive).
    #[serde(default)]
    pub pay_period_start: Option<NaiveDate>,
    /// Last day of the pay period (inclusive).
    #[serde(default)]
    pub pay_period_end: Option<NaiveDate>,
    /// The employer named on the paystub.
    #[serde(default)]
    pub employer_name: Option<String>,
    /// Leading slice of the document text, kept as context for the model.
    #[serde(default)]
    pub raw_text_excerpt: String,
}

impl Default for PayrollFact {
    fn default() -> Self {
        Self {
            gross_pay_per_period: None,
            ytd_income: None,
            pay_frequency: DEFAULT_PAY_FREQUENCY.to_string(),
            pay_period_start: None,
            pay_period_end: None,
            employer_name: None,
            raw_text_excerpt: String::new(),
        }
    }
}

impl PayrollFact {
    /// Returns true if both ends of the pay period were found.
    pub fn has_pay_period(&self) -> bool {
        self.pay_period_start.is_some() && self.pay_period_end.is_some()
    }

    /// Number of structured fields that were populated from the text.
    ///
    /// `pay_frequency` and `raw_text_excerpt` are not counted.
    pub fn populated_field_count(&self) -> usize {
        [
            self.gross_pay_per_period.is_some(),
            self.ytd_income.is_some(),
            self.pay_period_start.is_some(),
            self.pay_period_end.is_some(),
            self.employer_name.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_fact() -> PayrollFact {
        PayrollFact {
            gross_pay_per_period: Some(Decimal::from_str("1234.56").unwrap()),
            ytd_income: Some(Decimal::from_str("45000.00").unwrap()),
            pay_frequency: DEFAULT_PAY_FREQUENCY.to_string(),
            pay_period_start: NaiveDate::from_ymd_opt(2024, 1, 1),
            pay_period_end: NaiveDate::from_ymd_opt(2024, 1, 14),
            employer_name: Some("Acme Corp".to_string()),
            raw_text_excerpt: "Employer: Acme Corp".to_string(),
        }
    }

    #[test]
    fn test_default_has_only_frequency() {
        let fact = PayrollFact::default();
        assert_eq!(fact.pay_frequency, "Biweekly");
        assert_eq!(fact.populated_field_count(), 0);
        assert!(!fact.has_pay_period());
    }

    #[test]
    fn test_populated_field_count() {
        assert_eq!(sample_fact().populated_field_count(), 5);
    }

    #[test]
    fn test_serialize_amounts_as_numbers_and_dates_as_iso() {
        let json = serde_json::to_value(sample_fact()).unwrap();
        assert_eq!(json["gross_pay_per_period"].to_string(), "1234.56");
        assert_eq!(json["ytd_income"].to_string(), "45000.00");
        assert_eq!(json["pay_period_start"], "2024-01-01");
        assert_eq!(json["pay_period_end"], "2024-01-14");
        assert_eq!(json["employer_name"], "Acme Corp");
    }

    #[test]
    fn test_serialize_unset_fields_as_null() {
        let json = serde_json::to_value(PayrollFact::default()).unwrap();
        assert!(json["gross_pay_per_period"].is_null());
        assert!(json["pay_period_end"].is_null());
        assert_eq!(json["raw_text_excerpt"], "");
    }

    #[test]
    fn test_amounts_keep_their_digits() {
        let text = serde_json::to_string(&sample_fact()).unwrap();
        assert!(text.contains("\"ytd_income\":45000.00"));

        let back: PayrollFact = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample_fact());
    }

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let fact: PayrollFact = serde_json::from_str(r#"{"pay_frequency": "Biweekly"}"#).unwrap();
        assert_eq!(fact, PayrollFact::default());
    }
}
