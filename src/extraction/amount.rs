//! Currency amount parsing for gross pay and year-to-date lines.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Marker a line must contain before it is treated as carrying an amount.
pub const CURRENCY_MARKER: char = '$';

/// Thousands separator stripped from amounts before parsing.
const THOUSANDS_SEPARATOR: char = ',';

/// Parses the amount at the end of a paystub line.
///
/// The line must contain [`CURRENCY_MARKER`]. The currency marker is removed,
/// the last whitespace-delimited token is taken, thousands separators are
/// stripped and the remainder parsed as a decimal. Anything that does not
/// parse yields `None`.
///
/// # Example
///
/// ```
/// use paystub_underwriter::extraction::parse_trailing_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(
///     parse_trailing_amount("Gross Pay: $1,234.56"),
///     Some(Decimal::from_str("1234.56").unwrap())
/// );
/// assert_eq!(parse_trailing_amount("Gross Pay 1,234.56"), None);
/// assert_eq!(parse_trailing_amount("Gross Pay $ pending"), None);
/// ```
pub fn parse_trailing_amount(line: &str) -> Option<Decimal> {
    if !line.contains(CURRENCY_MARKER) {
        return None;
    }

    let without_marker = line.replace(CURRENCY_MARKER, "");
    let token = without_marker.split_whitespace().next_back()?;
    let digits: String = token.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();

    Decimal::from_str(&digits).ok()
}
