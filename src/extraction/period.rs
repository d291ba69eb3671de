//! Pay period date parsing.
//!
//! Paystubs print the period as a range, e.g. `Pay Period: 01/01/2024 - 01/14/2024`.
//! Only tokens in month/day/year form are recognised.

use chrono::NaiveDate;

/// Character a line must contain to be considered a date range.
pub const RANGE_SEPARATOR: char = '-';

/// Character a token must contain to be tried as a date.
pub const DATE_SEPARATOR: char = '/';

/// The only accepted date layout (month/day/4-digit year).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Returns every date on a pay-period line, in order of appearance.
///
/// The line must contain [`RANGE_SEPARATOR`]. Each whitespace-delimited token
/// containing [`DATE_SEPARATOR`] is stripped of surrounding punctuation and
/// parsed with [`DATE_FORMAT`]; tokens that fail to parse are skipped.
///
/// # Example
///
/// ```
/// use paystub_underwriter::extraction::parse_period_dates;
/// use chrono::NaiveDate;
///
/// let dates = parse_period_dates("Pay Period: 01/01/2024 - 01/14/2024");
/// assert_eq!(dates, vec![
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
/// ]);
/// ```
pub fn parse_period_dates(line: &str) -> Vec<NaiveDate> {
    if !line.contains(RANGE_SEPARATOR) {
        return Vec::new();
    }

    line.split_whitespace()
        .filter(|token| token.contains(DATE_SEPARATOR))
        .filter_map(parse_date_token)
        .collect()
}

fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let token = token.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '.' | '(' | ')'));

    // chrono accepts short years for %Y; paystub years are always four digits.
    let year = token.rsplit(DATE_SEPARATOR).next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(token, DATE_FORMAT).ok()
}

/// Fills empty pay period slots from the dates on one line.
///
/// Dates are assigned to `start` first, then `end`, and a slot that already
/// holds a value is never overwritten. Extra dates are ignored.
pub fn fill_pay_period(
    dates: &[NaiveDate],
    start: &mut Option<NaiveDate>,
    end: &mut Option<NaiveDate>,
) {
    for date in dates {
        if start.is_none() {
            *start = Some(*date);
        } else if end.is_none() {
            *end = Some(*date);
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_range_with_spaces() {
        assert_eq!(
            parse_period_dates("Pay Period: 01/01/2024 - 01/14/2024"),
            vec![date(2024, 1, 1), date(2024, 1, 14)]
        );
    }

    #[test]
    fn test_requires_range_separator() {
        assert!(parse_period_dates("Pay Period 01/01/2024 to 01/14/2024").is_empty());
    }

    #[test]
    fn test_skips_invalid_dates() {
        assert_eq!(
            parse_period_dates("Period: 13/45/2024 - 02/15/2024"),
            vec![date(2024, 2, 15)]
        );
    }

    #[test]
    fn test_two_digit_year_rejected() {
        assert!(parse_period_dates("Period: 01/01/24 - 01/14/24").is_empty());
    }

    #[test]
    fn test_trailing_punctuation_is_ignored() {
        assert_eq!(
            parse_period_dates("Period (03/01/2024 - 03/15/2024),"),
            vec![date(2024, 3, 1), date(2024, 3, 15)]
        );
    }

    #[test]
    fn test_fill_assigns_start_then_end() {
        let mut start = None;
        let mut end = None;
        fill_pay_period(&[date(2024, 1, 1), date(2024, 1, 14)], &mut start, &mut end);
        assert_eq!(start, Some(date(2024, 1, 1)));
        assert_eq!(end, Some(date(2024, 1, 14)));
    }

    #[test]
    fn test_fill_completes_partial_range() {
        let mut start = Some(date(2024, 1, 1));
        let mut end = None;
        fill_pay_period(&[date(2024, 1, 14), date(2024, 1, 20)], &mut start, &mut end);
        assert_eq!(start, Some(date(2024, 1, 1)));
        assert_eq!(end, Some(date(2024, 1, 14)));
    }

    #[test]
    fn test_fill_never_overwrites() {
        let mut start = Some(date(2024, 1, 1));
        let mut end = Some(date(2024, 1, 14));
        fill_pay_period(&[date(2025, 6, 1), date(2025, 6, 14)], &mut start, &mut end);
        assert_eq!(start, Some(date(2024, 1, 1)));
        assert_eq!(end, Some(date(2024, 1, 14)));
    }
}
