//! Employer name parsing.

/// Returns the employer name from an employer line.
///
/// The name is the text after the final colon, or the whole line if it has no
/// colon, trimmed. An empty remainder yields `None` so a later line can still
/// supply the name.
///
/// # Example
///
/// ```
/// use paystub_underwriter::extraction::parse_employer_name;
///
/// assert_eq!(parse_employer_name("Employer: Acme Corp"), Some("Acme Corp".to_string()));
/// assert_eq!(parse_employer_name("Employer:   "), None);
/// ```
pub fn parse_employer_name(line: &str) -> Option<String> {
    let name = line.rsplit(':').next().unwrap_or(line).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_after_colon() {
        assert_eq!(
            parse_employer_name("Employer: Acme Corp"),
            Some("Acme Corp".to_string())
        );
    }

    #[test]
    fn test_uses_last_colon() {
        assert_eq!(
            parse_employer_name("Employer Info: Name: Globex LLC"),
            Some("Globex LLC".to_string())
        );
    }

    #[test]
    fn test_no_colon_keeps_whole_line() {
        assert_eq!(
            parse_employer_name("  Employer Initech  "),
            Some("Employer Initech".to_string())
        );
    }

    #[test]
    fn test_blank_value_is_none() {
        assert_eq!(parse_employer_name("Employer:"), None);
    }
}
