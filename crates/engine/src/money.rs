//! Monetary text parsing.
//!
//! Statement text carries comma thousands separators and `$` markers;
//! both strip before the numeric parse.

/// Strip `,` and `$`, trim, then parse as f64.
///
/// Returns `None` for empty or non-numeric residue so callers can tell
/// "unparseable" apart from a genuine zero.
pub fn parse_amount(text: &str) -> Option<f64> {
    let stripped: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lossy boundary form: any parse failure collapses to 0.0, never errors.
///
/// A returned 0.0 therefore means "zero or unparseable", the contract the
/// serialized outputs rely on.
pub fn parse_amount_lossy(text: &str) -> f64 {
    parse_amount(text).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimal() {
        assert_eq!(parse_amount("200.00"), Some(200.0));
        assert_eq!(parse_amount("-42.5"), Some(-42.5));
    }

    #[test]
    fn strips_currency_formatting() {
        assert_eq!(parse_amount("$1,000.00"), Some(1000.0));
        assert_eq!(parse_amount("$ 2,345,678.90"), Some(2345678.9));
        assert_eq!(parse_amount("-$1,517.82"), Some(-1517.82));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("Deposit"), None);
        assert_eq!(parse_amount("12.3.4"), None);
    }

    #[test]
    fn lossy_form_defaults_to_zero() {
        assert_eq!(parse_amount_lossy("not a number"), 0.0);
        assert_eq!(parse_amount_lossy(""), 0.0);
        assert_eq!(parse_amount_lossy("$500.00"), 500.0);
    }

    #[test]
    fn zero_and_unparseable_are_distinguishable_strict() {
        assert_eq!(parse_amount("0.00"), Some(0.0));
        assert_eq!(parse_amount("n/a"), None);
    }
}
