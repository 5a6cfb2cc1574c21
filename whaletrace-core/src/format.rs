//! Number formatting for notification copy
//!
//! Amounts are comma-grouped ("15,000"), percentages carry one decimal
//! ("82.9%"). The rule engine embeds both in notification titles and
//! descriptions.

/// Format an amount with comma grouping. Fractions are kept to two decimals
/// and dropped entirely when the value is whole.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let negative = value < 0.0;
    // Round to cents first so the fraction cannot carry into the whole part
    // after formatting.
    let abs = (value.abs() * 100.0).round() / 100.0;
    let whole = abs.trunc() as u64;
    let frac = abs.fract();

    let mut grouped = String::new();
    let digits = whole.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);

    // Two decimals, but only when the value actually has a fraction.
    if frac > 1e-9 {
        out.push_str(&format!("{:.2}", frac)[1..]);
    }

    out
}

/// Format a percentage with one decimal place, e.g. `82.9`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(15000.0), "15,000");
        assert_eq!(format_amount(1234567.0), "1,234,567");
    }

    #[test]
    fn test_format_amount_fraction() {
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(8200.25), "8,200.25");
        // Whole values drop the fraction entirely.
        assert_eq!(format_amount(8200.0), "8,200");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-1500.0), "-1,500");
    }

    #[test]
    fn test_format_percent_one_decimal() {
        assert_eq!(format_percent(82.9268), "82.9");
        assert_eq!(format_percent(20.0), "20.0");
        assert_eq!(format_percent(57.89), "57.9");
    }
}
