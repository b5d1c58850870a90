//! Display formatting for money and rates.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::Language;

/// Formats `amount` as whole euros with locale-aware digit grouping.
///
/// Portuguese writes `30 000 €` and leaves four-digit amounts ungrouped
/// (`2500 €`); English writes `€30,000`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_cli::Language;
/// use tax_cli::format::format_currency;
///
/// assert_eq!(format_currency(dec!(17421.68), Language::Pt), "17 422 €");
/// assert_eq!(format_currency(dec!(17421.68), Language::En), "€17,422");
/// ```
pub fn format_currency(
    amount: Decimal,
    lang: Language,
) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();

    match lang {
        Language::Pt => {
            let grouped = if digits.len() > 4 {
                group_digits(&digits, ' ')
            } else {
                digits
            };
            format!("{sign}{grouped} €")
        }
        Language::En => format!("{sign}€{}", group_digits(&digits, ',')),
    }
}

/// Formats a fraction as a percentage with two decimals: `0.1812` → `18.12%`.
pub fn format_percent(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.2}%")
}

fn group_digits(
    digits: &str,
    separator: char,
) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn pt_groups_thousands_with_spaces() {
        assert_eq!(format_currency(dec!(30000.00), Language::Pt), "30 000 €");
        assert_eq!(format_currency(dec!(1234567), Language::Pt), "1 234 567 €");
    }

    #[test]
    fn pt_leaves_four_digits_ungrouped() {
        assert_eq!(format_currency(dec!(3653.66), Language::Pt), "3654 €");
        assert_eq!(format_currency(dec!(2500), Language::Pt), "2500 €");
    }

    #[test]
    fn en_groups_thousands_with_commas() {
        assert_eq!(format_currency(dec!(3653.66), Language::En), "€3,654");
        assert_eq!(format_currency(dec!(1234567), Language::En), "€1,234,567");
        assert_eq!(format_currency(dec!(467.48), Language::En), "€467");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(0.5), Language::En), "€1");
        assert_eq!(format_currency(dec!(0.49), Language::En), "€0");
    }

    #[test]
    fn currency_zero_has_no_sign() {
        assert_eq!(format_currency(dec!(0.00), Language::Pt), "0 €");
        assert_eq!(format_currency(dec!(-0.2), Language::Pt), "0 €");
    }

    #[test]
    fn currency_negative_keeps_sign() {
        assert_eq!(format_currency(dec!(-12345), Language::Pt), "-12 345 €");
        assert_eq!(format_currency(dec!(-12345), Language::En), "-€12,345");
    }

    // =========================================================================
    // format_percent tests
    // =========================================================================

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(dec!(0.1812)), "18.12%");
        assert_eq!(format_percent(dec!(0.187)), "18.70%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
        assert_eq!(format_percent(dec!(1)), "100.00%");
    }
}
