//! Coercion of raw user-entered amounts into engine inputs.
//!
//! Input fields may be cleared, half-typed, or negative while the user is
//! editing. Everything that is not a finite number in `[0, MAX_AMOUNT]`
//! becomes zero so the engine can be called on every keystroke.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use tracing::debug;

/// Largest revenue amount accepted per period (10^15 euros).
///
/// Annualizing and summing amounts up to this ceiling stays far inside
/// the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Parses a revenue amount typed by the user.
///
/// Surrounding whitespace is ignored. Empty, unparseable, negative and
/// above-[`MAX_AMOUNT`] inputs yield zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::sanitize::parse_amount;
///
/// assert_eq!(parse_amount(" 30000 "), dec!(30000));
/// assert_eq!(parse_amount("-10"), dec!(0));
/// assert_eq!(parse_amount("abc"), dec!(0));
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(trimmed) {
        Ok(amount) => within_range(amount),
        Err(err) => {
            debug!(input = trimmed, error = %err, "Unparseable amount treated as zero");
            Decimal::ZERO
        }
    }
}

/// Converts a float from a slider or spinner into an amount.
///
/// NaN, infinities, negatives and amounts above [`MAX_AMOUNT`] yield zero.
pub fn amount_from_f64(value: f64) -> Decimal {
    if !value.is_finite() || value < 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).map_or(Decimal::ZERO, within_range)
}

/// Zero for anything outside `[0, MAX_AMOUNT]`, the amount otherwise.
pub fn within_range(amount: Decimal) -> Decimal {
    if amount.is_sign_negative() {
        return Decimal::ZERO;
    }
    if amount > MAX_AMOUNT {
        debug!(amount = %amount, "Amount above ceiling treated as zero");
        return Decimal::ZERO;
    }
    amount
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_amount tests
    // =========================================================================

    #[test]
    fn parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("30000"), dec!(30000));
        assert_eq!(parse_amount("1500.50"), dec!(1500.50));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("\t2500\n"), dec!(2500));
    }

    #[test]
    fn parse_amount_empty_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_garbage_is_zero() {
        assert_eq!(parse_amount("12abc"), Decimal::ZERO);
        assert_eq!(parse_amount("€"), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_negative_is_zero() {
        assert_eq!(parse_amount("-0.01"), Decimal::ZERO);
        assert_eq!(parse_amount("-30000"), Decimal::ZERO);
    }

    // =========================================================================
    // amount_from_f64 tests
    // =========================================================================

    #[test]
    fn amount_from_f64_keeps_finite_values() {
        assert_eq!(amount_from_f64(1500.5), dec!(1500.5));
        assert_eq!(amount_from_f64(0.0), Decimal::ZERO);
    }

    #[test]
    fn amount_from_f64_rejects_non_finite() {
        assert_eq!(amount_from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(amount_from_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(amount_from_f64(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn amount_from_f64_rejects_negative() {
        assert_eq!(amount_from_f64(-42.0), Decimal::ZERO);
    }

    #[test]
    fn amount_from_f64_rejects_values_above_ceiling() {
        assert_eq!(amount_from_f64(2.0e15), Decimal::ZERO);
        assert_eq!(amount_from_f64(1.0e300), Decimal::ZERO);
    }

    // =========================================================================
    // ceiling tests
    // =========================================================================

    #[test]
    fn within_range_clamps_below_zero() {
        assert_eq!(within_range(dec!(-1)), Decimal::ZERO);
        assert_eq!(within_range(dec!(7)), dec!(7));
    }

    #[test]
    fn within_range_keeps_the_ceiling_itself() {
        assert_eq!(within_range(MAX_AMOUNT), MAX_AMOUNT);
        assert_eq!(within_range(MAX_AMOUNT + dec!(0.01)), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_rejects_decimal_max() {
        assert_eq!(parse_amount("79228162514264337593543950335"), Decimal::ZERO);
        assert_eq!(parse_amount("1000000000000001"), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_accepts_the_ceiling() {
        assert_eq!(parse_amount("1000000000000000"), MAX_AMOUNT);
    }
}
