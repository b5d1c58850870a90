//! Progressive bracket taxation.
//!
//! Each bracket taxes only the slice of income between the previous
//! bracket's upper bound and its own, at its own marginal rate. Income
//! falling entirely in the first bracket is never touched by a higher rate.

use rust_decimal::Decimal;

use crate::TaxBracket;
use crate::calculations::common::min;

/// Tax owed on `taxable_income` under `brackets`, unrounded.
///
/// Brackets must be ordered by ascending upper bound with an unbounded
/// final bracket (see [`crate::BracketTable::validate`]). Zero or negative
/// income owes nothing. Iteration stops once the income is used up.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TaxBracket;
/// use tax_core::calculations::progressive_tax;
///
/// let brackets = vec![
///     TaxBracket::bounded(dec!(7703), dec!(0.1325)),
///     TaxBracket::bounded(dec!(11623), dec!(0.18)),
///     TaxBracket::unbounded(dec!(0.23)),
/// ];
///
/// // 7703 × 13.25% + (10000 − 7703) × 18%
/// assert_eq!(progressive_tax(&brackets, dec!(10000)), dec!(1434.1075));
/// ```
pub fn progressive_tax(
    brackets: &[TaxBracket],
    taxable_income: Decimal,
) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut remaining = taxable_income;
    let mut lower_bound = Decimal::ZERO;
    let mut tax = Decimal::ZERO;

    for bracket in brackets {
        let width = match bracket.upper_bound {
            Some(upper_bound) => min(remaining, upper_bound - lower_bound),
            None => remaining,
        };
        if width <= Decimal::ZERO {
            break;
        }

        tax += width * bracket.marginal_rate;
        remaining -= width;

        match bracket.upper_bound {
            Some(upper_bound) if remaining > Decimal::ZERO => lower_bound = upper_bound,
            _ => break,
        }
    }

    tax
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxYearConfig;

    fn brackets_2025() -> Vec<TaxBracket> {
        TaxYearConfig::portugal_2025().brackets.brackets().to_vec()
    }

    // =========================================================================
    // progressive_tax tests
    // =========================================================================

    #[test]
    fn zero_income_owes_nothing() {
        assert_eq!(progressive_tax(&brackets_2025(), dec!(0)), dec!(0));
    }

    #[test]
    fn negative_income_owes_nothing() {
        assert_eq!(progressive_tax(&brackets_2025(), dec!(-500)), dec!(0));
    }

    #[test]
    fn income_in_first_bracket_uses_only_first_rate() {
        // 5000 × 13.25%, not the top rate
        assert_eq!(progressive_tax(&brackets_2025(), dec!(5000)), dec!(662.5));
    }

    #[test]
    fn income_exactly_at_first_bound() {
        assert_eq!(
            progressive_tax(&brackets_2025(), dec!(7703)),
            dec!(1020.6475)
        );
    }

    #[test]
    fn income_spanning_four_brackets() {
        // 7703 × 0.1325 + 3920 × 0.18 + 4849 × 0.23 + 1820.68 × 0.26
        assert_eq!(
            progressive_tax(&brackets_2025(), dec!(18292.68)),
            dec!(3314.8943)
        );
    }

    #[test]
    fn income_in_unbounded_bracket() {
        // every euro above 90000 is taxed at 48%
        let at_90000 = progressive_tax(&brackets_2025(), dec!(90000));
        let at_100000 = progressive_tax(&brackets_2025(), dec!(100000));

        assert_eq!(at_100000, dec!(35718.5175));
        assert_eq!(at_100000 - at_90000, dec!(4800.00));
    }

    #[test]
    fn single_unbounded_bracket_is_flat() {
        let flat = vec![TaxBracket::unbounded(dec!(0.25))];

        assert_eq!(progressive_tax(&flat, dec!(40000)), dec!(10000));
    }

    #[test]
    fn empty_schedule_owes_nothing() {
        assert_eq!(progressive_tax(&[], dec!(40000)), dec!(0));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_tax_is_continuous_at_every_bound(index in 0usize..8) {
            let brackets = brackets_2025();
            let bound = brackets[index].upper_bound.unwrap();
            let epsilon = dec!(0.0001);

            let below = progressive_tax(&brackets, bound - epsilon);
            let at = progressive_tax(&brackets, bound);
            let above = progressive_tax(&brackets, bound + epsilon);

            // A jump would show up as a gap far larger than epsilon × top rate.
            prop_assert!(at - below <= epsilon);
            prop_assert!(above - at <= epsilon);
            prop_assert!(below <= at && at <= above);
        }

        #[test]
        fn prop_slope_is_non_decreasing(cents in 0u64..20_000_000) {
            let brackets = brackets_2025();
            let income = Decimal::new(cents as i64, 2);
            let step = dec!(100);

            let first = progressive_tax(&brackets, income + step) - progressive_tax(&brackets, income);
            let second = progressive_tax(&brackets, income + step + step)
                - progressive_tax(&brackets, income + step);

            prop_assert!(second >= first);
        }

        #[test]
        fn prop_tax_never_exceeds_top_rate(cents in 0u64..50_000_000) {
            let brackets = brackets_2025();
            let income = Decimal::new(cents as i64, 2);

            let tax = progressive_tax(&brackets, income);

            prop_assert!(tax >= Decimal::ZERO);
            prop_assert!(tax <= income * dec!(0.48));
        }
    }
}
