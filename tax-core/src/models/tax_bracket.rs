use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::progressive::progressive_tax;

/// Errors describing a malformed bracket table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The table has no brackets at all.
    #[error("bracket table is empty")]
    Empty,

    /// A bracket's upper bound is zero or negative.
    #[error("bracket {index} has non-positive upper bound {upper_bound}")]
    NonPositiveBound { index: usize, upper_bound: Decimal },

    /// Upper bounds must be strictly increasing.
    #[error("bracket {index} upper bound {upper_bound} does not exceed previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        upper_bound: Decimal,
        previous: Decimal,
    },

    /// Marginal rates must lie in [0, 1].
    #[error("bracket {index} has marginal rate {rate} outside [0, 1]")]
    InvalidRate { index: usize, rate: Decimal },

    /// Only the final bracket may be unbounded.
    #[error("bracket {index} is unbounded but is not the final bracket")]
    UnboundedBeforeEnd { index: usize },

    /// The final bracket must be unbounded so every income is covered.
    #[error("final bracket is bounded at {0}; income above it would go untaxed")]
    MissingUnboundedBracket(Decimal),
}

/// One band of a progressive schedule.
///
/// The band covers income from the previous bracket's `upper_bound`
/// (or zero for the first bracket) up to and including its own
/// `upper_bound`. `None` marks the final, unbounded band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub marginal_rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        marginal_rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            marginal_rate,
        }
    }

    pub fn unbounded(marginal_rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            marginal_rate,
        }
    }
}

/// An ordered progressive schedule covering `[0, ∞)`.
///
/// Construction does not validate; call [`BracketTable::validate`] on any
/// table that did not come from a tested preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketTable(Vec<TaxBracket>);

impl BracketTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tax owed on `taxable_income` under this schedule.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{BracketTable, TaxBracket};
    ///
    /// let table = BracketTable::new(vec![
    ///     TaxBracket::bounded(dec!(10000), dec!(0.10)),
    ///     TaxBracket::unbounded(dec!(0.20)),
    /// ]);
    ///
    /// // 10000 × 10% + 5000 × 20%
    /// assert_eq!(table.tax_for(dec!(15000)), dec!(2000));
    /// ```
    pub fn tax_for(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        progressive_tax(&self.0, taxable_income)
    }

    /// Checks that the table partitions `[0, ∞)` into contiguous bands
    /// with sane rates.
    ///
    /// # Errors
    ///
    /// Returns the first [`BracketTableError`] encountered, scanning from
    /// the lowest bracket upwards.
    pub fn validate(&self) -> Result<(), BracketTableError> {
        let last_index = match self.0.len() {
            0 => return Err(BracketTableError::Empty),
            n => n - 1,
        };

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in self.0.iter().enumerate() {
            if bracket.marginal_rate < Decimal::ZERO || bracket.marginal_rate > Decimal::ONE {
                return Err(BracketTableError::InvalidRate {
                    index,
                    rate: bracket.marginal_rate,
                });
            }

            match bracket.upper_bound {
                Some(upper_bound) => {
                    if upper_bound <= Decimal::ZERO {
                        return Err(BracketTableError::NonPositiveBound { index, upper_bound });
                    }
                    if let Some(previous) = previous {
                        if upper_bound <= previous {
                            return Err(BracketTableError::NonIncreasingBound {
                                index,
                                upper_bound,
                                previous,
                            });
                        }
                    }
                    if index == last_index {
                        return Err(BracketTableError::MissingUnboundedBracket(upper_bound));
                    }
                    previous = Some(upper_bound);
                }
                None if index != last_index => {
                    return Err(BracketTableError::UnboundedBeforeEnd { index });
                }
                None => {}
            }
        }

        Ok(())
    }
}
