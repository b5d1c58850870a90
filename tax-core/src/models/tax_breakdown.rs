use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{round_half_up, round_rate};

/// Annual result of a single [`crate::TaxEngine::compute_breakdown`] call.
///
/// Money amounts are rounded half-up to cents. `gross_revenue` always
/// equals `vat + social_security + income_tax + net_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Total billed, VAT included.
    pub gross_revenue: Decimal,

    /// VAT collected from domestic clients and remitted to the state.
    pub vat: Decimal,

    /// Revenue net of VAT; the basis for every other levy.
    pub vat_exclusive_revenue: Decimal,

    pub social_security_base: Decimal,
    pub social_security: Decimal,

    /// Taxable profit under the simplified regime, before the youth exemption.
    pub taxable_base: Decimal,
    pub youth_exemption: Decimal,
    pub taxable_income: Decimal,
    pub income_tax: Decimal,

    pub net_income: Decimal,

    /// Social security + income tax + VAT. Informational only.
    pub total_withheld: Decimal,

    /// Income tax as a fraction of `taxable_base`, four decimal places.
    /// Zero when the base is zero.
    pub effective_income_tax_rate: Decimal,
}

/// Per-month display values derived from an annual [`TaxBreakdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub gross_revenue: Decimal,
    pub vat: Decimal,
    pub social_security: Decimal,
    pub income_tax: Decimal,
    pub net_income: Decimal,
    pub total_withheld: Decimal,
}

/// Slices of the proportional visualization, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownCategory {
    SocialSecurity,
    IncomeTax,
    Vat,
    Net,
}

impl BreakdownCategory {
    pub const ALL: [BreakdownCategory; 4] = [
        Self::SocialSecurity,
        Self::IncomeTax,
        Self::Vat,
        Self::Net,
    ];

    /// Fixed chart colour, stable across renders.
    pub fn color(&self) -> &'static str {
        match self {
            Self::SocialSecurity => "#2563eb",
            Self::IncomeTax => "#e11d48",
            Self::Vat => "#f97316",
            Self::Net => "#16a34a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownShare {
    pub category: BreakdownCategory,
    pub amount: Decimal,
    /// Fraction of gross revenue, four decimal places.
    pub share: Decimal,
}

impl TaxBreakdown {
    /// Divides the annual figures by twelve for display.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{IncomeInput, TaxEngine, TaxYearConfig};
    ///
    /// let engine = TaxEngine::new(TaxYearConfig::portugal_2025());
    /// let breakdown = engine.compute_breakdown(&IncomeInput::annual(dec!(0), dec!(24000)));
    ///
    /// assert_eq!(breakdown.monthly().gross_revenue, dec!(2000));
    /// ```
    pub fn monthly(&self) -> MonthlyBreakdown {
        let months = Decimal::from(12);
        let per_month = |amount: Decimal| round_half_up(amount / months);

        MonthlyBreakdown {
            gross_revenue: per_month(self.gross_revenue),
            vat: per_month(self.vat),
            social_security: per_month(self.social_security),
            income_tax: per_month(self.income_tax),
            net_income: per_month(self.net_income),
            total_withheld: per_month(self.total_withheld),
        }
    }

    pub fn amount_for(
        &self,
        category: BreakdownCategory,
    ) -> Decimal {
        match category {
            BreakdownCategory::SocialSecurity => self.social_security,
            BreakdownCategory::IncomeTax => self.income_tax,
            BreakdownCategory::Vat => self.vat,
            BreakdownCategory::Net => self.net_income,
        }
    }

    /// Chart slices in [`BreakdownCategory::ALL`] order.
    pub fn shares(&self) -> Vec<BreakdownShare> {
        BreakdownCategory::ALL
            .iter()
            .map(|&category| {
                let amount = self.amount_for(category);
                let share = if self.gross_revenue > Decimal::ZERO {
                    round_rate(amount / self.gross_revenue)
                } else {
                    Decimal::ZERO
                };
                BreakdownShare {
                    category,
                    amount,
                    share,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> TaxBreakdown {
        TaxBreakdown {
            gross_revenue: dec!(30000.00),
            vat: dec!(5609.76),
            vat_exclusive_revenue: dec!(24390.24),
            social_security_base: dec!(17073.17),
            social_security: dec!(3653.66),
            taxable_base: dec!(18292.68),
            youth_exemption: dec!(0.00),
            taxable_income: dec!(18292.68),
            income_tax: dec!(3314.90),
            net_income: dec!(17421.68),
            total_withheld: dec!(12578.32),
            effective_income_tax_rate: dec!(0.1812),
        }
    }

    #[test]
    fn monthly_divides_each_amount_by_twelve() {
        let monthly = sample().monthly();

        assert_eq!(monthly.gross_revenue, dec!(2500.00));
        assert_eq!(monthly.vat, dec!(467.48));
        assert_eq!(monthly.social_security, dec!(304.47));
        assert_eq!(monthly.income_tax, dec!(276.24));
        assert_eq!(monthly.net_income, dec!(1451.81));
        assert_eq!(monthly.total_withheld, dec!(1048.19));
    }

    #[test]
    fn shares_follow_fixed_category_order() {
        let categories: Vec<_> = sample().shares().iter().map(|s| s.category).collect();

        assert_eq!(categories, BreakdownCategory::ALL.to_vec());
    }

    #[test]
    fn shares_are_fractions_of_gross() {
        let shares = sample().shares();

        assert_eq!(shares[0].share, dec!(0.1218));
        assert_eq!(shares[1].share, dec!(0.1105));
        assert_eq!(shares[2].share, dec!(0.1870));
        assert_eq!(shares[3].share, dec!(0.5807));
    }

    #[test]
    fn shares_are_zero_when_gross_is_zero() {
        let breakdown = TaxBreakdown {
            gross_revenue: dec!(0),
            vat: dec!(0),
            social_security: dec!(0),
            income_tax: dec!(0),
            net_income: dec!(0),
            ..sample()
        };

        assert!(breakdown.shares().iter().all(|s| s.share == Decimal::ZERO));
    }

    #[test]
    fn category_colours_are_distinct() {
        let colours: std::collections::HashSet<_> =
            BreakdownCategory::ALL.iter().map(|c| c.color()).collect();

        assert_eq!(colours.len(), 4);
    }
}
