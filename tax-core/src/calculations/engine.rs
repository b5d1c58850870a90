//! Tax breakdown for self-employed workers under the simplified regime.
//!
//! # Computation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annualize revenue (monthly figures × 12) |
//! | 2    | Extract VAT from domestic revenue: base = domestic / (1 + VAT rate) |
//! | 3    | VAT-exclusive revenue = domestic base + foreign revenue |
//! | 4    | Social security = revenue × base fraction × rate (zero if exempt) |
//! | 5    | Taxable base = revenue × simplified-regime coefficient |
//! | 6    | Youth exemption = min(base × exempt fraction, cap × AIS) |
//! | 7    | Taxable income = max(base − exemption, 0) |
//! | 8    | Income tax = progressive brackets applied to taxable income |
//! | 9    | Net = revenue − social security − income tax |
//!
//! VAT is collected from clients on top of the worker's fee, so it is
//! reported separately and never reduces net income.
//!
//! Intermediate values keep full precision; each reported amount is
//! rounded half-up to cents once, and net income is derived from the
//! rounded figures so the breakdown always adds up to gross revenue.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{IncomeInput, TaxEngine, TaxYearConfig};
//!
//! let engine = TaxEngine::new(TaxYearConfig::portugal_2025());
//! let breakdown = engine.compute_breakdown(&IncomeInput::annual(dec!(30000), dec!(0)));
//!
//! assert_eq!(breakdown.vat, dec!(5609.76));
//! assert_eq!(breakdown.social_security, dec!(3653.66));
//! assert_eq!(breakdown.income_tax, dec!(3314.90));
//! assert_eq!(breakdown.net_income, dec!(17421.68));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{max, min, round_half_up, round_rate};
use crate::sanitize::{MAX_AMOUNT, within_range};
use crate::{IncomeInput, TaxBreakdown, TaxYearConfig, YouthProgramStage};

/// Computes [`TaxBreakdown`]s under one rule set.
///
/// The engine holds no mutable state; a single instance can serve any
/// number of callers, including concurrently from several threads.
#[derive(Debug, Clone, Default)]
pub struct TaxEngine {
    config: TaxYearConfig,
}

impl TaxEngine {
    /// Binds the engine to a rule set.
    ///
    /// The rule set is not validated here; presets are covered by tests
    /// and `tax-data` validates anything loaded from disk.
    pub fn new(config: TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    /// Computes the annual breakdown for `input`.
    ///
    /// Total over every input: negative amounts and amounts above
    /// [`MAX_AMOUNT`] are clamped to zero and an unknown youth stage grants
    /// no exemption. Never panics, never divides by zero.
    pub fn compute_breakdown(
        &self,
        input: &IncomeInput,
    ) -> TaxBreakdown {
        // Step 1: annualize
        let periods = Decimal::from(input.periodicity.periods_per_year());
        let domestic = self.admissible("domestic_revenue", input.domestic_revenue) * periods;
        let foreign = self.admissible("foreign_revenue", input.foreign_revenue) * periods;

        // Steps 2-3: VAT extraction
        let vat_exclusive_domestic = self.vat_exclusive_domestic(domestic);
        let vat = round_half_up(domestic - vat_exclusive_domestic);
        let revenue = vat_exclusive_domestic + foreign;

        // Step 4: social security
        let social_security_base = self.social_security_base(revenue);
        let social_security =
            self.social_security(social_security_base, input.social_security_exempt);

        // Steps 5-7: taxable income
        let taxable_base = self.taxable_base(revenue);
        let youth_exemption = self.youth_exemption(taxable_base, input.youth_stage);
        let taxable_income = max(taxable_base - youth_exemption, Decimal::ZERO);

        // Step 8: progressive tax
        let income_tax = round_half_up(self.config.brackets.tax_for(taxable_income));

        // Step 9: totals
        let vat_exclusive_revenue = round_half_up(revenue);
        let net_income = vat_exclusive_revenue - social_security - income_tax;
        let effective_income_tax_rate = self.effective_rate(income_tax, taxable_base);

        debug!(
            rule_set = %self.config.name,
            periodicity = input.periodicity.as_str(),
            stage = %input.youth_stage,
            domestic = %domestic,
            foreign = %foreign,
            revenue = %vat_exclusive_revenue,
            taxable_income = %taxable_income,
            income_tax = %income_tax,
            "computed tax breakdown"
        );

        TaxBreakdown {
            gross_revenue: vat + vat_exclusive_revenue,
            vat,
            vat_exclusive_revenue,
            social_security_base: round_half_up(social_security_base),
            social_security,
            taxable_base: round_half_up(taxable_base),
            youth_exemption: round_half_up(youth_exemption),
            taxable_income: round_half_up(taxable_income),
            income_tax,
            net_income,
            total_withheld: social_security + income_tax + vat,
            effective_income_tax_rate,
        }
    }

    /// Clamps a revenue figure that slipped past the boundary unsanitized.
    ///
    /// Keeping amounts within `[0, MAX_AMOUNT]` bounds every later product
    /// and sum well below `Decimal::MAX`.
    fn admissible(
        &self,
        field: &'static str,
        amount: Decimal,
    ) -> Decimal {
        let clamped = within_range(amount);
        if clamped != amount {
            warn!(
                field,
                amount = %amount,
                max = %MAX_AMOUNT,
                "Revenue outside accepted range treated as zero"
            );
        }
        clamped
    }

    /// Removes VAT from VAT-inclusive domestic revenue.
    fn vat_exclusive_domestic(
        &self,
        domestic: Decimal,
    ) -> Decimal {
        // vat_rate >= 0, so the divisor is at least one
        domestic / (Decimal::ONE + self.config.vat_rate)
    }

    /// Relevant income for social security contributions.
    fn social_security_base(
        &self,
        revenue: Decimal,
    ) -> Decimal {
        revenue * self.config.social_security_base_fraction
    }

    /// Contribution owed on the social security base, rounded to cents.
    fn social_security(
        &self,
        base: Decimal,
        exempt: bool,
    ) -> Decimal {
        if exempt {
            return Decimal::ZERO;
        }
        round_half_up(base * self.config.social_security_rate)
    }

    /// Taxable profit under the simplified regime, before exemptions.
    fn taxable_base(
        &self,
        revenue: Decimal,
    ) -> Decimal {
        revenue * self.config.simplified_regime_coefficient
    }

    /// Youth program exemption, never more than the stage's AIS cap.
    fn youth_exemption(
        &self,
        taxable_base: Decimal,
        stage: YouthProgramStage,
    ) -> Decimal {
        if stage == YouthProgramStage::None {
            return Decimal::ZERO;
        }

        match self.config.exemption_rule(stage) {
            Some(rule) => min(
                taxable_base * rule.exempt_fraction,
                rule.cap(self.config.ais),
            ),
            None => {
                warn!(
                    stage = %stage,
                    rule_set = %self.config.name,
                    configured_stages = self.config.youth_exemptions.len(),
                    "Youth stage not defined in rule set; no exemption applied"
                );
                Decimal::ZERO
            }
        }
    }

    /// Income tax over the pre-exemption taxable base.
    fn effective_rate(
        &self,
        income_tax: Decimal,
        taxable_base: Decimal,
    ) -> Decimal {
        if taxable_base <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        round_rate(income_tax / taxable_base)
    }
}
