//! Rule sets for the simplified self-employment regime.
//!
//! Every rate, bracket and exemption the engine applies lives in a
//! [`TaxYearConfig`]. A new tax year is a new constructor (or a TOML file
//! loaded through `tax-data`), never a change to the computation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::income_input::YouthProgramStage;
use super::tax_bracket::{BracketTable, BracketTableError, TaxBracket};

/// Names accepted by [`TaxYearConfig::preset`], newest first.
pub const PRESET_NAMES: [&str; 2] = ["pt-2025", "pt-2024"];

/// Errors that make a rule set unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("VAT rate must be between 0 and 1, got {0}")]
    InvalidVatRate(Decimal),

    #[error("social security rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    #[error("social security base fraction must be between 0 and 1, got {0}")]
    InvalidSocialSecurityBase(Decimal),

    #[error("simplified regime coefficient must be between 0 and 1, got {0}")]
    InvalidCoefficient(Decimal),

    #[error("AIS must be positive, got {0}")]
    InvalidAis(Decimal),

    #[error("youth stage {stage} exempt fraction must be between 0 and 1, got {fraction}")]
    InvalidExemptFraction { stage: usize, fraction: Decimal },

    #[error("youth stage {stage} cap must be non-negative, got {cap}")]
    InvalidExemptionCap { stage: usize, cap: Decimal },

    #[error("too many youth stages: {0}")]
    TooManyStages(usize),

    #[error("invalid bracket table: {0}")]
    Brackets(#[from] BracketTableError),
}

/// Exemption granted at one stage of the youth program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionRule {
    /// Human-readable stage name shown by the presentation layer.
    pub label: String,

    /// Share of the taxable base that is exempt, in [0, 1].
    pub exempt_fraction: Decimal,

    /// Absolute ceiling on the exemption, in multiples of the AIS.
    pub cap_in_ais: Decimal,
}

impl ExemptionRule {
    pub fn new(
        label: impl Into<String>,
        exempt_fraction: Decimal,
        cap_in_ais: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            exempt_fraction,
            cap_in_ais,
        }
    }

    /// The exemption ceiling in currency.
    pub fn cap(
        &self,
        ais: Decimal,
    ) -> Decimal {
        self.cap_in_ais * ais
    }
}

/// One year's worth of rates, brackets and youth exemptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub name: String,

    /// VAT rate applied to domestic services (e.g. 0.23).
    pub vat_rate: Decimal,

    /// Contribution rate applied to the social security base (e.g. 0.214).
    pub social_security_rate: Decimal,

    /// Share of VAT-exclusive revenue counted as relevant income (e.g. 0.70).
    pub social_security_base_fraction: Decimal,

    /// Share of VAT-exclusive revenue treated as taxable profit (e.g. 0.75).
    pub simplified_regime_coefficient: Decimal,

    /// Annual reference index value used to cap exemptions.
    pub ais: Decimal,

    /// Exemption per youth stage; index 0 is `Stage(1)`.
    #[serde(default)]
    pub youth_exemptions: Vec<ExemptionRule>,

    #[serde(default)]
    pub brackets: BracketTable,
}

impl TaxYearConfig {
    /// 2025 rules: four youth stages, each capped at 55 × AIS.
    pub fn portugal_2025() -> Self {
        let cap = dec!(55);
        Self {
            name: "pt-2025".to_string(),
            vat_rate: dec!(0.23),
            social_security_rate: dec!(0.214),
            social_security_base_fraction: dec!(0.70),
            simplified_regime_coefficient: dec!(0.75),
            ais: dec!(509.27),
            youth_exemptions: vec![
                ExemptionRule::new("Year 1", dec!(1.00), cap),
                ExemptionRule::new("Years 2-4", dec!(0.75), cap),
                ExemptionRule::new("Years 5-7", dec!(0.50), cap),
                ExemptionRule::new("Years 8-10", dec!(0.25), cap),
            ],
            brackets: BracketTable::new(vec![
                TaxBracket::bounded(dec!(7703), dec!(0.1325)),
                TaxBracket::bounded(dec!(11623), dec!(0.18)),
                TaxBracket::bounded(dec!(16472), dec!(0.23)),
                TaxBracket::bounded(dec!(21321), dec!(0.26)),
                TaxBracket::bounded(dec!(27146), dec!(0.30)),
                TaxBracket::bounded(dec!(39791), dec!(0.35)),
                TaxBracket::bounded(dec!(64179), dec!(0.37)),
                TaxBracket::bounded(dec!(90000), dec!(0.45)),
                TaxBracket::unbounded(dec!(0.48)),
            ]),
        }
    }

    /// 2024 rules: five youth stages with decreasing caps.
    pub fn portugal_2024() -> Self {
        Self {
            name: "pt-2024".to_string(),
            vat_rate: dec!(0.23),
            social_security_rate: dec!(0.214),
            social_security_base_fraction: dec!(0.70),
            simplified_regime_coefficient: dec!(0.75),
            ais: dec!(509.26),
            youth_exemptions: vec![
                ExemptionRule::new("Year 1", dec!(1.00), dec!(40)),
                ExemptionRule::new("Year 2", dec!(0.75), dec!(30)),
                ExemptionRule::new("Year 3", dec!(0.50), dec!(20)),
                ExemptionRule::new("Year 4", dec!(0.50), dec!(20)),
                ExemptionRule::new("Year 5", dec!(0.25), dec!(10)),
            ],
            brackets: BracketTable::new(vec![
                TaxBracket::bounded(dec!(7703), dec!(0.1325)),
                TaxBracket::bounded(dec!(11623), dec!(0.18)),
                TaxBracket::bounded(dec!(16432), dec!(0.23)),
                TaxBracket::bounded(dec!(21041), dec!(0.265)),
                TaxBracket::bounded(dec!(27135), dec!(0.285)),
                TaxBracket::bounded(dec!(39251), dec!(0.35)),
                TaxBracket::bounded(dec!(51997), dec!(0.37)),
                TaxBracket::bounded(dec!(81479), dec!(0.435)),
                TaxBracket::unbounded(dec!(0.45)),
            ]),
        }
    }

    /// Looks a built-in rule set up by name; see [`PRESET_NAMES`].
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "pt-2025" => Some(Self::portugal_2025()),
            "pt-2024" => Some(Self::portugal_2024()),
            _ => None,
        }
    }

    /// The exemption rule for `stage`, if this rule set defines one.
    pub fn exemption_rule(
        &self,
        stage: YouthProgramStage,
    ) -> Option<&ExemptionRule> {
        match stage {
            YouthProgramStage::None => None,
            YouthProgramStage::Stage(0) => None,
            YouthProgramStage::Stage(n) => self.youth_exemptions.get(usize::from(n) - 1),
        }
    }

    /// Every selectable stage, `None` first, paired with its label.
    pub fn stages(&self) -> Vec<(YouthProgramStage, &str)> {
        std::iter::once((YouthProgramStage::None, "None"))
            .chain(
                self.youth_exemptions
                    .iter()
                    .enumerate()
                    .filter_map(|(index, rule)| {
                        let n = u8::try_from(index + 1).ok()?;
                        Some((YouthProgramStage::Stage(n), rule.label.as_str()))
                    }),
            )
            .collect()
    }

    /// Checks every rate, cap and the bracket table.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{ConfigError, TaxYearConfig};
    ///
    /// let config = TaxYearConfig {
    ///     ais: dec!(0),
    ///     ..TaxYearConfig::portugal_2025()
    /// };
    ///
    /// assert_eq!(config.validate(), Err(ConfigError::InvalidAis(dec!(0))));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let is_fraction = |value: Decimal| value >= Decimal::ZERO && value <= Decimal::ONE;

        if !is_fraction(self.vat_rate) {
            return Err(ConfigError::InvalidVatRate(self.vat_rate));
        }
        if !is_fraction(self.social_security_rate) {
            return Err(ConfigError::InvalidSocialSecurityRate(
                self.social_security_rate,
            ));
        }
        if !is_fraction(self.social_security_base_fraction) {
            return Err(ConfigError::InvalidSocialSecurityBase(
                self.social_security_base_fraction,
            ));
        }
        if !is_fraction(self.simplified_regime_coefficient) {
            return Err(ConfigError::InvalidCoefficient(
                self.simplified_regime_coefficient,
            ));
        }
        if self.ais <= Decimal::ZERO {
            return Err(ConfigError::InvalidAis(self.ais));
        }
        if self.youth_exemptions.len() > usize::from(u8::MAX) {
            return Err(ConfigError::TooManyStages(self.youth_exemptions.len()));
        }
        for (index, rule) in self.youth_exemptions.iter().enumerate() {
            let stage = index + 1;
            if !is_fraction(rule.exempt_fraction) {
                return Err(ConfigError::InvalidExemptFraction {
                    stage,
                    fraction: rule.exempt_fraction,
                });
            }
            if rule.cap_in_ais < Decimal::ZERO {
                return Err(ConfigError::InvalidExemptionCap {
                    stage,
                    cap: rule.cap_in_ais,
                });
            }
        }
        self.brackets.validate()?;
        Ok(())
    }
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self::portugal_2025()
    }
}
