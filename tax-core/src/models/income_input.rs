use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the revenue figures of an [`IncomeInput`] cover a month or a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    Monthly,
    #[default]
    Annual,
}

impl Periodicity {
    /// Number of periods in a year; the annualization multiplier.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Annual => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

/// Position of the worker in the youth reduced-taxation program.
///
/// `Stage(n)` is 1-based and indexes the exemption table of the active
/// rule set; see [`crate::TaxYearConfig::exemption_rule`]. Stages order
/// naturally: `None < Stage(1) < Stage(2) < ...`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum YouthProgramStage {
    #[default]
    None,
    Stage(u8),
}

impl YouthProgramStage {
    /// Maps the shell's numeric choice to a stage; `0` means no program.
    pub fn from_number(number: u8) -> Self {
        match number {
            0 => Self::None,
            n => Self::Stage(n),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Stage(n) => *n,
        }
    }
}

impl fmt::Display for YouthProgramStage {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Stage(n) => write!(f, "stage {n}"),
        }
    }
}

/// Income for one period, as supplied by the caller.
///
/// Amounts are expected to be non-negative; the boundary helpers in
/// [`crate::sanitize`] produce such values from raw user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeInput {
    /// Revenue billed to domestic clients, VAT included.
    pub domestic_revenue: Decimal,

    /// Revenue billed to clients without a domestic presence; VAT-exempt.
    pub foreign_revenue: Decimal,

    pub periodicity: Periodicity,

    pub youth_stage: YouthProgramStage,

    /// When set, no social-security contribution is due.
    pub social_security_exempt: bool,
}

impl IncomeInput {
    pub fn annual(
        domestic_revenue: Decimal,
        foreign_revenue: Decimal,
    ) -> Self {
        Self {
            domestic_revenue,
            foreign_revenue,
            ..Self::default()
        }
    }

    pub fn monthly(
        domestic_revenue: Decimal,
        foreign_revenue: Decimal,
    ) -> Self {
        Self {
            domestic_revenue,
            foreign_revenue,
            periodicity: Periodicity::Monthly,
            ..Self::default()
        }
    }
}

impl Default for IncomeInput {
    fn default() -> Self {
        Self {
            domestic_revenue: Decimal::ZERO,
            foreign_revenue: Decimal::ZERO,
            periodicity: Periodicity::Annual,
            youth_stage: YouthProgramStage::None,
            social_security_exempt: false,
        }
    }
}
