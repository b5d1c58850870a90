mod income_input;
mod tax_bracket;
mod tax_breakdown;
mod tax_year_config;

pub use income_input::{IncomeInput, Periodicity, YouthProgramStage};
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_breakdown::{BreakdownCategory, BreakdownShare, MonthlyBreakdown, TaxBreakdown};
pub use tax_year_config::{ConfigError, ExemptionRule, PRESET_NAMES, TaxYearConfig};
