use std::path::Path;

use anyhow::{Context, Result, bail};
use tax_core::sanitize::parse_amount;
use tax_core::{IncomeInput, PRESET_NAMES, Periodicity, TaxYearConfig, YouthProgramStage};
use tax_data::{BracketLoader, RuleSetLoader};
use tracing::{debug, info};

/// Picks the rule set: a TOML file when given, otherwise a named preset.
/// A CSV bracket table, when given, replaces the rule set's brackets.
pub fn resolve_rule_set(
    preset: &str,
    rules: Option<&Path>,
    brackets: Option<&Path>,
) -> Result<TaxYearConfig> {
    let table = brackets
        .map(|path| {
            BracketLoader::load_file(path)
                .with_context(|| format!("Failed to load brackets: {}", path.display()))
        })
        .transpose()?;

    let config = match (rules, table) {
        (Some(path), Some(table)) => RuleSetLoader::load_file_with_brackets(path, table)
            .with_context(|| format!("Failed to load rule set: {}", path.display()))?,
        (Some(path), None) => RuleSetLoader::load_file(path)
            .with_context(|| format!("Failed to load rule set: {}", path.display()))?,
        (None, table) => {
            let Some(config) = TaxYearConfig::preset(preset) else {
                bail!(
                    "unknown preset '{preset}' (available: {})",
                    PRESET_NAMES.join(", ")
                );
            };
            match table {
                Some(table) => RuleSetLoader::with_brackets(config, table)
                    .context("Bracket table does not fit the preset")?,
                None => config,
            }
        }
    };

    info!(rule_set = %config.name, "using rule set");
    Ok(config)
}

/// Turns raw command-line values into an engine input.
///
/// Revenue text is sanitized (garbage and negatives become zero); the
/// youth stage must be one the rule set offers.
pub fn build_input(
    domestic: &str,
    foreign: &str,
    monthly: bool,
    youth_stage: u8,
    social_security_exempt: bool,
    config: &TaxYearConfig,
) -> Result<IncomeInput> {
    let youth_stage = YouthProgramStage::from_number(youth_stage);
    if youth_stage != YouthProgramStage::None && config.exemption_rule(youth_stage).is_none() {
        bail!(
            "youth stage {} is not offered by rule set '{}' (choose 0-{})",
            youth_stage.number(),
            config.name,
            config.youth_exemptions.len()
        );
    }

    let input = IncomeInput {
        domestic_revenue: parse_amount(domestic),
        foreign_revenue: parse_amount(foreign),
        periodicity: if monthly {
            Periodicity::Monthly
        } else {
            Periodicity::Annual
        },
        youth_stage,
        social_security_exempt,
    };

    debug!(?input, "built income input");
    Ok(input)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // resolve_rule_set tests
    // =========================================================================

    #[test]
    fn resolves_named_preset() {
        let config = resolve_rule_set("pt-2024", None, None).unwrap();

        assert_eq!(config, TaxYearConfig::portugal_2024());
    }

    #[test]
    fn unknown_preset_lists_alternatives() {
        let err = resolve_rule_set("fr-2025", None, None).unwrap_err();

        assert_eq!(
            err.to_string(),
            "unknown preset 'fr-2025' (available: pt-2025, pt-2024)"
        );
    }

    #[test]
    fn bracket_csv_overrides_preset_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.csv");
        fs::write(&path, "upper_bound,rate\n,0.20\n").unwrap();

        let config = resolve_rule_set("pt-2025", None, Some(&path)).unwrap();

        assert_eq!(config.brackets.len(), 1);
        assert_eq!(config.ais, dec!(509.27));
    }

    #[test]
    fn missing_rules_file_names_the_path() {
        let err = resolve_rule_set("pt-2025", Some(Path::new("/no/rules.toml")), None).unwrap_err();

        assert!(err.to_string().contains("/no/rules.toml"), "{err:#}");
    }

    // =========================================================================
    // build_input tests
    // =========================================================================

    #[test]
    fn build_input_sanitizes_revenue() {
        let config = TaxYearConfig::portugal_2025();

        let input = build_input(" 2500 ", "-3", true, 0, false, &config).unwrap();

        assert_eq!(input.domestic_revenue, dec!(2500));
        assert_eq!(input.foreign_revenue, dec!(0));
        assert_eq!(input.periodicity, Periodicity::Monthly);
        assert_eq!(input.youth_stage, YouthProgramStage::None);
    }

    #[test]
    fn build_input_accepts_configured_stage() {
        let config = TaxYearConfig::portugal_2024();

        let input = build_input("30000", "", false, 5, true, &config).unwrap();

        assert_eq!(input.youth_stage, YouthProgramStage::Stage(5));
        assert!(input.social_security_exempt);
    }

    #[test]
    fn build_input_rejects_stage_outside_rule_set() {
        let config = TaxYearConfig::portugal_2025();

        let err = build_input("30000", "0", false, 5, false, &config).unwrap_err();

        assert!(err.to_string().contains("choose 0-4"), "{err}");
    }
}
