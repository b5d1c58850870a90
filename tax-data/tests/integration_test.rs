//! Integration tests that load the shipped rule-set fixtures from disk and
//! run them through the engine.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{IncomeInput, TaxEngine, TaxYearConfig, YouthProgramStage};
use tax_data::{BracketLoader, RuleSetLoader, RuleSetLoaderError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

#[test]
fn test_toml_rule_set_matches_2025_preset() {
    let config = RuleSetLoader::load_file(&fixture("pt-2025.toml")).expect("Failed to load rules");

    assert_eq!(config, TaxYearConfig::portugal_2025());
}

#[test]
fn test_split_rule_set_matches_2024_preset() {
    let brackets =
        BracketLoader::load_file(&fixture("brackets_2024.csv")).expect("Failed to load brackets");

    let config = RuleSetLoader::load_file_with_brackets(&fixture("pt-2024-rates.toml"), brackets)
        .expect("Failed to load rules");

    assert_eq!(config, TaxYearConfig::portugal_2024());
}

#[test]
fn test_loaded_rule_set_reproduces_golden_breakdown() {
    let config = RuleSetLoader::load_file(&fixture("pt-2025.toml")).expect("Failed to load rules");
    let engine = TaxEngine::new(config);

    let result = engine.compute_breakdown(&IncomeInput::annual(dec!(30000), dec!(0)));

    assert_eq!(result.gross_revenue, dec!(30000.00));
    assert_eq!(result.vat, dec!(5609.76));
    assert_eq!(result.social_security, dec!(3653.66));
    assert_eq!(result.income_tax, dec!(3314.90));
    assert_eq!(result.net_income, dec!(17421.68));
    assert_eq!(result.total_withheld, dec!(12578.32));
}

#[test]
fn test_loaded_2024_rules_cap_year_one_at_40_ais() {
    let brackets =
        BracketLoader::load_file(&fixture("brackets_2024.csv")).expect("Failed to load brackets");
    let config = RuleSetLoader::load_file_with_brackets(&fixture("pt-2024-rates.toml"), brackets)
        .expect("Failed to load rules");
    let input = IncomeInput {
        youth_stage: YouthProgramStage::Stage(1),
        ..IncomeInput::annual(dec!(100000), dec!(0))
    };

    let result = TaxEngine::new(config).compute_breakdown(&input);

    // 40 × 509.26
    assert_eq!(result.youth_exemption, dec!(20370.40));
}

#[test]
fn test_rates_file_alone_is_rejected() {
    let err = RuleSetLoader::load_file(&fixture("pt-2024-rates.toml")).expect_err("Should fail");

    assert!(matches!(err, RuleSetLoaderError::Invalid(_)), "got {err:?}");
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let result = RuleSetLoader::load_file(Path::new("/this/path/does/not/exist.toml"));

    assert!(result.is_err());
}
