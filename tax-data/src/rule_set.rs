//! TOML rule-set documents.
//!
//! ## Format
//!
//! The document mirrors [`TaxYearConfig`] field for field. Decimal values
//! may be written as numbers or, to keep them exact, as strings:
//!
//! ```toml
//! name = "pt-2025"
//! vat_rate = "0.23"
//! social_security_rate = "0.214"
//! social_security_base_fraction = "0.70"
//! simplified_regime_coefficient = "0.75"
//! ais = "509.27"
//!
//! [[youth_exemptions]]
//! label = "Year 1"
//! exempt_fraction = "1"
//! cap_in_ais = "55"
//!
//! [[brackets]]
//! upper_bound = "7703"
//! marginal_rate = "0.1325"
//!
//! [[brackets]]
//! marginal_rate = "0.48"
//! ```
//!
//! A bracket without `upper_bound` is the final, unbounded bracket. The
//! `brackets` array may be omitted when the table is supplied separately
//! through [`RuleSetLoader::with_brackets`].

use std::fs;
use std::path::Path;

use tax_core::{BracketTable, ConfigError, TaxYearConfig};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading a rule set.
#[derive(Debug, Error)]
pub enum RuleSetLoaderError {
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule set: {0}")]
    Invalid(#[from] ConfigError),
}

/// Loader for [`TaxYearConfig`] documents.
pub struct RuleSetLoader;

impl RuleSetLoader {
    /// Deserialize and validate a rule set from TOML text.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_data::RuleSetLoader;
    ///
    /// let doc = r#"
    /// name = "flat"
    /// vat_rate = "0.23"
    /// social_security_rate = "0.214"
    /// social_security_base_fraction = "0.70"
    /// simplified_regime_coefficient = "0.75"
    /// ais = "509.27"
    ///
    /// [[brackets]]
    /// marginal_rate = "0.20"
    /// "#;
    ///
    /// let config = RuleSetLoader::from_toml(doc).unwrap();
    /// assert_eq!(config.name, "flat");
    /// assert!(config.youth_exemptions.is_empty());
    /// ```
    pub fn from_toml(text: &str) -> Result<TaxYearConfig, RuleSetLoaderError> {
        let config = Self::parse_unvalidated(text)?;
        config.validate()?;

        debug!(
            rule_set = %config.name,
            stages = config.youth_exemptions.len(),
            brackets = config.brackets.len(),
            "parsed rule set"
        );
        Ok(config)
    }

    /// Read a rule set from a TOML file on disk.
    pub fn load_file(path: &Path) -> Result<TaxYearConfig, RuleSetLoaderError> {
        let text = Self::read(path)?;
        let config = Self::from_toml(&text)?;

        info!(path = %path.display(), rule_set = %config.name, "loaded rule set");
        Ok(config)
    }

    /// Read a rule set whose brackets live in a separate table.
    ///
    /// Any `brackets` array in the TOML file is replaced by `brackets`
    /// before validation.
    pub fn load_file_with_brackets(
        path: &Path,
        brackets: BracketTable,
    ) -> Result<TaxYearConfig, RuleSetLoaderError> {
        let text = Self::read(path)?;
        let config = Self::parse_unvalidated(&text)?;

        Self::with_brackets(config, brackets)
    }

    /// Replace the bracket table of `config` and validate the result.
    pub fn with_brackets(
        config: TaxYearConfig,
        brackets: BracketTable,
    ) -> Result<TaxYearConfig, RuleSetLoaderError> {
        let config = TaxYearConfig { brackets, ..config };
        config.validate()?;
        Ok(config)
    }

    fn parse_unvalidated(text: &str) -> Result<TaxYearConfig, RuleSetLoaderError> {
        Ok(toml::from_str(text)?)
    }

    fn read(path: &Path) -> Result<String, RuleSetLoaderError> {
        fs::read_to_string(path).map_err(|source| RuleSetLoaderError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
