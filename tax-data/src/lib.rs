//! Loading rule sets from external files.
//!
//! A rule set is a TOML document shaped like [`tax_core::TaxYearConfig`];
//! a bracket table may also come from a separate CSV file. Everything
//! loaded here is validated before it is handed back.

pub mod brackets;
pub mod rule_set;

pub use brackets::{BracketLoader, BracketLoaderError, BracketRecord};
pub use rule_set::{RuleSetLoader, RuleSetLoaderError};
