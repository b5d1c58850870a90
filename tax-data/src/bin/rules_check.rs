use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_data::{BracketLoader, RuleSetLoader};

/// Validate a rule-set file before using it with the calculator.
///
/// The rule set is a TOML document with the rates, youth exemptions and,
/// optionally, the bracket table. A bracket table can also be supplied as a
/// CSV file with the following columns:
/// - upper_bound: Top of the bracket (empty for the final, unbounded bracket)
/// - rate: The marginal tax rate as a decimal (e.g., 0.1325)
#[derive(Parser, Debug)]
#[command(name = "tax-rules-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML rule-set file
    #[arg(short, long)]
    rules: PathBuf,

    /// CSV bracket table replacing the one in the rule set
    #[arg(short, long)]
    brackets: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.brackets {
        Some(path) => {
            println!("Loading brackets from: {}", path.display());
            let table = BracketLoader::load_file(path)
                .with_context(|| format!("Failed to load brackets: {}", path.display()))?;
            println!("Parsed {} brackets from CSV", table.len());

            RuleSetLoader::load_file_with_brackets(&args.rules, table)
        }
        None => RuleSetLoader::load_file(&args.rules),
    }
    .with_context(|| format!("Invalid rule set: {}", args.rules.display()))?;

    println!(
        "Rule set '{}' is valid: {} youth stages, {} brackets.",
        config.name,
        config.youth_exemptions.len(),
        config.brackets.len()
    );

    Ok(())
}
