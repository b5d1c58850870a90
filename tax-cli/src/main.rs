use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use tax_cli::report::{Report, render_stages};
use tax_cli::{Language, OutputFormat, app, logging};
use tax_core::TaxEngine;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Where each euro billed by a self-employed worker goes.
///
/// Splits revenue into VAT, social security, income tax and net income
/// under the simplified regime, using a built-in rule set or one loaded
/// from disk.
#[derive(Debug, Parser)]
#[command(name = "tax-breakdown", version, about)]
struct Cli {
    /// Revenue billed to domestic clients, VAT included.
    #[arg(long, default_value = "30000", allow_hyphen_values = true)]
    domestic: String,

    /// Revenue billed to clients abroad (no VAT).
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    foreign: String,

    /// Treat the amounts as monthly and show monthly figures.
    #[arg(long)]
    monthly: bool,

    /// Youth program stage; 0 for none. See --list-stages.
    #[arg(long, default_value_t = 0)]
    youth_stage: u8,

    /// Exempt from social security contributions.
    #[arg(long)]
    ss_exempt: bool,

    /// Built-in rule set.
    #[arg(long, default_value = "pt-2025")]
    preset: String,

    /// TOML rule-set file, used instead of the preset.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// CSV bracket table (`upper_bound,rate`) replacing the rule set's brackets.
    #[arg(long)]
    brackets: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[arg(long, value_enum, default_value_t = Language::Pt)]
    lang: Language,

    /// Print the youth stages of the rule set and exit.
    #[arg(long)]
    list_stages: bool,

    /// Log filter (e.g. `debug`); overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;

    let config =
        app::resolve_rule_set(&cli.preset, cli.rules.as_deref(), cli.brackets.as_deref())?;

    if cli.list_stages {
        print!("{}", render_stages(&config, cli.lang));
        return Ok(());
    }

    let input = app::build_input(
        &cli.domestic,
        &cli.foreign,
        cli.monthly,
        cli.youth_stage,
        cli.ss_exempt,
        &config,
    )?;

    let rule_set = config.name.clone();
    let engine = TaxEngine::new(config);
    let breakdown = engine.compute_breakdown(&input);
    debug!(net_income = %breakdown.net_income, "breakdown ready");

    let report = Report::new(breakdown, input.periodicity, &rule_set, cli.lang);
    let rendered = report.render(cli.format)?;
    print!("{rendered}");
    if cli.format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
