//! Rendering a [`TaxBreakdown`] for the terminal or for other programs.

use std::borrow::Cow;
use std::fmt;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{
    BreakdownCategory, MonthlyBreakdown, Periodicity, TaxBreakdown, TaxYearConfig,
};

use crate::Language;
use crate::format::{format_currency, format_percent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// One slice of the proportional chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub category: BreakdownCategory,
    pub label: &'static str,
    pub color: &'static str,
    /// Amount in the displayed period.
    pub amount: Decimal,
    pub share: Decimal,
}

/// Everything the shell shows for one computation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub rule_set: String,
    pub periodicity: Periodicity,
    pub language: Language,
    pub annual: TaxBreakdown,
    pub monthly: MonthlyBreakdown,
    pub chart: Vec<ChartSlice>,
}

impl Report {
    /// Builds the view of `breakdown`, showing per-month amounts when the
    /// input was monthly.
    pub fn new(
        breakdown: TaxBreakdown,
        periodicity: Periodicity,
        rule_set: &str,
        language: Language,
    ) -> Self {
        let monthly = breakdown.monthly();
        let chart = breakdown
            .shares()
            .into_iter()
            .map(|share| ChartSlice {
                category: share.category,
                label: language.category_label(share.category),
                color: share.category.color(),
                amount: match periodicity {
                    Periodicity::Monthly => monthly_amount(&monthly, share.category),
                    Periodicity::Annual => share.amount,
                },
                share: share.share,
            })
            .collect();

        Self {
            rule_set: rule_set.to_string(),
            periodicity,
            language,
            annual: breakdown,
            monthly,
            chart,
        }
    }

    fn displayed_gross(&self) -> Decimal {
        match self.periodicity {
            Periodicity::Monthly => self.monthly.gross_revenue,
            Periodicity::Annual => self.annual.gross_revenue,
        }
    }

    fn displayed_total_withheld(&self) -> Decimal {
        match self.periodicity {
            Periodicity::Monthly => self.monthly.total_withheld,
            Periodicity::Annual => self.annual.total_withheld,
        }
    }

    /// Human-readable table, one line per category.
    pub fn render_table(&self) -> String {
        self.to_string()
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render(
        &self,
        format: OutputFormat,
    ) -> serde_json::Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Json => self.render_json(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let lang = self.language;

        writeln!(f, "{}", lang.heading(self.periodicity, &self.rule_set))?;
        writeln!(
            f,
            "{:<28}{:>14}",
            lang.gross_label(),
            format_currency(self.displayed_gross(), lang)
        )?;
        for slice in &self.chart {
            writeln!(
                f,
                "{:<28}{:>14}{:>10}  {}",
                slice.label,
                format_currency(slice.amount, lang),
                format_percent(slice.share),
                slice.color
            )?;
        }
        writeln!(
            f,
            "{:<28}{:>14}",
            lang.total_withheld_label(),
            format_currency(self.displayed_total_withheld(), lang)
        )?;
        writeln!(
            f,
            "{:<28}{:>14}",
            lang.effective_rate_label(),
            format_percent(self.annual.effective_income_tax_rate)
        )
    }
}

fn monthly_amount(
    monthly: &MonthlyBreakdown,
    category: BreakdownCategory,
) -> Decimal {
    match category {
        BreakdownCategory::SocialSecurity => monthly.social_security,
        BreakdownCategory::IncomeTax => monthly.income_tax,
        BreakdownCategory::Vat => monthly.vat,
        BreakdownCategory::Net => monthly.net_income,
    }
}

/// Numbered list of the youth stages the rule set offers.
pub fn render_stages(
    config: &TaxYearConfig,
    lang: Language,
) -> String {
    config
        .stages()
        .into_iter()
        .map(|(stage, label)| {
            let label = if stage.number() == 0 {
                Cow::Borrowed(lang.no_youth_program_label())
            } else {
                lang.stage_label(label)
            };
            format!("{:>2}  {label}\n", stage.number())
        })
        .collect()
}
