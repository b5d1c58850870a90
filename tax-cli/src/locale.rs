//! User-facing labels in Portuguese and English.

use std::borrow::Cow;

use clap::ValueEnum;
use serde::Serialize;
use tax_core::{BreakdownCategory, Periodicity};

/// Output language. Portuguese is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    pub fn category_label(
        &self,
        category: BreakdownCategory,
    ) -> &'static str {
        match (self, category) {
            (Self::Pt, BreakdownCategory::SocialSecurity) => "Segurança Social",
            (Self::Pt, BreakdownCategory::IncomeTax) => "IRS",
            (Self::Pt, BreakdownCategory::Vat) => "IVA",
            (Self::Pt, BreakdownCategory::Net) => "Líquido",
            (Self::En, BreakdownCategory::SocialSecurity) => "Social Security",
            (Self::En, BreakdownCategory::IncomeTax) => "Income Tax",
            (Self::En, BreakdownCategory::Vat) => "VAT",
            (Self::En, BreakdownCategory::Net) => "Net",
        }
    }

    pub fn gross_label(&self) -> &'static str {
        match self {
            Self::Pt => "Faturado",
            Self::En => "Gross billed",
        }
    }

    pub fn total_withheld_label(&self) -> &'static str {
        match self {
            Self::Pt => "Total entregue ao Estado",
            Self::En => "Total paid to the State",
        }
    }

    pub fn effective_rate_label(&self) -> &'static str {
        match self {
            Self::Pt => "Taxa efetiva de IRS",
            Self::En => "Effective income tax rate",
        }
    }

    /// Title line naming the period and the rule set in use.
    pub fn heading(
        &self,
        periodicity: Periodicity,
        rule_set: &str,
    ) -> String {
        let period = match (self, periodicity) {
            (Self::Pt, Periodicity::Monthly) => "Valores mensais",
            (Self::Pt, Periodicity::Annual) => "Valores anuais",
            (Self::En, Periodicity::Monthly) => "Monthly figures",
            (Self::En, Periodicity::Annual) => "Annual figures",
        };
        format!("{period} ({rule_set})")
    }

    pub fn no_youth_program_label(&self) -> &'static str {
        match self {
            Self::Pt => "Sem IRS Jovem",
            Self::En => "No youth program",
        }
    }

    /// Localizes a rule set's stage label.
    ///
    /// Rule sets label stages in English (`Year 1`, `Years 2-4`); Portuguese
    /// output rewrites the leading word. Other labels pass through as is.
    pub fn stage_label<'a>(
        &self,
        label: &'a str,
    ) -> Cow<'a, str> {
        if *self == Self::En {
            return Cow::Borrowed(label);
        }
        if let Some(rest) = label.strip_prefix("Years ") {
            Cow::Owned(format!("Anos {rest}"))
        } else if let Some(rest) = label.strip_prefix("Year ") {
            Cow::Owned(format!("Ano {rest}"))
        } else {
            Cow::Borrowed(label)
        }
    }
}
