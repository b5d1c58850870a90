//! Tax computations for the simplified self-employment regime.
//!
//! [`progressive`] applies a bracket schedule; [`engine`] composes VAT,
//! social security and income tax into a [`crate::TaxBreakdown`].

pub mod common;
pub mod engine;
pub mod progressive;

pub use engine::TaxEngine;
pub use progressive::progressive_tax;
