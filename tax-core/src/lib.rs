pub mod calculations;
pub mod models;
pub mod sanitize;

pub use calculations::TaxEngine;
pub use models::*;
