pub mod app;
pub mod format;
pub mod locale;
pub mod logging;
pub mod report;

pub use locale::Language;
pub use report::OutputFormat;
