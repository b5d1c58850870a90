use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketTable, BracketTableError, TaxBracket};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bracket table: {0}")]
    Invalid(#[from] BracketTableError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket CSV file.
///
/// - `upper_bound`: top of the bracket (empty for the final, unbounded bracket)
/// - `rate`: the marginal rate as a decimal (e.g., 0.1325 for 13.25%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            upper_bound: record.upper_bound,
            marginal_rate: record.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for progressive bracket tables stored as CSV.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse raw bracket records from a CSV reader, in file order.
    pub fn parse_records<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a bracket table from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<BracketTable, BracketLoaderError> {
        let records = Self::parse_records(reader)?;
        let table = BracketTable::new(records.into_iter().map(TaxBracket::from).collect());
        table.validate()?;

        debug!(brackets = table.len(), "parsed bracket table");
        Ok(table)
    }

    /// Read and validate a bracket table from a CSV file on disk.
    pub fn load_file(path: &Path) -> Result<BracketTable, BracketLoaderError> {
        let file = File::open(path).map_err(|source| BracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(file)
    }
}
