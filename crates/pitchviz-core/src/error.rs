// crates/pitchviz-core/src/error.rs

use serde::Serialize;
use thiserror::Error;

/// Failures turning uploaded bytes into a record set.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Only .csv files are accepted (got '{0}')")]
    UnsupportedExtension(String),

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars operation failed: {0}")]
    Frame(#[from] polars::error::PolarsError),
}

/// Displayable schema failures. These are values, never propagated past `analyze`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaError {
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Uploaded file contains no data rows")]
    NoDataRows,

    #[error("Column '{column}' must contain numeric values")]
    NonNumericColumn { column: String },

    #[error("Could not derive velocity columns: {message}")]
    Frame { message: String },
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {name} has invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
