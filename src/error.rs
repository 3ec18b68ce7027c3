use crate::weather_data::error::FetchError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimaError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Location query must not be empty")]
    EmptyLocation,

    #[error("API credential must not be empty")]
    EmptyCredential,

    #[error("Environment variable '{0}' is not set")]
    MissingCredential(&'static str),

    #[error("Unknown unit system '{0}', expected 'metric' or 'imperial'")]
    UnknownUnits(String),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),

    #[error("Failed to create export directory '{0}'")]
    ExportDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Export path exists but is not a directory: '{0}'")]
    ExportDirNotADirectory(PathBuf),

    #[error("Failed to write export file '{0}'")]
    ExportIo(PathBuf, #[source] std::io::Error),

    #[error("Required column '{column}' is missing or incomplete in CSV data")]
    CsvColumn { column: String },

    #[error("Invalid timestamp '{value}' in CSV data")]
    CsvTimestamp { value: String },
}
