//! Error types for survey data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a survey table.
///
/// Uploads have no path on disk; their variants carry the uploaded file name
/// in `path` instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or upload has no content.
    #[error("no data in {path}")]
    EmptyData { path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// A message suitable for showing to the person who picked the file.
    pub fn user_message(&self) -> String {
        match self {
            Self::FileNotFound { path } => format!(
                "The file '{}' could not be found. Check the path and try again.",
                path.display()
            ),
            Self::FileRead { path, .. } => format!(
                "The file '{}' could not be read. Check that you have permission to open it.",
                path.display()
            ),
            Self::EmptyData { path } => format!(
                "The file '{}' is empty. Choose a CSV file that contains a header row and data.",
                path.display()
            ),
            Self::CsvParse { path, .. } => format!(
                "The file '{}' is not a readable CSV file. Make sure it is comma separated and UTF-8 encoded.",
                path.display()
            ),
            Self::DataFrame { .. } => "The data could not be processed.".to_string(),
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/survey.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/survey.csv");
    }

    #[test]
    fn test_user_message_names_file() {
        let err = IngestError::EmptyData {
            path: PathBuf::from("upload.csv"),
        };
        assert!(err.user_message().contains("'upload.csv' is empty"));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("soccer".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
