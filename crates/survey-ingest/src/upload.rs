//! Uploaded files.

use polars::prelude::DataFrame;
use survey_common::format_file_size;

use crate::csv::read_csv_bytes;
use crate::error::Result;

/// A decoded upload with the size label shown in the history list.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub df: DataFrame,
    pub file_size: String,
}

impl Upload {
    /// Decodes `bytes` as CSV and records its size.
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let filename = filename.into();
        let df = read_csv_bytes(&filename, bytes)?;
        Ok(Self {
            filename,
            df,
            file_size: format_file_size(bytes.len() as u64),
        })
    }
}
