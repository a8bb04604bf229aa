//! Advisory size checks run before an export.

use std::fmt;

use polars::prelude::DataFrame;
use survey_model::SizeLimits;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// A threshold the frame exceeds. Never blocks an export.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeWarning {
    TooManyRows { rows: usize, limit: usize },
    LargeFootprint { megabytes: f64, limit: f64 },
}

impl fmt::Display for SizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyRows { rows, limit } => write!(
                f,
                "{rows} rows exceeds {limit}; the export may take a while"
            ),
            Self::LargeFootprint { megabytes, limit } => write!(
                f,
                "data uses about {megabytes:.1} MB in memory (limit {limit:.0} MB); the export may be slow"
            ),
        }
    }
}

/// Checks `df` against `limits`.
pub fn size_warnings(df: &DataFrame, limits: &SizeLimits) -> Vec<SizeWarning> {
    let mut warnings = Vec::new();
    if df.height() > limits.max_rows {
        warnings.push(SizeWarning::TooManyRows {
            rows: df.height(),
            limit: limits.max_rows,
        });
    }
    let megabytes = df.estimated_size() as f64 / BYTES_PER_MEGABYTE;
    if megabytes > limits.max_megabytes {
        warnings.push(SizeWarning::LargeFootprint {
            megabytes,
            limit: limits.max_megabytes,
        });
    }
    warnings
}
