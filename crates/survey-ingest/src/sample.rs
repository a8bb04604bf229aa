//! The bundled sample survey.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::csv::load_csv_file;
use crate::error::Result;

/// File name of the sample dataset inside the data directory.
pub const SAMPLE_DATA_FILE: &str = "sample_data.csv";

/// Path of the sample dataset under `data_dir`.
pub fn sample_data_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SAMPLE_DATA_FILE)
}

/// Loads the sports interest sample shipped in `data_dir`.
pub fn load_sample_data(data_dir: &Path) -> Result<DataFrame> {
    load_csv_file(&sample_data_path(data_dir))
}
