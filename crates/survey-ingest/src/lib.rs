//! Survey data ingestion.
//!
//! Loads survey tables into Polars DataFrames from three places:
//!
//! - **Files**: a CSV path on disk
//! - **Uploads**: raw bytes handed over by a file picker
//! - **Sample**: the bundled `sample_data.csv`
//!
//! Missing and empty inputs are reported as distinct [`IngestError`] kinds so
//! callers can show a specific remediation message.

mod csv;
mod error;
mod sample;
mod upload;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{load_csv_file, read_csv_bytes};

// === Sample Data ===
pub use sample::{SAMPLE_DATA_FILE, load_sample_data, sample_data_path};

// === Uploads ===
pub use upload::Upload;
