//! Survey export.
//!
//! Turns a survey table into download payloads:
//!
//! - **CSV**: UTF-8 with a byte order mark
//! - **XLSX**: one worksheet, typed cells
//! - **JSON**: array of row objects, pretty printed
//!
//! Every serializer is deterministic, so an [`ExportCache`] keyed by content
//! digest can sit in front of them without changing results.

mod cache;
mod csv_export;
mod error;
mod excel;
mod exporter;
mod filename;
mod json;
mod size;

pub use cache::{CacheKey, CacheStats, DEFAULT_CACHE_TTL, ExportCache, content_digest};
pub use csv_export::{UTF8_BOM, export_to_csv};
pub use error::{ExportError, Result};
pub use excel::export_to_excel;
pub use exporter::{ExportArtifact, Exporter};
pub use filename::{
    DEFAULT_BASE_NAME, generate_filename, generate_filename_at, mime_type, sanitize_base_name,
};
pub use json::export_to_json;
pub use size::{SizeWarning, size_warnings};
