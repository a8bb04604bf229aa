//! Serializer front end with optional caching.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use polars::prelude::DataFrame;
use survey_model::{DEFAULT_EXPORT_PREFIX, DEFAULT_SHEET_NAME, ExportFormat, SessionConfig, SizeLimits};
use tracing::{info, warn};

use crate::cache::{CacheKey, ExportCache};
use crate::csv_export::export_to_csv;
use crate::error::Result;
use crate::excel::export_to_excel;
use crate::filename::generate_filename_at;
use crate::json::export_to_json;
use crate::size::{SizeWarning, size_warnings};

/// A finished download.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: &'static str,
    pub format: ExportFormat,
    /// Advisories raised for the exported frame.
    pub warnings: Vec<SizeWarning>,
}

/// Dispatches to the CSV, XLSX and JSON serializers.
#[derive(Debug, Clone)]
pub struct Exporter {
    sheet_name: String,
    prefix: String,
    cache: Option<ExportCache>,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME, DEFAULT_EXPORT_PREFIX)
    }
}

impl Exporter {
    /// An exporter without a cache.
    pub fn new(sheet_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            prefix: prefix.into(),
            cache: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        let exporter = Self::new(config.sheet_name.clone(), config.export_prefix.clone());
        if config.cache_enabled {
            exporter.with_cache(config.cache_ttl)
        } else {
            exporter
        }
    }

    pub fn with_cache(mut self, ttl: Duration) -> Self {
        self.cache = Some(ExportCache::new(ttl));
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn cache(&self) -> Option<&ExportCache> {
        self.cache.as_ref()
    }

    pub fn cache_mut(&mut self) -> Option<&mut ExportCache> {
        self.cache.as_mut()
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Serializes `df`, consulting the cache when one is configured.
    pub fn serialize(&mut self, df: &DataFrame, format: ExportFormat) -> Result<Vec<u8>> {
        let Some(cache) = self.cache.as_mut() else {
            return write_payload(df, format, &self.sheet_name);
        };

        let key = CacheKey::new(df, format, &self.sheet_name)?;
        if let Some(bytes) = cache.get(&key) {
            return Ok(bytes.to_vec());
        }
        let bytes = write_payload(df, format, &self.sheet_name)?;
        cache.insert(key, bytes.clone());
        Ok(bytes)
    }

    /// Serializes `df` and names the download with the current local time.
    pub fn export(
        &mut self,
        df: &DataFrame,
        format: ExportFormat,
        limits: &SizeLimits,
    ) -> Result<ExportArtifact> {
        self.export_at(df, format, limits, Local::now().naive_local())
    }

    /// Same as [`Exporter::export`] with an explicit filename timestamp.
    pub fn export_at(
        &mut self,
        df: &DataFrame,
        format: ExportFormat,
        limits: &SizeLimits,
        when: NaiveDateTime,
    ) -> Result<ExportArtifact> {
        let start = Instant::now();
        let warnings = size_warnings(df, limits);
        for warning in &warnings {
            warn!(format = %format, rows = df.height(), "{warning}");
        }

        let bytes = self.serialize(df, format)?;
        let filename = generate_filename_at(&self.prefix, format, when);
        info!(
            format = %format,
            filename = %filename,
            rows = df.height(),
            columns = df.width(),
            bytes = bytes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "exported data"
        );

        Ok(ExportArtifact {
            bytes,
            filename,
            mime_type: format.mime_type(),
            format,
            warnings,
        })
    }
}

fn write_payload(df: &DataFrame, format: ExportFormat, sheet_name: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => export_to_csv(df),
        ExportFormat::Excel => export_to_excel(df, sheet_name),
        ExportFormat::Json => export_to_json(df),
    }
}
