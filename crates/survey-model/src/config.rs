//! Session configuration options.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::schema::SurveySchema;

/// Number of loads remembered per session.
pub const DEFAULT_MAX_HISTORY: usize = 5;

/// How long a cached export payload stays valid.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Worksheet name used when none is given.
pub const DEFAULT_SHEET_NAME: &str = "Data";

/// Base name for exported files.
pub const DEFAULT_EXPORT_PREFIX: &str = "survey_data";

/// Directory holding the bundled sample dataset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Row count above which an export is flagged as large.
pub const DEFAULT_MAX_ROWS: usize = 100_000;

/// In-memory footprint above which an export is flagged as large.
pub const DEFAULT_MAX_MEGABYTES: f64 = 50.0;

/// Advisory thresholds checked before exporting. Exceeding them never blocks
/// the export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub max_rows: usize,
    pub max_megabytes: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_megabytes: DEFAULT_MAX_MEGABYTES,
        }
    }
}

/// Options controlling one dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on remembered loads; older entries are evicted.
    pub max_history: usize,

    /// Memoize export payloads by content digest.
    pub cache_enabled: bool,

    pub cache_ttl: Duration,

    pub size_limits: SizeLimits,

    /// Worksheet name for spreadsheet exports.
    pub sheet_name: String,

    /// Base name passed to filename generation.
    pub export_prefix: String,

    /// Where `sample_data.csv` is looked up.
    pub data_dir: PathBuf,

    pub schema: SurveySchema,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            cache_enabled: true,
            cache_ttl: DEFAULT_CACHE_TTL,
            size_limits: SizeLimits::default(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            schema: SurveySchema::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_size_limits(mut self, limits: SizeLimits) -> Self {
        self.size_limits = limits;
        self
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_schema(mut self, schema: SurveySchema) -> Self {
        self.schema = schema;
        self
    }
}
