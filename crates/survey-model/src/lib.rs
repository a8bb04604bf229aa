pub mod config;
pub mod error;
pub mod export;
pub mod schema;
pub mod selector;

pub use config::{
    DEFAULT_CACHE_TTL, DEFAULT_DATA_DIR, DEFAULT_EXPORT_PREFIX, DEFAULT_MAX_HISTORY,
    DEFAULT_MAX_MEGABYTES, DEFAULT_MAX_ROWS, DEFAULT_SHEET_NAME, SessionConfig, SizeLimits,
};
pub use error::{ModelError, Result};
pub use export::{ExportFormat, FALLBACK_MIME_TYPE};
pub use schema::{
    DEFAULT_AGE_GROUP_COLUMN, DEFAULT_MIN_MEASURE_COLUMNS, DEFAULT_RESPONDENT_ID_COLUMN,
    SurveySchema,
};
pub use selector::{ALL_AGES_LABEL, AgeGroupSelector};
