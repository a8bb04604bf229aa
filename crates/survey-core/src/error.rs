use survey_ingest::IngestError;
use survey_output::ExportError;
use survey_transform::TransformError;
use survey_validate::{SchemaReport, ValidateError};
use thiserror::Error;
use uuid::Uuid;

/// Failures of a single session interaction.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Loaded table does not have the survey layout; nothing was stored.
    #[error("data does not match the survey layout: {0}")]
    InvalidSchema(SchemaReport),

    #[error("no history entry with id {0}")]
    UnknownEntry(Uuid),

    /// No current selection, or the filtered view has no rows.
    #[error("nothing to export")]
    NothingToExport,

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl SessionError {
    /// A message suitable for the person driving the session.
    pub fn user_message(&self) -> String {
        match self {
            Self::Ingest(err) => err.user_message(),
            Self::InvalidSchema(report) => format!(
                "The file does not look like survey data ({report}). It needs \
                 respondent_id and age_group columns plus at least three score columns."
            ),
            Self::UnknownEntry(_) => "That history entry no longer exists.".to_string(),
            Self::NothingToExport => {
                "There is no data to export. Load a file or widen the age filter.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
