use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ReportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<survey_validate::ValidateError> for ReportError {
    fn from(err: survey_validate::ValidateError) -> Self {
        match err {
            survey_validate::ValidateError::MissingColumn { column } => {
                Self::MissingColumn { column }
            }
            survey_validate::ValidateError::DataFrame { message } => Self::DataFrame { message },
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
