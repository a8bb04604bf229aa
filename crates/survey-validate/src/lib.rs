//! Survey table validation.
//!
//! Checks a loaded table against the [`SurveySchema`](survey_model::SurveySchema)
//! contract, splits its columns into metadata and measure columns, and narrows
//! rows by age group. Structural problems are returned as values
//! ([`SchemaReport`]), never as errors.

mod error;
mod filter;
mod issue;
mod schema;

pub use error::{Result, ValidateError};
pub use filter::{age_groups, filter_by_age_group, selector_for_label};
pub use issue::{SchemaIssue, SchemaReport};
pub use schema::{check_survey, measure_columns, validate_survey};
