//! The survey table contract.

use serde::{Deserialize, Serialize};

/// Default name of the respondent identifier column.
pub const DEFAULT_RESPONDENT_ID_COLUMN: &str = "respondent_id";

/// Default name of the age-group column.
pub const DEFAULT_AGE_GROUP_COLUMN: &str = "age_group";

/// Minimum number of measure columns a valid survey table carries.
pub const DEFAULT_MIN_MEASURE_COLUMNS: usize = 3;

/// Names the two metadata columns and the measure-count floor.
///
/// Every column that is not one of the metadata columns is a measure column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySchema {
    /// Respondent identifier column, any scalar type.
    pub respondent_id: String,
    /// Age-group column, compared as text when filtering.
    pub age_group: String,
    /// Fewest measure columns accepted.
    pub min_measure_columns: usize,
}

impl Default for SurveySchema {
    fn default() -> Self {
        Self {
            respondent_id: DEFAULT_RESPONDENT_ID_COLUMN.to_string(),
            age_group: DEFAULT_AGE_GROUP_COLUMN.to_string(),
            min_measure_columns: DEFAULT_MIN_MEASURE_COLUMNS,
        }
    }
}

impl SurveySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both metadata column names.
    pub fn with_columns(
        mut self,
        respondent_id: impl Into<String>,
        age_group: impl Into<String>,
    ) -> Self {
        self.respondent_id = respondent_id.into();
        self.age_group = age_group.into();
        self
    }

    pub fn with_min_measure_columns(mut self, min: usize) -> Self {
        self.min_measure_columns = min;
        self
    }

    /// Returns the metadata column names in table order convention.
    pub fn metadata_columns(&self) -> [&str; 2] {
        [self.respondent_id.as_str(), self.age_group.as_str()]
    }

    pub fn is_metadata(&self, column: &str) -> bool {
        column == self.respondent_id || column == self.age_group
    }
}
