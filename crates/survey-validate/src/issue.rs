//! Structural problems found in a survey table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One structural problem. Each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaIssue {
    /// The table has no columns at all.
    EmptyTable,
    /// A metadata column is absent.
    MissingColumn { column: String },
    /// Not enough measure columns remain after the metadata columns.
    TooFewMeasures { found: usize, required: usize },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable => f.write_str("the table has no columns"),
            Self::MissingColumn { column } => write!(f, "required column '{column}' is missing"),
            Self::TooFewMeasures { found, required } => write!(
                f,
                "found {found} measure column(s), at least {required} required"
            ),
        }
    }
}

/// Result of checking a table against a [`survey_model::SurveySchema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("valid survey table");
        }
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}
