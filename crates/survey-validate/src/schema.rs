//! Schema checks and column classification.

use polars::prelude::DataFrame;
use survey_model::SurveySchema;

use crate::issue::{SchemaIssue, SchemaReport};

/// Lists every structural problem with `df`.
///
/// A table without columns reports only [`SchemaIssue::EmptyTable`].
pub fn check_survey(df: &DataFrame, schema: &SurveySchema) -> SchemaReport {
    let mut issues = Vec::new();
    if df.width() == 0 {
        issues.push(SchemaIssue::EmptyTable);
        return SchemaReport { issues };
    }

    for column in schema.metadata_columns() {
        if df.column(column).is_err() {
            issues.push(SchemaIssue::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let found = measure_columns(df, schema).len();
    if found < schema.min_measure_columns {
        issues.push(SchemaIssue::TooFewMeasures {
            found,
            required: schema.min_measure_columns,
        });
    }

    SchemaReport { issues }
}

/// True when `df` has both metadata columns and enough measure columns.
pub fn validate_survey(df: &DataFrame, schema: &SurveySchema) -> bool {
    check_survey(df, schema).is_valid()
}

/// All column names except the metadata columns, in table order.
pub fn measure_columns(df: &DataFrame, schema: &SurveySchema) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .filter(|name| !schema.is_metadata(name.as_str()))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame(columns: &[&str]) -> DataFrame {
        let columns: Vec<Column> = columns
            .iter()
            .map(|name| Column::new((*name).into(), &[1i64, 2]))
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn exactly_three_measures_is_valid() {
        let df = frame(&["respondent_id", "age_group", "a", "b", "c"]);
        let report = check_survey(&df, &SurveySchema::default());
        assert!(report.is_valid(), "{report}");
    }

    #[test]
    fn two_measures_is_invalid() {
        let df = frame(&["respondent_id", "age_group", "a", "b"]);
        let report = check_survey(&df, &SurveySchema::default());
        assert_eq!(
            report.issues,
            vec![SchemaIssue::TooFewMeasures {
                found: 2,
                required: 3
            }]
        );
    }

    #[test]
    fn empty_table_reports_single_issue() {
        let report = check_survey(&DataFrame::empty(), &SurveySchema::default());
        assert_eq!(report.issues, vec![SchemaIssue::EmptyTable]);
        assert_eq!(report.to_string(), "the table has no columns");
    }

    #[test]
    fn report_lists_every_problem() {
        let df = frame(&["age_group", "a"]);
        let report = check_survey(&df, &SurveySchema::default());
        assert_eq!(report.issue_count(), 2);
        assert_eq!(
            report.to_string(),
            "required column 'respondent_id' is missing; found 1 measure column(s), at least 3 required"
        );
    }

    #[test]
    fn custom_schema_columns() {
        let schema = SurveySchema::new().with_columns("rid", "cohort");
        let df = frame(&["rid", "cohort", "x", "y", "z"]);
        assert!(validate_survey(&df, &schema));
        assert_eq!(measure_columns(&df, &schema), vec!["x", "y", "z"]);
    }
}
