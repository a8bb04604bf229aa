//! Descriptive statistics tables.

use polars::prelude::{Column, DataFrame};
use serde::Serialize;
use survey_common::column_values_f64;
use survey_model::SurveySchema;
use survey_validate::{age_groups, measure_columns};

use crate::error::{ReportError, Result};
use crate::stats::{mean, quantile_sorted, sample_std, sorted_present};

/// One row of the `describe` table.
///
/// Statistics over zero values are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureSummary {
    pub measure: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl MeasureSummary {
    fn from_values(measure: &str, values: &[Option<f64>]) -> Self {
        let sorted = sorted_present(values);
        Self {
            measure: measure.to_string(),
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Headline counts for the data information tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataOverview {
    pub responses: usize,
    pub age_groups: usize,
    pub measures: usize,
    pub missing_cells: usize,
}

/// Count, mean, sample std, min, quartiles and max per measure.
///
/// Nulls and values that do not parse as numbers are skipped.
pub fn describe(df: &DataFrame, measures: &[String]) -> Result<Vec<MeasureSummary>> {
    measures
        .iter()
        .map(|measure| {
            let values = column_values_f64(measure_column(df, measure)?);
            Ok(MeasureSummary::from_values(measure, &values))
        })
        .collect()
}

pub fn data_overview(df: &DataFrame, schema: &SurveySchema) -> Result<DataOverview> {
    let missing_cells = df
        .get_columns()
        .iter()
        .map(Column::null_count)
        .sum();
    Ok(DataOverview {
        responses: df.height(),
        age_groups: age_groups(df, schema)?.len(),
        measures: measure_columns(df, schema).len(),
        missing_cells,
    })
}

pub(crate) fn measure_column<'a>(df: &'a DataFrame, measure: &str) -> Result<&'a Column> {
    df.column(measure).map_err(|_| ReportError::MissingColumn {
        column: measure.to_string(),
    })
}
