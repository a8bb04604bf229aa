//! Series behind the four dashboard charts.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use serde::Serialize;
use survey_common::{any_to_string, column_values_f64};
use survey_model::SurveySchema;
use survey_validate::age_groups;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::stats::{mean, pearson, quantile_sorted, sorted_present};
use crate::summary::measure_column;

/// Measures pre-selected in the trend chart.
pub const DEFAULT_TREND_MEASURES: usize = 3;

/// Most measures the trend chart shows at once.
pub const MAX_TREND_MEASURES: usize = 5;

/// Mean score per age group for each selected measure (line chart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMeans {
    /// Age groups, ascending.
    pub groups: Vec<String>,
    pub series: Vec<MeasureSeries>,
}

/// One line of [`GroupedMeans`]; `means[i]` belongs to `groups[i]` and is
/// `None` when that group has no values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureSeries {
    pub measure: String,
    pub means: Vec<Option<f64>>,
}

/// Square Pearson matrix over the measures (heatmap).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub measures: Vec<String>,
    /// Row-major, `values[i][j]` pairs `measures[i]` with `measures[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.measures.iter().position(|m| m == a)?;
        let j = self.measures.iter().position(|m| m == b)?;
        Some(self.values[i][j])
    }
}

/// Five-number summary of one measure within one age group (box plot).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDistribution {
    pub age_group: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Mean per measure, highest first (bar chart).
///
/// Measures without any numeric value are left out.
pub fn mean_by_measure(df: &DataFrame, measures: &[String]) -> Result<Vec<(String, f64)>> {
    let mut means = Vec::with_capacity(measures.len());
    for measure in measures {
        let present = sorted_present(&column_values_f64(measure_column(df, measure)?));
        let avg = mean(&present);
        if avg.is_nan() {
            debug!(measure = %measure, "no numeric values, skipped");
            continue;
        }
        means.push((measure.clone(), avg));
    }
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(means)
}

/// Per-group means for each measure (line chart).
pub fn mean_by_age_group(
    df: &DataFrame,
    schema: &SurveySchema,
    measures: &[String],
) -> Result<GroupedMeans> {
    let groups = age_groups(df, schema)?;
    let labels = row_groups(df, schema)?;

    let mut series = Vec::with_capacity(measures.len());
    for measure in measures {
        let values = column_values_f64(measure_column(df, measure)?);
        let buckets = bucket_by_group(&labels, &values);
        let means = groups
            .iter()
            .map(|group| {
                buckets
                    .get(group.as_str())
                    .filter(|bucket| !bucket.is_empty())
                    .map(|bucket| mean(bucket))
            })
            .collect();
        series.push(MeasureSeries {
            measure: measure.clone(),
            means,
        });
    }

    Ok(GroupedMeans { groups, series })
}

/// Pearson correlation between every pair of measures.
///
/// The diagonal is 1 and the matrix is symmetric. Pairs involving a constant
/// measure are `NaN`.
pub fn correlation_matrix(df: &DataFrame, measures: &[String]) -> Result<CorrelationMatrix> {
    let columns = measures
        .iter()
        .map(|measure| Ok(column_values_f64(measure_column(df, measure)?)))
        .collect::<Result<Vec<_>>>()?;

    let n = measures.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        measures: measures.to_vec(),
        values,
    })
}

/// Min, quartiles and max of `measure` per age group, groups ascending.
///
/// Groups with no values for the measure are omitted.
pub fn distribution_by_age_group(
    df: &DataFrame,
    schema: &SurveySchema,
    measure: &str,
) -> Result<Vec<GroupDistribution>> {
    let labels = row_groups(df, schema)?;
    let values = column_values_f64(measure_column(df, measure)?);
    let buckets = bucket_by_group(&labels, &values);

    Ok(buckets
        .into_iter()
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|(group, mut bucket)| {
            bucket.sort_by(f64::total_cmp);
            GroupDistribution {
                age_group: group.to_string(),
                count: bucket.len(),
                min: bucket[0],
                q1: quantile_sorted(&bucket, 0.25),
                median: quantile_sorted(&bucket, 0.5),
                q3: quantile_sorted(&bucket, 0.75),
                max: bucket[bucket.len() - 1],
            }
        })
        .collect())
}

/// Age-group label per row; blank for nulls.
fn row_groups(df: &DataFrame, schema: &SurveySchema) -> Result<Vec<String>> {
    let column = df
        .column(&schema.age_group)
        .map_err(|_| ReportError::MissingColumn {
            column: schema.age_group.clone(),
        })?;
    (0..column.len())
        .map(|idx| Ok(any_to_string(column.get(idx)?)))
        .collect()
}

fn bucket_by_group<'a>(
    labels: &'a [String],
    values: &[Option<f64>],
) -> BTreeMap<&'a str, Vec<f64>> {
    let mut buckets: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (label, value) in labels.iter().zip(values) {
        if label.trim().is_empty() {
            continue;
        }
        let bucket = buckets.entry(label.as_str()).or_default();
        if let Some(value) = value {
            bucket.push(*value);
        }
    }
    buckets
}
