//! Text rendition of the dashboard tabs for one (filtered) view.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use survey_model::SurveySchema;
use survey_report::{
    DEFAULT_TREND_MEASURES, MAX_TREND_MEASURES, correlation_matrix, data_overview, describe,
    distribution_by_age_group, mean_by_age_group, mean_by_measure,
};
use survey_validate::measure_columns;
use tracing::warn;

use crate::tables::{
    correlation_table, describe_table, distribution_table, grouped_means_table, overview_table,
    ranking_table,
};

/// Which measures the chart sections use.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Trend chart measures; empty means the first few measures.
    pub trend_measures: Vec<String>,
    /// Box plot measure; `None` means the first measure.
    pub box_measure: Option<String>,
}

impl StatsOptions {
    /// Trend measures to draw, defaulted and capped.
    pub fn resolve_trend(&self, available: &[String]) -> Vec<String> {
        if self.trend_measures.is_empty() {
            return available
                .iter()
                .take(DEFAULT_TREND_MEASURES)
                .cloned()
                .collect();
        }
        if self.trend_measures.len() > MAX_TREND_MEASURES {
            warn!(
                requested = self.trend_measures.len(),
                max = MAX_TREND_MEASURES,
                "too many trend measures, keeping the first ones"
            );
        }
        self.trend_measures
            .iter()
            .take(MAX_TREND_MEASURES)
            .cloned()
            .collect()
    }
}

/// Overview, descriptive statistics and every chart series as tables.
pub fn render_stats(df: &DataFrame, schema: &SurveySchema, options: &StatsOptions) -> Result<String> {
    let measures = measure_columns(df, schema);
    if measures.is_empty() {
        bail!("no measure columns to summarize");
    }

    let mut out = String::new();
    let overview = data_overview(df, schema).context("compute overview")?;
    section(&mut out, "Overview", &overview_table(&overview).to_string());

    let summaries = describe(df, &measures).context("describe measures")?;
    section(&mut out, "Descriptive statistics", &describe_table(&summaries).to_string());

    let ranked = mean_by_measure(df, &measures).context("rank measures")?;
    section(&mut out, "Mean score by measure", &ranking_table(&ranked).to_string());

    let trend = options.resolve_trend(&measures);
    let grouped = mean_by_age_group(df, schema, &trend).context("group means")?;
    section(&mut out, "Mean score by age group", &grouped_means_table(&grouped).to_string());

    let matrix = correlation_matrix(df, &measures).context("correlation matrix")?;
    section(&mut out, "Correlation", &correlation_table(&matrix).to_string());

    let box_measure = options
        .box_measure
        .clone()
        .unwrap_or_else(|| measures[0].clone());
    let boxes = distribution_by_age_group(df, schema, &box_measure)
        .with_context(|| format!("distribution of {box_measure}"))?;
    section(
        &mut out,
        &format!("Distribution of {box_measure} by age group"),
        &distribution_table(&boxes).to_string(),
    );

    Ok(out)
}

fn section(out: &mut String, title: &str, body: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{title}:");
    let _ = writeln!(out, "{body}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn trend_defaults_to_first_three() {
        let available = names(&["a", "b", "c", "d"]);
        let options = StatsOptions::default();
        assert_eq!(options.resolve_trend(&available), names(&["a", "b", "c"]));
    }

    #[test]
    fn trend_is_capped() {
        let options = StatsOptions {
            trend_measures: names(&["a", "b", "c", "d", "e", "f"]),
            box_measure: None,
        };
        assert_eq!(options.resolve_trend(&[]).len(), MAX_TREND_MEASURES);
    }
}
