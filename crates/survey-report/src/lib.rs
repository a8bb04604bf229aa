//! Survey statistics and chart data.
//!
//! Everything here reads a (possibly filtered) survey table and returns plain
//! numbers; drawing is left to the front end.
//!
//! - [`describe`] and [`data_overview`] back the statistics tabs
//! - [`mean_by_measure`] feeds the bar chart
//! - [`mean_by_age_group`] feeds the trend lines
//! - [`correlation_matrix`] feeds the heatmap
//! - [`distribution_by_age_group`] feeds the box plot

mod charts;
mod error;
mod stats;
mod summary;

pub use charts::{
    CorrelationMatrix, DEFAULT_TREND_MEASURES, GroupDistribution, GroupedMeans,
    MAX_TREND_MEASURES, MeasureSeries, correlation_matrix, distribution_by_age_group,
    mean_by_age_group, mean_by_measure,
};
pub use error::{ReportError, Result};
pub use summary::{DataOverview, MeasureSummary, data_overview, describe};
