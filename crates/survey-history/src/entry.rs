//! A remembered load.

use chrono::{DateTime, Local};
use polars::prelude::DataFrame;
use uuid::Uuid;

/// One previously loaded table with its display metadata.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Unique identifier for this entry.
    pub id: Uuid,

    /// File name as uploaded.
    pub filename: String,

    /// When the table was loaded.
    pub upload_time: DateTime<Local>,

    pub row_count: usize,

    pub column_count: usize,

    /// Column names in table order.
    pub columns: Vec<String>,

    /// The stored table.
    pub data: DataFrame,

    /// Human-readable size label, e.g. "1.2 KB".
    pub file_size: String,
}

impl HistoryEntry {
    /// Create an entry holding a copy of `df`.
    pub fn new(filename: impl Into<String>, df: &DataFrame, file_size: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            upload_time: Local::now(),
            row_count: df.height(),
            column_count: df.width(),
            columns: df
                .get_column_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
            data: df.clone(),
            file_size: file_size.into(),
        }
    }

    /// Shape label (e.g., "20 rows x 7 columns").
    pub fn shape_label(&self) -> String {
        format!(
            "{} row{} x {} column{}",
            self.row_count,
            if self.row_count == 1 { "" } else { "s" },
            self.column_count,
            if self.column_count == 1 { "" } else { "s" }
        )
    }

    /// Upload time as shown in the history list.
    pub fn upload_time_label(&self) -> String {
        self.upload_time.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Get relative time string (e.g., "2 hours ago", "Yesterday").
    pub fn relative_time(&self) -> String {
        self.relative_time_at(Local::now())
    }

    /// Relative time measured from `now`.
    pub fn relative_time_at(&self, now: DateTime<Local>) -> String {
        let duration = now.signed_duration_since(self.upload_time);

        if duration.num_minutes() < 1 {
            "Just now".to_string()
        } else if duration.num_minutes() < 60 {
            let mins = duration.num_minutes();
            format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
        } else if duration.num_hours() < 24 {
            let hours = duration.num_hours();
            format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
        } else if duration.num_days() == 1 {
            "Yesterday".to_string()
        } else {
            self.upload_time.format("%b %d, %Y").to_string()
        }
    }
}
