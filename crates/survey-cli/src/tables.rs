//! Terminal tables for survey data, statistics and history.

use chrono::Local;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;
use survey_common::any_to_string;
use survey_history::HistoryManager;
use survey_report::{
    CorrelationMatrix, DataOverview, GroupDistribution, GroupedMeans, MeasureSummary,
};
use survey_validate::SchemaReport;

/// Rows shown by [`preview_table`] unless asked otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

pub fn overview_table(overview: &DataOverview) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Responses"), Cell::new(overview.responses)]);
    table.add_row(vec![Cell::new("Age groups"), Cell::new(overview.age_groups)]);
    table.add_row(vec![Cell::new("Measures"), Cell::new(overview.measures)]);
    table.add_row(vec![
        Cell::new("Missing cells"),
        count_cell(overview.missing_cells, Color::Yellow),
    ]);
    table
}

pub fn issues_table(report: &SchemaReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Issue")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, issue) in report.issues.iter().enumerate() {
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(issue.to_string()).fg(Color::Red),
        ]);
    }
    table
}

/// First `rows` rows of `df`, every column as text.
pub fn preview_table(df: &DataFrame, rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let columns = df.get_columns();
    for idx in 0..df.height().min(rows) {
        let row = columns
            .iter()
            .map(|column| match column.get(idx) {
                Ok(value) => {
                    let text = any_to_string(value);
                    if text.is_empty() { dim_cell("-") } else { Cell::new(text) }
                }
                Err(_) => dim_cell("?"),
            })
            .collect::<Vec<_>>();
        table.add_row(row);
    }
    table
}

pub fn describe_table(summaries: &[MeasureSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["Measure", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"]
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_summary_table_style(&mut table);
    for idx in 1..9 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            measure_cell(&summary.measure),
            Cell::new(summary.count),
            stat_cell(summary.mean),
            stat_cell(summary.std),
            stat_cell(summary.min),
            stat_cell(summary.q25),
            stat_cell(summary.median),
            stat_cell(summary.q75),
            stat_cell(summary.max),
        ]);
    }
    table
}

/// Measures ranked by mean, highest first.
pub fn ranking_table(means: &[(String, f64)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Measure"),
        header_cell("Mean"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (idx, (measure, mean)) in means.iter().enumerate() {
        table.add_row(vec![dim_cell(idx + 1), measure_cell(measure), stat_cell(*mean)]);
    }
    table
}

/// One row per age group, one column per measure.
pub fn grouped_means_table(grouped: &GroupedMeans) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Age group")];
    header.extend(grouped.series.iter().map(|series| header_cell(&series.measure)));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for idx in 1..=grouped.series.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for (row, group) in grouped.groups.iter().enumerate() {
        let mut cells = vec![Cell::new(group).add_attribute(Attribute::Bold)];
        cells.extend(grouped.series.iter().map(|series| {
            series
                .means
                .get(row)
                .copied()
                .flatten()
                .map_or_else(|| dim_cell("-"), stat_cell)
        }));
        table.add_row(cells);
    }
    table
}

pub fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(matrix.measures.iter().map(|measure| header_cell(measure)));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for idx in 1..=matrix.measures.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for (measure, row) in matrix.measures.iter().zip(&matrix.values) {
        let mut cells = vec![measure_cell(measure)];
        cells.extend(row.iter().map(|value| correlation_cell(*value)));
        table.add_row(cells);
    }
    table
}

pub fn distribution_table(boxes: &[GroupDistribution]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["Age group", "Count", "Min", "Q1", "Median", "Q3", "Max"]
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_summary_table_style(&mut table);
    for idx in 1..7 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for group in boxes {
        table.add_row(vec![
            Cell::new(&group.age_group).add_attribute(Attribute::Bold),
            Cell::new(group.count),
            stat_cell(group.min),
            stat_cell(group.q1),
            stat_cell(group.median),
            stat_cell(group.q3),
            stat_cell(group.max),
        ]);
    }
    table
}

/// Upload history, newest first, with the current entry marked.
pub fn history_table(history: &HistoryManager) -> Table {
    let now = Local::now();
    let mut table = Table::new();
    table.set_header(
        ["#", "", "File", "Uploaded", "Shape", "Size"]
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);
    for (idx, entry) in history.list().iter().enumerate() {
        let marker = if history.is_current(entry.id) {
            Cell::new("●").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("")
        };
        let size = if entry.file_size.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&entry.file_size)
        };
        table.add_row(vec![
            dim_cell(idx + 1),
            marker,
            Cell::new(&entry.filename),
            Cell::new(format!(
                "{} ({})",
                entry.upload_time_label(),
                entry.relative_time_at(now)
            )),
            Cell::new(entry.shape_label()),
            size,
        ]);
    }
    table
}

/// Two decimals, `-` for missing statistics.
pub fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.2}")
    }
}

fn stat_cell(value: f64) -> Cell {
    if value.is_nan() {
        dim_cell("-")
    } else {
        Cell::new(format_stat(value))
    }
}

fn correlation_cell(value: f64) -> Cell {
    let cell = Cell::new(format_stat(value));
    if value.is_nan() {
        cell.fg(Color::DarkGrey)
    } else if value >= 0.5 {
        cell.fg(Color::Red)
    } else if value <= -0.5 {
        cell.fg(Color::Blue)
    } else {
        cell
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn measure_cell(measure: &str) -> Cell {
    Cell::new(measure)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
