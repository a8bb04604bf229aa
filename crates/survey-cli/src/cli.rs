//! CLI argument definitions for the survey dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use survey_model::ExportFormat;

#[derive(Parser)]
#[command(
    name = "survey-dash",
    version,
    about = "Survey dashboard - explore and export sports interest survey data",
    long_about = "Load survey CSV files, check their layout, summarize scores by age group \
                  and export the filtered data as CSV, Excel or JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a file against the survey layout and show an overview.
    Inspect(InspectArgs),

    /// Print descriptive statistics and chart data.
    Stats(StatsArgs),

    /// Write the (filtered) data as CSV, Excel or JSON.
    Export(ExportArgs),

    /// Interactive session with upload history.
    Session(SessionArgs),
}

/// Where the survey table comes from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Survey CSV file.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Use the bundled sample data instead of a file.
    #[arg(long = "sample")]
    pub sample: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory holding the sample data.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Rows to preview.
    #[arg(long = "rows", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory holding the sample data.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Only include this age group ("all" for every group).
    #[arg(long = "age-group", value_name = "GROUP")]
    pub age_group: Option<String>,

    /// Measures for the age-group trend (repeatable, at most 5).
    #[arg(long = "measure", value_name = "MEASURE")]
    pub measures: Vec<String>,

    /// Measure for the distribution summary (default: first measure).
    #[arg(long = "box", value_name = "MEASURE")]
    pub box_measure: Option<String>,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory holding the sample data.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum)]
    pub format: FormatArg,

    /// Only include this age group ("all" for every group).
    #[arg(long = "age-group", value_name = "GROUP")]
    pub age_group: Option<String>,

    /// Output directory (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name prefix.
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Worksheet name for Excel output.
    #[arg(long = "sheet-name", value_name = "NAME")]
    pub sheet_name: Option<String>,

    /// Serialize without the export cache.
    #[arg(long = "no-cache")]
    pub no_cache: bool,
}

#[derive(Parser)]
pub struct SessionArgs {
    /// Directory holding the sample data.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of uploads to remember.
    #[arg(long = "max-history", value_name = "N")]
    pub max_history: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Excel,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Excel => ExportFormat::Excel,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
