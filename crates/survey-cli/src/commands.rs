use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use survey_common::format_file_size;
use survey_core::Session;
use survey_ingest::{load_csv_file, load_sample_data};
use survey_model::{ExportFormat, SessionConfig};
use survey_report::data_overview;
use survey_transform::optimize_memory;
use survey_validate::check_survey;
use survey_cli::dashboard::{StatsOptions, render_stats};
use survey_cli::repl::run_repl;
use survey_cli::tables::{issues_table, overview_table, preview_table};
use tracing::{info, info_span};

use crate::cli::{ExportArgs, InspectArgs, SessionArgs, SourceArgs, StatsArgs};

fn base_config(data_dir: Option<&PathBuf>) -> SessionConfig {
    match data_dir {
        Some(dir) => SessionConfig::default().with_data_dir(dir),
        None => SessionConfig::default(),
    }
}

fn load_source(session: &mut Session, source: &SourceArgs) -> Result<()> {
    match &source.file {
        Some(path) => session
            .load_path(path)
            .with_context(|| format!("load {}", path.display()))?,
        None => session.load_sample().context("load sample data")?,
    };
    Ok(())
}

/// Prints the layout check, a preview and the overview. Returns whether the
/// table is a valid survey.
pub fn run_inspect(args: &InspectArgs) -> Result<bool> {
    let config = base_config(args.data_dir.as_ref());
    let (label, df) = match &args.source.file {
        Some(path) => (path.display().to_string(), load_csv_file(path)?),
        None => (
            "sample data".to_string(),
            load_sample_data(&config.data_dir)?,
        ),
    };
    let span = info_span!("inspect", source = %label);
    let _guard = span.enter();

    let optimized = optimize_memory(&df).context("optimize memory")?;
    let df = optimized.frame;
    println!("Source: {label}");
    println!("Shape: {} rows x {} columns", df.height(), df.width());
    if !optimized.changes.is_empty() {
        println!("Narrowed columns: {}", optimized.changes.len());
    }

    let report = check_survey(&df, &config.schema);
    if report.is_valid() {
        println!("Layout: valid survey table");
    } else {
        println!("Layout: {} issue(s)", report.issue_count());
        println!("{}", issues_table(&report));
    }

    println!();
    println!("Preview:");
    println!("{}", preview_table(&df, args.rows));

    if report.is_valid() {
        let overview = data_overview(&df, &config.schema).context("compute overview")?;
        println!();
        println!("{}", overview_table(&overview));
    }
    Ok(report.is_valid())
}

pub fn run_stats(args: &StatsArgs) -> Result<()> {
    let mut session = Session::new(base_config(args.data_dir.as_ref()));
    load_source(&mut session, &args.source)?;
    session.set_age_filter_label(args.age_group.as_deref());

    let view = session.current_view()?.context("no data loaded")?;
    println!("Filter: {} ({} rows)", session.age_filter(), view.height());
    let options = StatsOptions {
        trend_measures: args.measures.clone(),
        box_measure: args.box_measure.clone(),
    };
    print!("{}", render_stats(&view, &session.config().schema, &options)?);
    Ok(())
}

/// Writes the export and returns its path.
pub fn run_export(args: &ExportArgs) -> Result<PathBuf> {
    let start = Instant::now();
    let mut config = base_config(args.data_dir.as_ref()).with_cache(!args.no_cache);
    if let Some(prefix) = &args.prefix {
        config = config.with_export_prefix(prefix.clone());
    }
    if let Some(sheet_name) = &args.sheet_name {
        config = config.with_sheet_name(sheet_name.clone());
    }

    let mut session = Session::new(config);
    load_source(&mut session, &args.source)?;
    session.set_age_filter_label(args.age_group.as_deref());

    let format = ExportFormat::from(args.format);
    let artifact = session.export_current(format)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let path = output_dir.join(&artifact.filename);
    write_output(&path, &artifact.bytes)?;

    println!("File: {}", path.display());
    println!("Type: {}", artifact.mime_type);
    println!("Size: {}", format_file_size(artifact.bytes.len() as u64));
    for warning in &artifact.warnings {
        eprintln!("warning: {warning}");
    }
    info!(
        format = %format,
        filename = %artifact.filename,
        duration_ms = start.elapsed().as_millis() as u64,
        "export written"
    );
    Ok(path)
}

pub fn run_session(args: &SessionArgs) -> Result<()> {
    let mut config = base_config(args.data_dir.as_ref());
    if let Some(max_history) = args.max_history {
        config = config.with_max_history(max_history);
    }
    let mut session = Session::new(config);
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    run_repl(&mut session, stdin.lock(), io::stdout().lock(), interactive)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}
