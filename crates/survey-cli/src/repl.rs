//! Line-oriented interactive session over a reader and a writer.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use survey_core::{Session, SessionError};
use survey_model::ExportFormat;
use tracing::debug;
use uuid::Uuid;

use crate::dashboard::{StatsOptions, render_stats};
use crate::tables::{DEFAULT_PREVIEW_ROWS, history_table, preview_table};

pub const PROMPT: &str = "survey> ";

const HELP: &str = "\
Commands:
  load <path>                 load a CSV file and make it current
  sample                      load the bundled sample data
  list                        show the upload history
  select <n|id>               make a history entry current
  delete <n|id>               remove a history entry
  clear                       forget every history entry
  filter [group|all]          show or set the age-group filter
  show [rows]                 preview the current view
  stats [measure...]          statistics, optionally with trend measures
  export <csv|excel|json> [dir]
                              write the current view to a file
  help                        this text
  quit                        leave the session";

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands until `quit` or end of input.
///
/// Failed commands are reported on `output` and the loop carries on.
pub fn run_repl<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
    interactive: bool,
) -> Result<()> {
    if interactive {
        writeln!(output, "Type 'help' for a list of commands.")?;
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }
    for line in input.lines() {
        let line = line.context("read command")?;
        let flow = match execute(session, line.trim(), &mut output) {
            Ok(flow) => flow,
            Err(err) => {
                debug!(error = %format!("{err:#}"), "command failed");
                let message = match err.downcast_ref::<SessionError>() {
                    Some(session_err) => session_err.user_message(),
                    None => format!("{err:#}"),
                };
                writeln!(output, "error: {message}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            break;
        }
        if interactive {
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
    }
    Ok(())
}

/// Runs one command line.
pub fn execute<W: Write>(session: &mut Session, line: &str, output: &mut W) -> Result<Flow> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Flow::Continue);
    };
    let args: Vec<&str> = words.collect();
    debug!(command, args = args.len(), "session command");

    match command {
        "load" => {
            let path = args.first().context("usage: load <path>")?;
            session.load_path(Path::new(path))?;
            describe_current(session, output)?;
        }
        "sample" => {
            session.load_sample()?;
            describe_current(session, output)?;
        }
        "list" | "history" => {
            if session.history().is_empty() {
                writeln!(output, "History is empty.")?;
            } else {
                writeln!(output, "History ({}):", session.history().usage_label())?;
                writeln!(output, "{}", history_table(session.history()))?;
            }
        }
        "select" => {
            let id = resolve_entry(session, args.first().copied())?;
            session.select(id)?;
            describe_current(session, output)?;
        }
        "delete" => {
            let id = resolve_entry(session, args.first().copied())?;
            session.delete(id);
            writeln!(output, "Deleted.")?;
        }
        "clear" => {
            session.clear_history();
            writeln!(output, "History cleared.")?;
        }
        "filter" => match args.first() {
            None => {
                let groups = session.available_age_groups()?;
                writeln!(output, "Filter: {}", session.age_filter())?;
                writeln!(output, "Age groups: all, {}", groups.join(", "))?;
            }
            Some(label) => {
                session.set_age_filter_label(Some(label));
                let rows = session.current_view()?.map_or(0, |view| view.height());
                writeln!(output, "Filter: {} ({rows} rows)", session.age_filter())?;
            }
        },
        "show" => {
            let rows = match args.first() {
                Some(value) => value
                    .parse()
                    .with_context(|| format!("not a row count: {value}"))?,
                None => DEFAULT_PREVIEW_ROWS,
            };
            let view = session.current_view()?.context("no data loaded")?;
            writeln!(output, "{}", preview_table(&view, rows))?;
        }
        "stats" => {
            let view = session.current_view()?.context("no data loaded")?;
            let options = StatsOptions {
                trend_measures: args.iter().map(ToString::to_string).collect(),
                box_measure: args.first().map(ToString::to_string),
            };
            let text = render_stats(&view, &session.config().schema, &options)?;
            write!(output, "{text}")?;
        }
        "export" => {
            let format: ExportFormat = args
                .first()
                .context("usage: export <csv|excel|json> [dir]")?
                .parse()?;
            let dir = args.get(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
            let artifact = session.export_current(format)?;
            for warning in &artifact.warnings {
                writeln!(output, "warning: {warning}")?;
            }
            let path = dir.join(&artifact.filename);
            fs::write(&path, &artifact.bytes)
                .with_context(|| format!("write {}", path.display()))?;
            writeln!(
                output,
                "Wrote {} ({}, {} bytes)",
                path.display(),
                artifact.mime_type,
                artifact.bytes.len()
            )?;
        }
        "help" | "?" => writeln!(output, "{HELP}")?,
        "quit" | "exit" => return Ok(Flow::Quit),
        other => writeln!(output, "Unknown command '{other}'. Type 'help'.")?,
    }
    Ok(Flow::Continue)
}

/// A 1-based position in the history list, or a full entry id.
fn resolve_entry(session: &Session, token: Option<&str>) -> Result<Uuid> {
    let token = token.context("expected a history number or id")?;
    if let Ok(position) = token.parse::<usize>() {
        let entry = position
            .checked_sub(1)
            .and_then(|idx| session.history().list().get(idx))
            .with_context(|| format!("no history entry #{position}"))?;
        return Ok(entry.id);
    }
    Uuid::parse_str(token).with_context(|| format!("not a history number or id: {token}"))
}

fn describe_current<W: Write>(session: &Session, output: &mut W) -> Result<()> {
    if let Some(entry) = session.current_entry() {
        writeln!(
            output,
            "Current: {} ({}, {})",
            entry.filename,
            entry.shape_label(),
            entry.upload_time_label()
        )?;
    }
    Ok(())
}
