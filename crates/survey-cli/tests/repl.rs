//! Scripted sessions through the interactive loop.

use std::io::Cursor;
use std::path::PathBuf;

use survey_cli::repl::{Flow, execute, run_repl};
use survey_core::Session;
use survey_model::SessionConfig;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn session() -> Session {
    Session::new(SessionConfig::default().with_data_dir(data_dir()))
}

fn run_script(session: &mut Session, script: &str) -> String {
    let mut output = Vec::new();
    run_repl(session, Cursor::new(script.to_string()), &mut output, false).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn sample_then_list() {
    let mut session = session();
    let text = run_script(&mut session, "sample\nlist\n");
    assert!(text.contains("Current: sample_data.csv (20 rows x 7 columns"));
    assert!(text.contains("History (1/5):"));
    assert!(text.contains("sample_data.csv"));
}

#[test]
fn filter_then_stats() {
    let mut session = session();
    let text = run_script(&mut session, "sample\nfilter 40代\nstats golf\n");
    assert!(text.contains("Filter: 40代 (5 rows)"));
    assert!(text.contains("Descriptive statistics:"));
    assert!(text.contains("Distribution of golf by age group:"));
}

#[test]
fn filter_without_argument_lists_groups() {
    let mut session = session();
    let text = run_script(&mut session, "sample\nfilter\n");
    assert!(text.contains("Filter: all"));
    assert!(text.contains("Age groups: all, 20代, 30代, 40代, 50代"));
}

#[test]
fn errors_do_not_end_the_session() {
    let mut session = session();
    let text = run_script(
        &mut session,
        "load /definitely/not/here.csv\nselect 3\nexport parquet\nbogus\nsample\n",
    );
    assert!(text.contains("could not be found"));
    assert!(text.contains("error: no history entry #3"));
    assert!(text.contains("error: unsupported export format"));
    assert!(text.contains("Unknown command 'bogus'"));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session();
    let script = format!("sample\nexport json {}\n", dir.path().display());
    let text = run_script(&mut session, &script);
    assert!(text.contains("application/json"));

    let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(written.len(), 1);
    let name = written[0].as_ref().unwrap().file_name();
    let name = name.to_string_lossy();
    assert!(name.starts_with("survey_data_"));
    assert!(name.ends_with(".json"));
}

#[test]
fn export_without_data_is_refused() {
    let mut session = session();
    let text = run_script(&mut session, "export csv\n");
    assert!(text.contains("There is no data to export"));
}

#[test]
fn select_and_delete_by_position() {
    let mut session = session();
    run_script(&mut session, "sample\nsample\n");
    let older = session.history().list()[1].id;

    let mut sink = Vec::new();
    execute(&mut session, "select 2", &mut sink).unwrap();
    assert_eq!(session.history().current_id(), Some(older));

    execute(&mut session, &format!("delete {older}"), &mut sink).unwrap();
    assert_eq!(session.history().len(), 1);
    assert_ne!(session.history().current_id(), Some(older));
}

#[test]
fn quit_stops_reading() {
    let mut session = session();
    let mut sink = Vec::new();
    assert_eq!(execute(&mut session, "quit", &mut sink).unwrap(), Flow::Quit);

    run_script(&mut session, "quit\nsample\n");
    assert!(session.history().is_empty());
}

#[test]
fn clear_empties_history() {
    let mut session = session();
    let text = run_script(&mut session, "sample\nclear\nlist\n");
    assert!(text.contains("History cleared."));
    assert!(text.contains("History is empty."));
}
