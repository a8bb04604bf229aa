use polars::prelude::*;
use survey_cli::dashboard::{StatsOptions, render_stats};
use survey_cli::tables::{history_table, issues_table, preview_table, ranking_table};
use survey_history::HistoryManager;
use survey_model::SurveySchema;
use survey_validate::check_survey;

fn survey() -> DataFrame {
    df! {
        "respondent_id" => [1i64, 2, 3, 4],
        "age_group" => ["20代", "20代", "30代", "30代"],
        "soccer" => [Some(5i64), Some(4), None, Some(2)],
        "tennis" => [3i64, 4, 3, 5],
        "golf" => [1i64, 2, 4, 5],
    }
    .unwrap()
}

#[test]
fn preview_limits_rows_and_marks_missing() {
    let text = preview_table(&survey(), 3).to_string();
    assert!(text.contains("respondent_id"));
    assert!(text.contains("20代"));
    // row 4 is cut off
    assert_eq!(text.matches("30代").count(), 1);
}

#[test]
fn issues_are_listed() {
    let df = survey().drop("age_group").unwrap();
    let report = check_survey(&df, &SurveySchema::default());
    let text = issues_table(&report).to_string();
    assert!(text.contains("age_group"));
}

#[test]
fn ranking_is_numbered() {
    let text = ranking_table(&[("golf".to_string(), 3.0), ("tennis".to_string(), 2.5)]).to_string();
    assert!(text.contains("golf"));
    assert!(text.contains("3.00"));
    assert!(text.contains("2.50"));
}

#[test]
fn history_marks_sizes() {
    let mut history = HistoryManager::new(5);
    history.add("first.csv", &survey(), "1.2 KB");
    history.add("second.csv", &survey(), "");
    let text = history_table(&history).to_string();
    assert!(text.contains("first.csv"));
    assert!(text.contains("second.csv"));
    assert!(text.contains("1.2 KB"));
    assert!(text.contains("4 rows x 5 columns"));
}

#[test]
fn stats_report_has_every_section() {
    let text = render_stats(&survey(), &SurveySchema::default(), &StatsOptions::default()).unwrap();
    for title in [
        "Overview:",
        "Descriptive statistics:",
        "Mean score by measure:",
        "Mean score by age group:",
        "Correlation:",
        "Distribution of soccer by age group:",
    ] {
        assert!(text.contains(title), "missing {title}");
    }
}

#[test]
fn stats_report_needs_measures() {
    let df = df! {
        "respondent_id" => [1i64],
        "age_group" => ["20代"],
    }
    .unwrap();
    assert!(render_stats(&df, &SurveySchema::default(), &StatsOptions::default()).is_err());
}
