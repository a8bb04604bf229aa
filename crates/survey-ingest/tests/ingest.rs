use std::path::{Path, PathBuf};

use survey_ingest::{
    IngestError, SAMPLE_DATA_FILE, Upload, load_csv_file, load_sample_data, sample_data_path,
};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn sample_data_has_survey_shape() {
    let df = load_sample_data(&data_dir()).expect("load sample");
    assert_eq!(df.height(), 20);
    assert!(df.column("respondent_id").is_ok());
    assert!(df.column("age_group").is_ok());
    assert_eq!(df.width(), 7);
}

#[test]
fn sample_path_joins_file_name() {
    let path = sample_data_path(Path::new("data"));
    assert!(path.ends_with(SAMPLE_DATA_FILE));
}

#[test]
fn missing_data_dir_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_sample_data(dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
    assert!(err.user_message().contains(SAMPLE_DATA_FILE));
}

#[test]
fn upload_records_size_label() {
    let bytes = std::fs::read(sample_data_path(&data_dir())).unwrap();
    let upload = Upload::from_bytes("sample_data.csv", &bytes).unwrap();
    assert_eq!(upload.filename, "sample_data.csv");
    assert_eq!(upload.df.height(), 20);
    assert!(upload.file_size.ends_with(" B") || upload.file_size.ends_with(" KB"));
}

#[test]
fn empty_upload_is_rejected() {
    let err = Upload::from_bytes("empty.csv", b"").unwrap_err();
    assert!(matches!(err, IngestError::EmptyData { .. }));
}

#[test]
fn file_on_disk_round_trips_japanese_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    std::fs::write(&path, "respondent_id,age_group,a,b,c\n1,30代,1,2,3\n").unwrap();
    let df = load_csv_file(&path).unwrap();
    let value = df.column("age_group").unwrap().get(0).unwrap();
    assert_eq!(survey_common::any_to_string(value), "30代");
}
