//! CSV decoding for files on disk and uploaded blobs.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Rows scanned when inferring column types.
const INFER_SCHEMA_ROWS: usize = 100;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Loads a CSV file from disk.
///
/// A missing path is [`IngestError::FileNotFound`]; a zero-byte or
/// whitespace-only file is [`IngestError::EmptyData`].
pub fn load_csv_file(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    decode_csv(path, bytes)
}

/// Decodes an uploaded CSV blob. `name` is only used in errors and logs.
pub fn read_csv_bytes(name: &str, bytes: &[u8]) -> Result<DataFrame> {
    decode_csv(Path::new(name), bytes.to_vec())
}

fn decode_csv(source: &Path, mut bytes: Vec<u8>) -> Result<DataFrame> {
    let start = Instant::now();
    if bytes.starts_with(UTF8_BOM) {
        debug!(source = %source.display(), "stripping UTF-8 byte order mark");
        bytes.drain(..UTF8_BOM.len());
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyData {
            path: source.to_path_buf(),
        });
    }
    let size = bytes.len();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(
        source = %source.display(),
        rows = df.height(),
        columns = df.width(),
        bytes = size,
        duration_ms = start.elapsed().as_millis() as u64,
        "loaded CSV"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_csv() {
        let file = create_temp_csv("col1,col2\n1,2\n3,4\n");
        let df = load_csv_file(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["col1", "col2"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_csv_file(Path::new("nonexistent_file.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_empty_file() {
        let file = create_temp_csv("");
        let result = load_csv_file(file.path());
        assert!(matches!(result, Err(IngestError::EmptyData { .. })));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let result = read_csv_bytes("blank.csv", b" \n\r\n");
        assert!(matches!(result, Err(IngestError::EmptyData { .. })));
    }

    #[test]
    fn test_bom_is_stripped() {
        let df = read_csv_bytes("bom.csv", "\u{feff}respondent_id,age_group\n1,20代\n".as_bytes())
            .unwrap();
        assert!(df.column("respondent_id").is_ok());
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let df = read_csv_bytes("header.csv", b"a,b,c\n").unwrap();
        assert_eq!(df.width(), 3);
        assert_eq!(df.height(), 0);
    }
}
