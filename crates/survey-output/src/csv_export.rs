//! CSV payloads.

use csv::{Terminator, WriterBuilder};
use polars::prelude::DataFrame;
use survey_common::any_to_string;

use crate::error::{ExportError, Result};

/// Byte order mark prepended so spreadsheet apps detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serializes `df` as BOM-prefixed UTF-8 CSV: header row, then one line per
/// record, without an index column. Nulls are empty fields.
pub fn export_to_csv(df: &DataFrame) -> Result<Vec<u8>> {
    if df.width() == 0 {
        return Ok(UTF8_BOM.to_vec());
    }
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(df.get_column_names().iter().map(|name| name.as_str()))?;

    let columns = df.get_columns();
    let mut record = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        record.clear();
        for column in columns {
            record.push(any_to_string(column.get(idx)?));
        }
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn writes_bom_header_and_rows() {
        let df = df! {
            "respondent_id" => [1i64, 2],
            "age_group" => ["20代", "30代"],
            "tennis" => [Some(3.5f64), None],
        }
        .unwrap();
        let bytes = export_to_csv(&df).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "respondent_id,age_group,tennis\n1,20代,3.5\n2,30代,\n");
    }

    #[test]
    fn quotes_fields_with_commas() {
        let df = df! { "note" => ["a,b", "say \"hi\""] }.unwrap();
        let bytes = export_to_csv(&df).unwrap();
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "note\n\"a,b\"\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn empty_frame_is_bom_only() {
        let bytes = export_to_csv(&DataFrame::empty()).unwrap();
        assert_eq!(bytes, UTF8_BOM);
    }
}
