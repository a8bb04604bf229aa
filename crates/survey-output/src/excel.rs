//! XLSX payloads.

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};
use survey_common::{any_to_string, widen_f32};

use crate::error::{ExportError, Result};

/// Serializes `df` into a single-sheet workbook named `sheet_name`.
///
/// Row 0 holds the column names. Numbers, strings and booleans keep their
/// cell types and nulls stay blank. The document creation time is fixed so
/// identical frames give identical bytes.
pub fn export_to_excel(df: &DataFrame, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in df.get_column_names().iter().enumerate() {
        worksheet.write_string(0, sheet_column(col)?, name.as_str())?;
    }

    for (col, column) in df.get_columns().iter().enumerate() {
        let col = sheet_column(col)?;
        for idx in 0..df.height() {
            let row = u32::try_from(idx + 1).map_err(|_| ExportError::TooManyRows {
                rows: df.height(),
            })?;
            match column.get(idx)? {
                AnyValue::Null => {}
                AnyValue::Boolean(value) => {
                    worksheet.write_boolean(row, col, value)?;
                }
                AnyValue::String(value) => {
                    worksheet.write_string(row, col, value)?;
                }
                value => match number(&value) {
                    Some(number) => {
                        worksheet.write_number(row, col, number)?;
                    }
                    None => {
                        worksheet.write_string(row, col, any_to_string(value))?;
                    }
                },
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn sheet_column(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| ExportError::TooManyColumns { columns: col + 1 })
}

fn number(value: &AnyValue<'_>) -> Option<f64> {
    match *value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(widen_f32(v)),
        AnyValue::Float64(v) => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_index_must_fit_the_sheet() {
        assert_eq!(sheet_column(0).unwrap(), 0);
        assert_eq!(sheet_column(65_535).unwrap(), u16::MAX);
        assert!(matches!(
            sheet_column(65_536),
            Err(ExportError::TooManyColumns { columns: 65_537 })
        ));
    }
}
