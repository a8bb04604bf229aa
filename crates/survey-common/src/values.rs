//! Conversions between Polars values and plain Rust scalars.
//!
//! Export and reporting code renders every cell through these helpers so a
//! value prints the same way in a CSV field, a terminal table, or a log line.

use polars::prelude::*;

/// Renders a cell as text.
///
/// Nulls become an empty string and floats drop trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use survey_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(4.50)), "4.5");
/// assert_eq!(any_to_string(AnyValue::String("20代")), "20代");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(widen_f32(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a float without trailing zeros.
///
/// Non-finite values keep their usual spelling (`NaN`, `inf`).
pub fn format_numeric(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Widens an `f32` to the `f64` with the same shortest decimal spelling.
///
/// A plain cast turns a narrowed `3.7` into `3.700000047683716`; going
/// through the decimal text keeps the value the user typed.
pub fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or_else(|_| f64::from(v))
}

/// Converts a cell to `f64`; `None` for nulls and anything non-numeric.
///
/// Strings are parsed, so a score column read as text still counts.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
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
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a trimmed string as `f64`.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Reads a whole column as optional floats, one per row.
///
/// Cells that are null or do not parse as numbers come back as `None`.
pub fn column_values_f64(column: &Column) -> Vec<Option<f64>> {
    let series = column.as_materialized_series();
    (0..series.len())
        .map(|idx| series.get(idx).ok().and_then(any_to_f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_numbers() {
        assert_eq!(any_to_string(AnyValue::Int8(-3)), "-3");
        assert_eq!(any_to_string(AnyValue::Int64(100_000)), "100000");
        assert_eq!(any_to_string(AnyValue::Float64(3.0)), "3");
        assert_eq!(any_to_string(AnyValue::Float32(2.5)), "2.5");
        assert_eq!(any_to_string(AnyValue::Float32(3.7)), "3.7");
    }

    #[test]
    fn test_any_to_string_boolean() {
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
        assert_eq!(any_to_string(AnyValue::Boolean(false)), "false");
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(f64::NAN), "NaN");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::UInt8(5)), Some(5.0));
        assert_eq!(any_to_f64(AnyValue::String(" 4 ")), Some(4.0));
        assert_eq!(any_to_f64(AnyValue::String("n/a")), None);
        assert_eq!(any_to_f64(AnyValue::Boolean(true)), None);
    }

    #[test]
    fn test_widen_f32_keeps_decimal() {
        assert_eq!(widen_f32(3.7), 3.7);
        assert_eq!(widen_f32(4.1), 4.1);
        assert_eq!(widen_f32(-2.25), -2.25);
        assert!(widen_f32(f32::NAN).is_nan());
        assert_eq!(widen_f32(f32::INFINITY), f64::INFINITY);
        assert_eq!(any_to_f64(AnyValue::Float32(2.2)), Some(2.2));
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  3.25 "), Some(3.25));
        assert_eq!(parse_f64("x"), None);
    }

    #[test]
    fn test_column_values_f64() {
        let column = Column::new("soccer".into(), &[Some(4i64), None, Some(2)]);
        assert_eq!(column_values_f64(&column), vec![Some(4.0), None, Some(2.0)]);

        let text = Column::new("golf".into(), &["3", "", "abc"]);
        assert_eq!(column_values_f64(&text), vec![Some(3.0), None, None]);
    }
}
