//! JSON payloads.

use polars::prelude::{AnyValue, DataFrame};
use serde_json::{Map, Number, Value};
use survey_common::{any_to_string, widen_f32};

use crate::error::Result;

/// Serializes `df` as a pretty-printed array of row objects.
///
/// Keys follow column order and non-ASCII text is written as-is. Non-finite
/// floats become `null`.
pub fn export_to_json(df: &DataFrame) -> Result<Vec<u8>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let columns = df.get_columns();

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = Map::with_capacity(columns.len());
        for (name, column) in names.iter().zip(columns) {
            row.insert(name.clone(), json_value(column.get(idx)?));
        }
        rows.push(Value::Object(row));
    }

    Ok(serde_json::to_vec_pretty(&Value::Array(rows))?)
}

fn json_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Bool(v),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => float(widen_f32(v)),
        AnyValue::Float64(v) => float(v),
        AnyValue::String(v) => Value::String(v.to_string()),
        other => Value::String(any_to_string(other)),
    }
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn keeps_column_order_and_types() {
        let df = df! {
            "zeta" => [1i64],
            "alpha" => ["テニス"],
            "flag" => [true],
        }
        .unwrap();
        let bytes = export_to_json(&df).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"zeta\": 1,\n    \"alpha\": \"テニス\",\n    \"flag\": true\n  }\n]"
        );
    }

    #[test]
    fn non_finite_floats_are_null() {
        assert_eq!(json_value(AnyValue::Float64(f64::NAN)), Value::Null);
        assert_eq!(json_value(AnyValue::Float64(f64::INFINITY)), Value::Null);
        assert_eq!(json_value(AnyValue::Float32(2.5)), serde_json::json!(2.5));
        assert_eq!(json_value(AnyValue::Float32(3.3)), serde_json::json!(3.3));
    }

    #[test]
    fn empty_frame_is_empty_array() {
        let bytes = export_to_json(&DataFrame::empty()).unwrap();
        assert_eq!(bytes, b"[]");
    }
}
