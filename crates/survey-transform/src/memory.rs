//! Numeric dtype narrowing.
//!
//! Each signed integer column is cast to the narrowest of [`IntegerWidth`]'s
//! candidates that holds its observed minimum and maximum. `Float64` columns
//! whose bounds fit in `f32` become `Float32`. Everything else is left alone.

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::Result;

/// Candidate integer widths, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntegerWidth {
    Int8,
    Int16,
    Int32,
    Int64,
}

impl IntegerWidth {
    /// Widths tried when narrowing, in order.
    pub const CANDIDATES: [IntegerWidth; 3] =
        [IntegerWidth::Int8, IntegerWidth::Int16, IntegerWidth::Int32];

    pub fn of(dtype: &DataType) -> Option<Self> {
        match dtype {
            DataType::Int8 => Some(Self::Int8),
            DataType::Int16 => Some(Self::Int16),
            DataType::Int32 => Some(Self::Int32),
            DataType::Int64 => Some(Self::Int64),
            _ => None,
        }
    }

    pub fn bounds(self) -> (i64, i64) {
        match self {
            Self::Int8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
            Self::Int16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
            Self::Int32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
            Self::Int64 => (i64::MIN, i64::MAX),
        }
    }

    /// Both bounds inclusive.
    pub fn holds(self, min: i64, max: i64) -> bool {
        let (lo, hi) = self.bounds();
        lo <= min && max <= hi
    }

    pub fn dtype(self) -> DataType {
        match self {
            Self::Int8 => DataType::Int8,
            Self::Int16 => DataType::Int16,
            Self::Int32 => DataType::Int32,
            Self::Int64 => DataType::Int64,
        }
    }

    /// First candidate that holds `[min, max]`.
    pub fn narrowest_for(min: i64, max: i64) -> Option<Self> {
        Self::CANDIDATES
            .into_iter()
            .find(|width| width.holds(min, max))
    }
}

/// One column rewritten by [`optimize_memory`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDowncast {
    pub column: String,
    pub from: DataType,
    pub to: DataType,
}

/// The narrowed frame plus what changed.
#[derive(Debug, Clone)]
pub struct OptimizedFrame {
    pub frame: DataFrame,
    pub changes: Vec<ColumnDowncast>,
}

/// Narrows numeric columns of a copy of `df`; the input is not touched.
pub fn optimize_memory(df: &DataFrame) -> Result<OptimizedFrame> {
    let mut frame = df.clone();
    let mut changes = Vec::new();
    let before = df.estimated_size();

    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    for name in names {
        let column = df.column(&name)?;
        let from = column.dtype().clone();
        let Some(to) = narrowed_dtype(column)? else {
            continue;
        };
        let cast = column.cast(&to)?;
        frame.with_column(cast)?;
        debug!(column = %name, from = %from, to = %to, "downcast column");
        changes.push(ColumnDowncast {
            column: name,
            from,
            to,
        });
    }

    info!(
        columns = changes.len(),
        bytes_before = before,
        bytes_after = frame.estimated_size(),
        "optimized memory"
    );
    Ok(OptimizedFrame { frame, changes })
}

fn narrowed_dtype(column: &Column) -> Result<Option<DataType>> {
    let dtype = column.dtype();
    if let Some(current) = IntegerWidth::of(dtype) {
        if current == IntegerWidth::Int8 {
            return Ok(None);
        }
        let widened = column.cast(&DataType::Int64)?;
        let values = widened.as_materialized_series().i64()?;
        let (Some(min), Some(max)) = (values.min(), values.max()) else {
            return Ok(None);
        };
        return Ok(IntegerWidth::narrowest_for(min, max)
            .filter(|width| *width < current)
            .map(IntegerWidth::dtype));
    }

    if dtype == &DataType::Float64 {
        let values = column.as_materialized_series().f64()?;
        let (Some(min), Some(max)) = (values.min(), values.max()) else {
            return Ok(None);
        };
        let limit = f64::from(f32::MAX);
        if min >= -limit && max <= limit {
            return Ok(Some(DataType::Float32));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowest_width_is_first_fit() {
        assert_eq!(IntegerWidth::narrowest_for(1, 5), Some(IntegerWidth::Int8));
        assert_eq!(IntegerWidth::narrowest_for(-128, 127), Some(IntegerWidth::Int8));
        assert_eq!(IntegerWidth::narrowest_for(0, 128), Some(IntegerWidth::Int16));
        assert_eq!(IntegerWidth::narrowest_for(-40_000, 0), Some(IntegerWidth::Int32));
        assert_eq!(IntegerWidth::narrowest_for(0, i64::from(i32::MAX) + 1), None);
    }

    #[test]
    fn scores_become_int8() {
        let df = df! {
            "respondent_id" => [1i64, 2, 300],
            "age_group" => ["20代", "30代", "40代"],
            "soccer" => [5i64, 4, 1],
        }
        .unwrap();
        let optimized = optimize_memory(&df).unwrap();

        assert_eq!(optimized.frame.column("soccer").unwrap().dtype(), &DataType::Int8);
        assert_eq!(
            optimized.frame.column("respondent_id").unwrap().dtype(),
            &DataType::Int16
        );
        assert_eq!(
            optimized.frame.column("age_group").unwrap().dtype(),
            &DataType::String
        );
        assert_eq!(optimized.changes.len(), 2);
        // Source frame keeps its dtypes.
        assert_eq!(df.column("soccer").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn values_survive_narrowing() {
        let df = df! { "golf" => [Some(-3i64), None, Some(100)] }.unwrap();
        let optimized = optimize_memory(&df).unwrap();
        let column = optimized.frame.column("golf").unwrap();
        assert_eq!(column.get(0).unwrap(), AnyValue::Int8(-3));
        assert_eq!(column.get(1).unwrap(), AnyValue::Null);
        assert_eq!(column.get(2).unwrap(), AnyValue::Int8(100));
    }

    #[test]
    fn floats_in_range_become_f32() {
        let df = df! {
            "tennis" => [3.5f64, 4.25],
            "huge" => [1.0f64, 1e300],
        }
        .unwrap();
        let optimized = optimize_memory(&df).unwrap();
        assert_eq!(
            optimized.frame.column("tennis").unwrap().dtype(),
            &DataType::Float32
        );
        assert_eq!(optimized.frame.column("huge").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn all_null_and_unsigned_columns_untouched() {
        let df = df! {
            "empty" => [None::<i64>, None],
            "count" => [1u32, 2],
            "flag" => [true, false],
        }
        .unwrap();
        let optimized = optimize_memory(&df).unwrap();
        assert!(optimized.changes.is_empty());
        assert!(optimized.frame.equals_missing(&df));
    }

    #[test]
    fn already_minimal_is_untouched() {
        let df = df! { "soccer" => [1i8, 5] }.unwrap();
        let optimized = optimize_memory(&df).unwrap();
        assert!(optimized.changes.is_empty());
    }
}
