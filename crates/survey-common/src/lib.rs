//! Shared utilities for the survey dashboard crates.
//!
//! This crate provides common helpers used across the workspace,
//! including Polars `AnyValue` conversions and display formatting.

pub mod format;
pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use format::format_file_size;
pub use values::{
    any_to_f64, any_to_string, column_values_f64, format_numeric, parse_f64, widen_f32,
};
