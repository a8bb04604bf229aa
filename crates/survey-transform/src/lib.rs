//! Survey table transformations.

mod error;
mod memory;

pub use error::{Result, TransformError};
pub use memory::{ColumnDowncast, IntegerWidth, OptimizedFrame, optimize_memory};
