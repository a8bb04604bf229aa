//! CLI library components for the survey dashboard.

pub mod dashboard;
pub mod logging;
pub mod repl;
pub mod tables;
