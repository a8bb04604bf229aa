use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unsupported export format '{0}' (expected csv, excel or json)")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
