use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OkrError {
    #[error("invalid date window: end date {end} is before start date {start}")]
    InvalidWindow { start: String, end: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("snapshot store error: {0}")]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OkrError {
    /// Operator mistakes are rejected before any computation starts.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            OkrError::InvalidWindow { .. }
                | OkrError::PathNotFound(_)
                | OkrError::Store(StoreError::InvalidKey(_))
                | OkrError::Store(StoreError::InvalidValue(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, OkrError>;
