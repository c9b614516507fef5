//! Persistence of each user's monthly OKR value.
//!
//! The movement calculation reads last month's value and writes this
//! month's. Stores only promise per-call consistency: a `get` followed by an
//! `upsert` from two concurrent runs can interleave, and the later write
//! wins. `insert_if_absent` is the one conditional write, used for the
//! zero backfill so it can never clobber a real value.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSnapshotStore;
pub use memory::MemorySnapshotStore;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid snapshot key: {0}")]
    InvalidKey(String),

    #[error("invalid snapshot value: {0}")]
    InvalidValue(String),

    #[error("snapshot file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),

    #[error("snapshot store lock poisoned")]
    Poisoned,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
}

impl SnapshotKey {
    pub fn new(user_id: impl Into<String>, year: i32, month: u32) -> Result<Self, StoreError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(StoreError::InvalidKey("user id cannot be empty".to_string()));
        }
        if !(1..=12).contains(&month) {
            return Err(StoreError::InvalidKey(format!(
                "month must be between 1 and 12 (found {month})"
            )));
        }
        Ok(Self {
            user_id,
            year,
            month,
        })
    }
}

/// One persisted row: a user's average goal completion for a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub okr_value: f64,
}

impl MonthlySnapshot {
    pub fn key(&self) -> SnapshotKey {
        SnapshotKey {
            user_id: self.user_id.clone(),
            year: self.year,
            month: self.month,
        }
    }
}

/// Rejects values JSON cannot hold. A NaN row would be written as `null`
/// and make the whole file unreadable.
pub fn ensure_finite(key: &SnapshotKey, value: f64) -> Result<(), StoreError> {
    if value.is_finite() {
        return Ok(());
    }
    Err(StoreError::InvalidValue(format!(
        "{} {}-{:02} must be a finite number (found {value})",
        key.user_id, key.year, key.month
    )))
}

pub trait SnapshotStore {
    fn get(&self, key: &SnapshotKey) -> Result<Option<f64>, StoreError>;

    /// Insert the row if it is absent, otherwise overwrite its value.
    fn upsert(&self, key: &SnapshotKey, value: f64) -> Result<(), StoreError>;

    /// Write only when no row exists. Returns whether a row was written.
    ///
    /// The default is a plain read-then-write; implementations that can
    /// make it atomic should override it.
    fn insert_if_absent(&self, key: &SnapshotKey, value: f64) -> Result<bool, StoreError> {
        if self.get(key)?.is_some() {
            return Ok(false);
        }
        self.upsert(key, value)?;
        Ok(true)
    }
}
