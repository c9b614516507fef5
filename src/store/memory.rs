use super::{ensure_finite, MonthlySnapshot, SnapshotKey, SnapshotStore, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    rows: Mutex<HashMap<SnapshotKey, f64>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = MonthlySnapshot>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| (row.key(), row.okr_value))
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn get(&self, key: &SnapshotKey) -> Result<Option<f64>, StoreError> {
        let rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.get(key).copied())
    }

    fn upsert(&self, key: &SnapshotKey, value: f64) -> Result<(), StoreError> {
        ensure_finite(key, value)?;
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        rows.insert(key.clone(), value);
        Ok(())
    }

    fn insert_if_absent(&self, key: &SnapshotKey, value: f64) -> Result<bool, StoreError> {
        ensure_finite(key, value)?;
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        if rows.contains_key(key) {
            return Ok(false);
        }
        rows.insert(key.clone(), value);
        Ok(true)
    }
}
