use super::{ensure_finite, MonthlySnapshot, SnapshotKey, SnapshotStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    snapshots: Vec<MonthlySnapshot>,
}

/// Snapshot rows kept in a single JSON document on disk.
///
/// Every call re-reads the file so that rows written by another process
/// between runs are seen. Writes land in a sibling temp file first and are
/// renamed over the original.
#[derive(Debug)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<SnapshotKey, f64>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new())
            }
            Err(error) => return Err(StoreError::Io(error)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let file: SnapshotFile =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(file
            .snapshots
            .into_iter()
            .map(|row| (row.key(), row.okr_value))
            .collect())
    }

    fn save(&self, rows: &BTreeMap<SnapshotKey, f64>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = SnapshotFile {
            snapshots: rows
                .iter()
                .map(|(key, value)| MonthlySnapshot {
                    user_id: key.user_id.clone(),
                    year: key.year,
                    month: key.month,
                    okr_value: *value,
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn write_with<F>(&self, apply: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut BTreeMap<SnapshotKey, f64>) -> bool,
    {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut rows = self.load()?;
        let changed = apply(&mut rows);
        if changed {
            self.save(&rows)?;
        }
        Ok(changed)
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn get(&self, key: &SnapshotKey) -> Result<Option<f64>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.get(key).copied())
    }

    fn upsert(&self, key: &SnapshotKey, value: f64) -> Result<(), StoreError> {
        ensure_finite(key, value)?;
        self.write_with(|rows| {
            rows.insert(key.clone(), value);
            true
        })?;
        tracing::debug!(
            user_id = %key.user_id,
            year = key.year,
            month = key.month,
            value,
            "snapshot upserted"
        );
        Ok(())
    }

    fn insert_if_absent(&self, key: &SnapshotKey, value: f64) -> Result<bool, StoreError> {
        ensure_finite(key, value)?;
        self.write_with(|rows| {
            if rows.contains_key(key) {
                return false;
            }
            rows.insert(key.clone(), value);
            true
        })
    }
}
