use crate::error::OkrError;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_STORE_FILE: &str = "snapshots.json";
pub const DEFAULT_MIN_DISTINCT_WEEKS: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OkrConfig {
    pub store: Option<StoreConfig>,
    pub checkin: Option<CheckinConfig>,
    pub sources: Option<SourcesConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckinConfig {
    pub min_distinct_weeks: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    pub accounts: Option<String>,
    pub key_results: Option<String>,
    pub checkins: Option<String>,
    pub goals: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    pub movement_points: Option<Vec<MovementBand>>,
}

/// One row of the report's movement points table. The last band has no
/// upper bound and catches everything above the previous threshold.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementBand {
    pub below: Option<f64>,
    pub points: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub accounts: String,
    pub key_results: String,
    pub checkins: String,
    pub goals: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            accounts: "accounts.json".to_string(),
            key_results: "krs.json".to_string(),
            checkins: "checkins.json".to_string(),
            goals: "goals.json".to_string(),
        }
    }
}

impl OkrConfig {
    /// Applies `layer` on top of `self`. Keys the layer leaves unset keep
    /// their current value; `movement_points` is replaced as a whole.
    pub fn overlay(&mut self, layer: OkrConfig) {
        if let Some(store) = layer.store {
            let base = self.store.get_or_insert_with(StoreConfig::default);
            set_if_some(&mut base.path, store.path);
        }
        if let Some(checkin) = layer.checkin {
            let base = self.checkin.get_or_insert_with(CheckinConfig::default);
            set_if_some(&mut base.min_distinct_weeks, checkin.min_distinct_weeks);
        }
        if let Some(sources) = layer.sources {
            let base = self.sources.get_or_insert_with(SourcesConfig::default);
            set_if_some(&mut base.accounts, sources.accounts);
            set_if_some(&mut base.key_results, sources.key_results);
            set_if_some(&mut base.checkins, sources.checkins);
            set_if_some(&mut base.goals, sources.goals);
        }
        if let Some(report) = layer.report {
            let base = self.report.get_or_insert_with(ReportConfig::default);
            set_if_some(&mut base.movement_points, report.movement_points);
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.store
            .as_ref()
            .and_then(|store| store.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }

    pub fn min_distinct_weeks(&self) -> usize {
        self.checkin
            .as_ref()
            .and_then(|checkin| checkin.min_distinct_weeks)
            .unwrap_or(DEFAULT_MIN_DISTINCT_WEEKS)
    }

    pub fn source_files(&self) -> SourceFiles {
        let defaults = SourceFiles::default();
        match &self.sources {
            Some(sources) => SourceFiles {
                accounts: sources.accounts.clone().unwrap_or(defaults.accounts),
                key_results: sources.key_results.clone().unwrap_or(defaults.key_results),
                checkins: sources.checkins.clone().unwrap_or(defaults.checkins),
                goals: sources.goals.clone().unwrap_or(defaults.goals),
            },
            None => defaults,
        }
    }

    pub fn movement_points(&self) -> Option<&[MovementBand]> {
        self.report
            .as_ref()
            .and_then(|report| report.movement_points.as_deref())
    }

    pub fn validate(&self) -> Result<(), OkrError> {
        if let Some(min_weeks) = self.checkin.as_ref().and_then(|c| c.min_distinct_weeks) {
            if min_weeks == 0 {
                return Err(OkrError::ConfigParse(
                    "checkin.min_distinct_weeks must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(path) = self.store.as_ref().and_then(|store| store.path.as_ref()) {
            if path.as_os_str().is_empty() {
                return Err(OkrError::ConfigParse(
                    "store.path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(sources) = &self.sources {
            for (key, value) in [
                ("accounts", &sources.accounts),
                ("key_results", &sources.key_results),
                ("checkins", &sources.checkins),
                ("goals", &sources.goals),
            ] {
                if value.as_deref().is_some_and(|name| name.trim().is_empty()) {
                    return Err(OkrError::ConfigParse(format!(
                        "sources.{key} cannot be empty"
                    )));
                }
            }
        }

        if let Some(bands) = self.movement_points() {
            validate_movement_bands(bands)?;
        }

        Ok(())
    }
}

fn set_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn validate_movement_bands(bands: &[MovementBand]) -> Result<(), OkrError> {
    let Some((last, bounded)) = bands.split_last() else {
        return Err(OkrError::ConfigParse(
            "report.movement_points cannot be empty".to_string(),
        ));
    };
    if last.below.is_some() {
        return Err(OkrError::ConfigParse(
            "report.movement_points: the last band must not set `below`".to_string(),
        ));
    }

    let mut previous: Option<f64> = None;
    for band in bounded {
        let Some(below) = band.below else {
            return Err(OkrError::ConfigParse(format!(
                "report.movement_points: band '{}' must set `below`",
                band.label
            )));
        };
        if !below.is_finite() || previous.is_some_and(|prev| below <= prev) {
            return Err(OkrError::ConfigParse(format!(
                "report.movement_points thresholds must be strictly increasing (found {below})"
            )));
        }
        previous = Some(below);
    }

    Ok(())
}
