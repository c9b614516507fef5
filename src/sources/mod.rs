pub mod files;

use crate::types::config::SourceFiles;
use crate::types::records::{AccountRecord, CheckinRecord, GoalRecord, KeyResultRecord, Record};
use crate::types::report::{Warning, WarningSource};
use files::{extract_records, flatten_cached_objs, read_json};
use std::path::Path;

/// Already-tabulated upstream data for one cycle.
#[derive(Debug, Clone, Default)]
pub struct RecordSets {
    pub accounts: Vec<AccountRecord>,
    pub key_results: Vec<KeyResultRecord>,
    pub checkins: Vec<CheckinRecord>,
    pub goals: Vec<GoalRecord>,
}

/// Loads the four record sets from `root`. An unavailable source becomes an
/// empty set plus a warning; loading itself never fails.
pub fn load(root: &Path, files: &SourceFiles) -> (RecordSets, Vec<Warning>) {
    let mut warnings = Vec::new();

    let accounts = load_set(
        &root.join(&files.accounts),
        "users",
        WarningSource::Accounts,
        &mut warnings,
    );
    let key_results = load_set(
        &root.join(&files.key_results),
        "krs",
        WarningSource::KeyResults,
        &mut warnings,
    );
    let checkins = load_set(
        &root.join(&files.checkins),
        "checkins",
        WarningSource::Checkins,
        &mut warnings,
    );
    let goals = flatten_cached_objs(load_set(
        &root.join(&files.goals),
        "targets",
        WarningSource::Goals,
        &mut warnings,
    ));

    let records = RecordSets {
        accounts: accounts.iter().filter_map(AccountRecord::from_record).collect(),
        key_results: key_results
            .iter()
            .filter_map(KeyResultRecord::from_record)
            .collect(),
        checkins: checkins.iter().filter_map(CheckinRecord::from_record).collect(),
        goals: goals.iter().filter_map(GoalRecord::from_record).collect(),
    };

    tracing::info!(
        accounts = records.accounts.len(),
        key_results = records.key_results.len(),
        checkins = records.checkins.len(),
        goals = records.goals.len(),
        "records loaded"
    );

    (records, warnings)
}

fn load_set(
    path: &Path,
    wrapper_key: &str,
    source: WarningSource,
    warnings: &mut Vec<Warning>,
) -> Vec<Record> {
    match read_json(path) {
        Ok(value) => extract_records(value, wrapper_key),
        Err(message) => {
            warnings.push(Warning::new(
                source,
                format!("source unavailable, continuing with no records: {message}"),
            ));
            Vec::new()
        }
    }
}
