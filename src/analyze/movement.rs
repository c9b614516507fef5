use crate::analyze::scoring::round2;
use crate::store::{SnapshotKey, SnapshotStore};
use crate::types::records::GoalRecord;
use crate::types::report::{Warning, WarningSource};
use crate::types::user::User;
use crate::types::window::{is_quarter_start_month, previous_month};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Mean `current_value` of each user's `goals` records.
pub fn average_goals(goals: &[GoalRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for goal in goals.iter().filter(|goal| goal.is_goal()) {
        let entry = totals.entry(goal.user_id.as_str()).or_insert((0.0, 0));
        entry.0 += goal.current_value;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(user_id, (sum, count))| (user_id.to_string(), sum / count as f64))
        .collect()
}

/// Movement from `baseline` to `current` as reported in `month`.
///
/// Quarter-start months report the absolute level because targets reset.
pub fn movement_for_month(month: u32, current: f64, baseline: f64) -> f64 {
    if is_quarter_start_month(month) {
        current
    } else {
        round2(current - baseline)
    }
}

/// Compares each user's current goal average with last month's snapshot,
/// sets `movement`, and records this month's value.
///
/// Store failures never abort the run: an unreadable baseline counts as 0
/// and failed writes are reported as warnings.
pub struct MovementTracker<'a> {
    store: &'a dyn SnapshotStore,
}

impl<'a> MovementTracker<'a> {
    pub fn new(store: &'a dyn SnapshotStore) -> Self {
        Self { store }
    }

    pub fn compute(
        &self,
        users: &mut BTreeMap<String, User>,
        goals: &[GoalRecord],
        now: NaiveDate,
    ) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if goals.is_empty() {
            tracing::info!("no goal records; movement tracking skipped");
            return warnings;
        }

        let averages = average_goals(goals);
        let (prev_year, prev_month) = previous_month(now.year(), now.month());

        for user in users.values_mut() {
            let current = averages.get(&user.user_id).copied().unwrap_or(0.0);
            let previous_key = SnapshotKey {
                user_id: user.user_id.clone(),
                year: prev_year,
                month: prev_month,
            };
            let baseline = self.baseline(&previous_key, &mut warnings);

            user.current_okr = current;
            user.movement = movement_for_month(now.month(), current, baseline);
            tracing::debug!(
                user_id = %user.user_id,
                current,
                baseline,
                movement = user.movement,
                "movement computed"
            );

            let current_key = SnapshotKey {
                user_id: user.user_id.clone(),
                year: now.year(),
                month: now.month(),
            };
            if let Err(error) = self.store.upsert(&current_key, current) {
                warnings.push(Warning::new(
                    WarningSource::SnapshotWrite,
                    format!(
                        "could not save {}-{:02} value for user {}: {}",
                        current_key.year, current_key.month, user.user_id, error
                    ),
                ));
            }
        }

        warnings
    }

    /// Previous month's value, or 0 with a zero row backfilled when absent.
    fn baseline(&self, key: &SnapshotKey, warnings: &mut Vec<Warning>) -> f64 {
        match self.store.get(key) {
            Ok(Some(value)) => return value,
            Ok(None) => {}
            Err(error) => warnings.push(Warning::new(
                WarningSource::SnapshotRead,
                format!(
                    "could not read {}-{:02} value for user {}, using 0: {}",
                    key.year, key.month, key.user_id, error
                ),
            )),
        }

        if let Err(error) = self.store.insert_if_absent(key, 0.0) {
            warnings.push(Warning::new(
                WarningSource::SnapshotWrite,
                format!(
                    "could not backfill {}-{:02} value for user {}: {}",
                    key.year, key.month, key.user_id, error
                ),
            ));
        }
        0.0
    }
}
