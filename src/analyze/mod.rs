pub mod aggregate;
pub mod checkin;
pub mod movement;
pub mod scoring;

use crate::sources::RecordSets;
use crate::store::SnapshotStore;
use crate::types::config::DEFAULT_MIN_DISTINCT_WEEKS;
use crate::types::report::{RunReport, Warning};
use crate::types::window::DateWindow;
use checkin::CheckinAnalyzer;
use chrono::NaiveDate;
use movement::MovementTracker;

#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub window: DateWindow,
    /// Calendar date whose month is scored and snapshotted.
    pub as_of: NaiveDate,
    pub min_distinct_weeks: usize,
}

impl RunSettings {
    pub fn new(window: DateWindow, as_of: NaiveDate) -> Self {
        Self {
            window,
            as_of,
            min_distinct_weeks: DEFAULT_MIN_DISTINCT_WEEKS,
        }
    }
}

/// Runs aggregation, check-in analysis, movement tracking and scoring.
///
/// `warnings` carries anything already recovered upstream (unavailable
/// sources); store failures met here are appended.
pub fn evaluate(
    records: &RecordSets,
    settings: &RunSettings,
    store: &dyn SnapshotStore,
    mut warnings: Vec<Warning>,
) -> RunReport {
    let mut users = aggregate::aggregate_users(&records.accounts, &records.key_results);
    tracing::info!(users = users.len(), "scoring users");

    CheckinAnalyzer::new(&records.checkins, settings.min_distinct_weeks)
        .apply(&mut users, &settings.window);

    warnings.extend(MovementTracker::new(store).compute(
        &mut users,
        &records.goals,
        settings.as_of,
    ));

    scoring::apply(&mut users);

    RunReport::new(
        settings.window,
        settings.as_of,
        users.into_values().collect(),
        warnings,
    )
}
