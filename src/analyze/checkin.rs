use crate::types::records::CheckinRecord;
use crate::types::user::User;
use crate::types::window::DateWindow;
use chrono::{DateTime, Datelike, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Decides whether a user kept a weekly check-in cadence inside a window.
pub struct CheckinAnalyzer {
    by_user: HashMap<String, Vec<DateTime<Utc>>>,
    min_distinct_weeks: usize,
}

impl CheckinAnalyzer {
    pub fn new(checkins: &[CheckinRecord], min_distinct_weeks: usize) -> Self {
        let mut by_user: HashMap<String, Vec<DateTime<Utc>>> = HashMap::new();
        for checkin in checkins {
            by_user
                .entry(checkin.user_id.clone())
                .or_default()
                .push(checkin.timestamp);
        }
        Self {
            by_user,
            min_distinct_weeks,
        }
    }

    /// Number of distinct ISO weeks (ISO year + week) with at least one
    /// check-in inside `window`.
    pub fn distinct_weeks(&self, user_id: &str, window: &DateWindow) -> usize {
        let Some(timestamps) = self.by_user.get(user_id) else {
            return 0;
        };
        timestamps
            .iter()
            .filter(|timestamp| window.contains(timestamp))
            .map(|timestamp| {
                let week = timestamp.iso_week();
                (week.year(), week.week())
            })
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn has_weekly_checkins(&self, user_id: &str, window: &DateWindow) -> bool {
        let weeks = self.distinct_weeks(user_id, window);
        // Config rejects a zero minimum, but library callers can pass one;
        // a user with no check-ins still fails.
        weeks > 0 && weeks >= self.min_distinct_weeks
    }

    /// Sets `checked_in` on every user that meets the cadence.
    pub fn apply(&self, users: &mut BTreeMap<String, User>, window: &DateWindow) {
        for user in users.values_mut() {
            if self.has_weekly_checkins(&user.user_id, window) {
                user.checked_in = true;
            }
        }
    }
}
