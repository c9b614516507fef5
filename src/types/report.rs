use crate::types::user::User;
use crate::types::window::DateWindow;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSource {
    Accounts,
    KeyResults,
    Checkins,
    Goals,
    SnapshotRead,
    SnapshotWrite,
}

impl fmt::Display for WarningSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WarningSource::Accounts => "accounts",
            WarningSource::KeyResults => "key_results",
            WarningSource::Checkins => "checkins",
            WarningSource::Goals => "goals",
            WarningSource::SnapshotRead => "snapshot_read",
            WarningSource::SnapshotWrite => "snapshot_write",
        };
        f.write_str(label)
    }
}

/// A recovered failure. The run continues with a safe default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub source: WarningSource,
    pub message: String,
}

impl Warning {
    pub fn new(source: WarningSource, message: impl Into<String>) -> Self {
        let warning = Self {
            source,
            message: message.into(),
        };
        tracing::warn!(source = %warning.source, "{}", warning.message);
        warning
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_users: usize,
    pub users_with_checkins: usize,
    pub users_with_okr: usize,
    pub average_score: f64,
}

impl RunSummary {
    pub fn from_users(users: &[User]) -> Self {
        let total_users = users.len();
        let average_score = if total_users == 0 {
            0.0
        } else {
            users.iter().map(|user| user.score).sum::<f64>() / total_users as f64
        };
        Self {
            total_users,
            users_with_checkins: users.iter().filter(|user| user.checked_in).count(),
            users_with_okr: users.iter().filter(|user| user.has_okr).count(),
            average_score,
        }
    }

    pub fn share(&self, count: usize) -> f64 {
        if self.total_users == 0 {
            0.0
        } else {
            count as f64 / self.total_users as f64
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub window: DateWindow,
    pub as_of: NaiveDate,
    pub summary: RunSummary,
    pub users: Vec<User>,
    pub warnings: Vec<Warning>,
}

impl RunReport {
    pub fn new(
        window: DateWindow,
        as_of: NaiveDate,
        mut users: Vec<User>,
        warnings: Vec<Warning>,
    ) -> Self {
        sort_by_score(&mut users);
        Self {
            window,
            as_of,
            summary: RunSummary::from_users(&users),
            users,
            warnings,
        }
    }
}

/// Highest score first; ties broken by name, then id, for a stable table.
pub fn sort_by_score(users: &mut [User]) {
    users.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
}
