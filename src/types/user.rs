use serde::Serialize;

pub const UNKNOWN_NAME: &str = "Unknown";

/// One scored employee. Every run builds these from scratch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub has_okr: bool,
    pub checked_in: bool,
    /// Average completion of the user's goals this run, in percent.
    pub current_okr: f64,
    /// Percentage points moved since last month (absolute level at quarter start).
    pub movement: f64,
    pub score: f64,
}

impl User {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            has_okr: true,
            checked_in: false,
            current_okr: 0.0,
            movement: 0.0,
            score: 0.0,
        }
    }
}
