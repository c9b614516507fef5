//! Flat records handed over by the upstream fetchers.
//!
//! Every record arrives as a loosely typed JSON object. Missing or malformed
//! fields are defaulted rather than rejected; only a record that cannot be
//! attributed to anyone (no id) is dropped.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

pub const GOAL_KIND: &str = "goals";

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyResultRecord {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckinRecord {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalRecord {
    pub user_id: String,
    pub kind: String,
    pub current_value: f64,
}

impl AccountRecord {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            id: id_field(record, "id")?,
            name: string_field(record, "name"),
        })
    }
}

impl KeyResultRecord {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            user_id: id_field(record, "user_id")?,
        })
    }
}

impl CheckinRecord {
    pub fn from_record(record: &Record) -> Option<Self> {
        let user_id = id_field(record, "user_id")?;
        let seconds = number_field(record, "day").unwrap_or(0.0);
        Some(Self {
            user_id,
            timestamp: timestamp_from_epoch(seconds),
        })
    }

    pub fn new(user_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp,
        }
    }
}

impl GoalRecord {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            user_id: id_field(record, "user_id")?,
            kind: string_field(record, "type").unwrap_or_default(),
            current_value: number_field(record, "current_value").unwrap_or(0.0),
        })
    }

    pub fn goal(user_id: impl Into<String>, current_value: f64) -> Self {
        Self {
            user_id: user_id.into(),
            kind: GOAL_KIND.to_string(),
            current_value,
        }
    }

    pub fn is_goal(&self) -> bool {
        self.kind == GOAL_KIND
    }
}

/// Reads a text field. Numbers and booleans are accepted in their textual form.
pub fn string_field(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Reads a numeric field. Numeric strings (as the upstream API often sends) are parsed.
/// `"NaN"` and `"inf"` parse as floats but are treated as malformed.
pub fn number_field(record: &Record, key: &str) -> Option<f64> {
    let value = match record.get(key)? {
        Value::Number(value) => value.as_f64(),
        Value::String(value) => value.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|value| value.is_finite())
}

fn id_field(record: &Record, key: &str) -> Option<String> {
    string_field(record, key)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

fn timestamp_from_epoch(seconds: f64) -> DateTime<Utc> {
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    Utc.timestamp_opt(whole as i64, nanos)
        .single()
        .unwrap_or_default()
}
