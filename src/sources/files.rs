use crate::types::records::Record;
use serde_json::Value;
use std::path::Path;

/// Reads and parses a JSON file. Errors are returned as text because the
/// caller downgrades every failure to a warning.
pub fn read_json(path: &Path) -> Result<Value, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|error| format!("cannot read {}: {}", path.display(), error))?;
    serde_json::from_str(&content)
        .map_err(|error| format!("cannot parse {}: {}", path.display(), error))
}

/// Pulls the list of records out of an upstream payload.
///
/// Accepts a bare array, an object holding the array under `wrapper_key`,
/// a one-element array wrapping such an object, or a single record object.
pub fn extract_records(value: Value, wrapper_key: &str) -> Vec<Record> {
    match value {
        Value::Array(items) => {
            if let [Value::Object(only)] = items.as_slice() {
                if only.contains_key(wrapper_key) {
                    return extract_records(Value::Object(only.clone()), wrapper_key);
                }
            }
            objects(items)
        }
        Value::Object(mut object) => match object.remove(wrapper_key) {
            Some(Value::Array(items)) => objects(items),
            Some(_) => Vec::new(),
            None => vec![object],
        },
        _ => Vec::new(),
    }
}

/// Cycle payloads nest goal entries under `targets[].cached_objs[]`.
/// Records without `cached_objs` pass through unchanged.
pub fn flatten_cached_objs(records: Vec<Record>) -> Vec<Record> {
    let mut flattened = Vec::with_capacity(records.len());
    for mut record in records {
        match record.remove("cached_objs") {
            Some(Value::Array(items)) => flattened.extend(objects(items)),
            Some(_) => {}
            None => flattened.push(record),
        }
    }
    flattened
}

fn objects(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(object) => Some(object),
            _ => None,
        })
        .collect()
}
