use crate::types::records::{AccountRecord, KeyResultRecord};
use crate::types::user::{User, UNKNOWN_NAME};
use std::collections::{BTreeMap, HashMap};

/// Builds one `User` per account that owns at least one key result.
///
/// Key results whose owner has no account, and accounts without key
/// results, are dropped silently.
pub fn aggregate_users(
    accounts: &[AccountRecord],
    key_results: &[KeyResultRecord],
) -> BTreeMap<String, User> {
    let names: HashMap<&str, &str> = accounts
        .iter()
        .map(|account| {
            let name = account
                .name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(UNKNOWN_NAME);
            (account.id.as_str(), name)
        })
        .collect();

    let mut users = BTreeMap::new();
    for key_result in key_results {
        let user_id = key_result.user_id.as_str();
        if users.contains_key(user_id) {
            continue;
        }
        if let Some(name) = names.get(user_id) {
            users.insert(user_id.to_string(), User::new(user_id, *name));
        }
    }

    tracing::debug!(
        accounts = accounts.len(),
        key_results = key_results.len(),
        users = users.len(),
        "users aggregated"
    );
    users
}
