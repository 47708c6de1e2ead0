//! Sensitive-field stripping for outbound data

use serde_json::Value;

/// Default deny list for [`create_secure_dto`]
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "password_hash",
    "internal_notes",
    "api_key",
    "secret",
];

/// Keys containing any of these substrings are always removed
const SENSITIVE_SUBSTRINGS: &[&str] = &["password", "secret", "token", "api_key"];

fn is_sensitive_key(key: &str, deny_list: &[&str]) -> bool {
    if deny_list.contains(&key) {
        return true;
    }
    let lowered = key.to_lowercase();
    SENSITIVE_SUBSTRINGS.iter().any(|s| lowered.contains(s))
}

/// Shallow-copy an object with sensitive fields removed.
///
/// Removes every key in `deny_list` (defaulting to
/// [`DEFAULT_SENSITIVE_FIELDS`]) plus any key whose name contains
/// "password", "secret", "token", or "api_key" case-insensitively.
/// Top-level only: sensitive fields nested one level down are not
/// stripped; callers shaping nested payloads use the typed DTOs instead.
/// Non-object values pass through unchanged.
pub fn create_secure_dto(data: &Value, deny_list: Option<&[&str]>) -> Value {
    let deny_list = deny_list.unwrap_or(DEFAULT_SENSITIVE_FIELDS);
    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !is_sensitive_key(key, deny_list))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Default result transform for the secure access patterns: strip a single
/// row, or each row of a result list.
pub fn strip_rows(value: Value) -> Value {
    match value {
        Value::Array(rows) => Value::Array(
            rows.iter()
                .map(|row| create_secure_dto(row, None))
                .collect(),
        ),
        other => create_secure_dto(&other, None),
    }
}
