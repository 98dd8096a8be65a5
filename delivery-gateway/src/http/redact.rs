//! Credential redaction for log output
//!
//! Every header map and JSON body that reaches a log sink passes through
//! this filter first. Keys are matched case-insensitively by substring, so
//! `Client_Secret`, `X-API-Key` and `refresh_token` are all caught.

use serde_json::Value;

/// Placeholder written in place of sensitive values
pub const REDACTED: &str = "***REDACTED***";

/// Key fragments that mark a value as sensitive
const SENSITIVE_KEYS: &[&str] = &[
    "password",
    "token",
    "secret",
    "key",
    "authorization",
    "client_secret",
    "api_key",
    "access_token",
    "refresh_token",
];

/// Whether a header/field name refers to a sensitive value
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SENSITIVE_KEYS.iter().any(|fragment| lower.contains(fragment))
}

/// Deep-copy a JSON value with sensitive fields replaced
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| {
                    if is_sensitive_key(key) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redact_value(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        other => other.clone(),
    }
}

/// Copy a header list with sensitive values replaced
pub fn redact_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            if is_sensitive_key(name) {
                (name.clone(), REDACTED.to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}
