//! Platform credential handling
//!
//! Credentials are an opaque key-value map supplied by the caller per
//! operation. This layer never persists them; the redacting `Debug` impl
//! keeps them out of log output even when a credentials struct ends up in
//! a formatted error.

use crate::catalog::PlatformConfig;
use crate::http::redact;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::{GatewayError, GatewayResult};
use std::collections::HashMap;
use std::fmt;

/// Opaque credential map (`client_id`, `client_secret`, `store_id`, ...)
///
/// Which fields are required is platform-specific and comes from the
/// catalog; [`validate`] checks the set before any network call.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PlatformCredentials {
    values: HashMap<String, String>,
}

impl PlatformCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a credential field
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a field value, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a field value, empty string if absent
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Whether a field is present and non-empty
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Iterate over (key, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stable fingerprint of the credential set (sha256 over sorted pairs)
    ///
    /// Used as the token-cache key so two calls with identical credentials
    /// share a cached token and any change invalidates it.
    pub fn fingerprint(&self) -> String {
        let mut pairs: Vec<_> = self.values.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let mut hasher = Sha256::new();
        for (key, value) in pairs {
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlatformCredentials {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            if redact::is_sensitive_key(key) {
                map.entry(key, &redact::REDACTED);
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

/// Required fields that are missing or empty, in catalog order
pub fn missing_fields(config: &PlatformConfig, credentials: &PlatformCredentials) -> Vec<String> {
    config
        .required_credentials
        .iter()
        .filter(|field| !credentials.has(field))
        .cloned()
        .collect()
}

/// Validate a credential set against the platform's required fields
///
/// Runs before any network call; adapters short-circuit with a
/// `credentials_invalid` envelope on failure so incomplete credentials
/// never cost a round trip.
pub fn validate(config: &PlatformConfig, credentials: &PlatformCredentials) -> GatewayResult<()> {
    let missing = missing_fields(config, credentials);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(GatewayError::credentials_invalid(missing))
    }
}
