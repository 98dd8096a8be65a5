//! Status mapping between the canonical vocabulary and platform terms
//!
//! Built from the catalog's explicit per-platform table, never inferred.
//! Both directions are total functions: webhook and order-fetch paths must
//! survive platforms adding new status strings, and an unknown canonical
//! mapping must not block a transition the caller asked for.

use crate::catalog::StatusEntry;
use shared::models::order::OrderStatus;
use std::collections::HashMap;

/// Native terms that signal a cancellation even when the exact string is
/// not in the table
const CANCEL_HINTS: &[&str] = &["cancel", "void", "reject", "declin"];

/// Bidirectional status translator for one platform
#[derive(Debug, Clone)]
pub struct StatusMapper {
    to_native: HashMap<OrderStatus, String>,
    to_canonical: HashMap<String, OrderStatus>,
}

impl StatusMapper {
    /// Build from a catalog status table
    ///
    /// When several rows share a canonical status the first native term
    /// wins for the outbound direction; every native term maps inbound.
    pub fn new(entries: &[StatusEntry]) -> Self {
        let mut to_native = HashMap::new();
        let mut to_canonical = HashMap::new();
        for entry in entries {
            to_native
                .entry(entry.canonical)
                .or_insert_with(|| entry.native.clone());
            to_canonical.insert(entry.native.to_lowercase(), entry.canonical);
        }
        Self {
            to_native,
            to_canonical,
        }
    }

    /// Canonical → native
    ///
    /// A canonical status missing from the table is forwarded as its own
    /// identifier rather than failing: the caller is asking the platform
    /// to transition state, and blocking on a vocabulary gap helps nobody.
    pub fn to_platform(&self, status: OrderStatus) -> String {
        self.to_native
            .get(&status)
            .cloned()
            .unwrap_or_else(|| status.as_str().to_string())
    }

    /// Native → canonical
    ///
    /// Unknown native statuses default to `Pending`, except
    /// cancellation-like terms which map to `Cancelled`.
    pub fn to_canonical(&self, native: &str) -> OrderStatus {
        let key = native.trim().to_lowercase();
        if let Some(status) = self.to_canonical.get(&key) {
            return *status;
        }
        if CANCEL_HINTS.iter().any(|hint| key.contains(hint)) {
            OrderStatus::Cancelled
        } else {
            OrderStatus::Pending
        }
    }
}
