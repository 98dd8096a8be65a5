//! Canonical webhook event model

use crate::models::order::CanonicalOrder;
use crate::platform::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical webhook event vocabulary
///
/// Platform-native event names are translated into this set via the
/// catalog's per-platform event map; anything outside the map is rejected
/// as `unsupported_event` before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "order.created")]
    OrderCreated,
    #[serde(rename = "order.confirmed")]
    OrderConfirmed,
    #[serde(rename = "order.cancelled")]
    OrderCancelled,
    #[serde(rename = "order.dispatched")]
    OrderDispatched,
    #[serde(rename = "order.delivered")]
    OrderDelivered,
    #[serde(rename = "payment.confirmed")]
    PaymentConfirmed,
}

impl WebhookEventType {
    /// Canonical dotted identifier (the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderCreated => "order.created",
            Self::OrderConfirmed => "order.confirmed",
            Self::OrderCancelled => "order.cancelled",
            Self::OrderDispatched => "order.dispatched",
            Self::OrderDelivered => "order.delivered",
            Self::PaymentConfirmed => "payment.confirmed",
        }
    }

    /// Whether this event carries an order lifecycle transition
    pub fn is_order_event(&self) -> bool {
        !matches!(self, Self::PaymentConfirmed)
    }
}

impl std::fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized webhook event handed to the caller for persistence
///
/// The processor does not deduplicate: platforms may deliver the same
/// webhook more than once, and idempotent persistence keyed on
/// `(platform, external order id, event type, timestamp)` is the caller's
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub event_type: WebhookEventType,
    pub platform: Platform,
    /// Normalized order, when the payload carried an order fragment
    #[serde(default)]
    pub order: Option<CanonicalOrder>,
    /// Raw order fragment as delivered, for callers that need fields the
    /// canonical model does not carry
    #[serde(default)]
    pub payload: Value,
    /// Event time: the platform's timestamp when supplied, receipt time otherwise
    pub timestamp: DateTime<Utc>,
}

impl WebhookEvent {
    /// Caller-side idempotency key: (platform, external order id, event type, timestamp)
    pub fn idempotency_key(&self) -> String {
        let external_id = self
            .order
            .as_ref()
            .map(|o| o.external_id.as_str())
            .unwrap_or("");
        format!(
            "{}:{}:{}:{}",
            self.platform,
            external_id,
            self.event_type,
            self.timestamp.timestamp_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serde_uses_dotted_names() {
        assert_eq!(
            serde_json::to_string(&WebhookEventType::OrderCreated).unwrap(),
            "\"order.created\""
        );
        let back: WebhookEventType = serde_json::from_str("\"payment.confirmed\"").unwrap();
        assert_eq!(back, WebhookEventType::PaymentConfirmed);
    }

    #[test]
    fn test_idempotency_key_is_stable() {
        let order = CanonicalOrder::empty(Platform::NineNineFood, "abc123");
        let ts = Utc::now();
        let event = WebhookEvent {
            event_type: WebhookEventType::OrderCreated,
            platform: Platform::NineNineFood,
            order: Some(order),
            payload: Value::Null,
            timestamp: ts,
        };
        // Same delivery twice ⇒ same key; dedup is the caller's job.
        assert_eq!(event.idempotency_key(), event.clone().idempotency_key());
        assert!(event.idempotency_key().starts_with("99food:abc123:order.created:"));
    }
}
