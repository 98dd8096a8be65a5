//! Canonical order model
//!
//! The only order shape the rest of the system has to understand. All four
//! adapters normalize their marketplace payloads into this structure;
//! every field has a defensive default so a sparse payload still yields a
//! usable record.

use crate::platform::Platform;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical order status vocabulary
///
/// Every platform-native status maps to exactly one of these values.
/// Unknown native statuses default to `Pending`, except cancellation-like
/// terms which map to `Cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Dispatched,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All canonical statuses, lifecycle order
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Canonical snake_case identifier (the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the order has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Customer contact data as supplied by the marketplace
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Courier assigned by the marketplace, when known
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DriverInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Delivery leg of the order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderDelivery {
    #[serde(default)]
    pub address: String,
    /// Delivery fee in currency units
    #[serde(default)]
    pub fee: Decimal,
    /// Platform-provided estimate, carried verbatim (timestamp or "30-40min")
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub driver: Option<DriverInfo>,
}

/// Selected option/modifier on a line item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderItemOption {
    #[serde(default)]
    pub name: String,
    /// Option surcharge in currency units
    #[serde(default)]
    pub price: Decimal,
}

/// Order line item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i32,
    /// Unit price in currency units
    #[serde(default)]
    pub unit_price: Decimal,
    /// Line total in currency units
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub options: Vec<OrderItemOption>,
}

/// Monetary breakdown in currency units
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub delivery_fee: Decimal,
    #[serde(default)]
    pub service_fee: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub total: Decimal,
}

/// Payment data as reported by the marketplace
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderPayment {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub status: String,
}

/// Platform-agnostic order representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalOrder {
    /// Originating marketplace
    pub platform: Platform,
    /// The platform's own order id, always preserved so the record can be
    /// correlated back to its source
    pub external_id: String,
    /// Short display number shown to restaurant staff
    #[serde(default)]
    pub order_number: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer: OrderCustomer,
    #[serde(default)]
    pub delivery: OrderDelivery,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub totals: OrderTotals,
    #[serde(default)]
    pub payment: OrderPayment,
    /// Free-text notes from the customer
    #[serde(default)]
    pub notes: String,
    /// Platform creation timestamp, carried verbatim
    #[serde(default)]
    pub created_at: String,
}

impl CanonicalOrder {
    /// Empty order shell for the given platform and external id
    pub fn empty(platform: Platform, external_id: impl Into<String>) -> Self {
        Self {
            platform,
            external_id: external_id.into(),
            order_number: String::new(),
            status: OrderStatus::Pending,
            customer: OrderCustomer::default(),
            delivery: OrderDelivery::default(),
            items: Vec::new(),
            totals: OrderTotals::default(),
            payment: OrderPayment::default(),
            notes: String::new(),
            created_at: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Dispatched).unwrap(),
            "\"dispatched\""
        );
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
    }

    #[test]
    fn test_empty_order_has_defensive_defaults() {
        let order = CanonicalOrder::empty(Platform::Rappi, "ext-1");
        assert_eq!(order.external_id, "ext-1");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.totals.total, Decimal::ZERO);
        assert!(order.items.is_empty());
        assert_eq!(order.customer.name, "");
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        // Callers may persist and reload partial records; missing fields
        // must fall back to defaults instead of failing.
        let json = r#"{"platform":"ifood","external_id":"abc","status":"confirmed"}"#;
        let order: CanonicalOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.platform, Platform::IFood);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.totals.subtotal, Decimal::ZERO);
    }
}
