//! Canonical domain models
//!
//! The platform-agnostic representations this layer guarantees to every
//! caller, regardless of source marketplace. Adapters translate to and
//! from these shapes; callers persist them.

pub mod menu;
pub mod order;
pub mod webhook;

pub use menu::{MenuCategory, MenuData, MenuProduct};
pub use order::{
    CanonicalOrder, DriverInfo, OrderCustomer, OrderDelivery, OrderItem, OrderItemOption,
    OrderPayment, OrderStatus, OrderTotals,
};
pub use webhook::{WebhookEvent, WebhookEventType};
