//! Shared types for the delivery integration layer
//!
//! Canonical domain model exchanged between the gateway and its callers:
//! platform identifiers, order/menu/webhook types, error taxonomy and the
//! uniform operation result envelope.

pub mod error;
pub mod models;
pub mod platform;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCode, GatewayError, GatewayResult};
pub use models::order::{CanonicalOrder, OrderStatus};
pub use models::webhook::{WebhookEvent, WebhookEventType};
pub use platform::Platform;
pub use response::OperationResult;
