//! iFood adapter
//!
//! OAuth2 client-credentials, decimal money, nested menu payloads. The
//! one real quirk: order status transitions are separate action endpoints
//! (`/confirm`, `/dispatch`, ...) rather than a status document; the
//! generic statuses endpoint only covers transitions without an action.

use super::core::AdapterCore;
use super::{DeliveryAdapter, OrderFilters};
use crate::credentials::PlatformCredentials;
use crate::webhook::WebhookDelivery;
use async_trait::async_trait;
use serde_json::{Value, json};
use shared::models::menu::MenuData;
use shared::models::order::OrderStatus;
use shared::{OperationResult, Platform};

/// Per-status action endpoints of the order API
fn status_action(status: OrderStatus) -> Option<&'static str> {
    match status {
        OrderStatus::Confirmed => Some("confirm"),
        OrderStatus::Preparing => Some("startPreparation"),
        OrderStatus::Ready => Some("readyToPickup"),
        OrderStatus::Dispatched => Some("dispatch"),
        OrderStatus::Cancelled => Some("requestCancellation"),
        OrderStatus::Pending | OrderStatus::Delivered => None,
    }
}

#[derive(Debug)]
pub struct IFoodAdapter {
    core: AdapterCore,
}

impl IFoodAdapter {
    pub fn new(core: AdapterCore) -> Self {
        Self { core }
    }
}

#[async_trait]
impl DeliveryAdapter for IFoodAdapter {
    fn platform(&self) -> Platform {
        self.core.platform()
    }

    async fn test_connection(&self, credentials: &PlatformCredentials) -> OperationResult {
        self.core.finish(self.core.test_connection(credentials).await)
    }

    async fn sync_menu(
        &self,
        credentials: &PlatformCredentials,
        menu: &MenuData,
    ) -> OperationResult {
        self.core.finish(self.core.sync_menu(credentials, menu).await)
    }

    async fn get_orders(
        &self,
        credentials: &PlatformCredentials,
        filters: &OrderFilters,
    ) -> OperationResult {
        self.core.finish(self.core.get_orders(credentials, filters).await)
    }

    async fn update_order_status(
        &self,
        credentials: &PlatformCredentials,
        order_id: &str,
        status: OrderStatus,
        reason: Option<&str>,
    ) -> OperationResult {
        let outcome = match status_action(status) {
            Some(action) => {
                let mut body = json!({});
                if let Some(reason) = reason {
                    body["reason"] = Value::from(reason);
                }
                let endpoint = format!("/order/v1.0/orders/{{order_id}}/{action}");
                self.core
                    .push_status_update(credentials, order_id, status, body, Some(endpoint))
                    .await
            }
            None => {
                self.core
                    .update_order_status(credentials, order_id, status, reason)
                    .await
            }
        };
        self.core.finish(outcome)
    }

    async fn process_webhook(
        &self,
        credentials: &PlatformCredentials,
        delivery: &WebhookDelivery,
    ) -> OperationResult {
        self.core.process_webhook(credentials, delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_endpoints_cover_merchant_transitions() {
        assert_eq!(status_action(OrderStatus::Confirmed), Some("confirm"));
        assert_eq!(status_action(OrderStatus::Cancelled), Some("requestCancellation"));
        // Delivery completion is reported by iFood, never pushed by us
        assert_eq!(status_action(OrderStatus::Delivered), None);
    }
}
