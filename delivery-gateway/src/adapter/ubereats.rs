//! Uber Eats adapter
//!
//! OAuth2 client-credentials against a separate auth host, money in
//! cents, parallel menu arrays pushed as one document (the menu API takes
//! a whole-menu PUT, so there is no per-item sync loop here). Status
//! updates use Uber's `state` vocabulary.

use super::core::AdapterCore;
use super::{DeliveryAdapter, OrderFilters};
use crate::credentials::PlatformCredentials;
use crate::webhook::WebhookDelivery;
use async_trait::async_trait;
use serde_json::{Value, json};
use shared::models::menu::MenuData;
use shared::models::order::OrderStatus;
use shared::{OperationResult, Platform};

#[derive(Debug)]
pub struct UberEatsAdapter {
    core: AdapterCore,
}

impl UberEatsAdapter {
    pub fn new(core: AdapterCore) -> Self {
        Self { core }
    }
}

#[async_trait]
impl DeliveryAdapter for UberEatsAdapter {
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
        // Single-document upload path selected by the catalog config
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
        let mut body = json!({ "state": self.core.status().to_platform(status) });
        if let Some(reason) = reason {
            body["reason"] = Value::from(reason);
        }
        self.core.finish(
            self.core
                .push_status_update(credentials, order_id, status, body, None)
                .await,
        )
    }

    async fn process_webhook(
        &self,
        credentials: &PlatformCredentials,
        delivery: &WebhookDelivery,
    ) -> OperationResult {
        self.core.process_webhook(credentials, delivery)
    }
}
