//! Rappi adapter
//!
//! OAuth2 client-credentials, decimal money, nested menu payloads,
//! unsigned webhooks (Rappi authenticates the endpoint, not the
//! delivery). Status updates must repeat the store id in the body.

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
pub struct RappiAdapter {
    core: AdapterCore,
}

impl RappiAdapter {
    pub fn new(core: AdapterCore) -> Self {
        Self { core }
    }
}

#[async_trait]
impl DeliveryAdapter for RappiAdapter {
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
        let mut body = json!({
            "state": self.core.status().to_platform(status),
            "store_id": credentials.get_or_empty("store_id"),
        });
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
