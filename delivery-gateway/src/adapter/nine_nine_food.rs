//! 99Food adapter
//!
//! Email/password login with an API key header, money in cents, parallel
//! menu arrays pushed per item, canonical-style webhook event names.
//! Cancellations carry their reason in a dedicated field.

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
pub struct NineNineFoodAdapter {
    core: AdapterCore,
}

impl NineNineFoodAdapter {
    pub fn new(core: AdapterCore) -> Self {
        Self { core }
    }
}

#[async_trait]
impl DeliveryAdapter for NineNineFoodAdapter {
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
        let mut body = json!({ "status": self.core.status().to_platform(status) });
        if let Some(reason) = reason {
            let field = if status == OrderStatus::Cancelled {
                "cancellation_reason"
            } else {
                "reason"
            };
            body[field] = Value::from(reason);
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
