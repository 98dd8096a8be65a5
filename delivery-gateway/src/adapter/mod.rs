//! Platform adapters — one per marketplace, one shared contract
//!
//! Every adapter implements the same five operations and returns the same
//! [`OperationResult`] envelope; callers pick an adapter from the
//! [`AdapterRegistry`] and never branch on the platform again.
//!
//! The heavy lifting (formatting, normalization, status mapping, retry,
//! auth) lives in the shared components; concrete adapters supply only
//! endpoint wiring and the quirks their marketplace insists on.

mod core;
mod ifood;
mod nine_nine_food;
mod rappi;
mod ubereats;

pub use self::core::AdapterCore;
pub use ifood::IFoodAdapter;
pub use nine_nine_food::NineNineFoodAdapter;
pub use rappi::RappiAdapter;
pub use ubereats::UberEatsAdapter;

use crate::auth::Authenticator;
use crate::catalog::PlatformCatalog;
use crate::credentials::PlatformCredentials;
use crate::http::RequestExecutor;
use crate::webhook::WebhookDelivery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::menu::MenuData;
use shared::models::order::OrderStatus;
use shared::{OperationResult, Platform};
use std::collections::HashMap;
use std::sync::Arc;

/// Filters for order fetches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl OrderFilters {
    pub fn by_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// The five-operation contract shared by every marketplace adapter
///
/// All operations are stateless: credentials and domain data arrive as
/// arguments, nothing is held between calls, so one adapter instance
/// serves concurrent calls for different restaurants.
#[async_trait]
pub trait DeliveryAdapter: Send + Sync {
    /// The marketplace this adapter talks to
    fn platform(&self) -> Platform;

    /// Validate credentials, authenticate and make one cheap read call
    async fn test_connection(&self, credentials: &PlatformCredentials) -> OperationResult;

    /// Push the canonical menu: categories first, then products
    async fn sync_menu(
        &self,
        credentials: &PlatformCredentials,
        menu: &MenuData,
    ) -> OperationResult;

    /// Fetch orders matching the filters, normalized to canonical form
    async fn get_orders(
        &self,
        credentials: &PlatformCredentials,
        filters: &OrderFilters,
    ) -> OperationResult;

    /// Push a canonical status transition for one order
    async fn update_order_status(
        &self,
        credentials: &PlatformCredentials,
        order_id: &str,
        status: OrderStatus,
        reason: Option<&str>,
    ) -> OperationResult;

    /// Authenticate and dispatch one inbound webhook delivery
    async fn process_webhook(
        &self,
        credentials: &PlatformCredentials,
        delivery: &WebhookDelivery,
    ) -> OperationResult;
}

/// Tagged-variant wrapper over the concrete adapters
///
/// Keeps dispatch static and the registry free of trait objects; the
/// variant set is closed because the platform set is.
#[derive(Debug)]
pub enum PlatformAdapter {
    IFood(IFoodAdapter),
    Rappi(RappiAdapter),
    UberEats(UberEatsAdapter),
    NineNineFood(NineNineFoodAdapter),
}

#[async_trait]
impl DeliveryAdapter for PlatformAdapter {
    fn platform(&self) -> Platform {
        match self {
            Self::IFood(a) => a.platform(),
            Self::Rappi(a) => a.platform(),
            Self::UberEats(a) => a.platform(),
            Self::NineNineFood(a) => a.platform(),
        }
    }

    async fn test_connection(&self, credentials: &PlatformCredentials) -> OperationResult {
        match self {
            Self::IFood(a) => a.test_connection(credentials).await,
            Self::Rappi(a) => a.test_connection(credentials).await,
            Self::UberEats(a) => a.test_connection(credentials).await,
            Self::NineNineFood(a) => a.test_connection(credentials).await,
        }
    }

    async fn sync_menu(
        &self,
        credentials: &PlatformCredentials,
        menu: &MenuData,
    ) -> OperationResult {
        match self {
            Self::IFood(a) => a.sync_menu(credentials, menu).await,
            Self::Rappi(a) => a.sync_menu(credentials, menu).await,
            Self::UberEats(a) => a.sync_menu(credentials, menu).await,
            Self::NineNineFood(a) => a.sync_menu(credentials, menu).await,
        }
    }

    async fn get_orders(
        &self,
        credentials: &PlatformCredentials,
        filters: &OrderFilters,
    ) -> OperationResult {
        match self {
            Self::IFood(a) => a.get_orders(credentials, filters).await,
            Self::Rappi(a) => a.get_orders(credentials, filters).await,
            Self::UberEats(a) => a.get_orders(credentials, filters).await,
            Self::NineNineFood(a) => a.get_orders(credentials, filters).await,
        }
    }

    async fn update_order_status(
        &self,
        credentials: &PlatformCredentials,
        order_id: &str,
        status: OrderStatus,
        reason: Option<&str>,
    ) -> OperationResult {
        match self {
            Self::IFood(a) => a.update_order_status(credentials, order_id, status, reason).await,
            Self::Rappi(a) => a.update_order_status(credentials, order_id, status, reason).await,
            Self::UberEats(a) => {
                a.update_order_status(credentials, order_id, status, reason).await
            }
            Self::NineNineFood(a) => {
                a.update_order_status(credentials, order_id, status, reason).await
            }
        }
    }

    async fn process_webhook(
        &self,
        credentials: &PlatformCredentials,
        delivery: &WebhookDelivery,
    ) -> OperationResult {
        match self {
            Self::IFood(a) => a.process_webhook(credentials, delivery).await,
            Self::Rappi(a) => a.process_webhook(credentials, delivery).await,
            Self::UberEats(a) => a.process_webhook(credentials, delivery).await,
            Self::NineNineFood(a) => a.process_webhook(credentials, delivery).await,
        }
    }
}

/// Platform → adapter registry, resolved once at startup
///
/// Adapters share one authenticator (and thus one token cache) and one
/// transport; per-platform timeouts come from the catalog.
#[derive(Debug)]
pub struct AdapterRegistry {
    adapters: HashMap<Platform, Arc<PlatformAdapter>>,
}

impl AdapterRegistry {
    /// Build adapters for every platform the catalog describes
    pub fn from_catalog(catalog: &PlatformCatalog, executor: RequestExecutor) -> Self {
        let auth = Arc::new(Authenticator::new());
        let adapters = catalog
            .platforms()
            .filter_map(|platform| {
                let config = catalog.config(platform)?.clone();
                let core = AdapterCore::new(config, executor.clone(), auth.clone());
                let adapter = match platform {
                    Platform::IFood => PlatformAdapter::IFood(IFoodAdapter::new(core)),
                    Platform::Rappi => PlatformAdapter::Rappi(RappiAdapter::new(core)),
                    Platform::UberEats => PlatformAdapter::UberEats(UberEatsAdapter::new(core)),
                    Platform::NineNineFood => {
                        PlatformAdapter::NineNineFood(NineNineFoodAdapter::new(core))
                    }
                };
                Some((platform, Arc::new(adapter)))
            })
            .collect();
        Self { adapters }
    }

    /// Registry over the builtin catalog
    pub fn builtin(executor: RequestExecutor) -> Self {
        Self::from_catalog(&PlatformCatalog::builtin(), executor)
    }

    /// Adapter for a platform
    pub fn get(&self, platform: Platform) -> Option<Arc<PlatformAdapter>> {
        self.adapters.get(&platform).cloned()
    }

    /// Adapter by platform identifier string ("ifood", "99food", ...)
    pub fn resolve(&self, name: &str) -> Option<Arc<PlatformAdapter>> {
        name.parse::<Platform>().ok().and_then(|p| self.get(p))
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.adapters.keys().copied()
    }
}
