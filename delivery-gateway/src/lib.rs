//! Delivery-platform integration layer
//!
//! Adapters that let a restaurant backend exchange menu, order and status
//! data with third-party delivery marketplaces (iFood, Rappi, Uber Eats,
//! 99Food) behind one canonical model and a single result envelope.
//!
//! # Architecture
//!
//! ```text
//!  caller (order service / dashboard)
//!        │
//!        ▼
//!  AdapterRegistry ──► PlatformAdapter (ifood | rappi | ubereats | 99food)
//!        │                   │
//!        │         ┌─────────┼──────────┬─────────────┐
//!        │         ▼         ▼          ▼             ▼
//!        │   StatusMapper  menu::*  normalize::*  webhook::*
//!        │         │
//!        │         ▼
//!        │   Authenticator ──► RequestExecutor ──► HttpTransport
//!        │                                              │
//!        ▼                                              ▼
//!  PlatformCatalog (read-only config)            marketplace APIs
//! ```
//!
//! Every public operation is stateless: credentials, config and domain
//! data are passed per call, so one adapter instance safely serves
//! concurrent calls for different restaurants.
//!
//! # Example
//!
//! ```no_run
//! use delivery_gateway::adapter::{AdapterRegistry, DeliveryAdapter};
//! use delivery_gateway::credentials::PlatformCredentials;
//! use delivery_gateway::http::{ExecutorConfig, RequestExecutor};
//! use shared::Platform;
//!
//! # async fn demo() {
//! let registry = AdapterRegistry::builtin(RequestExecutor::new(ExecutorConfig::default()));
//! let adapter = registry.get(Platform::IFood).unwrap();
//!
//! let credentials = PlatformCredentials::new()
//!     .with("client_id", "...")
//!     .with("client_secret", "...")
//!     .with("merchant_id", "...");
//!
//! let result = adapter.test_connection(&credentials).await;
//! assert!(result.success || result.error_code.is_some());
//! # }
//! ```

pub mod adapter;
pub mod auth;
pub mod catalog;
pub mod credentials;
pub mod http;
pub mod logging;
pub mod menu;
pub mod normalize;
pub mod status;
pub mod webhook;

// Re-exports
pub use adapter::{AdapterRegistry, DeliveryAdapter, OrderFilters, PlatformAdapter};
pub use catalog::{PlatformCatalog, PlatformConfig};
pub use credentials::PlatformCredentials;
pub use http::{ExecutorConfig, RequestExecutor};
pub use webhook::WebhookDelivery;
