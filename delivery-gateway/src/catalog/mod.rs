//! Platform Catalog — read-only per-platform configuration
//!
//! The catalog supplies every constant that differs between marketplaces:
//! URLs, auth scheme, required credential fields, status vocabulary,
//! webhook events and signature scheme, money unit, payload field schemas
//! and commission rate. Adapters load their config once at construction
//! and treat it as immutable.
//!
//! Builtin defaults cover the four supported platforms; deployments can
//! override them with a JSON catalog file (see [`PlatformCatalog::load`]).

mod defaults;

use crate::credentials::PlatformCredentials;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::order::OrderStatus;
use shared::models::webhook::WebhookEventType;
use shared::{GatewayError, GatewayResult, Platform};
use std::collections::HashMap;
use std::path::Path;

/// How a platform authenticates API calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// OAuth2 client-credentials grant (client_id + client_secret)
    OauthClientCredentials,
    /// Email/password login with an API key header
    PasswordLogin,
}

/// Authentication endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token endpoint: path relative to `base_url`, or an absolute URL
    /// for platforms that authenticate against a separate host
    pub endpoint: String,
    pub scheme: AuthScheme,
}

/// How a platform represents money on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoneyUnit {
    /// Integer minor units (4250 == 42.50)
    Cents,
    /// Decimal currency units (42.5)
    Decimal,
}

impl MoneyUnit {
    /// Parse a wire value into decimal currency units
    ///
    /// Lenient on type: integers, floats and numeric strings are all
    /// accepted; anything else yields zero.
    pub fn from_wire(&self, raw: &Value) -> Decimal {
        let number = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let Some(number) = number else {
            return Decimal::ZERO;
        };
        let amount = Decimal::from_f64_retain(number).unwrap_or(Decimal::ZERO);
        let amount = match self {
            MoneyUnit::Cents => amount / Decimal::ONE_HUNDRED,
            MoneyUnit::Decimal => amount,
        };
        amount.round_dp(2)
    }

    /// Render a decimal amount in this platform's wire representation
    pub fn to_wire(&self, amount: Decimal) -> Value {
        match self {
            MoneyUnit::Cents => {
                let cents = (amount * Decimal::ONE_HUNDRED).round();
                Value::from(cents.to_i64().unwrap_or(0))
            }
            MoneyUnit::Decimal => Value::from(amount.round_dp(2).to_f64().unwrap_or(0.0)),
        }
    }
}

/// One row of a platform's status vocabulary table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub canonical: OrderStatus,
    pub native: String,
}

/// Endpoint templates; `{merchant_id}` / `{store_id}` placeholders are
/// rendered from credentials, `{order_id}` from operation arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    /// Cheap read used by test_connection
    pub merchant: String,
    /// Per-category push (None for single-document menu platforms)
    pub categories: Option<String>,
    /// Per-product push (None for single-document menu platforms)
    pub products: Option<String>,
    /// Whole-menu upload (Some for single-document menu platforms)
    pub menu_upload: Option<String>,
    pub orders: String,
    pub order_status: String,
    /// Query parameter names for order filters
    pub status_param: String,
    pub from_param: String,
    pub to_param: String,
    /// Dotted path of the order array in the list response ("" = root)
    pub orders_list_field: String,
}

/// Webhook signature scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureScheme {
    /// Platform does not sign webhook deliveries
    None,
    /// HMAC-SHA256 over the raw payload, keyed by `webhook_secret`
    HmacSha256,
}

/// One supported webhook event: native name → canonical type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEventEntry {
    pub native: String,
    pub canonical: WebhookEventType,
}

/// Webhook processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub signature: SignatureScheme,
    /// Dotted path of the native event name in the delivery body
    pub event_field: String,
    /// Dotted path of the embedded order fragment
    pub order_field: String,
    /// Dotted path of the event timestamp (RFC 3339 or epoch)
    pub timestamp_field: String,
    /// Allow-list: only these events are dispatched
    pub events: Vec<WebhookEventEntry>,
}

impl WebhookConfig {
    /// Resolve a native event name against the allow-list
    pub fn canonical_event(&self, native: &str) -> Option<WebhookEventType> {
        self.events
            .iter()
            .find(|entry| entry.native == native)
            .map(|entry| entry.canonical)
    }
}

/// Menu payload shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuShape {
    /// Products nested inside their category objects
    Nested,
    /// Parallel category/product arrays, products carry a category reference
    Parallel,
}

/// Field names of a platform's menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSchema {
    pub shape: MenuShape,
    pub categories_field: String,
    pub products_field: String,
    pub id_field: String,
    pub name_field: String,
    pub description_field: String,
    pub price_field: String,
    pub available_field: String,
    pub category_ref_field: String,
    pub sort_order_field: String,
}

/// Dotted field paths of a platform's order payload
///
/// Item- and option-level paths are relative to each array element. Empty
/// paths are allowed and resolve to nothing, which the normalizer turns
/// into the defensive default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSchema {
    pub id: String,
    pub order_number: String,
    pub status: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub delivery_address: String,
    pub delivery_fee: String,
    pub estimated_time: String,
    pub driver_name: String,
    pub driver_phone: String,
    pub items: String,
    pub item_name: String,
    pub item_quantity: String,
    pub item_unit_price: String,
    pub item_total: String,
    pub item_notes: String,
    pub item_options: String,
    pub option_name: String,
    pub option_price: String,
    pub subtotal: String,
    pub service_fee: String,
    pub discount: String,
    pub total: String,
    pub payment_method: String,
    pub payment_status: String,
    pub notes: String,
    pub created_at: String,
}

/// Immutable per-platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub platform: Platform,
    pub base_url: String,
    pub auth: AuthConfig,
    /// Per-call HTTP timeout
    pub timeout_secs: u64,
    /// Commission percentage charged by the platform (e.g. 23.0)
    pub commission_rate: Decimal,
    pub required_credentials: Vec<String>,
    pub money_unit: MoneyUnit,
    pub endpoints: Endpoints,
    pub statuses: Vec<StatusEntry>,
    pub webhook: WebhookConfig,
    pub menu_schema: MenuSchema,
    pub order_schema: OrderSchema,
}

impl PlatformConfig {
    /// Absolute auth endpoint URL
    pub fn auth_url(&self) -> String {
        if self.auth.endpoint.starts_with("http") {
            self.auth.endpoint.clone()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), self.auth.endpoint)
        }
    }

    /// Render an endpoint template into an absolute URL
    ///
    /// `{field}` placeholders are filled from `extra` first, then from
    /// credentials; unresolved placeholders are left in place so a broken
    /// catalog shows up in the request log instead of silently targeting
    /// the wrong path.
    pub fn url(
        &self,
        template: &str,
        credentials: &PlatformCredentials,
        extra: &[(&str, &str)],
    ) -> String {
        let mut path = template.to_string();
        for (key, value) in extra {
            path = path.replace(&format!("{{{key}}}"), value);
        }
        for (key, value) in credentials.iter() {
            path = path.replace(&format!("{{{key}}}"), value);
        }
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Platform fee for a given order total, rounded to cents
    pub fn commission_amount(&self, total: Decimal) -> Decimal {
        (total * self.commission_rate / Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Whether this platform takes the whole menu as one upload document
    pub fn menu_upload_available(&self) -> bool {
        self.endpoints.menu_upload.is_some()
    }
}

/// Read-only catalog of platform configurations
///
/// Serializes as a plain platform-id → config map, which is also the
/// shape of an override catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformCatalog {
    configs: HashMap<Platform, PlatformConfig>,
}

impl PlatformCatalog {
    /// Builtin defaults for all four supported platforms
    pub fn builtin() -> Self {
        Self {
            configs: Platform::ALL
                .into_iter()
                .map(|p| (p, defaults::config_for(p)))
                .collect(),
        }
    }

    /// Parse a catalog from a JSON document (platform id → config)
    pub fn from_json(json: &str) -> GatewayResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GatewayError::invalid_payload(format!("Invalid catalog JSON: {e}")))
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> GatewayResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::invalid_payload(format!("Cannot read catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Platform configuration, if the platform is cataloged
    pub fn config(&self, platform: Platform) -> Option<&PlatformConfig> {
        self.configs.get(&platform)
    }

    /// Required credential field names for a platform
    pub fn required_credentials(&self, platform: Platform) -> Option<&[String]> {
        self.config(platform)
            .map(|c| c.required_credentials.as_slice())
    }

    /// Status vocabulary table for a platform
    pub fn status_mapping(&self, platform: Platform) -> Option<&[StatusEntry]> {
        self.config(platform).map(|c| c.statuses.as_slice())
    }

    /// Supported webhook events for a platform
    pub fn webhook_events(&self, platform: Platform) -> Option<&[WebhookEventEntry]> {
        self.config(platform).map(|c| c.webhook.events.as_slice())
    }

    /// Commission percentage for a platform
    pub fn commission_rate(&self, platform: Platform) -> Option<Decimal> {
        self.config(platform).map(|c| c.commission_rate)
    }

    /// Cataloged platforms
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.configs.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_covers_all_platforms() {
        let catalog = PlatformCatalog::builtin();
        for platform in Platform::ALL {
            let config = catalog.config(platform).unwrap();
            assert_eq!(config.platform, platform);
            assert!(!config.required_credentials.is_empty());
            assert!(!config.statuses.is_empty());
            assert!(!config.webhook.events.is_empty());
            assert!(config.base_url.starts_with("https://"));
            // Either per-item endpoints or a whole-menu upload must exist
            assert!(
                config.menu_upload_available() || config.endpoints.categories.is_some(),
                "{platform} has no menu push endpoint"
            );
        }
    }

    #[test]
    fn test_money_unit_cents_conversion() {
        assert_eq!(
            MoneyUnit::Cents.from_wire(&json!(4250)),
            Decimal::new(4250, 2)
        );
        assert_eq!(
            MoneyUnit::Cents.from_wire(&json!("990")),
            Decimal::new(990, 2)
        );
        assert_eq!(MoneyUnit::Cents.from_wire(&json!(null)), Decimal::ZERO);
        assert_eq!(MoneyUnit::Cents.to_wire(Decimal::new(4250, 2)), json!(4250));
    }

    #[test]
    fn test_money_unit_decimal_conversion() {
        assert_eq!(
            MoneyUnit::Decimal.from_wire(&json!(42.5)),
            Decimal::new(4250, 2)
        );
        assert_eq!(MoneyUnit::Decimal.to_wire(Decimal::new(4250, 2)), json!(42.5));
    }

    #[test]
    fn test_url_rendering_prefers_extra_over_credentials() {
        let catalog = PlatformCatalog::builtin();
        let config = catalog.config(Platform::NineNineFood).unwrap();
        let creds = PlatformCredentials::new().with("store_id", "s-77");

        let url = config.url("/v1/stores/{store_id}/orders/{order_id}", &creds, &[(
            "order_id", "o-1",
        )]);
        assert!(url.ends_with("/v1/stores/s-77/orders/o-1"));
        assert!(url.starts_with(&config.base_url));
    }

    #[test]
    fn test_auth_url_supports_absolute_endpoints() {
        let catalog = PlatformCatalog::builtin();
        let uber = catalog.config(Platform::UberEats).unwrap();
        // Uber authenticates against a separate host
        assert!(uber.auth.endpoint.starts_with("https://"));
        assert_eq!(uber.auth_url(), uber.auth.endpoint);

        let ifood = catalog.config(Platform::IFood).unwrap();
        assert!(ifood.auth_url().starts_with(&ifood.base_url));
    }

    #[test]
    fn test_commission_amount_rounds_to_cents() {
        let catalog = PlatformCatalog::builtin();
        let config = catalog.config(Platform::IFood).unwrap();
        let fee = config.commission_amount(Decimal::new(10000, 2)); // 100.00
        assert_eq!(fee, config.commission_rate.round_dp(2));
    }

    #[test]
    fn test_catalog_json_roundtrip() {
        let catalog = PlatformCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = PlatformCatalog::from_json(&json).unwrap();
        assert_eq!(parsed.platforms().count(), 4);
    }

    #[test]
    fn test_catalog_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            serde_json::to_string(&PlatformCatalog::builtin()).unwrap(),
        )
        .unwrap();

        let catalog = PlatformCatalog::load(&path).unwrap();
        assert!(catalog.config(Platform::Rappi).is_some());
    }

    #[test]
    fn test_catalog_load_rejects_garbage() {
        let err = PlatformCatalog::from_json("not json").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::InvalidPayload);
    }
}
