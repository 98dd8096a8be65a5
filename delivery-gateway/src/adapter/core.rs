//! Shared adapter machinery
//!
//! One `AdapterCore` per platform instance carries the catalog config, the
//! request executor, the authenticator and the status mapper, and provides
//! the default implementation of each public operation. Concrete adapters
//! delegate here and override only what their marketplace does
//! differently.

use super::OrderFilters;
use crate::auth::Authenticator;
use crate::catalog::PlatformConfig;
use crate::credentials::{self, PlatformCredentials};
use crate::http::{HttpRequest, HttpResponse, RequestExecutor};
use crate::menu::{self, format_category, format_product};
use crate::normalize::{self, normalize_order};
use crate::status::StatusMapper;
use crate::webhook::{self, WebhookDelivery};
use chrono::SecondsFormat;
use serde_json::{Value, json};
use shared::models::menu::MenuData;
use shared::models::order::OrderStatus;
use shared::{GatewayError, GatewayResult, OperationResult, Platform};
use std::sync::Arc;
use std::time::Duration;

/// Shared state and default operation flows for one platform
#[derive(Debug)]
pub struct AdapterCore {
    config: PlatformConfig,
    executor: RequestExecutor,
    auth: Arc<Authenticator>,
    status: StatusMapper,
}

impl AdapterCore {
    pub fn new(config: PlatformConfig, executor: RequestExecutor, auth: Arc<Authenticator>) -> Self {
        let executor = executor.with_call_timeout(Duration::from_secs(config.timeout_secs));
        let status = StatusMapper::new(&config.statuses);
        Self {
            config,
            executor,
            auth,
            status,
        }
    }

    pub fn platform(&self) -> Platform {
        self.config.platform
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn status(&self) -> &StatusMapper {
        &self.status
    }

    /// Convert the operation outcome into the public envelope
    ///
    /// This is the adapter boundary: no error crosses it.
    pub fn finish(&self, outcome: GatewayResult<OperationResult>) -> OperationResult {
        outcome.unwrap_or_else(|err| OperationResult::from_error(self.platform(), err))
    }

    /// Check required credential fields; must run before any network call
    pub fn validate(&self, credentials: &PlatformCredentials) -> GatewayResult<()> {
        credentials::validate(&self.config, credentials)
    }

    /// Obtain a bearer token, short-circuiting on failure
    pub async fn token(&self, credentials: &PlatformCredentials) -> GatewayResult<String> {
        self.auth
            .authenticate(&self.executor, &self.config, credentials)
            .await
    }

    /// Render an endpoint template into an absolute URL
    pub fn url(
        &self,
        template: &str,
        credentials: &PlatformCredentials,
        extra: &[(&str, &str)],
    ) -> String {
        self.config.url(template, credentials, extra)
    }

    /// Execute a request through the retrying executor
    pub async fn send(&self, request: HttpRequest) -> GatewayResult<HttpResponse> {
        self.executor.execute(request).await
    }

    /// Unwrap a 2xx response body; non-2xx becomes `platform_rejected`
    /// with the platform's response preserved for diagnostics
    pub fn require_success(&self, response: HttpResponse) -> GatewayResult<Value> {
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(GatewayError::platform_rejected(
                response.status,
                response.body,
            ))
        }
    }

    // ==================== Default operation flows ====================

    /// test_connection: validate → authenticate → cheap merchant read
    pub async fn test_connection(
        &self,
        credentials: &PlatformCredentials,
    ) -> GatewayResult<OperationResult> {
        self.validate(credentials)?;
        let token = self.token(credentials).await?;

        let url = self.url(&self.config.endpoints.merchant, credentials, &[]);
        let body = self
            .require_success(self.send(HttpRequest::get(url).bearer(&token)).await?)?;

        tracing::info!(platform = %self.platform(), "Connection test succeeded");
        Ok(OperationResult::ok(
            self.platform(),
            "Connection established",
            json!({ "merchant": body }),
        ))
    }

    /// sync_menu: categories first, then products, since platforms reject a
    /// product whose category does not exist yet. Platforms with a
    /// single-document menu API get one upload instead.
    pub async fn sync_menu(
        &self,
        credentials: &PlatformCredentials,
        menu_data: &MenuData,
    ) -> GatewayResult<OperationResult> {
        self.validate(credentials)?;
        menu::validate_menu(menu_data)?;
        let token = self.token(credentials).await?;

        if let Some(template) = &self.config.endpoints.menu_upload {
            return self.sync_menu_single_upload(credentials, menu_data, &token, template).await;
        }

        let schema = &self.config.menu_schema;
        let money = self.config.money_unit;
        let mut categories_synced = 0usize;
        let mut products_synced = 0usize;
        let mut failures: Vec<Value> = Vec::new();

        let categories_template = self.config.endpoints.categories.as_deref().ok_or_else(|| {
            GatewayError::invalid_payload("Catalog has no category endpoint for this platform")
        })?;
        let products_template = self.config.endpoints.products.as_deref().ok_or_else(|| {
            GatewayError::invalid_payload("Catalog has no product endpoint for this platform")
        })?;

        let categories_url = self.url(categories_template, credentials, &[]);
        for category in &menu_data.categories {
            let payload = format_category(schema, category);
            let response = self
                .send(HttpRequest::post(&categories_url).bearer(&token).json(payload))
                .await?;
            if response.is_success() {
                categories_synced += 1;
            } else {
                failures.push(json!({
                    "kind": "category",
                    "id": category.id,
                    "name": category.name,
                    "status": response.status,
                    "response": response.body,
                }));
            }
        }

        let products_url = self.url(products_template, credentials, &[]);
        for product in &menu_data.products {
            let payload = format_product(schema, money, product);
            let response = self
                .send(HttpRequest::post(&products_url).bearer(&token).json(payload))
                .await?;
            if response.is_success() {
                products_synced += 1;
            } else {
                failures.push(json!({
                    "kind": "product",
                    "id": product.id,
                    "name": product.name,
                    "status": response.status,
                    "response": response.body,
                }));
            }
        }

        let summary = json!({
            "categories_synced": categories_synced,
            "products_synced": products_synced,
            "total": categories_synced + products_synced,
            "failures": failures,
        });

        if failures.is_empty() {
            tracing::info!(
                platform = %self.platform(),
                categories = categories_synced,
                products = products_synced,
                "Menu sync complete"
            );
            Ok(OperationResult::ok(
                self.platform(),
                format!(
                    "Menu synced: {categories_synced} categories, {products_synced} products"
                ),
                summary,
            ))
        } else {
            tracing::warn!(
                platform = %self.platform(),
                failed = failures.len(),
                "Menu sync completed with failures"
            );
            Err(GatewayError::with_message(
                shared::ErrorCode::PlatformRejected,
                format!("Menu sync completed with {} failures", failures.len()),
            )
            .with_detail("summary", summary))
        }
    }

    async fn sync_menu_single_upload(
        &self,
        credentials: &PlatformCredentials,
        menu_data: &MenuData,
        token: &str,
        template: &str,
    ) -> GatewayResult<OperationResult> {
        let payload = menu::format_menu(&self.config, menu_data)?;
        let url = self.url(template, credentials, &[]);
        self.require_success(self.send(HttpRequest::put(url).bearer(token).json(payload)).await?)?;

        let categories = menu_data.categories.len();
        let products = menu_data.products.len();
        tracing::info!(
            platform = %self.platform(),
            categories,
            products,
            "Menu uploaded"
        );
        Ok(OperationResult::ok(
            self.platform(),
            format!("Menu synced: {categories} categories, {products} products"),
            json!({
                "categories_synced": categories,
                "products_synced": products,
                "total": categories + products,
                "failures": [],
            }),
        ))
    }

    /// get_orders: build the filter query, fetch, normalize every order
    pub async fn get_orders(
        &self,
        credentials: &PlatformCredentials,
        filters: &OrderFilters,
    ) -> GatewayResult<OperationResult> {
        self.validate(credentials)?;
        let token = self.token(credentials).await?;

        let endpoints = &self.config.endpoints;
        let mut query: Vec<(String, String)> = Vec::new();
        if let Some(status) = filters.status {
            query.push((endpoints.status_param.clone(), self.status.to_platform(status)));
        }
        if let Some(from) = filters.from {
            query.push((
                endpoints.from_param.clone(),
                from.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(to) = filters.to {
            query.push((
                endpoints.to_param.clone(),
                to.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        let mut url = self.url(&endpoints.orders, credentials, &[]);
        if !query.is_empty() {
            let joined: Vec<String> = query
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            url = format!("{url}?{}", joined.join("&"));
        }

        let body = self
            .require_success(self.send(HttpRequest::get(url).bearer(&token)).await?)?;
        let raw_orders = match normalize::path_value(&body, &endpoints.orders_list_field) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        let orders: Vec<_> = raw_orders
            .iter()
            .map(|raw| normalize_order(&self.config, raw))
            .collect();
        let total = orders.len();

        Ok(OperationResult::ok(
            self.platform(),
            format!("{total} orders fetched"),
            json!({ "orders": orders, "total": total }),
        ))
    }

    /// update_order_status: canonical → native, push, confirm
    pub async fn update_order_status(
        &self,
        credentials: &PlatformCredentials,
        order_id: &str,
        status: OrderStatus,
        reason: Option<&str>,
    ) -> GatewayResult<OperationResult> {
        let mut body = json!({ "status": self.status.to_platform(status) });
        if let Some(reason) = reason {
            body["reason"] = Value::from(reason);
        }
        self.push_status_update(credentials, order_id, status, body, None).await
    }

    /// Shared tail of every status-update flow; adapters with bespoke
    /// endpoints or body shapes feed theirs through here
    pub async fn push_status_update(
        &self,
        credentials: &PlatformCredentials,
        order_id: &str,
        status: OrderStatus,
        body: Value,
        endpoint_override: Option<String>,
    ) -> GatewayResult<OperationResult> {
        self.validate(credentials)?;
        let token = self.token(credentials).await?;

        let template = endpoint_override
            .unwrap_or_else(|| self.config.endpoints.order_status.clone());
        let url = self.url(&template, credentials, &[("order_id", order_id)]);
        let native = self.status.to_platform(status);

        self.require_success(
            self.send(HttpRequest::post(url).bearer(&token).json(body)).await?,
        )?;

        tracing::info!(
            platform = %self.platform(),
            order_id,
            status = %native,
            "Order status pushed"
        );
        Ok(OperationResult::ok(
            self.platform(),
            format!("Order {order_id} updated to {native}"),
            json!({
                "order_id": order_id,
                "status": native,
                "canonical_status": status,
            }),
        ))
    }

    /// process_webhook: delegate to the webhook processor
    ///
    /// No credential-set validation here: webhook processing needs only
    /// the optional shared secret, and rejecting a delivery because an
    /// unrelated API field is unset would drop real orders.
    pub fn process_webhook(
        &self,
        credentials: &PlatformCredentials,
        delivery: &WebhookDelivery,
    ) -> OperationResult {
        match webhook::process_webhook(&self.config, credentials, delivery) {
            Ok(event) => {
                let message = format!("Webhook {} processed", event.event_type);
                let data = serde_json::to_value(&event).unwrap_or(Value::Null);
                OperationResult::ok(self.platform(), message, data)
            }
            Err(err) => OperationResult::from_error(self.platform(), err),
        }
    }
}
