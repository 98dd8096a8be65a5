//! End-to-end adapter flows over the in-process transport
//!
//! Every test drives a real adapter from the registry; the only thing
//! swapped out is the network.

use delivery_gateway::adapter::{AdapterRegistry, DeliveryAdapter, OrderFilters};
use delivery_gateway::credentials::PlatformCredentials;
use delivery_gateway::http::{ExecutorConfig, MemoryTransport, RequestExecutor};
use chrono::{TimeZone, Utc};
use serde_json::json;
use shared::models::order::OrderStatus;
use shared::{ErrorCode, Platform};
use std::sync::Arc;
use std::time::Duration;

fn setup() -> (Arc<MemoryTransport>, AdapterRegistry) {
    let transport = Arc::new(MemoryTransport::new());
    let executor = RequestExecutor::with_transport(
        transport.clone(),
        ExecutorConfig::default().with_retry_delay(Duration::from_millis(1)),
    );
    (transport.clone(), AdapterRegistry::builtin(executor))
}

fn ifood_credentials() -> PlatformCredentials {
    PlatformCredentials::new()
        .with("client_id", "cid")
        .with("client_secret", "shh")
        .with("merchant_id", "m-1")
}

fn nine_nine_credentials() -> PlatformCredentials {
    PlatformCredentials::new()
        .with("api_key", "k-1")
        .with("email", "store@example.com")
        .with("password", "pw")
        .with("store_id", "s-1")
}

fn push_oauth_token(transport: &MemoryTransport) {
    transport.push_response(200, json!({"access_token": "tok", "expires_in": 3600}));
}

#[tokio::test]
async fn test_connection_with_missing_credential_makes_no_http_call() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::IFood).unwrap();

    let incomplete = PlatformCredentials::new()
        .with("client_id", "cid")
        .with("merchant_id", "m-1");
    let result = adapter.test_connection(&incomplete).await;

    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::CredentialsInvalid));
    assert_eq!(
        result.details.unwrap().remove("required").unwrap(),
        json!(["client_secret"])
    );
    // Short-circuited before any network I/O
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_connection_authenticates_then_reads_merchant() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::IFood).unwrap();

    push_oauth_token(&transport);
    transport.push_response(200, json!({"id": "m-1", "name": "Cantina da Ana"}));

    let result = adapter.test_connection(&ifood_credentials()).await;
    assert!(result.success, "{}", result.message);
    assert_eq!(result.platform, Platform::IFood);
    assert_eq!(result.data.unwrap()["merchant"]["name"], "Cantina da Ana");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.contains("/oauth/token"));
    // Merchant id rendered into the endpoint template
    assert!(requests[1].url.ends_with("/merchant/v1.0/merchants/m-1"));
    assert!(
        requests[1]
            .headers
            .iter()
            .any(|(name, value)| name == "Authorization" && value == "Bearer tok")
    );
}

#[tokio::test]
async fn test_connection_surfaces_authentication_failure() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::IFood).unwrap();

    transport.push_response(401, json!({"error": "invalid_client"}));

    let result = adapter.test_connection(&ifood_credentials()).await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::AuthenticationFailed));
    // Authentication failed, so the merchant read was never attempted
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_connection_surfaces_platform_rejection_with_body() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::IFood).unwrap();

    push_oauth_token(&transport);
    transport.push_response(503, json!({"message": "maintenance window"}));

    let result = adapter.test_connection(&ifood_credentials()).await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::PlatformRejected));
    let details = result.details.unwrap();
    assert_eq!(details.get("status").unwrap(), 503);
    assert_eq!(details.get("response").unwrap()["message"], "maintenance window");
}

#[tokio::test]
async fn test_transport_exhaustion_becomes_transport_error() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::IFood).unwrap();

    transport.push_error("connection refused");
    transport.push_error("connection refused");
    transport.push_error("connection refused");

    let result = adapter.test_connection(&ifood_credentials()).await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::TransportError));
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_sync_menu_pushes_categories_before_products() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::NineNineFood).unwrap();

    transport.push_response(200, json!({"token": "tok"}));

    let menu: shared::models::menu::MenuData = serde_json::from_value(json!({
        "categories": [
            {"id": "cat-1", "name": "Burgers", "sort_order": 1},
            {"id": "cat-2", "name": "Drinks", "sort_order": 2}
        ],
        "products": [
            {"id": "p-1", "name": "Cheeseburger", "category_id": "cat-1", "price": 24.9},
            {"id": "p-2", "name": "Lemonade", "category_id": "cat-2", "price": 9.9}
        ]
    }))
    .unwrap();

    let result = adapter.sync_menu(&nine_nine_credentials(), &menu).await;
    assert!(result.success, "{}", result.message);
    let data = result.data.unwrap();
    assert_eq!(data["categories_synced"], 2);
    assert_eq!(data["products_synced"], 2);
    assert_eq!(data["total"], 4);

    let requests = transport.requests();
    assert_eq!(requests.len(), 5); // login + 2 categories + 2 products
    assert!(requests[1].url.ends_with("/v1/stores/s-1/categories"));
    assert!(requests[2].url.ends_with("/v1/stores/s-1/categories"));
    assert!(requests[3].url.ends_with("/v1/stores/s-1/products"));

    // 99Food counts money in cents and names the availability flag "active"
    let product = requests[3].body.as_ref().unwrap();
    assert_eq!(product["price"], json!(2490));
    assert_eq!(product["active"], json!(true));
    assert_eq!(product["category_id"], "cat-1");
}

#[tokio::test]
async fn test_sync_menu_reports_per_item_failures() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::NineNineFood).unwrap();

    transport.push_response(200, json!({"token": "tok"}));
    transport.push_response(200, json!({})); // cat-1 ok
    transport.push_response(422, json!({"error": "duplicate category"})); // cat-2 fails
    transport.push_response(200, json!({})); // p-1 ok
    transport.push_response(200, json!({})); // p-2 ok

    let menu: shared::models::menu::MenuData = serde_json::from_value(json!({
        "categories": [
            {"id": "cat-1", "name": "Burgers"},
            {"id": "cat-2", "name": "Drinks"}
        ],
        "products": [
            {"id": "p-1", "name": "Cheeseburger", "category_id": "cat-1", "price": 24.9},
            {"id": "p-2", "name": "Lemonade", "category_id": "cat-2", "price": 9.9}
        ]
    }))
    .unwrap();

    let result = adapter.sync_menu(&nine_nine_credentials(), &menu).await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::PlatformRejected));

    let details = result.details.unwrap();
    let summary = details.get("summary").unwrap();
    assert_eq!(summary["categories_synced"], 1);
    assert_eq!(summary["products_synced"], 2);
    assert_eq!(summary["failures"].as_array().unwrap().len(), 1);
    assert_eq!(summary["failures"][0]["id"], "cat-2");
    assert_eq!(summary["failures"][0]["status"], 422);
}

#[tokio::test]
async fn test_ubereats_menu_is_one_upload() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::UberEats).unwrap();

    push_oauth_token(&transport);

    let menu: shared::models::menu::MenuData = serde_json::from_value(json!({
        "categories": [{"id": "cat-1", "name": "Burgers"}],
        "products": [{"id": "p-1", "name": "Cheeseburger", "category_id": "cat-1", "price": 24.9}]
    }))
    .unwrap();

    let credentials = PlatformCredentials::new()
        .with("client_id", "cid")
        .with("client_secret", "shh")
        .with("store_id", "s-9");
    let result = adapter.sync_menu(&credentials, &menu).await;
    assert!(result.success, "{}", result.message);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2); // token + one PUT
    assert_eq!(requests[1].method, reqwest::Method::PUT);
    assert!(requests[1].url.ends_with("/v2/eats/stores/s-9/menus"));

    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(body["categories"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["title"], "Cheeseburger");
    assert_eq!(body["items"][0]["price"], json!(2490)); // cents
}

#[tokio::test]
async fn test_get_orders_normalizes_each_order() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::NineNineFood).unwrap();

    transport.push_response(200, json!({"token": "tok"}));
    transport.push_response(
        200,
        json!({
            "data": [
                {
                    "id": "abc123",
                    "number": "77",
                    "status": "preparing",
                    "total": 4250,
                    "items": [{"name": "Feijoada", "quantity": 1, "price": 4250, "total": 4250}]
                },
                {"id": "abc124", "status": "pending", "total": 990}
            ]
        }),
    );

    let result = adapter
        .get_orders(&nine_nine_credentials(), &OrderFilters::default())
        .await;
    assert!(result.success);
    let data = result.data.unwrap();
    assert_eq!(data["total"], 2);
    assert_eq!(data["orders"][0]["external_id"], "abc123");
    assert_eq!(data["orders"][0]["status"], "preparing");
    assert_eq!(data["orders"][0]["totals"]["total"], json!(42.5));
    assert_eq!(data["orders"][1]["totals"]["total"], json!(9.9));
}

#[tokio::test]
async fn test_get_orders_builds_filter_query() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::IFood).unwrap();

    push_oauth_token(&transport);
    transport.push_response(200, json!([]));

    let filters = OrderFilters::between(
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap(),
    )
    .with_status(OrderStatus::Confirmed);
    let result = adapter.get_orders(&ifood_credentials(), &filters).await;
    assert!(result.success);
    assert_eq!(result.data.unwrap()["total"], 0);

    let url = &transport.requests()[1].url;
    assert!(url.contains("status=CONFIRMED"), "{url}");
    assert!(url.contains("createdAfter=2025-06-01T00:00:00Z"), "{url}");
    assert!(url.contains("createdBefore=2025-06-02T00:00:00Z"), "{url}");
}

#[tokio::test]
async fn test_ifood_status_update_uses_action_endpoint() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::IFood).unwrap();

    push_oauth_token(&transport);
    transport.push_response(202, json!({}));

    let result = adapter
        .update_order_status(&ifood_credentials(), "o-1", OrderStatus::Confirmed, None)
        .await;
    assert!(result.success, "{}", result.message);
    assert_eq!(result.data.unwrap()["status"], "CONFIRMED");

    let request = &transport.requests()[1];
    assert!(request.url.ends_with("/order/v1.0/orders/o-1/confirm"));
}

#[tokio::test]
async fn test_rappi_status_update_repeats_store_id() {
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::Rappi).unwrap();

    push_oauth_token(&transport);
    transport.push_response(200, json!({}));

    let credentials = PlatformCredentials::new()
        .with("client_id", "cid")
        .with("client_secret", "shh")
        .with("store_id", "s-1");
    let result = adapter
        .update_order_status(&credentials, "r-9", OrderStatus::Dispatched, Some("courier left"))
        .await;
    assert!(result.success, "{}", result.message);

    let requests = transport.requests();
    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(body["state"], "ON_ROUTE");
    assert_eq!(body["store_id"], "s-1");
    assert_eq!(body["reason"], "courier left");
}

#[tokio::test]
async fn test_concurrent_calls_share_one_adapter() {
    // Adapters are stateless: two restaurants hitting the same instance
    // concurrently must not interfere.
    let (transport, registry) = setup();
    let adapter = registry.get(Platform::NineNineFood).unwrap();

    // Responses double as login and merchant bodies: the two in-flight
    // operations interleave on the FIFO queue in no guaranteed order.
    for _ in 0..4 {
        transport.push_response(200, json!({"token": "tok", "id": "store"}));
    }

    let other = PlatformCredentials::new()
        .with("api_key", "k-2")
        .with("email", "other@example.com")
        .with("password", "pw2")
        .with("store_id", "s-2");

    let nine_nine = nine_nine_credentials();
    let (first, second) = tokio::join!(
        adapter.test_connection(&nine_nine),
        adapter.test_connection(&other),
    );
    assert!(first.success && second.success);
    assert_eq!(transport.request_count(), 4);
}
