//! Webhook processing — inbound platform callbacks
//!
//! Stateless per-delivery state machine:
//!
//! ```text
//! received → signature check → event-type check → dispatch → handled
//!                  │                  │
//!                  ▼                  ▼
//!          invalid_signature   unsupported_event
//! ```
//!
//! Both rejections are non-fatal for the transport: the HTTP entrypoint
//! answers the platform 200/"received" either way, so deliveries are not
//! retried forever. Signature failures are logged at `warn` since they may
//! be forged callbacks.
//!
//! The processor does not deduplicate. Platforms redeliver webhooks;
//! idempotent persistence keyed on (platform, external order id, event
//! type, timestamp) is the caller's contract.

use crate::catalog::{PlatformConfig, SignatureScheme};
use crate::normalize::{self, normalize_order};
use crate::credentials::PlatformCredentials;
use chrono::{DateTime, TimeZone, Utc};
use ring::hmac;
use serde_json::Value;
use shared::models::webhook::{WebhookEvent, WebhookEventType};
use shared::{GatewayError, GatewayResult};

/// Credential field holding the shared webhook secret
const WEBHOOK_SECRET_FIELD: &str = "webhook_secret";

/// One inbound webhook delivery
///
/// The HTTP entrypoint owns routing and header extraction; it hands over
/// the parsed body, the raw bytes (for signature verification over the
/// platform's exact payload) and the signature header value, if any.
#[derive(Debug, Clone)]
pub struct WebhookDelivery {
    pub body: Value,
    pub raw: Option<String>,
    pub signature: Option<String>,
}

impl WebhookDelivery {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            raw: None,
            signature: None,
        }
    }

    /// Parse a delivery from the raw request body
    pub fn from_raw(raw: &str) -> GatewayResult<Self> {
        let body = serde_json::from_str(raw)
            .map_err(|e| GatewayError::invalid_payload(format!("Webhook body is not JSON: {e}")))?;
        Ok(Self {
            body,
            raw: Some(raw.to_string()),
            signature: None,
        })
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Bytes the signature is computed over: the exact raw payload when
    /// available, the compact serialization of the body otherwise
    fn signed_bytes(&self) -> Vec<u8> {
        match &self.raw {
            Some(raw) => raw.as_bytes().to_vec(),
            None => serde_json::to_vec(&self.body).unwrap_or_default(),
        }
    }
}

/// Process one webhook delivery into a canonical event
pub fn process_webhook(
    config: &PlatformConfig,
    credentials: &PlatformCredentials,
    delivery: &WebhookDelivery,
) -> GatewayResult<WebhookEvent> {
    verify_signature(config, credentials, delivery)?;

    let native = normalize::path_str(&delivery.body, &config.webhook.event_field);
    if native.is_empty() {
        return Err(GatewayError::invalid_payload(format!(
            "Webhook body carries no event field '{}'",
            config.webhook.event_field
        )));
    }

    let Some(event_type) = config.webhook.canonical_event(&native) else {
        tracing::info!(
            platform = %config.platform,
            event = %native,
            "Ignoring unsupported webhook event"
        );
        return Err(GatewayError::unsupported_event(native));
    };

    let fragment = normalize::path_value(&delivery.body, &config.webhook.order_field)
        .cloned()
        .unwrap_or(Value::Null);
    let timestamp = event_timestamp(config, &delivery.body);

    let event = match event_type {
        WebhookEventType::PaymentConfirmed => {
            handle_payment_event(config, event_type, fragment, timestamp)
        }
        _ => handle_order_event(config, event_type, fragment, timestamp),
    };

    tracing::debug!(
        platform = %config.platform,
        event = %event.event_type,
        order = event.order.as_ref().map(|o| o.external_id.as_str()).unwrap_or(""),
        "Webhook dispatched"
    );
    Ok(event)
}

/// Order lifecycle events: normalize the embedded fragment
fn handle_order_event(
    config: &PlatformConfig,
    event_type: WebhookEventType,
    fragment: Value,
    timestamp: DateTime<Utc>,
) -> WebhookEvent {
    let order = fragment
        .is_object()
        .then(|| normalize_order(config, &fragment));
    WebhookEvent {
        event_type,
        platform: config.platform,
        order,
        payload: fragment,
        timestamp,
    }
}

/// Payment events: the fragment is usually a partial order; normalize what
/// is there and keep the raw fragment for the caller
fn handle_payment_event(
    config: &PlatformConfig,
    event_type: WebhookEventType,
    fragment: Value,
    timestamp: DateTime<Utc>,
) -> WebhookEvent {
    handle_order_event(config, event_type, fragment, timestamp)
}

/// Verify delivery authenticity
///
/// Enforced only when the platform signs deliveries AND a shared secret is
/// configured. A configured secret with a missing or mismatched signature
/// is a rejection: an unsigned delivery for a signing platform may be a
/// forged callback.
fn verify_signature(
    config: &PlatformConfig,
    credentials: &PlatformCredentials,
    delivery: &WebhookDelivery,
) -> GatewayResult<()> {
    if config.webhook.signature == SignatureScheme::None {
        return Ok(());
    }
    let Some(secret) = credentials.get(WEBHOOK_SECRET_FIELD).filter(|s| !s.is_empty()) else {
        return Ok(());
    };

    let Some(signature) = delivery.signature.as_deref() else {
        tracing::warn!(platform = %config.platform, "Webhook delivery is missing its signature");
        return Err(GatewayError::invalid_signature());
    };
    let Some(signature_bytes) = decode_signature(signature) else {
        tracing::warn!(platform = %config.platform, "Webhook signature is not hex or base64");
        return Err(GatewayError::invalid_signature());
    };

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    // ring's verify is constant-time
    hmac::verify(&key, &delivery.signed_bytes(), &signature_bytes).map_err(|_| {
        tracing::warn!(
            platform = %config.platform,
            "Webhook signature mismatch, possible forged callback"
        );
        GatewayError::invalid_signature()
    })
}

/// Platforms encode the HMAC as lowercase hex or base64
fn decode_signature(signature: &str) -> Option<Vec<u8>> {
    use base64::Engine;
    let trimmed = signature.trim();
    hex::decode(trimmed)
        .ok()
        .or_else(|| base64::engine::general_purpose::STANDARD.decode(trimmed).ok())
}

/// Event time: the platform's timestamp field when parseable, receipt time
/// otherwise. RFC 3339 strings and epoch seconds/milliseconds are accepted.
fn event_timestamp(config: &PlatformConfig, body: &Value) -> DateTime<Utc> {
    let raw = normalize::path_value(body, &config.webhook.timestamp_field);
    match raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|epoch| {
                // Heuristic: values past the year 2286 in seconds are millis
                if epoch > 9_999_999_999 {
                    Utc.timestamp_millis_opt(epoch).single()
                } else {
                    Utc.timestamp_opt(epoch, 0).single()
                }
            })
            .unwrap_or_else(Utc::now),
        _ => Utc::now(),
    }
}
