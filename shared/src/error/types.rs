//! Gateway error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Structured error with code, message and optional details
///
/// This is the primary error type of the integration layer. It travels via
/// `?` through executor/authenticator/processor code and is converted to an
/// [`OperationResult`](crate::response::OperationResult) at the adapter
/// boundary; callers never see a raw transport or serde error.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct GatewayError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (missing fields, platform response, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl GatewayError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Missing/empty required credential fields; no network call was made
    pub fn credentials_invalid(missing: Vec<String>) -> Self {
        Self::with_message(
            ErrorCode::CredentialsInvalid,
            format!("Missing required credentials: {}", missing.join(", ")),
        )
        .with_detail("required", missing)
    }

    /// Token could not be obtained
    pub fn authentication_failed(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AuthenticationFailed, msg)
    }

    /// Network failure after retries were exhausted
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TransportError, msg)
    }

    /// Non-2xx platform response, body preserved for diagnostics
    pub fn platform_rejected(status: u16, body: Value) -> Self {
        Self::with_message(
            ErrorCode::PlatformRejected,
            format!("Platform returned HTTP {status}"),
        )
        .with_detail("status", status)
        .with_detail("response", body)
    }

    /// Webhook event type outside the platform's allow-list
    pub fn unsupported_event(event: impl Into<String>) -> Self {
        let event = event.into();
        Self::with_message(
            ErrorCode::UnsupportedEvent,
            format!("Unsupported webhook event: {event}"),
        )
        .with_detail("event", event)
    }

    /// Webhook authenticity check failed
    pub fn invalid_signature() -> Self {
        Self::new(ErrorCode::InvalidSignature)
    }

    /// Malformed payload
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidPayload, msg)
    }
}

/// Type alias for Result with GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;
