//! Unified error codes for the delivery integration layer
//!
//! Error codes are serialized as snake_case strings (`credentials_invalid`,
//! `transport_error`, ...), the exact values callers and dashboards match
//! on in the operation envelope. The set is closed: marketplace-specific
//! failures are folded into these buckets so callers never branch per
//! platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure code carried by every failed operation envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Required credential fields missing or empty; no network call made
    CredentialsInvalid,
    /// Bearer token could not be obtained
    AuthenticationFailed,
    /// Network/timeout failure after retries were exhausted
    TransportError,
    /// Platform answered a non-2xx response on an otherwise successful round trip
    PlatformRejected,
    /// Webhook event type not in the platform's allow-list
    UnsupportedEvent,
    /// Webhook authenticity check failed
    InvalidSignature,
    /// Payload could not be parsed or failed basic sanity checks
    InvalidPayload,
}

impl ErrorCode {
    /// Canonical snake_case identifier (the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CredentialsInvalid => "credentials_invalid",
            Self::AuthenticationFailed => "authentication_failed",
            Self::TransportError => "transport_error",
            Self::PlatformRejected => "platform_rejected",
            Self::UnsupportedEvent => "unsupported_event",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidPayload => "invalid_payload",
        }
    }

    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::CredentialsInvalid => "Required credential fields are missing",
            Self::AuthenticationFailed => "Could not authenticate with the platform",
            Self::TransportError => "Request failed after all retry attempts",
            Self::PlatformRejected => "Platform rejected the request",
            Self::UnsupportedEvent => "Webhook event type is not supported",
            Self::InvalidSignature => "Webhook signature verification failed",
            Self::InvalidPayload => "Payload is malformed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
