//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification
///
/// Groups error codes by the stage of an operation that produced them:
/// local validation, authentication, transport, platform response or
/// webhook handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Detected locally before any network I/O
    Validation,
    /// Token acquisition failures
    Auth,
    /// Network-level failures (retries exhausted)
    Transport,
    /// Failures reported by the platform itself
    Platform,
    /// Inbound webhook rejections
    Webhook,
}

impl ErrorCategory {
    /// Whether errors in this category are fatal for the calling operation
    ///
    /// Webhook rejections are non-fatal: the HTTP entrypoint still answers
    /// 200/"received" so the platform does not retry the delivery forever.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Webhook)
    }
}

impl ErrorCode {
    /// Classify this error code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CredentialsInvalid | Self::InvalidPayload => ErrorCategory::Validation,
            Self::AuthenticationFailed => ErrorCategory::Auth,
            Self::TransportError => ErrorCategory::Transport,
            Self::PlatformRejected => ErrorCategory::Platform,
            Self::UnsupportedEvent | Self::InvalidSignature => ErrorCategory::Webhook,
        }
    }
}
