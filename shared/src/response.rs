//! Operation result envelope
//!
//! Every public adapter operation, success or failure, returns this
//! envelope, so callers never need per-platform branching or a separate
//! "thrown vs returned" failure path.

use crate::error::{ErrorCategory, ErrorCode, GatewayError};
use crate::platform::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Uniform result envelope for all adapter operations
///
/// ```json
/// {
///     "success": true,
///     "message": "12 orders fetched",
///     "data": { ... },
///     "platform": "ifood",
///     "timestamp": "2025-06-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Operation payload (present on success, sometimes on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure code (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    /// Additional failure details (missing fields, platform response, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
    /// Originating platform
    pub platform: Platform,
    /// Envelope creation time (UTC)
    pub timestamp: DateTime<Utc>,
}

impl OperationResult {
    /// Create a successful result
    pub fn ok(platform: Platform, message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error_code: None,
            details: None,
            platform,
            timestamp: Utc::now(),
        }
    }

    /// Create a successful result without payload
    pub fn ok_empty(platform: Platform, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error_code: None,
            details: None,
            platform,
            timestamp: Utc::now(),
        }
    }

    /// Convert a gateway error into a failure envelope
    pub fn from_error(platform: Platform, err: GatewayError) -> Self {
        Self {
            success: false,
            message: err.message,
            data: None,
            error_code: Some(err.code),
            details: err.details,
            platform,
            timestamp: Utc::now(),
        }
    }

    /// Attach a data payload (per-item results on partial failures)
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Whether this failure is fatal for the calling operation
    ///
    /// Webhook rejections are not: the entrypoint still answers the
    /// platform with 200/"received".
    pub fn is_fatal_failure(&self) -> bool {
        self.error_code
            .map(|c| c.category().is_fatal())
            .unwrap_or(false)
    }

    /// Classify the failure, if any
    pub fn error_category(&self) -> Option<ErrorCategory> {
        self.error_code.map(|c| c.category())
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for OperationResult {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match self.error_code {
            None => http::StatusCode::OK,
            Some(code) => code.http_status(),
        };

        // Log upstream failures
        if let Some(code) = self.error_code
            && matches!(
                code.category(),
                ErrorCategory::Transport | ErrorCategory::Platform
            )
        {
            tracing::error!(
                platform = %self.platform,
                code = %code,
                message = %self.message,
                "Upstream platform failure"
            );
        }

        (status, Json(self)).into_response()
    }
}
