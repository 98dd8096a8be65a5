//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Used by callers that expose gateway operations over HTTP. Webhook
    /// entrypoints deliberately ignore this mapping and answer 200 to the
    /// platform even on rejection (see [`super::ErrorCategory::is_fatal`]).
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 422 Unprocessable Entity (request well-formed, content invalid)
            Self::CredentialsInvalid | Self::InvalidPayload => StatusCode::UNPROCESSABLE_ENTITY,

            // 401 Unauthorized
            Self::AuthenticationFailed | Self::InvalidSignature => StatusCode::UNAUTHORIZED,

            // 502 Bad Gateway (upstream marketplace unreachable or refusing)
            Self::TransportError | Self::PlatformRejected => StatusCode::BAD_GATEWAY,

            // 400 Bad Request
            Self::UnsupportedEvent => StatusCode::BAD_REQUEST,
        }
    }
}
