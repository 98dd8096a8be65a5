//! Request executor — bounded retry over a pluggable transport
//!
//! Retries transport-level failures only. A well-formed non-2xx response
//! is returned to the caller untouched: retrying a rejection would just
//! hammer the platform's rate limits with a request it already refused.

use super::redact;
use super::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use shared::{GatewayError, GatewayResult};
use std::sync::Arc;
use std::time::Duration;

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Total number of attempts per request
    pub max_retries: u32,
    /// Fixed sleep between attempts
    pub retry_delay: Duration,
    /// Per-call timeout applied to every request
    pub timeout: Duration,
    /// Emit redacted call/response log records
    pub log_calls: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
            log_calls: true,
        }
    }
}

impl ExecutorConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Executes outbound requests with retry and redacted logging
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    config: ExecutorConfig,
}

impl RequestExecutor {
    /// Create an executor backed by the real network
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            config,
        }
    }

    /// Create an executor over a custom transport (tests, in-process)
    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: ExecutorConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Clone this executor with a different per-call timeout, sharing the
    /// underlying transport (used to apply per-platform timeouts)
    pub fn with_call_timeout(&self, timeout: Duration) -> Self {
        Self {
            transport: self.transport.clone(),
            config: ExecutorConfig {
                timeout,
                ..self.config.clone()
            },
        }
    }

    /// Execute a request, retrying transport failures
    ///
    /// Returns the uniform `{status, body}` result, or `transport_error`
    /// carrying the last underlying cause once all attempts are spent.
    pub async fn execute(&self, mut request: HttpRequest) -> GatewayResult<HttpResponse> {
        request.timeout = self.config.timeout;
        let attempts = self.config.max_retries.max(1);

        if self.config.log_calls {
            tracing::debug!(
                request_id = %request.id,
                method = %request.method,
                url = %request.url,
                headers = ?redact::redact_headers(&request.headers),
                body = ?request.body.as_ref().map(redact::redact_value),
                "API call"
            );
        }

        let mut last_error = GatewayError::transport("no attempts made");
        for attempt in 1..=attempts {
            match self.transport.send(&request).await {
                Ok(response) => {
                    if self.config.log_calls {
                        tracing::debug!(
                            request_id = %request.id,
                            status = response.status,
                            body = ?redact::redact_value(&response.body),
                            "API response"
                        );
                    }
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!(
                        request_id = %request.id,
                        url = %request.url,
                        attempt,
                        max_retries = attempts,
                        "Request attempt failed: {}",
                        e.message
                    );
                    last_error = e;
                    if attempt < attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        Err(GatewayError::transport(format!(
            "Request failed after {attempts} attempts: {}",
            last_error.message
        ))
        .with_detail("attempts", attempts)
        .with_detail("url", request.url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::MemoryTransport;
    use serde_json::json;
    use shared::ErrorCode;

    fn fast_config() -> ExecutorConfig {
        ExecutorConfig::default().with_retry_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_retries_exactly_max_retries_then_fails() {
        let transport = Arc::new(MemoryTransport::new());
        transport.push_error("connection refused");
        transport.push_error("connection refused");
        transport.push_error("connection reset");
        let executor =
            RequestExecutor::with_transport(transport.clone(), fast_config().with_max_retries(3));

        let err = executor
            .execute(HttpRequest::get("https://api.example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::TransportError);
        assert_eq!(transport.request_count(), 3);
        // Last underlying cause is surfaced
        assert!(err.message.contains("connection reset"));
        assert_eq!(err.details.unwrap().get("attempts").unwrap(), 3);
    }

    #[tokio::test]
    async fn test_success_after_transient_failure() {
        let transport = Arc::new(MemoryTransport::new());
        transport.push_error("timeout");
        transport.push_response(200, json!({"ok": true}));
        let executor = RequestExecutor::with_transport(transport.clone(), fast_config());

        let response = executor
            .execute(HttpRequest::get("https://api.example.com"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_non_2xx_is_not_retried() {
        let transport = Arc::new(MemoryTransport::new());
        transport.push_response(500, json!({"error": "boom"}));
        let executor = RequestExecutor::with_transport(transport.clone(), fast_config());

        let response = executor
            .execute(HttpRequest::get("https://api.example.com"))
            .await
            .unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_applied_from_config() {
        let transport = Arc::new(MemoryTransport::new());
        let executor = RequestExecutor::with_transport(
            transport.clone(),
            fast_config().with_timeout(Duration::from_secs(7)),
        );

        executor
            .execute(HttpRequest::get("https://api.example.com"))
            .await
            .unwrap();

        assert_eq!(transport.requests()[0].timeout, Duration::from_secs(7));
    }
}
