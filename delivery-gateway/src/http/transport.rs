//! HTTP transport abstraction
//!
//! A transport performs exactly one request/response exchange. Retry,
//! timeout policy and logging live in the executor; transports stay dumb
//! so tests can swap the network out for an in-process queue.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use shared::{GatewayError, GatewayResult};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// User agent sent on every outbound request
pub const USER_AGENT: &str = concat!("delivery-gateway/", env!("CARGO_PKG_VERSION"));

/// Outbound HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Correlation id attached to log records for this call
    pub id: Uuid,
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a bearer authorization header
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Attach a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Uniform response: status code plus body
///
/// Non-JSON bodies are carried as `Value::String`, empty bodies as
/// `Value::Null`, so callers always get the same `{status, body}` shape.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait: one request/response exchange
///
/// Implementations return `Err` only for transport-level failures
/// (connect, timeout, broken body). A well-formed non-2xx response is an
/// `Ok`; the caller decides what a platform rejection means.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    async fn send(&self, request: &HttpRequest) -> GatewayResult<HttpResponse>;
}

/// reqwest-backed transport used in production
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> GatewayResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(HttpResponse { status, body })
    }
}

/// In-process transport for tests and local development
///
/// Hands out queued responses in FIFO order and records every request it
/// sees, so tests can assert "no HTTP call was made" or inspect the exact
/// payload an adapter produced. An empty queue answers `200 {}`.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: Mutex<VecDeque<GatewayResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned response
    pub fn push_response(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a transport-level failure
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(GatewayError::transport(message)));
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MemoryTransport {
    async fn send(&self, request: &HttpRequest) -> GatewayResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, serde_json::json!({}))))
    }
}
