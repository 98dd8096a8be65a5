//! Outbound HTTP plumbing
//!
//! Pluggable transport architecture:
//! ```text
//!         ┌─────────────────────┐
//!         │  HttpTransport      │  ◄── pluggable interface
//!         └────────┬────────────┘
//!                  │
//!          ┌───────┴────────┐
//!          ▼                ▼
//!   ReqwestTransport  MemoryTransport
//!   (real network)    (in-process, tests/dev)
//! ```
//!
//! [`RequestExecutor`] sits on top of the transport and adds bounded
//! retry, per-call timeout and redacted call/response logging.

pub mod executor;
pub mod redact;
pub mod transport;

pub use executor::{ExecutorConfig, RequestExecutor};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, MemoryTransport, ReqwestTransport};
