//! Unified error system for the delivery integration layer
//!
//! - [`ErrorCode`]: the closed set of failure codes every caller can
//!   branch on, regardless of which marketplace produced the failure
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`GatewayError`]: rich error type with code, message and details
//!
//! Errors never cross the adapter boundary as panics or raw transport
//! errors: every public operation converts them into an
//! [`OperationResult`](crate::response::OperationResult) envelope.
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCode, GatewayError};
//!
//! // Create a simple error
//! let err = GatewayError::new(ErrorCode::AuthenticationFailed);
//!
//! // Create an error with custom message and details
//! let err = GatewayError::credentials_invalid(vec!["client_secret".into()]);
//! assert_eq!(err.code, ErrorCode::CredentialsInvalid);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{GatewayError, GatewayResult};
