//! Logging Infrastructure
//!
//! Structured logging setup for services embedding the gateway. Anything
//! that might carry credentials goes through the redaction filter before
//! it reaches these sinks (see [`crate::http::redact`]).

use std::path::Path;

/// Initialize the logger with sensible defaults
pub fn init_logging() {
    init_logging_with_file(None, None);
}

/// Initialize the logger with optional daily-rolling file output
pub fn init_logging_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "delivery-gateway");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
