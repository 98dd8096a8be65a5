//! Minimal connection check against one marketplace
//!
//! Credentials come from `GW_`-prefixed environment variables, e.g.
//!
//! ```text
//! GW_CLIENT_ID=... GW_CLIENT_SECRET=... GW_MERCHANT_ID=... \
//!     cargo run --example connection_check -- ifood
//! ```

use delivery_gateway::adapter::{AdapterRegistry, DeliveryAdapter};
use delivery_gateway::credentials::PlatformCredentials;
use delivery_gateway::http::{ExecutorConfig, RequestExecutor};
use delivery_gateway::logging;
use shared::Platform;

#[tokio::main]
async fn main() {
    logging::init_logging();

    let platform: Platform = match std::env::args().nth(1).as_deref().map(str::parse) {
        Some(Ok(platform)) => platform,
        _ => {
            eprintln!("Usage: connection_check <ifood|rappi|ubereats|99food>");
            std::process::exit(2);
        }
    };

    let credentials: PlatformCredentials = std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix("GW_")
                .map(|name| (name.to_lowercase(), value))
        })
        .collect();

    let registry = AdapterRegistry::builtin(RequestExecutor::new(ExecutorConfig::default()));
    let adapter = registry.get(platform).expect("platform is always cataloged");

    let result = adapter.test_connection(&credentials).await;
    println!("{}", serde_json::to_string_pretty(&result).expect("envelope serializes"));
    if !result.success {
        std::process::exit(1);
    }
}
