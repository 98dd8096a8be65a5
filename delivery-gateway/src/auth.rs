//! Platform authentication
//!
//! Every operation authenticates before touching a platform API. Both
//! supported schemes are encapsulated here; a failure short-circuits the
//! calling operation as `authentication_failed` before the follow-up call
//! is attempted, so requests never go out with an empty token.
//!
//! Tokens are cached by (platform, credential fingerprint) for their
//! advertised lifetime minus a safety margin. Platforms that do not report
//! `expires_in` are not cached and re-authenticate on every call.

use crate::catalog::{AuthScheme, PlatformConfig};
use crate::credentials::PlatformCredentials;
use crate::http::{HttpRequest, RequestExecutor};
use dashmap::DashMap;
use serde_json::{Value, json};
use shared::{GatewayError, GatewayResult, Platform};
use std::time::{Duration, Instant};

/// Cached tokens are dropped this long before their advertised expiry
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Response keys a token may hide under, across all supported platforms
const TOKEN_KEYS: &[&str] = &["access_token", "accessToken", "token"];
const EXPIRY_KEYS: &[&str] = &["expires_in", "expiresIn"];

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Short-lived bearer token cache
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: DashMap<String, CachedToken>,
}

impl TokenCache {
    fn key(platform: Platform, credentials: &PlatformCredentials) -> String {
        format!("{platform}:{}", credentials.fingerprint())
    }

    fn get(&self, platform: Platform, credentials: &PlatformCredentials) -> Option<String> {
        let key = Self::key(platform, credentials);
        // The shard lock must be released before remove() below
        let expired = match self.entries.get(&key) {
            Some(entry) if entry.expires_at > Instant::now() => return Some(entry.token.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(&key);
        }
        None
    }

    fn store(
        &self,
        platform: Platform,
        credentials: &PlatformCredentials,
        token: &str,
        expires_in: Duration,
    ) {
        let lifetime = expires_in.saturating_sub(EXPIRY_MARGIN);
        if lifetime.is_zero() {
            return;
        }
        self.entries.insert(
            Self::key(platform, credentials),
            CachedToken {
                token: token.to_string(),
                expires_at: Instant::now() + lifetime,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Obtains bearer tokens for any supported platform
#[derive(Debug, Default)]
pub struct Authenticator {
    cache: TokenCache,
}

impl Authenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate against a platform, reusing a cached token when valid
    ///
    /// Transport failures keep their `transport_error` code (they carry
    /// the more useful diagnostic); a rejection or a token-less response
    /// becomes `authentication_failed`.
    pub async fn authenticate(
        &self,
        executor: &RequestExecutor,
        config: &PlatformConfig,
        credentials: &PlatformCredentials,
    ) -> GatewayResult<String> {
        if let Some(token) = self.cache.get(config.platform, credentials) {
            tracing::debug!(platform = %config.platform, "Using cached token");
            return Ok(token);
        }

        let request = match config.auth.scheme {
            AuthScheme::OauthClientCredentials => HttpRequest::post(config.auth_url()).json(json!({
                "grant_type": "client_credentials",
                "client_id": credentials.get_or_empty("client_id"),
                "client_secret": credentials.get_or_empty("client_secret"),
            })),
            AuthScheme::PasswordLogin => HttpRequest::post(config.auth_url())
                .header("X-API-Key", credentials.get_or_empty("api_key"))
                .json(json!({
                    "email": credentials.get_or_empty("email"),
                    "password": credentials.get_or_empty("password"),
                })),
        };

        let response = executor.execute(request).await?;
        if !response.is_success() {
            tracing::warn!(
                platform = %config.platform,
                status = response.status,
                "Authentication rejected"
            );
            return Err(GatewayError::authentication_failed(format!(
                "Token endpoint returned HTTP {}",
                response.status
            ))
            .with_detail("status", response.status));
        }

        let token = extract_str(&response.body, TOKEN_KEYS).ok_or_else(|| {
            GatewayError::authentication_failed("Token endpoint response carried no token")
        })?;

        if let Some(expires_in) = extract_u64(&response.body, EXPIRY_KEYS) {
            self.cache.store(
                config.platform,
                credentials,
                &token,
                Duration::from_secs(expires_in),
            );
        }

        Ok(token)
    }
}

fn extract_str(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .find(|token| !token.is_empty())
}

fn extract_u64(body: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| body.get(key).and_then(Value::as_u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlatformCatalog;
    use crate::http::{ExecutorConfig, MemoryTransport};
    use serde_json::json;
    use shared::ErrorCode;
    use std::sync::Arc;

    fn setup(platform: Platform) -> (PlatformConfig, Arc<MemoryTransport>, RequestExecutor) {
        let config = PlatformCatalog::builtin().config(platform).unwrap().clone();
        let transport = Arc::new(MemoryTransport::new());
        let executor = RequestExecutor::with_transport(
            transport.clone(),
            ExecutorConfig::default().with_retry_delay(Duration::from_millis(1)),
        );
        (config, transport, executor)
    }

    fn oauth_credentials() -> PlatformCredentials {
        PlatformCredentials::new()
            .with("client_id", "cid")
            .with("client_secret", "shh")
            .with("merchant_id", "m-1")
    }

    #[tokio::test]
    async fn test_oauth_flow_posts_client_credentials() {
        let (config, transport, executor) = setup(Platform::IFood);
        transport.push_response(200, json!({"accessToken": "tok-1", "expiresIn": 3600}));

        let auth = Authenticator::new();
        let token = auth
            .authenticate(&executor, &config, &oauth_credentials())
            .await
            .unwrap();

        assert_eq!(token, "tok-1");
        let request = &transport.requests()[0];
        assert_eq!(request.url, config.auth_url());
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["grant_type"], "client_credentials");
        assert_eq!(body["client_id"], "cid");
    }

    #[tokio::test]
    async fn test_password_login_sends_api_key_header() {
        let (config, transport, executor) = setup(Platform::NineNineFood);
        transport.push_response(200, json!({"token": "tok-9"}));

        let credentials = PlatformCredentials::new()
            .with("api_key", "k-1")
            .with("email", "store@example.com")
            .with("password", "pw")
            .with("store_id", "s-1");
        let token = Authenticator::new()
            .authenticate(&executor, &config, &credentials)
            .await
            .unwrap();

        assert_eq!(token, "tok-9");
        let request = &transport.requests()[0];
        assert!(
            request
                .headers
                .iter()
                .any(|(name, value)| name == "X-API-Key" && value == "k-1")
        );
        assert_eq!(request.body.as_ref().unwrap()["email"], "store@example.com");
    }

    #[tokio::test]
    async fn test_rejection_becomes_authentication_failed() {
        let (config, transport, executor) = setup(Platform::IFood);
        transport.push_response(401, json!({"error": "invalid_client"}));

        let err = Authenticator::new()
            .authenticate(&executor, &config, &oauth_credentials())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationFailed);
    }

    #[tokio::test]
    async fn test_token_less_response_fails() {
        let (config, transport, executor) = setup(Platform::IFood);
        transport.push_response(200, json!({"scope": "merchant"}));

        let err = Authenticator::new()
            .authenticate(&executor, &config, &oauth_credentials())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationFailed);
    }

    #[tokio::test]
    async fn test_token_is_cached_until_expiry() {
        let (config, transport, executor) = setup(Platform::IFood);
        transport.push_response(200, json!({"access_token": "tok-1", "expires_in": 3600}));

        let auth = Authenticator::new();
        let creds = oauth_credentials();
        let first = auth.authenticate(&executor, &config, &creds).await.unwrap();
        let second = auth.authenticate(&executor, &config, &creds).await.unwrap();

        assert_eq!(first, second);
        // Second call answered from cache: one token request on the wire
        assert_eq!(transport.request_count(), 1);

        // Different credentials do not share the cached token
        let other = creds.clone().with("client_secret", "rotated");
        transport.push_response(200, json!({"access_token": "tok-2", "expires_in": 3600}));
        let third = auth.authenticate(&executor, &config, &other).await.unwrap();
        assert_eq!(third, "tok-2");
    }

    #[tokio::test]
    async fn test_short_lived_tokens_are_not_cached() {
        let (config, transport, executor) = setup(Platform::IFood);
        // expires_in below the safety margin: caching would hand out a
        // token that dies mid-call
        transport.push_response(200, json!({"access_token": "tok-1", "expires_in": 10}));

        let auth = Authenticator::new();
        auth.authenticate(&executor, &config, &oauth_credentials())
            .await
            .unwrap();
        assert_eq!(auth.cache.len(), 0);
    }

    #[tokio::test]
    async fn test_missing_expiry_keeps_per_call_authentication() {
        let (config, transport, executor) = setup(Platform::NineNineFood);
        transport.push_response(200, json!({"token": "tok-a"}));
        transport.push_response(200, json!({"token": "tok-b"}));

        let credentials = PlatformCredentials::new()
            .with("api_key", "k")
            .with("email", "e@x.com")
            .with("password", "p")
            .with("store_id", "s");
        let auth = Authenticator::new();
        auth.authenticate(&executor, &config, &credentials).await.unwrap();
        auth.authenticate(&executor, &config, &credentials).await.unwrap();

        assert_eq!(transport.request_count(), 2);
    }
}
