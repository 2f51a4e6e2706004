//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base URL of the DNS API.
pub const DEFAULT_API_BASE_URL: &str = "https://api-ms.netangels.ru/api/v1";
/// Gateway endpoint that exchanges an API key for a bearer token.
pub const DEFAULT_TOKEN_URL: &str = "https://panel.netangels.ru/api/gateway/token/";
/// TTL applied when a record is created with a TTL of zero or less.
pub const DEFAULT_TTL: u32 = 300;

/// 默认连接超时（毫秒）
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// 默认请求超时（毫秒）
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Endpoints, timeouts and defaults used by [`NetangelsClient`](crate::NetangelsClient).
///
/// Every field has a default, so a partial document deserializes:
///
/// ```rust
/// use netangels_dns::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"requestTimeoutMs": 1500}"#).unwrap();
/// assert_eq!(config.request_timeout(), std::time::Duration::from_millis(1500));
/// assert_eq!(config.default_ttl, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// DNS API base URL, without a trailing slash.
    pub api_base_url: String,
    /// Token endpoint URL.
    pub token_url: String,
    /// TCP connect timeout in milliseconds; `0` means the default.
    pub connect_timeout_ms: u64,
    /// Whole-request timeout in milliseconds; `0` means the default.
    pub request_timeout_ms: u64,
    /// TTL substituted for non-positive TTLs on create/update.
    pub default_ttl: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            default_ttl: DEFAULT_TTL,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set both timeouts. Durations are kept at millisecond precision; a
    /// duration under one millisecond falls back to the default.
    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout_ms = as_millis(connect);
        self.request_timeout_ms = as_millis(request);
        self
    }

    #[must_use]
    pub fn with_default_ttl(mut self, ttl: u32) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Connect timeout handed to the HTTP client. Never zero.
    pub fn connect_timeout(&self) -> Duration {
        non_zero_millis(self.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS)
    }

    /// Whole-request timeout handed to the HTTP client. Never zero.
    pub fn request_timeout(&self) -> Duration {
        non_zero_millis(self.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS)
    }

    /// Join an API path (e.g. `"/dns/zones/"`) onto the base URL.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A zero timeout would make reqwest fail every request immediately.
fn non_zero_millis(ms: u64, default_ms: u64) -> Duration {
    Duration::from_millis(if ms == 0 { default_ms } else { ms })
}
