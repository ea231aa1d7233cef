//! Client configuration
//!
//! The facade is configured through a plain struct; the only environment
//! input is a single timeout override, read once per process.
//!
//! ## Environment Variables
//! - `FARADAY_CLIENT_TIMEOUT_MS`: transport timeout in milliseconds
//!   (default 10000)

use std::time::Duration;

use faraday_domain::constants::{DEFAULT_TIMEOUT_MS, TIMEOUT_ENV_VAR};
use once_cell::sync::Lazy;

static REQUEST_TIMEOUT: Lazy<Duration> = Lazy::new(resolve_timeout);

/// The transport timeout for this process.
///
/// Resolved from the environment exactly once; later changes to the
/// variable have no effect.
pub fn request_timeout() -> Duration {
    *REQUEST_TIMEOUT
}

fn resolve_timeout() -> Duration {
    let millis = match std::env::var(TIMEOUT_ENV_VAR) {
        Ok(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "invalid timeout override, using default");
            DEFAULT_TIMEOUT_MS
        }),
        Err(_) => DEFAULT_TIMEOUT_MS,
    };
    Duration::from_millis(millis)
}

/// Configuration for the API facade
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `https://faraday.example.com`. The API mount
    /// point is appended during facade construction. When absent, calls
    /// fail at the transport layer rather than at construction.
    pub base_url: Option<String>,
    /// Skip TLS certificate verification (self-signed server certificates).
    pub ignore_tls: bool,
    /// Pre-existing API token. When absent, authenticated operations fail
    /// until a token is obtained.
    pub token: Option<String>,
    /// Transport timeout applied uniformly to every request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            ignore_tls: false,
            token: None,
            timeout: request_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: Option<&str>, ignore_tls: bool, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.map(str::to_string),
            ignore_tls,
            token: token.map(str::to_string),
            timeout: request_timeout(),
        }
    }
}
