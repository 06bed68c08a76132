//! Connection pool and deadline settings for the gateway client.
//!
//! Read from the `[http]` table of the gateway configuration file. Every field is optional;
//! unknown keys are rejected so a typo cannot silently fall back to a default.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// Longest whole-request deadline accepted. An authorization the gateway has not answered
/// within five minutes is treated as lost.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Longest connect deadline accepted.
pub const MAX_CONNECT_TIMEOUT_SECS: u64 = 60;

/// Pool and deadline settings for [`HttpTransport`](super::HttpTransport).
///
/// A request that outlives `timeout_secs` is reported as a connection failure, so the
/// deadline bounds how long a checkout waits on the gateway.
///
/// ```toml
/// [http]
/// timeout_secs = 45
/// connect_timeout_secs = 5
/// http_version = "http1"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Idle keep-alive connections held open to the gateway host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Seconds allowed for one post, from connect to last body byte.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Seconds allowed for TCP and TLS setup.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Protocol negotiation with the gateway.
    #[serde(default)]
    pub http_version: HttpVersion,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: default_pool_max_idle(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            http_version: HttpVersion::default(),
        }
    }
}

impl HttpConfig {
    /// Checks both deadlines are non-zero and within their ceilings.
    ///
    /// A zero deadline would make every post fail before it reaches the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] naming the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        check_range("timeout_secs", self.timeout_secs, MAX_TIMEOUT_SECS)?;
        check_range("connect_timeout_secs", self.connect_timeout_secs, MAX_CONNECT_TIMEOUT_SECS)
    }

    /// Whole-request deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect deadline.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// HTTP version preference.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HttpVersion {
    /// HTTP/1.1 only, for gateways or proxies that mishandle ALPN.
    Http1,
    /// Use HTTP/2 when the gateway offers it during the TLS handshake.
    #[default]
    Auto,
}

fn check_range(name: &str, value: u64, max: u64) -> Result<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(GatewayError::Config(format!("{name} must be between 1 and {max}, got {value}")))
    }
}

fn default_pool_max_idle() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
