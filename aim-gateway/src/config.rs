//! Gateway account configuration.
//!
//! A [`GatewayConfig`] carries the endpoint, credentials and per-account settings. It holds no
//! per-call state, so one instance can back any number of concurrent requests.

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::{
    error::{GatewayError, Result},
    transport::HttpConfig,
};

/// Production endpoint used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://secure.authorize.net/gateway/transact.dll";

/// Sandbox endpoint, for convenience.
pub const SANDBOX_ENDPOINT: &str = "https://test.authorize.net/gateway/transact.dll";

/// Duplicate window value meaning "not set".
pub const DUPLICATE_WINDOW_UNSET: i64 = -1;

/// Duplicate window applied when [`DUPLICATE_WINDOW_UNSET`] is given.
pub const DEFAULT_DUPLICATE_WINDOW_SECS: u32 = 120;

/// Gateway endpoint, credentials and account settings.
///
/// # Examples
///
/// ```
/// use aim_gateway::{
///     GatewayConfig,
///     config::{DEFAULT_ENDPOINT, DUPLICATE_WINDOW_UNSET},
/// };
///
/// let config = GatewayConfig::new("", "login", "key", true, DUPLICATE_WINDOW_UNSET).unwrap();
/// assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
/// assert_eq!(config.duplicate_window_secs(), 120);
/// ```
#[derive(Clone)]
pub struct GatewayConfig {
    endpoint: String,
    login: String,
    transaction_key: String,
    duplicate_window_secs: u32,
    test_mode: bool,
    http: HttpConfig,
    log_raw_responses: bool,
}

impl GatewayConfig {
    /// Creates a configuration.
    ///
    /// An empty `endpoint` selects [`DEFAULT_ENDPOINT`]; a `duplicate_window` of
    /// [`DUPLICATE_WINDOW_UNSET`] selects [`DEFAULT_DUPLICATE_WINDOW_SECS`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidEndpoint`] if the endpoint is not an `http(s)` URL and
    /// [`GatewayError::Config`] if the duplicate window is out of range.
    pub fn new(
        endpoint: &str,
        login: &str,
        transaction_key: &str,
        test_mode: bool,
        duplicate_window: i64,
    ) -> Result<Self> {
        let endpoint = if endpoint.is_empty() { DEFAULT_ENDPOINT } else { endpoint };
        validate_endpoint(endpoint)?;

        let duplicate_window_secs = if duplicate_window == DUPLICATE_WINDOW_UNSET {
            DEFAULT_DUPLICATE_WINDOW_SECS
        } else {
            u32::try_from(duplicate_window).map_err(|_| {
                GatewayError::Config(format!("invalid duplicate window: {duplicate_window}"))
            })?
        };

        Ok(Self {
            endpoint: endpoint.to_owned(),
            login: login.to_owned(),
            transaction_key: transaction_key.to_owned(),
            duplicate_window_secs,
            test_mode,
            http: HttpConfig::default(),
            log_raw_responses: false,
        })
    }

    /// Loads a configuration from TOML.
    ///
    /// ```
    /// use aim_gateway::GatewayConfig;
    ///
    /// let config = GatewayConfig::from_toml(
    ///     r#"
    ///     login = "api-login"
    ///     transaction_key = "secret"
    ///     test_mode = true
    ///
    ///     [http]
    ///     timeout_secs = 15
    /// "#,
    /// )
    /// .unwrap();
    /// assert!(config.test_mode());
    /// assert_eq!(config.http().timeout_secs, 15);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] for unparsable TOML or out-of-range values, and
    /// [`GatewayError::InvalidEndpoint`] for a bad endpoint.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)
            .map_err(|e| GatewayError::Config(format!("failed to parse TOML: {e}")))?;
        file.http.validate()?;

        Ok(Self::new(
            &file.endpoint,
            &file.login,
            &file.transaction_key,
            file.test_mode,
            file.duplicate_window,
        )?
        .with_http(file.http)
        .with_raw_response_logging(file.log_raw_responses))
    }

    /// Replaces the HTTP transport settings.
    ///
    /// The settings are checked when the transport is built by
    /// [`Gateway::new`](crate::Gateway::new).
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Enables logging of raw response bodies at `debug` level.
    #[must_use]
    pub fn with_raw_response_logging(mut self, enabled: bool) -> Self {
        self.log_raw_responses = enabled;
        self
    }

    /// Replaces the credentials, keeping every other setting.
    #[must_use]
    pub fn with_credentials(mut self, login: &str, transaction_key: &str) -> Self {
        login.clone_into(&mut self.login);
        transaction_key.clone_into(&mut self.transaction_key);
        self
    }

    /// Gateway URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// API login id.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Transaction key.
    #[must_use]
    pub fn transaction_key(&self) -> &str {
        &self.transaction_key
    }

    /// Seconds during which the gateway rejects an identical resubmission.
    #[must_use]
    pub fn duplicate_window_secs(&self) -> u32 {
        self.duplicate_window_secs
    }

    /// Whether requests are flagged as test requests.
    #[must_use]
    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    /// HTTP transport settings.
    #[must_use]
    pub fn http(&self) -> &HttpConfig {
        &self.http
    }

    /// Whether raw response bodies are logged.
    #[must_use]
    pub fn log_raw_responses(&self) -> bool {
        self.log_raw_responses
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("login", &self.login)
            .field("transaction_key", &"[REDACTED]")
            .field("duplicate_window_secs", &self.duplicate_window_secs)
            .field("test_mode", &self.test_mode)
            .field("http", &self.http)
            .field("log_raw_responses", &self.log_raw_responses)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    endpoint: String,
    login: String,
    transaction_key: String,
    #[serde(default)]
    test_mode: bool,
    #[serde(default = "default_duplicate_window")]
    duplicate_window: i64,
    #[serde(default)]
    http: HttpConfig,
    #[serde(default)]
    log_raw_responses: bool,
}

fn default_duplicate_window() -> i64 {
    DUPLICATE_WINDOW_UNSET
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| GatewayError::InvalidEndpoint(format!("'{endpoint}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayError::InvalidEndpoint(format!(
            "scheme must be http or https, got: {}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(GatewayError::InvalidEndpoint(format!("URL missing host: {endpoint}")));
    }
    Ok(())
}
