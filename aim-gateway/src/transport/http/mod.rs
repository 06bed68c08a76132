//! HTTP transport implementation using reqwest.

use reqwest::Client;
use tracing::{error, instrument};

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{GatewayError, Result},
    fields::FormParams,
    transport::{Transport, TransportFailure, sealed},
};

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Keeps a pooled client, so one transport should be shared across requests. Deadlines come
/// from [`HttpConfig`]; a request that outlives them fails with
/// [`TransportFailure::Connect`].
///
/// # Examples
///
/// ```
/// use aim_gateway::transport::{HttpConfig, HttpTransport, HttpVersion};
///
/// let config = HttpConfig {
///     pool_max_idle_per_host: 4,
///     timeout_secs: 20,
///     connect_timeout_secs: 5,
///     http_version: HttpVersion::Http1,
/// };
///
/// let transport = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport with [`HttpConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the deadlines are out of range, or an error if
    /// the HTTP client cannot be created.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(GatewayError::HttpError)?;

        Ok(Self { client, http_version: config.http_version })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, params), fields(param_count = params.len()))]
    async fn post_form<'a>(
        &'a self,
        endpoint: &'a str,
        params: &'a FormParams,
    ) -> std::result::Result<String, TransportFailure> {
        let response = self.client.post(endpoint).form(params).send().await.map_err(|e| {
            error!(error = %e, "gateway request failed");
            TransportFailure::Connect(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "gateway returned error status");
            return Err(TransportFailure::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            error!(error = %e, "failed to read gateway response body");
            TransportFailure::Body(e.to_string())
        })
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Auto => "http",
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, header, method},
    };

    use super::*;

    fn params() -> FormParams {
        let mut params = FormParams::new();
        params.set("x_type", "AUTH_ONLY");
        params.set("x_description", "My Test transaction");
        params
    }

    #[test]
    fn test_http_transport_new() {
        let transport = HttpTransport::new().unwrap();
        assert_eq!(transport.protocol_name(), "http");
    }

    #[test]
    fn test_http_transport_http1_only() {
        let config = HttpConfig { http_version: HttpVersion::Http1, ..Default::default() };
        let transport = HttpTransport::with_config(&config).unwrap();
        assert_eq!(transport.protocol_name(), "http/1.1");
    }

    #[tokio::test]
    async fn test_post_form_encodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("x_type=AUTH_ONLY"))
            .and(body_string_contains("x_description=My+Test+transaction"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1|1|1"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let body = transport.post_form(&server.uri(), &params()).await.unwrap();
        assert_eq!(body, "1|1|1");
    }

    #[tokio::test]
    async fn test_post_form_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let result = transport.post_form(&server.uri(), &params()).await;
        assert_eq!(result, Err(TransportFailure::Status(502)));
    }

    #[tokio::test]
    async fn test_post_form_connection_refused() {
        let transport = HttpTransport::new().unwrap();
        let result = transport.post_form("http://127.0.0.1:1/", &params()).await;
        assert!(matches!(result, Err(TransportFailure::Connect(_))));
    }

    #[test]
    fn test_with_config_rejects_out_of_range_deadlines() {
        let zero = HttpConfig { timeout_secs: 0, ..Default::default() };
        assert!(matches!(HttpTransport::with_config(&zero), Err(GatewayError::Config(_))));

        let slow_connect = HttpConfig { connect_timeout_secs: 61, ..Default::default() };
        assert!(matches!(
            HttpTransport::with_config(&slow_connect),
            Err(GatewayError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_post_form_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = HttpConfig { timeout_secs: 1, ..Default::default() };
        let transport = HttpTransport::with_config(&config).unwrap();
        let result = transport.post_form(&server.uri(), &params()).await;
        assert!(matches!(result, Err(TransportFailure::Connect(_))));
    }
}
