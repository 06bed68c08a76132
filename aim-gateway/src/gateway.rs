//! Gateway entry points.
//!
//! [`Gateway`] sequences request assembly, the HTTP post and response decoding. Its
//! operations never fail: transport and decode problems come back as an unapproved
//! [`GatewayResponse`] with the reason filled in, so callers branch on
//! [`GatewayResponse::is_approved`] alone.

use tracing::{debug, info, instrument, warn};

use crate::{
    card::CardRecord,
    config::GatewayConfig,
    error::Result,
    fields::FormParams,
    request::{authorize_request, capture_request},
    response::{GatewayResponse, decode},
    transaction::TransactionRecord,
    transport::{HttpTransport, Transport},
};

/// Reason reported when the body does not decode.
pub const MALFORMED_RESPONSE_REASON: &str = "Payment gateway returned a malformed response.";

/// Client for one gateway account.
///
/// Holds no per-call state; share it by reference across tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use aim_gateway::{CardRecord, Gateway, GatewayConfig, TransactionRecord};
///
/// # async fn example() -> aim_gateway::Result<()> {
/// let config = GatewayConfig::new("", "api-login", "tx-key", true, -1)?;
/// let gateway = Gateway::new(config)?;
///
/// let card = CardRecord::new("4111111111111111", "123", "12/2030", "visa");
/// let transaction = TransactionRecord {
///     amount: "5.56".to_owned(),
///     invoice_number: "123".to_owned(),
///     ..Default::default()
/// };
///
/// let auth = gateway.authorize(&card, &transaction, false).await;
/// if auth.is_approved {
///     let capture = gateway.capture_preauth(&auth.transaction_id, "").await;
///     println!("{capture}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gateway<T: Transport = HttpTransport> {
    config: GatewayConfig,
    transport: T,
}

impl Gateway<HttpTransport> {
    /// Creates a gateway client with an [`HttpTransport`] built from `config.http()`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(config.http())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Gateway<T> {
    /// Creates a gateway client over an existing transport.
    #[must_use]
    pub fn with_transport(config: GatewayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Account configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Reserves `transaction.amount` on the card without capturing it.
    ///
    /// The card is not validated here; call [`crate::card::validate`] first if needed.
    #[instrument(
        skip_all,
        fields(invoice = %transaction.invoice_number, card = %card.last_four())
    )]
    pub async fn authorize(
        &self,
        card: &CardRecord,
        transaction: &TransactionRecord,
        email_customer: bool,
    ) -> GatewayResponse {
        match authorize_request(&self.config, card, transaction, email_customer) {
            Ok(params) => self.post(&params).await,
            Err(e) => {
                warn!(error = %e, "failed to build authorize request");
                GatewayResponse::unapproved(e.to_string())
            }
        }
    }

    /// Captures a prior authorization. An empty `amount` captures the authorized amount.
    #[instrument(skip(self))]
    pub async fn capture_preauth(&self, transaction_id: &str, amount: &str) -> GatewayResponse {
        match capture_request(&self.config, transaction_id, amount) {
            Ok(params) => self.post(&params).await,
            Err(e) => {
                warn!(error = %e, "failed to build capture request");
                GatewayResponse::unapproved(e.to_string())
            }
        }
    }

    /// Posts an already-assembled parameter set and decodes the reply.
    pub async fn post(&self, params: &FormParams) -> GatewayResponse {
        let endpoint = self.config.endpoint();
        debug!(endpoint, protocol = self.transport.protocol_name(), "posting to gateway");

        let body = match self.transport.post_form(endpoint, params).await {
            Ok(body) => body,
            Err(failure) => {
                warn!(error = %failure, "gateway transport failed");
                return GatewayResponse::unapproved(failure.reason());
            }
        };

        if self.config.log_raw_responses() {
            debug!(body = %body, "raw gateway response");
        }

        match decode(&body) {
            Ok(response) => {
                info!(
                    approved = response.is_approved,
                    response_code = %response.response_code,
                    reason_code = %response.reason_code,
                    transaction_id = %response.transaction_id,
                    "gateway responded"
                );
                response
            }
            Err(e) => {
                warn!(error = %e, "gateway response did not decode");
                let mut response = GatewayResponse::unapproved(MALFORMED_RESPONSE_REASON);
                response.raw_data = body;
                response
            }
        }
    }
}
