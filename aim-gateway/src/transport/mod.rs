//! Transport abstraction for posting form-encoded requests to the gateway.
//!
//! The gateway only ever sees `application/x-www-form-urlencoded` POSTs and answers with a
//! text body, so the transport surface is a single operation. Failures are reported as a
//! [`TransportFailure`] rather than an error: the caller folds them into an unapproved
//! response.
//!
//! # Examples
//!
//! ```rust,no_run
//! use aim_gateway::{
//!     fields::FormParams,
//!     transport::{HttpTransport, Transport},
//! };
//!
//! # async fn example() -> aim_gateway::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let mut params = FormParams::new();
//! params.set("x_type", "AUTH_ONLY");
//!
//! match transport.post_form("https://test.authorize.net/gateway/transact.dll", &params).await {
//!     Ok(body) => println!("{body}"),
//!     Err(failure) => println!("{}", failure.reason()),
//! }
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use thiserror::Error;

use crate::fields::FormParams;

pub mod config;
pub mod http;
pub(crate) mod sealed;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// Why no usable body came back from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// The request never completed: DNS, connect, TLS or deadline.
    #[error("connection to gateway failed: {0}")]
    Connect(String),

    /// The gateway answered with a non-success HTTP status.
    #[error("gateway returned HTTP status {0}")]
    Status(u16),

    /// The response body could not be read.
    #[error("failed to read gateway response body: {0}")]
    Body(String),
}

impl TransportFailure {
    /// Reason text reported to the caller in the unapproved response.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Connect(_) => "Failed to connect to payment gateway.",
            Self::Status(_) => "Payment gateway returned an error.",
            Self::Body(_) => "Payment gateway invalid body.",
        }
    }
}

/// Posts form parameters and returns the response body.
///
/// Sealed: only transports in this crate can be plugged into a
/// [`Gateway`](crate::Gateway), so card data always travels over a transport that honors
/// the configured deadlines.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Posts `params` form-encoded to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportFailure`] if the request fails, the status is not a success, or
    /// the body cannot be read.
    fn post_form<'a>(
        &'a self,
        endpoint: &'a str,
        params: &'a FormParams,
    ) -> impl Future<Output = Result<String, TransportFailure>> + Send + 'a;

    /// Protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
