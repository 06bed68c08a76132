//! Error types for the AIM gateway client.
//!
//! Two families of errors exist:
//!
//! - [`CardError`]: client-side card pre-validation failures, returned before any network
//!   call.
//! - [`GatewayError`]: request building, response decoding and configuration failures.
//!
//! Transport failures are not errors at the public surface: the
//! [`Gateway`](crate::Gateway) folds them into an unapproved
//! [`GatewayResponse`](crate::GatewayResponse) so every call site branches on one type.
//!
//! # Examples
//!
//! ```
//! use aim_gateway::error::{GatewayError, Result};
//!
//! fn require_login(login: &str) -> Result<&str> {
//!     if login.is_empty() {
//!         return Err(GatewayError::Config("login must not be empty".to_owned()));
//!     }
//!     Ok(login)
//! }
//!
//! assert!(require_login("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Card pre-validation failures.
///
/// Produced only by [`validate`](crate::card::validate); never by the network path.
#[must_use = "validation errors should be handled before submitting a request"]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// Expiry is not in `month/year` form or either part is not a number.
    #[error("Expired credit card: expiry date is missing or malformed")]
    ExpiredOrMalformedDate,

    /// Expiry is in the past or in the current month.
    #[error("Expired credit card.")]
    Expired,

    /// CVV is not 3 or 4 characters long.
    #[error("Invalid CVV.")]
    InvalidCvv,

    /// Card number fails the length, brand prefix or Luhn checks.
    #[error("Invalid credit card number.")]
    InvalidCardNumber,

    /// Brand tag is not one of visa, mastercard, amex, discover.
    #[error("Unsupported credit card type: {0}")]
    UnsupportedCardType(String),
}

/// Errors that can occur while building requests, decoding responses or loading configuration.
///
/// # Error Recovery
///
/// - [`BuilderUsage`](Self::BuilderUsage): programming error at the call site, fix the
///   override list
/// - [`MalformedResponse`](Self::MalformedResponse): the gateway answered with a body that does
///   not follow the delimited format; inspect the raw body
/// - [`Config`](Self::Config), [`InvalidEndpoint`](Self::InvalidEndpoint): fix configuration
/// - [`HttpError`](Self::HttpError): HTTP client construction failed
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Override arguments were not given as key/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use aim_gateway::error::GatewayError;
    ///
    /// let err = GatewayError::BuilderUsage("dangling key x_trans_id".to_owned());
    /// assert!(err.to_string().contains("key/value pairs"));
    /// ```
    #[error("request overrides must be key/value pairs: {0}")]
    BuilderUsage(String),

    /// Response body has fewer delimited fields than the decoder reads.
    #[error("malformed gateway response: got {fields} fields, need at least {required}")]
    MalformedResponse {
        /// Number of fields found in the body.
        fields: usize,
        /// Minimum number of fields required.
        required: usize,
    },

    /// Gateway endpoint URL is unusable.
    #[error("Invalid gateway endpoint: {0}")]
    InvalidEndpoint(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid gateway configuration: {0}")]
    Config(String),

    /// HTTP client could not be created.
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}
