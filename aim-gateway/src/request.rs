//! Request assembly.
//!
//! Every request carries the account credentials and the protocol fields that ask the gateway
//! for a pipe-delimited, quote-encapsulated response. Operation-specific fields are layered on
//! top as key/value overrides.

use std::fmt;

use crate::{
    card::CardRecord,
    config::GatewayConfig,
    error::{GatewayError, Result},
    fields::{FormParams, map_fields},
    transaction::TransactionRecord,
};

/// Payment method marker for card transactions.
pub const PAYMENT_METHOD_CARD: &str = "CC";
/// Protocol version the response positions are defined for.
pub const PROTOCOL_VERSION: &str = "3.1";
/// Field delimiter requested from the gateway.
pub const DELIMITER: char = '|';
/// Encapsulation character requested from the gateway.
pub const ENCAPSULATOR: char = '"';

/// Operation type sent as `x_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Reserve funds without capturing them.
    AuthOnly,
    /// Capture a previous authorization.
    PriorAuthCapture,
}

impl TransactionType {
    /// Wire value of this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthOnly => "AUTH_ONLY",
            Self::PriorAuthCapture => "PRIOR_AUTH_CAPTURE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a flag the way the gateway expects it.
#[must_use]
pub const fn wire_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

/// Builds the base parameter set for `transaction_type` and applies `overrides`.
///
/// `overrides` is a flat list of alternating keys and values; later entries replace earlier
/// ones and may replace base fields.
///
/// # Errors
///
/// Returns [`GatewayError::BuilderUsage`] if `overrides` has an odd length.
///
/// # Examples
///
/// ```
/// use aim_gateway::{
///     GatewayConfig,
///     request::{TransactionType, build},
/// };
///
/// let config = GatewayConfig::new("", "login", "key", true, 120).unwrap();
/// let params = build(&config, TransactionType::AuthOnly, &["x_relay_response", "FALSE"]).unwrap();
/// assert_eq!(params.get("x_delim_char"), Some("|"));
/// assert_eq!(params.get("x_relay_response"), Some("FALSE"));
///
/// assert!(build(&config, TransactionType::AuthOnly, &["x_trans_id"]).is_err());
/// ```
pub fn build(
    config: &GatewayConfig,
    transaction_type: TransactionType,
    overrides: &[&str],
) -> Result<FormParams> {
    if overrides.len() % 2 != 0 {
        let dangling = overrides.last().copied().unwrap_or_default();
        return Err(GatewayError::BuilderUsage(format!(
            "got {} arguments, dangling key '{dangling}'",
            overrides.len()
        )));
    }

    let mut params = FormParams::new();
    params.set("x_type", transaction_type.as_str());
    params.set("x_login", config.login());
    params.set("x_tran_key", config.transaction_key());
    params.set("x_method", PAYMENT_METHOD_CARD);
    params.set("x_version", PROTOCOL_VERSION);
    params.set("x_delim_data", wire_bool(true));
    params.set("x_delim_char", DELIMITER.to_string());
    params.set("x_encap_char", ENCAPSULATOR.to_string());

    for pair in overrides.chunks_exact(2) {
        params.set(pair[0], pair[1]);
    }

    Ok(params)
}

/// Builds an authorization-only request.
///
/// # Errors
///
/// Propagates [`build`] errors; none occur for this fixed override list.
pub fn authorize_request(
    config: &GatewayConfig,
    card: &CardRecord,
    transaction: &TransactionRecord,
    email_customer: bool,
) -> Result<FormParams> {
    let duplicate_window = config.duplicate_window_secs().to_string();
    let mut params = build(
        config,
        TransactionType::AuthOnly,
        &[
            "x_relay_response",
            wire_bool(false),
            "x_duplicate_window",
            &duplicate_window,
            "x_email_customer",
            wire_bool(email_customer),
        ],
    )?;
    map_fields(card, &mut params);
    map_fields(transaction, &mut params);
    params.set("x_test_request", wire_bool(config.test_mode()));
    Ok(params)
}

/// Builds a capture of a prior authorization.
///
/// An empty `amount` captures the full authorized amount and sends no `x_amount`.
///
/// # Errors
///
/// Propagates [`build`] errors; none occur for this fixed override list.
pub fn capture_request(
    config: &GatewayConfig,
    transaction_id: &str,
    amount: &str,
) -> Result<FormParams> {
    let mut params =
        build(config, TransactionType::PriorAuthCapture, &["x_trans_id", transaction_id])?;
    if !amount.is_empty() {
        params.set("x_amount", amount);
    }
    params.set("x_test_request", wire_bool(config.test_mode()));
    Ok(params)
}
