//! Decoding of the gateway's delimited response body.
//!
//! The body is a single line of `|`-separated fields, each optionally wrapped in `"`. Field
//! positions are fixed by protocol version 3.1; unused positions must still be present for the
//! used ones to line up, so a body is rejected unless it has at least [`MIN_FIELDS`] fields.

use std::fmt;

use serde::Serialize;

use crate::{
    error::{GatewayError, Result},
    request::{DELIMITER, ENCAPSULATOR},
};

/// Fields a body must contain; the highest position read is 38.
pub const MIN_FIELDS: usize = 39;

const RESPONSE_CODE: usize = 0;
const REASON_CODE: usize = 2;
const REASON_TEXT: usize = 3;
const AUTH_CODE: usize = 4;
const AVS_RESPONSE: usize = 5;
const TRANSACTION_ID: usize = 6;
const AMOUNT: usize = 9;
const TRANSACTION_TYPE: usize = 11;
const TAX: usize = 32;
const TRANSACTION_MD5: usize = 37;
const CVV_RESPONSE: usize = 38;

/// Response code meaning "approved".
pub const APPROVED: &str = "1";

/// Coarse classification of the response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    /// Code `1`.
    Approved,
    /// Code `2`.
    Declined,
    /// Code `3`.
    Error,
    /// Code `4`.
    HeldForReview,
    /// Anything else, including the empty code of a transport failure.
    Unknown,
}

impl ResponseStatus {
    /// Classifies a response code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            APPROVED => Self::Approved,
            "2" => Self::Declined,
            "3" => Self::Error,
            "4" => Self::HeldForReview,
            _ => Self::Unknown,
        }
    }
}

/// Decoded gateway response.
///
/// Serializes with the field names of the gateway's own documentation, which is also what
/// `Display` prints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GatewayResponse {
    /// Raw response code.
    #[serde(rename = "ResponseCode")]
    pub response_code: String,
    /// True iff the response code is `1`.
    #[serde(rename = "IsApproved")]
    pub is_approved: bool,
    /// Detailed reason code.
    #[serde(rename = "ReasonCode")]
    pub reason_code: String,
    /// Human-readable reason. Populated for transport and decode failures too.
    #[serde(rename = "ReasonText")]
    pub reason_text: String,
    /// Authorization code from the issuer.
    #[serde(rename = "AuthorizationCode")]
    pub auth_code: String,
    /// Address verification result.
    #[serde(rename = "AvsResponse")]
    pub avs_response: String,
    /// Gateway transaction id, used to capture later.
    #[serde(rename = "TransactionId")]
    pub transaction_id: String,
    /// Amount echoed back by the gateway.
    #[serde(rename = "Amount")]
    pub amount: String,
    /// Transaction type echoed back by the gateway.
    #[serde(rename = "TransactionType")]
    pub transaction_type: String,
    /// Tax amount.
    #[serde(rename = "Tax")]
    pub tax: String,
    /// MD5 hash supplied by the gateway for integrity checks.
    #[serde(rename = "TransactionMD5")]
    pub transaction_md5: String,
    /// Card code (CVV) verification result.
    #[serde(rename = "CCVResponse")]
    pub cvv_response: String,
    /// Response body as received; empty when no body was read.
    #[serde(rename = "RawResponse")]
    pub raw_data: String,
}

impl GatewayResponse {
    /// Unapproved response carrying only a reason, for failures before a body was read.
    #[must_use]
    pub fn unapproved(reason: impl Into<String>) -> Self {
        Self { reason_text: reason.into(), ..Self::default() }
    }

    /// Classifies [`response_code`](Self::response_code).
    #[must_use]
    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::from_code(&self.response_code)
    }
}

impl fmt::Display for GatewayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Positional fields of one response, already unquoted.
#[derive(Debug)]
struct ResponseFields<'a>([&'a str; MIN_FIELDS]);

impl<'a> ResponseFields<'a> {
    fn parse(body: &'a str) -> Result<Self> {
        let fields: Vec<&str> = body.split(DELIMITER).map(unquote).collect();
        let leading = fields.get(..MIN_FIELDS).ok_or(GatewayError::MalformedResponse {
            fields: fields.len(),
            required: MIN_FIELDS,
        })?;
        let fixed = <[&str; MIN_FIELDS]>::try_from(leading).map_err(|_| {
            GatewayError::MalformedResponse { fields: fields.len(), required: MIN_FIELDS }
        })?;
        Ok(Self(fixed))
    }

    fn get(&self, position: usize) -> String {
        self.0[position].to_owned()
    }
}

/// Strips one layer of encapsulating quotes from a field that starts and ends with one.
fn unquote(field: &str) -> &str {
    if field.len() > 1 && field.starts_with(ENCAPSULATOR) && field.ends_with(ENCAPSULATOR) {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

/// Decodes a response body.
///
/// # Errors
///
/// Returns [`GatewayError::MalformedResponse`] if the body has fewer than [`MIN_FIELDS`]
/// fields.
///
/// # Examples
///
/// ```
/// use aim_gateway::response::decode;
///
/// let mut fields = vec![""; 39];
/// fields[0] = "\"1\"";
/// fields[6] = "\"TX789\"";
/// let response = decode(&fields.join("|")).unwrap();
/// assert!(response.is_approved);
/// assert_eq!(response.transaction_id, "TX789");
///
/// assert!(decode("3|1|13").is_err());
/// ```
pub fn decode(body: &str) -> Result<GatewayResponse> {
    let fields = ResponseFields::parse(body)?;
    let response_code = fields.get(RESPONSE_CODE);

    Ok(GatewayResponse {
        is_approved: response_code == APPROVED,
        response_code,
        reason_code: fields.get(REASON_CODE),
        reason_text: fields.get(REASON_TEXT),
        auth_code: fields.get(AUTH_CODE),
        avs_response: fields.get(AVS_RESPONSE),
        transaction_id: fields.get(TRANSACTION_ID),
        amount: fields.get(AMOUNT),
        transaction_type: fields.get(TRANSACTION_TYPE),
        tax: fields.get(TAX),
        transaction_md5: fields.get(TRANSACTION_MD5),
        cvv_response: fields.get(CVV_RESPONSE),
        raw_data: body.to_owned(),
    })
}
