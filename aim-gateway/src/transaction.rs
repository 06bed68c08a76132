//! Per-transaction billing, shipping, contact and amount data.

use serde::{Deserialize, Serialize};

use crate::fields::{WireField, WireRecord};

/// Transaction data sent with an authorization.
///
/// Every field is optional; an empty field is left out of the request.
///
/// # Examples
///
/// ```
/// use aim_gateway::TransactionRecord;
///
/// let txn = TransactionRecord {
///     invoice_number: "123".to_owned(),
///     amount: "5.56".to_owned(),
///     description: "My test transaction".to_owned(),
///     ..Default::default()
/// };
/// assert!(txn.email.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRecord {
    /// Amount to authorize, e.g. `"5.56"`.
    pub amount: String,
    /// Merchant invoice number.
    pub invoice_number: String,
    /// Free-form description.
    pub description: String,
    /// Merchant-side customer identifier.
    pub customer_id: String,
    /// Customer IP address.
    pub customer_ip: String,
    /// Customer e-mail address.
    pub email: String,
    /// Billing first name.
    pub first_name: String,
    /// Billing last name.
    pub last_name: String,
    /// Billing company.
    pub company: String,
    /// Billing phone.
    pub phone: String,
    /// Billing street address.
    pub billing_address: String,
    /// Billing city.
    pub billing_city: String,
    /// Billing state or province.
    pub billing_state: String,
    /// Billing postal code.
    pub billing_zip: String,
    /// Billing country.
    pub billing_country: String,
    /// Shipping first name.
    pub ship_to_first_name: String,
    /// Shipping last name.
    pub ship_to_last_name: String,
    /// Shipping company.
    pub ship_to_company: String,
    /// Shipping street address.
    pub ship_to_address: String,
    /// Shipping city.
    pub ship_to_city: String,
    /// Shipping state or province.
    pub ship_to_state: String,
    /// Shipping postal code.
    pub ship_to_zip: String,
    /// Shipping country.
    pub ship_to_country: String,
}

impl WireRecord for TransactionRecord {
    const WIRE_FIELDS: &'static [WireField<Self>] = &[
        WireField { wire_name: "x_amount", get: |t| t.amount.as_str() },
        WireField { wire_name: "x_address", get: |t| t.billing_address.as_str() },
        WireField { wire_name: "x_city", get: |t| t.billing_city.as_str() },
        WireField { wire_name: "x_country", get: |t| t.billing_country.as_str() },
        WireField { wire_name: "x_state", get: |t| t.billing_state.as_str() },
        WireField { wire_name: "x_zip", get: |t| t.billing_zip.as_str() },
        WireField { wire_name: "x_company", get: |t| t.company.as_str() },
        WireField { wire_name: "x_cust_id", get: |t| t.customer_id.as_str() },
        WireField { wire_name: "x_customer_ip", get: |t| t.customer_ip.as_str() },
        WireField { wire_name: "x_description", get: |t| t.description.as_str() },
        WireField { wire_name: "x_email", get: |t| t.email.as_str() },
        WireField { wire_name: "x_first_name", get: |t| t.first_name.as_str() },
        WireField { wire_name: "x_invoice_num", get: |t| t.invoice_number.as_str() },
        WireField { wire_name: "x_last_name", get: |t| t.last_name.as_str() },
        WireField { wire_name: "x_phone", get: |t| t.phone.as_str() },
        WireField { wire_name: "x_ship_to_address", get: |t| t.ship_to_address.as_str() },
        WireField { wire_name: "x_ship_to_city", get: |t| t.ship_to_city.as_str() },
        WireField { wire_name: "x_ship_to_company", get: |t| t.ship_to_company.as_str() },
        WireField { wire_name: "x_ship_to_country", get: |t| t.ship_to_country.as_str() },
        WireField { wire_name: "x_ship_to_first_name", get: |t| t.ship_to_first_name.as_str() },
        WireField { wire_name: "x_ship_to_last_name", get: |t| t.ship_to_last_name.as_str() },
        WireField { wire_name: "x_ship_to_state", get: |t| t.ship_to_state.as_str() },
        WireField { wire_name: "x_ship_to_zip", get: |t| t.ship_to_zip.as_str() },
    ];
}
