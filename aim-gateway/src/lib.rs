//! AIM Gateway: client for the Authorize.Net Advanced Integration Method (AIM)
//!
//! A Rust library for the gateway's legacy form-POST card API. It builds authorization and
//! capture requests from typed records, posts them over HTTPS and decodes the pipe-delimited
//! reply into a [`GatewayResponse`]. It also pre-validates cards locally (expiry, CVV, brand
//! prefix/length, Luhn checksum) before anything is sent.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐
//! │ CardRecord   │   │ TransactionRec │   typed records with static wire tables
//! └──────┬───────┘   └───────┬────────┘
//!        │ fields::map_fields│
//! ┌──────▼───────────────────▼────────┐
//! │ request::build  (x_* FormParams)  │   credentials + protocol fields + overrides
//! └──────────────┬────────────────────┘
//!                │ Transport::post_form (reqwest)
//! ┌──────────────▼────────────────────┐
//! │ response::decode  ("1"|""|...)    │   39+ positional fields
//! └──────────────┬────────────────────┘
//!                ▼
//!         GatewayResponse
//! ```
//!
//! # Quick Start
//!
//! ## 1. Validate and Authorize
//!
//! ```rust,no_run
//! use aim_gateway::{CardRecord, Gateway, GatewayConfig, TransactionRecord, card};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::new(
//!     aim_gateway::config::SANDBOX_ENDPOINT,
//!     "api-login",
//!     "transaction-key",
//!     true,
//!     aim_gateway::config::DUPLICATE_WINDOW_UNSET,
//! )?;
//! let gateway = Gateway::new(config)?;
//!
//! let mut card = CardRecord::new("4111111111111111", "123", "12/2030", "visa");
//! card::validate(&card)?;
//!
//! let transaction = TransactionRecord {
//!     invoice_number: "123".to_string(),
//!     amount: "5.56".to_string(),
//!     description: "My Test transaction".to_string(),
//!     ..Default::default()
//! };
//!
//! let auth = gateway.authorize(&card, &transaction, false).await;
//! card.wipe();
//! println!("{auth}");
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Capture a Prior Authorization
//!
//! ```rust,no_run
//! use aim_gateway::{Gateway, GatewayConfig};
//!
//! # async fn example() -> aim_gateway::Result<()> {
//! let config = GatewayConfig::from_toml(
//!     r#"
//!     login = "api-login"
//!     transaction_key = "transaction-key"
//! "#,
//! )?;
//! let gateway = Gateway::new(config)?;
//!
//! // Empty amount captures the full authorized amount
//! let capture = gateway.capture_preauth("2149186848", "").await;
//! if !capture.is_approved {
//!     eprintln!("capture failed: {}", capture.reason_text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`card`]: card record, brand rules and local validation
//! - [`transaction`]: order, customer and shipping fields
//! - [`fields`]: wire tables and the ordered [`fields::FormParams`] set
//! - [`request`]: request assembly for each transaction type
//! - [`transport`]: sealed transport trait and the reqwest implementation
//! - [`response`]: delimited response decoding
//! - [`gateway`]: the [`Gateway`] facade
//! - [`config`]: endpoint, credentials and account settings
//! - [`error`]: error types
//!
//! # Error Handling
//!
//! Card validation returns a [`CardError`] naming the first failed check. Configuration and
//! construction return [`GatewayError`]. Gateway operations themselves never return an error:
//! connection failures, HTTP error statuses and malformed bodies all come back as an
//! unapproved [`GatewayResponse`] whose `reason_text` says what happened.
//!
//! # Security Considerations
//!
//! - Card number and CVV are zeroized when a [`CardRecord`] is dropped or wiped.
//! - `Debug` output of [`CardRecord`] and [`GatewayConfig`] redacts card data and the
//!   transaction key. Logs never contain card data.
//! - Raw response bodies are only logged when `log_raw_responses` is enabled.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and wiremock"
)]

pub mod card;
pub mod config;
pub mod error;
pub mod fields;
pub mod gateway;
pub mod request;
pub mod response;
pub mod transaction;
pub mod transport;

pub use card::{CardBrand, CardRecord};
pub use config::GatewayConfig;
pub use error::{CardError, GatewayError, Result};
pub use gateway::Gateway;
pub use response::{GatewayResponse, ResponseStatus};
pub use transaction::TransactionRecord;
