//! Card data and client-side pre-validation.
//!
//! A [`CardRecord`] is built per transaction, checked with [`validate`], used once to build an
//! authorization request and then wiped with [`CardRecord::wipe`].
//!
//! # Examples
//!
//! ```
//! use aim_gateway::card::{CardBrand, CardRecord, validate_at};
//!
//! let mut card = CardRecord::new("4111111111111111", "555", "11/2099", CardBrand::Visa);
//! assert!(validate_at(&card, 2026, 10).is_ok());
//!
//! card.wipe();
//! assert!(card.number().is_empty());
//! ```

pub mod luhn;
pub mod validate;

use std::fmt;

use zeroize::Zeroize;

use crate::fields::{WireField, WireRecord};

pub use luhn::luhn_valid;
pub use validate::{validate, validate_at};

/// Card brands accepted by the pre-validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    /// Visa: prefix `4`, 13 or 16 digits.
    Visa,
    /// Mastercard: prefix `5`, 16 digits.
    Mastercard,
    /// American Express: prefix `34` or `37`, 15 digits.
    Amex,
    /// Discover: prefix `6011`, 16 digits.
    Discover,
}

impl CardBrand {
    /// Parses a brand tag, ignoring ASCII case.
    ///
    /// ```
    /// use aim_gateway::card::CardBrand;
    ///
    /// assert_eq!(CardBrand::from_tag("VISA"), Some(CardBrand::Visa));
    /// assert_eq!(CardBrand::from_tag("diners"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "visa" => Some(Self::Visa),
            "mastercard" => Some(Self::Mastercard),
            "amex" => Some(Self::Amex),
            "discover" => Some(Self::Discover),
            _ => None,
        }
    }

    /// Lower-case tag for this brand.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
        }
    }

    /// Number prefixes issued under this brand.
    #[must_use]
    pub const fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Visa => &["4"],
            Self::Mastercard => &["5"],
            Self::Amex => &["34", "37"],
            Self::Discover => &["6011"],
        }
    }

    /// Card number lengths valid for this brand.
    #[must_use]
    pub const fn lengths(self) -> &'static [usize] {
        match self {
            Self::Visa => &[13, 16],
            Self::Mastercard | Self::Discover => &[16],
            Self::Amex => &[15],
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CardBrand> for String {
    fn from(brand: CardBrand) -> Self {
        brand.as_str().to_owned()
    }
}

/// Card data for one transaction.
///
/// The brand is kept as the caller's tag so an unknown brand reaches the validator and is
/// reported as [`CardError::UnsupportedCardType`](crate::error::CardError::UnsupportedCardType).
/// It is not sent to the gateway.
///
/// # Security
///
/// `Debug` output masks the number and hides the CVV and expiry. Call [`wipe`](Self::wipe)
/// once the request has been built; number and CVV are also zeroized on drop.
#[derive(Clone, Default)]
pub struct CardRecord {
    number: String,
    cvv: String,
    expiry: String,
    brand: String,
}

impl CardRecord {
    /// Creates a card record.
    ///
    /// `expiry` is `month/year`, e.g. `"11/2030"`.
    #[must_use]
    pub fn new(
        number: impl Into<String>,
        cvv: impl Into<String>,
        expiry: impl Into<String>,
        brand: impl Into<String>,
    ) -> Self {
        Self { number: number.into(), cvv: cvv.into(), expiry: expiry.into(), brand: brand.into() }
    }

    /// Card number (PAN).
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Card verification value.
    #[must_use]
    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Expiry as given, `month/year`.
    #[must_use]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    /// Brand tag as given by the caller.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Last four digits of the card number, for display.
    #[must_use]
    #[allow(clippy::string_slice, reason = "card numbers are ASCII digits")]
    pub fn last_four(&self) -> &str {
        if self.number.len() >= 4 && self.number.is_char_boundary(self.number.len() - 4) {
            &self.number[self.number.len() - 4..]
        } else {
            &self.number
        }
    }

    /// Resets every field to empty, zeroizing the previous contents.
    pub fn wipe(&mut self) {
        self.number.zeroize();
        self.cvv.zeroize();
        self.expiry.zeroize();
        self.brand.zeroize();
    }
}

impl fmt::Debug for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRecord")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("cvv", &"***")
            .field("expiry", &"**/****")
            .field("brand", &self.brand)
            .finish()
    }
}

impl Drop for CardRecord {
    fn drop(&mut self) {
        self.number.zeroize();
        self.cvv.zeroize();
    }
}

impl WireRecord for CardRecord {
    const WIRE_FIELDS: &'static [WireField<Self>] = &[
        WireField { wire_name: "x_card_num", get: |c| c.number.as_str() },
        WireField { wire_name: "x_card_code", get: |c| c.cvv.as_str() },
        WireField { wire_name: "x_exp_date", get: |c| c.expiry.as_str() },
    ];
}

#[cfg(test)]
mod tests;
