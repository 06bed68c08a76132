//! Card pre-validation: expiry, CVV length, brand prefix/length and Luhn checksum.
//!
//! No network calls and no authorization with the issuer happen here; a card that passes can
//! still be declined by the gateway.

use chrono::{Datelike, Utc};
use tracing::warn;

use super::{CardBrand, CardRecord, luhn::luhn_valid};
use crate::error::CardError;

/// Card number that skips every check after the expiry date. Gateway test data.
pub const TEST_CARD_NUMBER: &str = "5555555555";

const MIN_CARD_NUMBER_LEN: usize = 13;

/// Validates `card` against today's UTC date.
///
/// # Errors
///
/// See [`validate_at`].
pub fn validate(card: &CardRecord) -> Result<(), CardError> {
    let today = Utc::now();
    validate_at(card, today.year(), today.month())
}

/// Validates `card` as of the given year and month (1-12).
///
/// Checks run in order and the first failure is returned:
///
/// 1. expiry parses as `month/year`
/// 2. expiry is after the current month (a card expiring this month is already expired)
/// 3. the [`TEST_CARD_NUMBER`] passes here regardless of the remaining checks
/// 4. CVV is 3 or 4 characters
/// 5. number has at least 13 characters
/// 6. number matches the brand's prefix and length
/// 7. number passes the Luhn checksum
///
/// # Errors
///
/// Returns the [`CardError`] of the first failed check.
pub fn validate_at(
    card: &CardRecord,
    current_year: i32,
    current_month: u32,
) -> Result<(), CardError> {
    let (month, year) = parse_expiry(card.expiry()).ok_or_else(|| {
        warn!("card rejected: expiry missing or malformed");
        CardError::ExpiredOrMalformedDate
    })?;

    if year < current_year {
        warn!("card rejected: past expiration year");
        return Err(CardError::Expired);
    }
    if year == current_year && i64::from(month) <= i64::from(current_month) {
        warn!("card rejected: past expiration month");
        return Err(CardError::Expired);
    }

    if card.number() == TEST_CARD_NUMBER {
        warn!("test card number accepted without further checks");
        return Ok(());
    }

    let cvv_len = card.cvv().len();
    if !(3..=4).contains(&cvv_len) {
        warn!(cvv_len, "card rejected: CVV has wrong length");
        return Err(CardError::InvalidCvv);
    }

    let number = card.number();
    if number.len() < MIN_CARD_NUMBER_LEN {
        warn!(len = number.len(), "card rejected: number too short");
        return Err(CardError::InvalidCardNumber);
    }

    let Some(brand) = CardBrand::from_tag(card.brand()) else {
        warn!(brand = card.brand(), "card rejected: unsupported card type");
        return Err(CardError::UnsupportedCardType(card.brand().to_owned()));
    };

    let prefix_ok = brand.prefixes().iter().any(|prefix| number.starts_with(prefix));
    if !prefix_ok || !brand.lengths().contains(&number.len()) {
        warn!(%brand, len = number.len(), "card rejected: prefix or length does not match brand");
        return Err(CardError::InvalidCardNumber);
    }

    if !luhn_valid(number) {
        warn!(%brand, "card rejected: Luhn checksum failed");
        return Err(CardError::InvalidCardNumber);
    }

    Ok(())
}

/// Splits `month/year` into numbers. Both parts must parse as integers.
fn parse_expiry(expiry: &str) -> Option<(i32, i32)> {
    let (month, year) = expiry.split_once('/')?;
    if year.contains('/') {
        return None;
    }
    Some((month.parse().ok()?, year.parse().ok()?))
}
