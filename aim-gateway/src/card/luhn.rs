//! Luhn (mod 10) checksum.

/// Correction added to every second digit from the right: doubling `d` and folding the
/// result back into a single digit adds `DELTA[d]` on top of `d` itself.
const DELTA: [i32; 10] = [0, 1, 2, 3, 4, -4, -3, -2, -1, 0];

/// Returns true if `number` passes the Luhn checksum.
///
/// Digits are scanned from the last to the first; the last digit is not doubled. Any
/// non-digit character makes the number invalid.
///
/// # Examples
///
/// ```
/// use aim_gateway::card::luhn_valid;
///
/// assert!(luhn_valid("4111111111111111"));
/// assert!(!luhn_valid("4111111111111112"));
/// ```
#[must_use]
pub fn luhn_valid(number: &str) -> bool {
    let mut checksum: i32 = 0;
    let mut doubled = false;

    for byte in number.bytes().rev() {
        if !byte.is_ascii_digit() {
            return false;
        }
        let digit = byte - b'0';
        checksum += i32::from(digit);
        if doubled {
            checksum += DELTA[usize::from(digit)];
        }
        doubled = !doubled;
    }

    checksum % 10 == 0
}
