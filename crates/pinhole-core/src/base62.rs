//! Base62 conversion between numeric identifiers and short tokens.
//!
//! The alphabet is `0-9`, `a-z`, `A-Z` in that order; a symbol's position in
//! the alphabet is its digit value. Encoding is a plain positional numeral,
//! most significant digit first, so `0` encodes to `"0"` and no other value
//! ever carries a leading `'0'`.

use crate::error::{DecodeError, EncodeError};
use std::num::IntErrorKind;

/// The ordered base62 alphabet.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Numeric base of the encoding.
pub const BASE: u64 = 62;

/// Longest token `encode` can produce (62^11 > 2^64).
pub const MAX_LEN: usize = 11;

const NOT_A_DIGIT: u8 = u8::MAX;

/// ASCII lookup table mapping a byte to its digit value.
const DIGITS: [u8; 128] = {
    let mut table = [NOT_A_DIGIT; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the digit value of `c`, or `None` if it is not in the alphabet.
pub fn digit_value(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match DIGITS[c as usize] {
        NOT_A_DIGIT => None,
        digit => Some(digit),
    }
}

/// Encodes `id` as a base62 token.
///
/// # Examples
///
/// ```
/// use pinhole_core::base62;
///
/// assert_eq!(base62::encode(0), "0");
/// assert_eq!(base62::encode(61), "Z");
/// assert_eq!(base62::encode(62), "10");
/// ```
pub fn encode(id: u64) -> String {
    let mut buf = [0u8; MAX_LEN];
    let mut pos = MAX_LEN;
    let mut rest = id;

    // At least one digit is always emitted, which is what makes 0 -> "0".
    loop {
        pos -= 1;
        buf[pos] = ALPHABET[(rest % BASE) as usize];
        rest /= BASE;
        if rest == 0 {
            break;
        }
    }

    buf[pos..].iter().map(|&b| char::from(b)).collect()
}

/// Encodes a signed identifier, rejecting negative values.
pub fn encode_signed(id: i64) -> Result<String, EncodeError> {
    u64::try_from(id)
        .map(encode)
        .map_err(|_| EncodeError::Negative(id.to_string()))
}

/// Encodes an identifier given as decimal text.
///
/// Surrounding whitespace is ignored. Anything that is not a non-negative
/// integer fitting in a `u64` is a caller error.
pub fn encode_decimal(text: &str) -> Result<String, EncodeError> {
    let text = text.trim();
    match text.parse::<u64>() {
        Ok(id) => Ok(encode(id)),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
            Err(EncodeError::OutOfRange(text.to_owned()))
        }
        Err(_) if is_negative_integer(text) => Err(EncodeError::Negative(text.to_owned())),
        Err(_) => Err(EncodeError::NotAnInteger(text.to_owned())),
    }
}

fn is_negative_integer(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Decodes a base62 token back into its identifier.
///
/// Every character is checked against the alphabet before any arithmetic,
/// so a token that is both malformed and enormous reports the bad character.
///
/// # Errors
///
/// * [`DecodeError::Empty`] for `""`.
/// * [`DecodeError::InvalidCharacter`] for the first character outside the alphabet.
/// * [`DecodeError::Overflow`] when the value does not fit in a `u64`.
pub fn decode(token: &str) -> Result<u64, DecodeError> {
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }

    if let Some((position, character)) = token
        .chars()
        .enumerate()
        .find(|&(_, c)| digit_value(c).is_none())
    {
        return Err(DecodeError::InvalidCharacter {
            character,
            position,
        });
    }

    token.bytes().try_fold(0u64, |value, byte| {
        let digit = u64::from(DIGITS[byte as usize]);
        value
            .checked_mul(BASE)
            .and_then(|value| value.checked_add(digit))
            .ok_or(DecodeError::Overflow)
    })
}

/// Reports whether `token` is exactly what [`encode`] would produce for its value.
pub fn is_canonical(token: &str) -> bool {
    decode(token).is_ok() && (token == "0" || !token.starts_with('0'))
}
