use pinhole_core::base62::{self, ALPHABET, MAX_LEN};
use pinhole_core::DecodeError;
use proptest::prelude::*;

// Ten digits never overflow a u64 (62^10 < 2^64); eleven can.
const CANONICAL_TOKEN: &str = "[1-9a-zA-Z][0-9a-zA-Z]{0,9}";

proptest! {
    #[test]
    fn decode_inverts_encode(n in any::<u64>()) {
        prop_assert_eq!(base62::decode(&base62::encode(n)), Ok(n));
    }

    #[test]
    fn encode_inverts_decode_for_canonical_tokens(token in CANONICAL_TOKEN) {
        let value = base62::decode(&token).expect("canonical token decodes");
        prop_assert_eq!(base62::encode(value), token);
    }

    #[test]
    fn encoded_tokens_use_only_the_alphabet(n in any::<u64>()) {
        let token = base62::encode(n);
        prop_assert!(!token.is_empty());
        prop_assert!(token.len() <= MAX_LEN);
        prop_assert!(token.bytes().all(|b| ALPHABET.contains(&b)));
        prop_assert!(base62::is_canonical(&token));
    }

    #[test]
    fn token_length_never_shrinks_as_value_grows(a in any::<u64>(), b in any::<u64>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(base62::encode(low).len() <= base62::encode(high).len());
    }

    #[test]
    fn token_length_is_digit_count(n in 1u64..) {
        let len = base62::encode(n).len() as u32;
        prop_assert!(62u128.pow(len - 1) <= u128::from(n));
        prop_assert!(u128::from(n) < 62u128.pow(len));
    }

    #[test]
    fn first_foreign_character_is_reported(
        prefix in "[0-9a-zA-Z]{0,8}",
        bad in "[^0-9a-zA-Z]",
        suffix in "\\PC{0,8}",
    ) {
        let token = format!("{prefix}{bad}{suffix}");
        let expected = bad.chars().next().expect("one character");
        prop_assert_eq!(
            base62::decode(&token),
            Err(DecodeError::InvalidCharacter {
                character: expected,
                position: prefix.chars().count(),
            })
        );
    }
}

#[test]
fn zero_is_a_single_symbol() {
    assert_eq!(base62::encode(0), "0");
    assert_eq!(base62::decode("0"), Ok(0));
}

#[test]
fn overflow_is_not_a_bad_character() {
    let err = base62::decode(&"Z".repeat(MAX_LEN + 1)).unwrap_err();
    assert_eq!(err, DecodeError::Overflow);
    assert!(!matches!(err, DecodeError::InvalidCharacter { .. }));
}
