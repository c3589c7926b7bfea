//! Shortlink candidate generation and base62 encoding.
//!
//! A candidate is derived from a random version-4 UUID:
//!
//! 1. Split the UUID into its most and least significant 64-bit halves
//! 2. XOR the halves and take the magnitude of the signed result
//! 3. Base62-encode the magnitude, most significant digit first
//! 4. Keep the leading [`SHORTLINK_LENGTH`] digits, or left-pad with `'0'`
//!
//! Step 2 is not uniform: the sign bit is discarded, so `x` and `-x` fold to
//! the same value, and the UUID's fixed version and variant bits leak into
//! the result. Candidates are practically non-guessable, not cryptographically
//! unpredictable. Changing the fold would change the shortlink distribution,
//! so it is kept as is.
//!
//! Uniqueness is not decided here; see
//! [`crate::application::services::ShortlinkGenerator`].

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// Digit set for base62, indexed by digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Exact length of every shortlink.
pub const SHORTLINK_LENGTH: usize = 7;

/// Maximum number of candidates tried against the uniqueness oracle.
pub const MAX_RETRIES: usize = 10;

const BASE: u64 = ALPHABET.len() as u64;

static SHORTLINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{7}$").expect("shortlink regex is valid"));

/// Returns true if `s` has the shape of a shortlink (7 base62 characters).
///
/// Says nothing about whether such a paste exists.
pub fn is_valid_shortlink(s: &str) -> bool {
    SHORTLINK_REGEX.is_match(s)
}

/// Encodes `number` in base62, most significant digit first.
///
/// Zero encodes as `"0"`. No sign, no prefix, no padding.
pub fn encode_base62(mut number: u64) -> String {
    if number == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while number > 0 {
        digits.push(ALPHABET[(number % BASE) as usize]);
        number /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a base62 string produced by [`encode_base62`].
///
/// Returns `None` for empty input, characters outside [`ALPHABET`], or
/// values that overflow `u64`.
pub fn decode_base62(encoded: &str) -> Option<u64> {
    if encoded.is_empty() {
        return None;
    }

    encoded.bytes().try_fold(0u64, |acc, byte| {
        let digit = digit_value(byte)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

fn digit_value(byte: u8) -> Option<u64> {
    match byte {
        b'0'..=b'9' => Some(u64::from(byte - b'0')),
        b'A'..=b'Z' => Some(u64::from(byte - b'A') + 10),
        b'a'..=b'z' => Some(u64::from(byte - b'a') + 36),
        _ => None,
    }
}

/// Folds two signed 64-bit halves into one non-negative integer.
///
/// `i64::MIN` folds to `2^63`, which fits in `u64`.
pub fn fold_halves(most_significant: i64, least_significant: i64) -> u64 {
    (most_significant ^ least_significant).unsigned_abs()
}

/// Truncates or left-pads an encoding to exactly [`SHORTLINK_LENGTH`] characters.
///
/// Truncation keeps the leading (most significant) digits.
pub fn fit_to_length(encoded: &str) -> String {
    if encoded.len() >= SHORTLINK_LENGTH {
        encoded[..SHORTLINK_LENGTH].to_string()
    } else {
        let padding = (ALPHABET[0] as char)
            .to_string()
            .repeat(SHORTLINK_LENGTH - encoded.len());
        format!("{padding}{encoded}")
    }
}

/// Builds a candidate from the two halves of a 128-bit random value.
pub fn candidate_from_halves(most_significant: i64, least_significant: i64) -> String {
    fit_to_length(&encode_base62(fold_halves(
        most_significant,
        least_significant,
    )))
}

/// Builds a candidate from a UUID's big-endian halves.
pub fn candidate_from_uuid(uuid: Uuid) -> String {
    let (high, low) = uuid.as_u64_pair();
    candidate_from_halves(high as i64, low as i64)
}

/// Draws a fresh random candidate.
///
/// Not checked for uniqueness.
pub fn random_candidate() -> String {
    candidate_from_uuid(Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn in_alphabet(s: &str) -> bool {
        s.bytes().all(|b| ALPHABET.contains(&b))
    }

    #[test]
    fn test_alphabet_order() {
        assert_eq!(ALPHABET.len(), 62);
        assert_eq!(ALPHABET[0], b'0');
        assert_eq!(ALPHABET[10], b'A');
        assert_eq!(ALPHABET[36], b'a');
        assert_eq!(ALPHABET[61], b'z');
    }

    #[test]
    fn test_encode_small_values() {
        assert_eq!(encode_base62(0), "0");
        assert_eq!(encode_base62(9), "9");
        assert_eq!(encode_base62(10), "A");
        assert_eq!(encode_base62(61), "z");
        assert_eq!(encode_base62(62), "10");
        assert_eq!(encode_base62(62 * 62 - 1), "zz");
    }

    #[test]
    fn test_encode_u64_max() {
        assert_eq!(encode_base62(u64::MAX), "LygHa16AHYF");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let value = 0x1234_5678_9abc_def0;
        assert_eq!(encode_base62(value), encode_base62(value));
    }

    #[test]
    fn test_decode_inverts_encode() {
        for value in [0, 1, 61, 62, 3_843, 1 << 32, 1 << 63, u64::MAX - 1, u64::MAX] {
            assert_eq!(decode_base62(&encode_base62(value)), Some(value));
        }
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        assert_eq!(decode_base62(""), None);
        assert_eq!(decode_base62("abc-1"), None);
        assert_eq!(decode_base62("zzzzzzzzzzzz"), None);
    }

    #[test]
    fn test_zero_pads_to_all_zero_characters() {
        assert_eq!(fit_to_length(&encode_base62(0)), "0000000");
        assert_eq!(candidate_from_halves(42, 42), "0000000");
    }

    #[test]
    fn test_short_encoding_is_left_padded() {
        assert_eq!(fit_to_length("Z"), "000000Z");
        assert_eq!(fit_to_length("123456"), "0123456");
    }

    #[test]
    fn test_long_encoding_keeps_leading_digits() {
        assert_eq!(fit_to_length("1234567"), "1234567");
        assert_eq!(fit_to_length("LygHa16AHYF"), "LygHa16");
    }

    #[test]
    fn test_fold_uses_magnitude() {
        assert_eq!(fold_halves(5, 0), 5);
        assert_eq!(fold_halves(-5, 0), 5);
        assert_eq!(fold_halves(0b1100, 0b1010), 0b0110);
    }

    #[test]
    fn test_fold_of_signed_minimum() {
        assert_eq!(fold_halves(i64::MIN, 0), 1u64 << 63);
        assert_eq!(fold_halves(-1, i64::MAX), 1u64 << 63);
    }

    #[test]
    fn test_candidate_from_signed_minimum_halves() {
        let (most, least) = (0x7fff_ffff_ffff_ffff_i64, -1_i64);
        assert_eq!(most ^ least, i64::MIN);

        let candidate = candidate_from_halves(most, least);

        assert_eq!(candidate.len(), SHORTLINK_LENGTH);
        assert!(in_alphabet(&candidate));
        assert_eq!(candidate, fit_to_length(&encode_base62(1u64 << 63)));
        assert_eq!(candidate, "AzL8n0Y");
    }

    #[test]
    fn test_candidate_from_uuid_uses_big_endian_halves() {
        let uuid = Uuid::from_u64_pair(0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff);

        assert_eq!(
            candidate_from_uuid(uuid),
            candidate_from_halves(-1, i64::MAX)
        );
        assert_eq!(candidate_from_uuid(uuid), "AzL8n0Y");
    }

    #[test]
    fn test_random_candidates_have_shape() {
        for _ in 0..1000 {
            let candidate = random_candidate();
            assert_eq!(candidate.len(), SHORTLINK_LENGTH);
            assert!(in_alphabet(&candidate));
            assert!(is_valid_shortlink(&candidate));
        }
    }

    #[test]
    fn test_random_candidates_are_mostly_unique() {
        let candidates: HashSet<String> = (0..1000).map(|_| random_candidate()).collect();
        assert!(candidates.len() > 990);
    }

    #[test]
    fn test_is_valid_shortlink() {
        assert!(is_valid_shortlink("aB3dE5g"));
        assert!(is_valid_shortlink("0000000"));
        assert!(!is_valid_shortlink("aB3dE5"));
        assert!(!is_valid_shortlink("aB3dE5gh"));
        assert!(!is_valid_shortlink("aB3-E5g"));
        assert!(!is_valid_shortlink("health!"));
    }
}
