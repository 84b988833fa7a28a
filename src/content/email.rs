//! Email de-obfuscation.
//!
//! Addresses may be stored Base64-encoded so crawlers scraping the raw
//! content file cannot harvest them. Decoding must never fail a render: a
//! corrupt payload degrades to a fixed placeholder address.

use crate::content::EmailConfig;
use crate::debug;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder returned when an obfuscated address cannot be recovered.
pub const PLACEHOLDER_EMAIL: &str = "contact@domain.com";

/// Standard alphabet, padding optional on decode.
const PERMISSIVE_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Recover the plaintext address from an [`EmailConfig`].
///
/// Not obfuscated: returned verbatim. Obfuscated: whitespace is stripped,
/// the payload is checked against the Base64 alphabet and decoded, and the
/// result must look like an email (contain both `@` and `.`). When the
/// strict decode fails or produces something invalid-looking, a byte-level
/// fallback decoder gets one more attempt before the placeholder wins.
///
/// The output is always a usable string; no input makes this fail.
pub fn decode_email(config: &EmailConfig) -> String {
    if !config.obfuscated {
        return config.address.clone();
    }

    static RE_BASE64: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").unwrap());

    let cleaned: String = config.address.split_whitespace().collect();
    if !RE_BASE64.is_match(&cleaned) {
        debug!("email"; "payload is not Base64, using placeholder");
        return PLACEHOLDER_EMAIL.to_string();
    }

    if let Some(email) = decode_strict(&cleaned) {
        return email;
    }

    debug!("email"; "strict decode failed, trying byte-level fallback");
    match relaxed_decode(&config.address).filter(|email| looks_like_email(email)) {
        Some(email) => email,
        None => {
            debug!("email"; "all decode paths failed, using placeholder");
            PLACEHOLDER_EMAIL.to_string()
        }
    }
}

/// Engine decode plus shape validation.
fn decode_strict(payload: &str) -> Option<String> {
    let bytes = PERMISSIVE_STANDARD.decode(payload).ok()?;
    let email = String::from_utf8(bytes).ok()?;
    looks_like_email(&email).then_some(email)
}

fn looks_like_email(text: &str) -> bool {
    text.contains('@') && text.contains('.')
}

/// Byte-level decoder for payloads the engine rejects.
///
/// Non-alphabet bytes (stray padding, punctuation, whitespace) are dropped
/// before grouping, so nothing aborts the decode. Trailing sextets carrying
/// fewer than 8 usable bits are discarded.
fn relaxed_decode(payload: &str) -> Option<String> {
    const ALPHABET: &[u8; 64] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let sextets: Vec<u8> = payload
        .bytes()
        .filter_map(|byte| {
            ALPHABET
                .iter()
                .position(|&c| c == byte)
                .map(|index| index as u8)
        })
        .collect();

    let mut bytes = Vec::with_capacity(sextets.len() * 3 / 4);
    for group in sextets.chunks(4) {
        match *group {
            [a, b, c, d] => {
                bytes.push((a << 2) | (b >> 4));
                bytes.push(((b & 0x0f) << 4) | (c >> 2));
                bytes.push(((c & 0x03) << 6) | d);
            }
            [a, b, c] => {
                bytes.push((a << 2) | (b >> 4));
                bytes.push(((b & 0x0f) << 4) | (c >> 2));
            }
            [a, b] => {
                bytes.push((a << 2) | (b >> 4));
            }
            _ => {}
        }
    }

    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

    fn obfuscated(address: &str) -> EmailConfig {
        EmailConfig {
            address: address.to_string(),
            obfuscated: true,
        }
    }

    #[test]
    fn test_plain_address_is_identity() {
        let config = EmailConfig {
            address: "someone@example.com".into(),
            obfuscated: false,
        };
        assert_eq!(decode_email(&config), "someone@example.com");
    }

    #[test]
    fn test_round_trip_with_padding() {
        let payload = STANDARD.encode("jane.doe@example.com");
        assert_eq!(decode_email(&obfuscated(&payload)), "jane.doe@example.com");
    }

    #[test]
    fn test_round_trip_without_padding() {
        let payload = STANDARD_NO_PAD.encode("jane.doe@example.com");
        assert_eq!(decode_email(&obfuscated(&payload)), "jane.doe@example.com");
    }

    #[test]
    fn test_whitespace_in_payload_ignored() {
        let payload = STANDARD.encode("dev@site.io");
        let spaced: String = payload
            .chars()
            .enumerate()
            .flat_map(|(i, c)| if i == 4 { vec![' ', c, '\n'] } else { vec![c] })
            .collect();
        assert_eq!(decode_email(&obfuscated(&spaced)), "dev@site.io");
    }

    #[test]
    fn test_non_base64_payload_gives_placeholder() {
        assert_eq!(
            decode_email(&obfuscated("!!!definitely not base64!!!")),
            PLACEHOLDER_EMAIL
        );
        // An unencoded address marked obfuscated is also rejected: '@' and
        // '.' are outside the alphabet.
        assert_eq!(
            decode_email(&obfuscated("visible@example.com")),
            PLACEHOLDER_EMAIL
        );
    }

    #[test]
    fn test_decoded_text_must_look_like_email() {
        let no_at = STANDARD.encode("hello.world");
        assert_eq!(decode_email(&obfuscated(&no_at)), PLACEHOLDER_EMAIL);

        let no_dot = STANDARD.encode("user@localhost");
        assert_eq!(decode_email(&obfuscated(&no_dot)), PLACEHOLDER_EMAIL);
    }

    #[test]
    fn test_invalid_utf8_gives_placeholder() {
        let payload = STANDARD.encode([0xff, 0xfe, 0x40, 0x2e]);
        assert_eq!(decode_email(&obfuscated(&payload)), PLACEHOLDER_EMAIL);
    }

    #[test]
    fn test_empty_payload_gives_placeholder() {
        assert_eq!(decode_email(&obfuscated("")), PLACEHOLDER_EMAIL);
    }

    #[test]
    fn test_fallback_decodes_length_the_engine_rejects() {
        // A stray trailing character makes the length 1 (mod 4), which the
        // engine refuses outright; the byte-level decoder drops it.
        let mut payload = STANDARD.encode("a@b.co");
        assert_eq!(payload.len() % 4, 0);
        payload.push('A');
        assert_eq!(decode_email(&obfuscated(&payload)), "a@b.co");
    }

    #[test]
    fn test_relaxed_decoder_strips_junk() {
        let payload = STANDARD.encode("x@y.zw");
        let littered = format!("={payload}=");
        assert_eq!(relaxed_decode(&littered).unwrap(), "x@y.zw");
    }
}
