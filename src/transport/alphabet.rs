// src/transport/alphabet.rs

//! A fixed 7-bit alphabet for carrying frames over text-only SMS transports.
//!
//! The frame is treated as an opaque bit sequence: its real bits plus the
//! terminator bit are cut into 7-bit groups (the last one zero-padded) and
//! each group is replaced by the character at that index of [`ALPHABET`].
//! Decoding reverses the mapping and finds the terminator again as the last
//! set bit, so the padding added here is dropped along with the stream's own.

use crate::stream::BitStream;
use crate::utils::error::{CodecError, Result};

/// Bits carried by one transport character.
pub const SEVEN_BIT_WIDTH: usize = 7;

/// Bit capacity of a single SMS.
pub const SINGLE_SMS_BITS: usize = 160 * 7;
/// Bit capacity of a two-part SMS.
pub const TWO_PART_SMS_BITS: usize = 306 * 7;
/// Bit capacity of a three-part SMS.
pub const THREE_PART_SMS_BITS: usize = 459 * 7;

/// Bits per character when a message falls back to UCS-2.
const UCS2_CHAR_BITS: usize = 16;

/// Characters indexed by their 7-bit code.
///
/// Mostly the GSM 03.38 default alphabet. Index 0 holds `'{'` in place of CR,
/// which some handsets rewrite to LF, and index 127 holds `'€'` in place of a
/// bare ESC, which handsets refuse to send.
pub const ALPHABET: [char; 128] = [
    '{', 'Δ', ' ', '0', '¡', 'P', '¿', 'p', //
    '£', '_', '!', '1', 'A', 'Q', 'a', 'q', //
    '$', 'Φ', '"', '2', 'B', 'R', 'b', 'r', //
    '¥', 'Γ', '#', '3', 'C', 'S', 'c', 's', //
    'è', 'Λ', '¤', '4', 'D', 'T', 'd', 't', //
    'é', 'Ω', '%', '5', 'E', 'U', 'e', 'u', //
    'ù', 'Π', '&', '6', 'F', 'V', 'f', 'v', //
    'ì', 'Ψ', '\'', '7', 'G', 'W', 'g', 'w', //
    'ò', 'Σ', '(', '8', 'H', 'X', 'h', 'x', //
    'Ç', 'Θ', ')', '9', 'I', 'Y', 'i', 'y', //
    'Ξ', '*', ':', 'J', 'Z', 'j', 'z', 'Ø', //
    '+', ';', 'K', 'Ä', 'k', 'ä', 'ø', 'Æ', //
    ',', '<', 'L', 'Ö', 'l', 'ö', 'æ', '-', //
    '=', 'M', 'Ñ', 'm', 'ñ', 'Å', 'ß', '.', //
    '>', 'N', 'Ü', 'n', 'ü', 'å', 'É', '/', //
    '?', 'O', '§', 'o', 'à', '@', '\n', '€', //
];

/// Characters that need an escape septet in front of them on the wire.
const EXTENSION_CHARS: [char; 9] = ['€', '|', '^', '{', '}', '[', '~', ']', '\\'];

/// The character for a 7-bit code. Only the low 7 bits of `code` are used.
pub fn char_for_code(code: u8) -> char {
    ALPHABET[(code & 0x7F) as usize]
}

/// The 7-bit code of `c`, if it belongs to the alphabet.
pub fn code_for_char(c: char) -> Option<u8> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// Encodes a stream's real bits and its terminator as transport text.
pub fn encode_stream(stream: &BitStream) -> String {
    let bits: Vec<bool> = stream.iter().chain(std::iter::once(true)).collect();
    bits.chunks(SEVEN_BIT_WIDTH)
        .map(|group| {
            let code = group
                .iter()
                .chain(std::iter::repeat(&false))
                .take(SEVEN_BIT_WIDTH)
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
            char_for_code(code)
        })
        .collect()
}

/// Decodes transport text back into the stream it was produced from.
pub fn decode_stream(text: &str) -> Result<BitStream> {
    if text.is_empty() {
        return Err(CodecError::format("transport text is empty"));
    }

    let mut bits = Vec::with_capacity(text.chars().count() * SEVEN_BIT_WIDTH);
    for (i, c) in text.chars().enumerate() {
        let code = code_for_char(c).ok_or_else(|| {
            CodecError::format(format!(
                "character {:?} at position {} is not in the 7-bit alphabet",
                c, i
            ))
        })?;
        for shift in (0..SEVEN_BIT_WIDTH).rev() {
            bits.push((code >> shift) & 1 == 1);
        }
    }
    BitStream::from_terminated_bits(&bits)
}

/// Number of bits needed to send `text` as an SMS.
///
/// Text made only of alphabet characters costs 7 bits per character, with
/// extension characters costing two septets. Any character outside the
/// alphabet forces UCS-2, 16 bits for every character.
pub fn gsm_bit_length(text: &str) -> usize {
    let mut plain = 0;
    let mut extended = 0;
    let mut other = 0;
    for c in text.chars() {
        if EXTENSION_CHARS.contains(&c) {
            extended += 1;
        } else if code_for_char(c).is_some() {
            plain += 1;
        } else {
            other += 1;
        }
    }

    if other == 0 {
        (plain + extended * 2) * SEVEN_BIT_WIDTH
    } else {
        (plain + extended + other) * UCS2_CHAR_BITS
    }
}

/// The smallest SMS envelope, in bits, able to carry `bits` bits. Sizes past
/// three parts are returned unchanged.
pub fn sms_bit_limit(bits: usize) -> usize {
    if bits <= SINGLE_SMS_BITS {
        SINGLE_SMS_BITS
    } else if bits <= TWO_PART_SMS_BITS {
        TWO_PART_SMS_BITS
    } else if bits <= THREE_PART_SMS_BITS {
        THREE_PART_SMS_BITS
    } else {
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_unique_characters() {
        let unique: HashSet<char> = ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 128);
        assert_eq!(code_for_char('{'), Some(0));
        assert_eq!(code_for_char('A'), Some(0b000_1100));
        assert_eq!(code_for_char('€'), Some(127));
        assert_eq!(code_for_char('\n'), Some(126));
        assert_eq!(code_for_char('~'), None);
        assert_eq!(char_for_code(0b010_0001), 'Λ');
    }

    #[test]
    fn test_encode_groups_and_pads() {
        // 1000010 0 + terminator -> "1000010" "01" padded to "0100000"
        let stream = BitStream::from_bit_string("100001001").unwrap();
        assert_eq!(encode_stream(&stream), "(è");
    }

    #[test]
    fn test_empty_stream_is_one_character() {
        // Only the terminator: 1000000
        assert_eq!(encode_stream(&BitStream::new()), "ò");
        assert!(decode_stream("ò").unwrap().is_empty());
    }

    #[test]
    fn test_decode_roundtrip_every_length() {
        let pattern = "0110100111010001011101111000101";
        for len in 0..=pattern.len() {
            let stream = BitStream::from_bit_string(&format!("{}1", &pattern[..len])).unwrap();
            let text = encode_stream(&stream);
            assert_eq!(text.chars().count(), (len + 1).div_ceil(SEVEN_BIT_WIDTH));
            assert_eq!(decode_stream(&text).unwrap(), stream, "length {}", len);
        }
    }

    #[test]
    fn test_decode_rejects_bad_text() {
        assert!(matches!(decode_stream(""), Err(CodecError::Format(_))));
        assert!(matches!(decode_stream("AB~"), Err(CodecError::Format(_))));
        // '{' is all zeros, so no terminator can be found.
        assert!(matches!(decode_stream("{{{"), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_gsm_bit_length() {
        assert_eq!(gsm_bit_length(""), 0);
        assert_eq!(gsm_bit_length("Hello"), 35);
        assert_eq!(gsm_bit_length("5€"), 21);
        assert_eq!(gsm_bit_length("ok ☺"), 64);
    }

    #[test]
    fn test_sms_bit_limit() {
        assert_eq!(sms_bit_limit(0), SINGLE_SMS_BITS);
        assert_eq!(sms_bit_limit(SINGLE_SMS_BITS), SINGLE_SMS_BITS);
        assert_eq!(sms_bit_limit(SINGLE_SMS_BITS + 1), TWO_PART_SMS_BITS);
        assert_eq!(sms_bit_limit(THREE_PART_SMS_BITS), THREE_PART_SMS_BITS);
        assert_eq!(sms_bit_limit(5000), 5000);
    }
}
