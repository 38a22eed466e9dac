//! Moving frames across byte- and text-oriented channels.
//!
//! Byte channels use [`crate::Frame::to_bytes`] directly. Text-only SMS
//! channels use the 7-bit alphabet in [`alphabet`].

pub mod alphabet;

pub use alphabet::{
    decode_stream, encode_stream, gsm_bit_length, sms_bit_limit, ALPHABET, SEVEN_BIT_WIDTH,
};
