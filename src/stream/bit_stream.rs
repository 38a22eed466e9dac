// src/stream/bit_stream.rs

//! An append-only, bit-addressable buffer with an implicit end-of-data marker.
//!
//! Bits are stored MSB-first. A stream never records its length explicitly:
//! when exported, a single set bit is written right after the last real bit
//! and the rest of that byte is zero. Importing looks for the rightmost set
//! bit of the final byte and treats everything before it as data.
//!
//! ```text
//! real bits:  1 0 1 1 0
//! exported:   1 0 1 1 0 1 0 0
//!                       ^ terminator
//! ```

use crate::utils::error::{CodecError, Result};
use bitvec::order::Msb0;
use bitvec::prelude::*;
use std::fmt;

/// Number of bits in a byte.
pub const BYTE_BITS: usize = 8;

/// A growable sequence of bits with a self-delimiting byte export.
///
/// Equality compares the real bits only. Because the export always places the
/// terminator directly after the last real bit, two streams compare equal
/// exactly when their exported byte buffers are identical.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: BitVec<u8, Msb0>,
}

impl BitStream {
    /// Creates an empty stream. Its export is the single byte `0x80`.
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
        }
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Builds a stream holding every byte of `message`, MSB-first.
    pub fn from_message(message: &[u8]) -> Self {
        let mut stream = Self::with_capacity(message.len() * BYTE_BITS);
        for &byte in message {
            stream.push_byte(byte);
        }
        stream
    }

    /// Appends one bit.
    #[inline]
    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends the eight bits of `byte`, most significant first.
    pub fn push_byte(&mut self, byte: u8) {
        for shift in (0..BYTE_BITS).rev() {
            self.bits.push((byte >> shift) & 1 == 1);
        }
    }

    /// Appends a run of bits, e.g. a Huffman code.
    pub fn push_bits(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    /// Appends all real bits of `other`.
    pub fn extend_from(&mut self, other: &BitStream) {
        self.bits.extend_from_bitslice(other.bits.as_bitslice());
    }

    /// Number of real bits, excluding the terminator and padding.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Number of bytes in the exported buffer, terminator byte included.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bits.len() / BYTE_BITS + 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns a fresh iterator over the real bits. Each call restarts from
    /// the first bit.
    pub fn iter(&self) -> BitCursor<'_> {
        self.cursor()
    }

    /// Returns a reading cursor positioned at the first bit.
    pub fn cursor(&self) -> BitCursor<'_> {
        BitCursor {
            bits: self.bits.as_bitslice(),
            position: 0,
        }
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        self.bits.as_bitslice()
    }

    /// Exports the raw byte buffer: real bits, the terminator bit, then zero
    /// padding up to the next byte boundary.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut framed = self.bits.clone();
        framed.push(true);
        while framed.len() % BYTE_BITS != 0 {
            framed.push(false);
        }
        framed.into_vec()
    }

    /// Returns the real bits as bytes when they fill a whole number of bytes,
    /// i.e. when the stream holds a plain message. `None` for empty or
    /// unaligned streams.
    pub fn aligned_bytes(&self) -> Option<Vec<u8>> {
        if self.bits.is_empty() || self.bits.len() % BYTE_BITS != 0 {
            return None;
        }
        let mut bytes = self.to_bytes();
        // The final byte only holds the terminator.
        bytes.pop();
        Some(bytes)
    }

    /// Rebuilds a stream from an exported byte buffer.
    ///
    /// The terminator is the rightmost set bit of the last byte. Fails when
    /// the buffer is empty or its last byte is zero.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (&last, body) = bytes
            .split_last()
            .ok_or_else(|| CodecError::format("cannot rebuild a bit stream from zero bytes"))?;
        if last == 0 {
            return Err(CodecError::format(
                "no terminator bit found in the final byte",
            ));
        }

        // Offset of the terminator counted from the MSB.
        let marker = BYTE_BITS - 1 - last.trailing_zeros() as usize;

        let mut stream = Self::with_capacity(body.len() * BYTE_BITS + marker);
        for &byte in body {
            stream.push_byte(byte);
        }
        for offset in 0..marker {
            stream.push_bit(last & (0x80 >> offset) != 0);
        }
        Ok(stream)
    }

    /// Rebuilds a stream from its textual form.
    ///
    /// The text must consist of `'0'` and `'1'` only. Trailing zeros are
    /// padding, the last remaining `'1'` is the terminator, and everything
    /// before it is data.
    pub fn from_bit_string(text: &str) -> Result<Self> {
        let trimmed = text.trim_end_matches('0');
        let data = trimmed
            .strip_suffix('1')
            .ok_or_else(|| CodecError::format("bit string has no terminating '1'"))?;

        let mut stream = Self::with_capacity(data.len());
        for (i, c) in data.chars().enumerate() {
            match c {
                '0' => stream.push_bit(false),
                '1' => stream.push_bit(true),
                other => {
                    return Err(CodecError::format(format!(
                        "invalid character {:?} at position {} in bit string",
                        other, i
                    )));
                }
            }
        }
        Ok(stream)
    }

    /// Rebuilds a stream from raw bits that still carry their terminator and
    /// any trailing zero padding.
    pub fn from_terminated_bits(bits: &[bool]) -> Result<Self> {
        let marker = bits
            .iter()
            .rposition(|&bit| bit)
            .ok_or_else(|| CodecError::format("no terminator bit found"))?;
        Ok(bits[..marker].iter().copied().collect())
    }

    /// The textual form: each real bit as `'0'` or `'1'`, followed by the
    /// terminator `'1'`. Padding is omitted.
    pub fn to_bit_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("1")
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut stream = BitStream::new();
        stream.extend(iter);
        stream
    }
}

impl Extend<bool> for BitStream {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.bits.push(bit);
        }
    }
}

impl<'a> IntoIterator for &'a BitStream {
    type Item = bool;
    type IntoIter = BitCursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

/// A forward-only reader over the real bits of a [`BitStream`].
///
/// Doubles as the stream's iterator. The fallible `read_*` methods report
/// exhaustion as a format error so decoders can use `?` directly.
#[derive(Clone, Debug)]
pub struct BitCursor<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitCursor<'a> {
    /// Reads the next bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.bits.len() {
            return Err(CodecError::format(format!(
                "unexpected end of bit stream at bit {}",
                self.position
            )));
        }
        let bit = self.bits[self.position];
        self.position += 1;
        Ok(bit)
    }

    /// Reads the next eight bits as a byte, MSB-first.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.remaining() < BYTE_BITS {
            return Err(CodecError::format(format!(
                "need {} bits for a byte at bit {}, only {} remain",
                BYTE_BITS,
                self.position,
                self.remaining()
            )));
        }
        let mut byte = 0u8;
        for _ in 0..BYTE_BITS {
            byte = (byte << 1) | u8::from(self.bits[self.position]);
            self.position += 1;
        }
        Ok(byte)
    }

    /// Number of bits consumed so far.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bits.len()
    }
}

impl Iterator for BitCursor<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitCursor<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(bits: &str) -> BitStream {
        bits.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_empty_stream_exports_marker_byte() {
        let stream = BitStream::new();
        assert_eq!(stream.bit_len(), 0);
        assert_eq!(stream.byte_len(), 1);
        assert_eq!(stream.to_bytes(), vec![0b1000_0000]);
        assert_eq!(stream.to_bit_string(), "1");
    }

    #[test]
    fn test_marker_follows_last_bit() {
        let stream = stream_of("10110");
        assert_eq!(stream.to_bytes(), vec![0b1011_0100]);

        // A full byte of data pushes the marker into a fresh byte.
        let stream = stream_of("11111111");
        assert_eq!(stream.to_bytes(), vec![0xFF, 0b1000_0000]);

        let stream = stream_of("1111111");
        assert_eq!(stream.to_bytes(), vec![0xFF]);
    }

    #[test]
    fn test_push_byte_is_msb_first() {
        let mut stream = BitStream::new();
        stream.push_byte(0b1010_0001);
        stream.push_bit(true);
        assert_eq!(stream.bit_len(), 9);
        assert_eq!(stream.to_bit_string(), "1010000111");
        assert_eq!(stream.to_bytes(), vec![0b1010_0001, 0b1100_0000]);
    }

    #[test]
    fn test_from_bytes_uses_rightmost_set_bit() {
        let stream = BitStream::from_bytes(&[0b1100_0001]).unwrap();
        assert_eq!(stream.bit_len(), 7);
        assert_eq!(stream.to_bit_string(), "11000001");

        let stream = BitStream::from_bytes(&[0xAB, 0b1000_0000]).unwrap();
        assert_eq!(stream.bit_len(), 8);
        assert_eq!(stream.aligned_bytes(), Some(vec![0xAB]));
    }

    #[test]
    fn test_from_bytes_rejects_missing_terminator() {
        assert!(matches!(
            BitStream::from_bytes(&[]),
            Err(CodecError::Format(_))
        ));
        assert!(matches!(
            BitStream::from_bytes(&[0, 0, 0]),
            Err(CodecError::Format(_))
        ));
        assert!(matches!(
            BitStream::from_bytes(&[0xFF, 0x00]),
            Err(CodecError::Format(_))
        ));
    }

    #[test]
    fn test_bytes_roundtrip_every_length() {
        let pattern = "1101001110001011110100001";
        for len in 0..=pattern.len() {
            let stream = stream_of(&pattern[..len]);
            let rebuilt = BitStream::from_bytes(&stream.to_bytes()).unwrap();
            assert_eq!(rebuilt, stream, "length {}", len);
        }
    }

    #[test]
    fn test_from_bit_string() {
        let stream = BitStream::from_bit_string("0110100").unwrap();
        assert_eq!(stream.to_bit_string(), "01101");
        assert_eq!(stream.bit_len(), 4);

        let stream = BitStream::from_bit_string("1").unwrap();
        assert!(stream.is_empty());

        assert!(BitStream::from_bit_string("").is_err());
        assert!(BitStream::from_bit_string("0000").is_err());
        assert!(BitStream::from_bit_string("01x01").is_err());
    }

    #[test]
    fn test_from_terminated_bits() {
        let stream =
            BitStream::from_terminated_bits(&[true, false, true, true, false, false]).unwrap();
        assert_eq!(stream.to_bit_string(), "1011");
        assert!(BitStream::from_terminated_bits(&[false; 7]).is_err());
    }

    #[test]
    fn test_iterator_is_restartable() {
        let stream = stream_of("100101");
        let first: Vec<bool> = stream.iter().collect();
        let second: Vec<bool> = stream.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![true, false, false, true, false, true]);
        assert_eq!(stream.iter().len(), 6);
    }

    #[test]
    fn test_cursor_reads_bytes_and_reports_exhaustion() {
        let mut stream = BitStream::new();
        stream.push_byte(0x5A);
        stream.push_bit(true);

        let mut cursor = stream.cursor();
        assert_eq!(cursor.read_byte().unwrap(), 0x5A);
        assert_eq!(cursor.bit_position(), 8);
        assert!(cursor.read_byte().is_err());
        assert!(cursor.read_bit().unwrap());
        assert!(cursor.is_exhausted());
        assert!(matches!(cursor.read_bit(), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_aligned_bytes() {
        assert_eq!(BitStream::new().aligned_bytes(), None);
        assert_eq!(stream_of("101").aligned_bytes(), None);
        assert_eq!(
            BitStream::from_message(b"hi").aligned_bytes(),
            Some(b"hi".to_vec())
        );
    }

    #[test]
    fn test_equality_tracks_exported_bytes() {
        let a = stream_of("1010");
        let mut b = BitStream::new();
        b.push_bit(true);
        b.push_bit(false);
        b.extend_from(&stream_of("10"));
        assert_eq!(a, b);
        assert_eq!(a.to_bytes(), b.to_bytes());

        // Same exported prefix but different length.
        let c = stream_of("10100");
        assert_ne!(a, c);
        assert_ne!(a.to_bytes(), c.to_bytes());
    }
}
