// src/encode/frame.rs

//! The self-delimiting compressed representation of one message.
//!
//! # Frame Format
//!
//! ```text
//! +----------------------+
//! | symbol count (8)     |  distinct bytes in the message, 0 means 256
//! +----------------------+
//! | tree (variable)      |  preorder: 0 = internal, 1 + 8 bits = leaf
//! +----------------------+
//! | payload (variable)   |  code of each message byte, in order
//! +----------------------+
//! | terminator (1)       |  a single set bit
//! | padding (0-7)        |  zeros up to the byte boundary
//! +----------------------+
//! ```
//!
//! There is no length field; the terminator alone marks where the data ends.
//! All fields are MSB-first.

use crate::encode::huffman::MAX_SYMBOLS;
use crate::stream::BitStream;
use crate::transport;
use crate::utils::error::{CodecError, Result};
use std::fmt;

/// Width of the symbol count header in bits.
pub const HEADER_BITS: usize = 8;

/// Encodes a symbol count as its header byte; 256 wraps to 0.
pub fn encode_symbol_count(symbol_count: usize) -> Result<u8> {
    if symbol_count == 0 || symbol_count > MAX_SYMBOLS {
        return Err(CodecError::invalid_input(format!(
            "symbol count must be between 1 and {}, got {}",
            MAX_SYMBOLS, symbol_count
        )));
    }
    Ok((symbol_count % MAX_SYMBOLS) as u8)
}

/// Resolves a header byte to a symbol count; 0 stands for 256.
pub fn decode_symbol_count(header: u8) -> usize {
    match header {
        0 => MAX_SYMBOLS,
        n => n as usize,
    }
}

/// A complete compressed message.
///
/// Two frames are equal when their exported bytes are identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    stream: BitStream,
}

impl Frame {
    /// Wraps an already assembled stream. No validation is done here; use
    /// [`crate::decompress`] or [`crate::verify_frame`] for that.
    pub fn from_stream(stream: BitStream) -> Self {
        Self { stream }
    }

    /// Imports a frame from its exported bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        BitStream::from_bytes(bytes).map(Self::from_stream)
    }

    /// Imports a frame from its `'0'`/`'1'` textual form.
    pub fn from_bit_string(text: &str) -> Result<Self> {
        BitStream::from_bit_string(text).map(Self::from_stream)
    }

    /// Imports a frame from text produced by [`Frame::to_transport_text`].
    pub fn from_transport_text(text: &str) -> Result<Self> {
        transport::decode_stream(text).map(Self::from_stream)
    }

    /// Exports the frame, terminator and padding included.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.stream.to_bytes()
    }

    /// The `'0'`/`'1'` textual form, terminator included.
    pub fn to_bit_string(&self) -> String {
        self.stream.to_bit_string()
    }

    /// Renders the frame in the 7-bit transport alphabet.
    pub fn to_transport_text(&self) -> String {
        transport::encode_stream(&self.stream)
    }

    /// Reads the header and resolves the number of distinct symbols.
    pub fn symbol_count(&self) -> Result<usize> {
        let mut cursor = self.stream.cursor();
        let header = cursor
            .read_byte()
            .map_err(|_| CodecError::format("frame is shorter than its header"))?;
        Ok(decode_symbol_count(header))
    }

    pub fn stream(&self) -> &BitStream {
        &self.stream
    }

    pub fn into_stream(self) -> BitStream {
        self.stream
    }

    /// Number of real bits, terminator excluded.
    pub fn bit_len(&self) -> usize {
        self.stream.bit_len()
    }

    /// Size of the exported frame in bytes.
    pub fn byte_len(&self) -> usize {
        self.stream.byte_len()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.stream, f)
    }
}

impl From<BitStream> for Frame {
    fn from(stream: BitStream) -> Self {
        Self::from_stream(stream)
    }
}
