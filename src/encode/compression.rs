// src/encode/compression.rs

//! Message compression and decompression.
//!
//! Every call is independent: the frequency table, tree and code table are
//! built for the one message at hand and dropped when the call returns.

use crate::encode::frame::{self, Frame, HEADER_BITS};
use crate::encode::huffman::{FrequencyTable, HuffmanTree};
use crate::stream::BitStream;
use crate::utils::error::{CodecError, Result};
use log::debug;

/// Compresses a non-empty message into a frame.
///
/// The output depends only on `message`; compressing the same bytes twice
/// yields identical frames.
pub fn compress(message: &[u8]) -> Result<Frame> {
    if message.is_empty() {
        return Err(CodecError::invalid_input("cannot compress an empty message"));
    }

    let frequencies = FrequencyTable::from_message(message);
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = tree.code_table();

    let payload_bits = codes.encoded_bit_len(message).ok_or_else(|| {
        CodecError::invalid_input("message holds a symbol missing from its code table")
    })?;
    let mut stream =
        BitStream::with_capacity(HEADER_BITS + tree.serialized_bit_len() + payload_bits);
    stream.push_byte(frame::encode_symbol_count(tree.symbol_count())?);
    tree.write_to(&mut stream);
    codes.encode_into(message, &mut stream)?;

    debug!(
        "compressed {} bytes ({} symbols) into {} bits",
        message.len(),
        tree.symbol_count(),
        stream.bit_len()
    );
    Ok(Frame::from_stream(stream))
}

/// Compresses a stream holding a plain message. The stream must be non-empty
/// and hold a whole number of bytes.
pub fn compress_stream(message: &BitStream) -> Result<Frame> {
    let bytes = message.aligned_bytes().ok_or_else(|| {
        CodecError::invalid_input(format!(
            "message stream must hold a non-zero whole number of bytes, got {} bits",
            message.bit_len()
        ))
    })?;
    compress(&bytes)
}

/// Recovers the original message from a frame.
///
/// Either the whole message is returned or the frame is rejected; partial
/// output is never produced.
pub fn decompress(frame: &Frame) -> Result<Vec<u8>> {
    let mut cursor = frame.stream().cursor();
    let header = cursor
        .read_byte()
        .map_err(|_| CodecError::format("frame is shorter than its header"))?;
    let symbol_count = frame::decode_symbol_count(header);

    let tree = HuffmanTree::read_from(&mut cursor, symbol_count)?;
    let message = tree.expand(&mut cursor)?;

    debug!(
        "decompressed {} bits ({} symbols) into {} bytes",
        frame.bit_len(),
        symbol_count,
        message.len()
    );
    Ok(message)
}

/// Imports exported frame bytes and decompresses them.
pub fn decompress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    decompress(&Frame::from_bytes(bytes)?)
}

/// Checks that `frame` is exactly what [`compress`] produces for the message
/// it decodes to.
///
/// Decoding alone is not enough: a hand-made frame with a differently shaped
/// tree or extra payload may decode, but re-compressing will not reproduce it.
pub fn verify_frame(frame: &Frame) -> Result<()> {
    let message = decompress(frame)?;
    let recompressed = compress(&message)?;
    if recompressed != *frame {
        return Err(CodecError::IntegrityMismatch {
            expected_bits: frame.bit_len(),
            actual_bits: recompressed.bit_len(),
        });
    }
    Ok(())
}

/// Best-effort check: `true` when `frame` round-trips through this codec
/// bit for bit, `false` on any failure.
pub fn check_decompressible(frame: &Frame) -> bool {
    match verify_frame(frame) {
        Ok(()) => true,
        Err(err) => {
            debug!("frame rejected: {}", err);
            false
        }
    }
}
