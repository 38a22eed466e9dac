//! A Huffman codec for short byte messages such as SMS payloads.
//!
//! Each message is compressed into a single self-delimiting [`Frame`]: an
//! 8-bit symbol count, the Huffman tree serialized in preorder, the coded
//! payload, and a terminator bit in place of any length field. Nothing outside
//! the frame is needed to decode it.
//!
//! # Quick Start
//!
//! ```
//! use sms_huffman::{compress, decompress, check_decompressible, Frame};
//!
//! let frame = compress(b"see you at 8, bring the keys")?;
//! let bytes = frame.to_bytes();
//!
//! let received = Frame::from_bytes(&bytes)?;
//! assert!(check_decompressible(&received));
//! assert_eq!(decompress(&received)?, b"see you at 8, bring the keys");
//! # Ok::<(), sms_huffman::CodecError>(())
//! ```
//!
//! # Features
//!
//! - **Deterministic**: the tree is built with a fixed merge and tie-break
//!   order, so independent encoders produce bit-identical frames
//! - **Self-checking**: [`check_decompressible`] tells whether a blob is
//!   exactly what this codec would have produced
//! - **Text transport**: frames can be rendered in a 7-bit SMS alphabet
//! - **Optional parallelism**: enable the `rayon` feature for batch calls

// Core modules
pub mod encode;
pub mod stream;
pub mod transport;
pub mod utils;

// Public codec API
pub use encode::{
    check_decompressible, compress, compress_batch, compress_stream, decompress,
    decompress_batch, decompress_bytes, verify_frame, Frame,
};

// Advanced types (for inspecting trees and codes)
pub use encode::{CodeTable, FrequencyTable, HuffmanTree, TreeNode};

// Bit-level types
pub use stream::{BitCursor, BitStream};

// Error types
pub use utils::error::{CodecError, Result};
