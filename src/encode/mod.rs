pub mod batch;
pub mod compression;
pub mod frame;
pub mod huffman;

// Re-export commonly used encoding functionality
pub use batch::{compress_batch, decompress_batch};
pub use compression::{
    check_decompressible, compress, compress_stream, decompress, decompress_bytes, verify_frame,
};
pub use frame::Frame;
pub use huffman::{CodeTable, FrequencyTable, HuffmanTree, TreeNode};

// Re-export error types for convenience
pub use crate::utils::error::{CodecError, Result};
