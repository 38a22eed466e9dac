pub mod bit_stream;

// Re-export commonly used types
pub use bit_stream::{BitCursor, BitStream, BYTE_BITS};
