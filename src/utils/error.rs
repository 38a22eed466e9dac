// src/utils/error.rs

use thiserror::Error;

/// The primary error type for all operations in the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// An empty message, an empty frequency table, or an otherwise unusable
    /// argument was handed to the codec.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A frame, bit stream, or transport text is malformed and cannot be decoded.
    #[error("Format error: {0}")]
    Format(String),

    /// A frame decoded successfully but re-compressing the result did not
    /// reproduce it bit for bit.
    #[error(
        "Integrity mismatch: candidate frame has {expected_bits} bits, recompressed frame has {actual_bits}"
    )]
    IntegrityMismatch {
        expected_bits: usize,
        actual_bits: usize,
    },
}

impl CodecError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        CodecError::Format(msg.into())
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        CodecError::InvalidInput(msg.into())
    }
}

/// A specialized `Result` type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CodecError::format("no terminator bit");
        assert_eq!(err.to_string(), "Format error: no terminator bit");

        let err = CodecError::invalid_input("empty message");
        assert_eq!(err.to_string(), "Invalid input: empty message");

        let err = CodecError::IntegrityMismatch {
            expected_bits: 40,
            actual_bits: 41,
        };
        assert!(err.to_string().contains("40 bits"));
        assert!(err.to_string().contains("41"));
    }
}
