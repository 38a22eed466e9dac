//! Huffman coding for the frame codec.
//!
//! The tree is built from per-message byte frequencies with a fixed,
//! reproducible merge order and travels inside the frame itself, so a
//! decoder needs nothing but the frame bits.

pub mod codes;
pub mod frequency;
pub mod node;
pub mod tree;

pub use codes::CodeTable;
pub use frequency::FrequencyTable;
pub use node::TreeNode;
pub use tree::{HuffmanTree, MAX_SYMBOLS};
