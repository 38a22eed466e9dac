// src/encode/huffman/tree.rs

//! Canonical Huffman tree construction, preorder serialization and payload
//! expansion.
//!
//! The tree built here must be reproducible bit for bit by any other encoder
//! of the format, so the merge order is fixed:
//!
//! 1. One leaf per symbol, sorted ascending by `(weight, symbol)`.
//! 2. The two smallest trees are removed; the first becomes the left child,
//!    the second the right child.
//! 3. The merged node is inserted before the first tree whose weight is
//!    greater than or equal to its own, or appended when there is none.
//!
//! Internal nodes carry no tie-break value of their own; their relative order
//! comes entirely from the insertion rule in step 3.
//!
//! Serialized form, preorder: `0` for an internal node followed by its left
//! and right subtrees, `1` for a leaf followed by the 8 bits of its symbol.

use super::codes::CodeTable;
use super::frequency::FrequencyTable;
use super::node::TreeNode;
use crate::stream::{BitCursor, BitStream, BYTE_BITS};
use crate::utils::error::{CodecError, Result};
use log::trace;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Number of distinct byte values a tree can hold.
pub const MAX_SYMBOLS: usize = 256;

/// Sort key shared by every internal node.
const INTERNAL_TIE_BREAK: u8 = 0;

fn tie_break(node: &TreeNode) -> u8 {
    node.symbol().unwrap_or(INTERNAL_TIE_BREAK)
}

fn forest_order(a: &TreeNode, b: &TreeNode) -> Ordering {
    a.weight()
        .cmp(&b.weight())
        .then_with(|| tie_break(a).cmp(&tie_break(b)))
}

/// A finished Huffman tree together with the number of symbols it codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
    symbol_count: usize,
}

impl HuffmanTree {
    /// Builds the canonical tree for `frequencies`.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(CodecError::invalid_input(
                "cannot build a Huffman tree from an empty frequency table",
            ));
        }

        let mut leaves: Vec<TreeNode> = frequencies
            .iter()
            .map(|(symbol, count)| TreeNode::leaf(symbol, count))
            .collect();
        leaves.sort_by(forest_order);
        let mut forest: VecDeque<TreeNode> = leaves.into();

        let root = loop {
            let Some(left) = forest.pop_front() else {
                return Err(CodecError::invalid_input("Huffman forest ran empty"));
            };
            let Some(right) = forest.pop_front() else {
                break left;
            };

            let merged = TreeNode::internal(left, right);
            // Linear scan: the merged node goes before the first tree that is
            // at least as heavy, never after an equal one.
            let at = forest
                .iter()
                .position(|node| node.weight() >= merged.weight())
                .unwrap_or(forest.len());
            trace!(
                "merged weight {} inserted at {} of {}",
                merged.weight(),
                at,
                forest.len()
            );
            forest.insert(at, merged);
        };

        Ok(Self {
            root,
            symbol_count: frequencies.len(),
        })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of distinct symbols (leaves).
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Total weight, i.e. the length of the message the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Derives the code of every symbol.
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }

    /// Number of bits the preorder serialization occupies.
    pub fn serialized_bit_len(&self) -> usize {
        self.symbol_count * (1 + BYTE_BITS) + self.root.internal_count()
    }

    /// Appends the preorder serialization of the tree to `out`.
    pub fn write_to(&self, out: &mut BitStream) {
        write_node(&self.root, out);
    }

    /// Returns the serialized tree as a stream of its own.
    pub fn to_stream(&self) -> BitStream {
        let mut stream = BitStream::with_capacity(self.serialized_bit_len());
        self.write_to(&mut stream);
        stream
    }

    /// Rebuilds a tree of exactly `symbol_count` leaves from `cursor`,
    /// consuming only the bits that belong to the tree.
    pub fn read_from(cursor: &mut BitCursor<'_>, symbol_count: usize) -> Result<Self> {
        if symbol_count == 0 || symbol_count > MAX_SYMBOLS {
            return Err(CodecError::invalid_input(format!(
                "symbol count must be between 1 and {}, got {}",
                MAX_SYMBOLS, symbol_count
            )));
        }

        let start = cursor.bit_position();
        let mut remaining = symbol_count;
        let root = read_node(cursor, &mut remaining, 0)?;
        if remaining != 0 {
            return Err(CodecError::format(format!(
                "tree ended with {} of {} leaves still missing",
                remaining, symbol_count
            )));
        }
        trace!(
            "rebuilt tree with {} leaves from {} bits",
            symbol_count,
            cursor.bit_position() - start
        );

        Ok(Self { root, symbol_count })
    }

    /// Expands payload bits into symbols until `cursor` is exhausted.
    ///
    /// For a single-symbol tree every payload bit must be `0`. Otherwise each
    /// symbol is found by walking from the root, `0` to the left and `1` to
    /// the right, until a leaf is reached. A path left incomplete by the end
    /// of the payload is an error.
    pub fn expand(&self, cursor: &mut BitCursor<'_>) -> Result<Vec<u8>> {
        if cursor.is_exhausted() {
            return Err(CodecError::format("frame carries no payload bits"));
        }

        let mut message = Vec::with_capacity(cursor.remaining());
        match &self.root {
            TreeNode::Leaf { symbol, .. } => {
                while let Some(bit) = cursor.next() {
                    if bit {
                        return Err(CodecError::format(format!(
                            "unexpected 1 at bit {} in a single-symbol payload",
                            cursor.bit_position() - 1
                        )));
                    }
                    message.push(*symbol);
                }
            }
            root => {
                while !cursor.is_exhausted() {
                    let mut node = root;
                    let symbol = loop {
                        match node {
                            TreeNode::Leaf { symbol, .. } => break *symbol,
                            TreeNode::Internal { left, right, .. } => {
                                let bit = cursor.read_bit().map_err(|_| {
                                    CodecError::format("payload ends inside a symbol code")
                                })?;
                                node = if bit { &**right } else { &**left };
                            }
                        }
                    };
                    message.push(symbol);
                }
            }
        }
        Ok(message)
    }
}

fn write_node(node: &TreeNode, out: &mut BitStream) {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            out.push_bit(true);
            out.push_byte(*symbol);
        }
        TreeNode::Internal { left, right, .. } => {
            out.push_bit(false);
            write_node(left, out);
            write_node(right, out);
        }
    }
}

/// `pending` counts the right subtrees still waiting on the call stack. Each
/// of them and the node being read need at least one leaf of their own, so a
/// node is only accepted while `remaining > pending`. This keeps the
/// recursion within `2 * remaining` levels whatever the input holds.
fn read_node(
    cursor: &mut BitCursor<'_>,
    remaining: &mut usize,
    pending: usize,
) -> Result<TreeNode> {
    if *remaining == 0 {
        return Err(CodecError::format(
            "tree holds more leaves than the header announces",
        ));
    }
    if *remaining <= pending {
        return Err(CodecError::format(format!(
            "tree opens more subtrees than its {} remaining leaves can fill",
            remaining
        )));
    }
    let is_leaf = cursor
        .read_bit()
        .map_err(|_| CodecError::format("bit stream ends inside the tree"))?;
    if is_leaf {
        let symbol = cursor
            .read_byte()
            .map_err(|_| CodecError::format("bit stream ends inside a leaf symbol"))?;
        *remaining -= 1;
        Ok(TreeNode::leaf(symbol, 0))
    } else {
        let left = read_node(cursor, remaining, pending + 1)?;
        let right = read_node(cursor, remaining, pending)?;
        Ok(TreeNode::internal(left, right))
    }
}
