// src/encode/huffman/codes.rs

use super::node::TreeNode;
use super::tree::HuffmanTree;
use crate::stream::BitStream;
use crate::utils::error::{CodecError, Result};
use bitvec::order::Msb0;
use bitvec::prelude::*;
use std::collections::BTreeMap;

/// Maps every symbol of a tree to its code: the path from the root, `0` for
/// each left edge and `1` for each right edge.
///
/// A tree with a single leaf has an empty path; that symbol is given the
/// one-bit code `0` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitVec<u8, Msb0>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            TreeNode::Leaf { symbol, .. } => {
                let mut code = BitVec::new();
                code.push(false);
                codes.insert(*symbol, code);
            }
            root => {
                let mut path = BitVec::new();
                collect_codes(root, &mut path, &mut codes);
            }
        }
        Self { codes }
    }

    /// The code assigned to `symbol`.
    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    /// The code of `symbol` as a string of `'0'` and `'1'`.
    pub fn code_string(&self, symbol: u8) -> Option<String> {
        self.get(symbol)
            .map(|code| code.iter().map(|bit| if *bit { '1' } else { '0' }).collect())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitSlice<u8, Msb0>> = self.codes.values().map(|c| c.as_bitslice()).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j && a.len() <= b.len() && b[..a.len()] == a[..] {
                    return false;
                }
            }
        }
        true
    }

    /// Number of payload bits `message` encodes to, or `None` if it contains a
    /// symbol the table does not know.
    pub fn encoded_bit_len(&self, message: &[u8]) -> Option<usize> {
        message
            .iter()
            .map(|symbol| self.get(*symbol).map(|code| code.len()))
            .sum()
    }

    /// Appends the code of each byte of `message`, in order, to `out`.
    pub fn encode_into(&self, message: &[u8], out: &mut BitStream) -> Result<()> {
        for (i, &symbol) in message.iter().enumerate() {
            let code = self.get(symbol).ok_or_else(|| {
                CodecError::invalid_input(format!(
                    "symbol {:#04x} at offset {} has no code",
                    symbol, i
                ))
            })?;
            out.push_bits(code);
        }
        Ok(())
    }
}

fn collect_codes(
    node: &TreeNode,
    path: &mut BitVec<u8, Msb0>,
    codes: &mut BTreeMap<u8, BitVec<u8, Msb0>>,
) {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, path.clone());
        }
        TreeNode::Internal { left, right, .. } => {
            path.push(false);
            collect_codes(left, path, codes);
            path.pop();
            path.push(true);
            collect_codes(right, path, codes);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::huffman::FrequencyTable;

    fn table_for(message: &[u8]) -> CodeTable {
        HuffmanTree::build(&FrequencyTable::from_message(message))
            .unwrap()
            .code_table()
    }

    #[test]
    fn test_abracadabra_codes() {
        let codes = table_for(b"ABRACADABRA");
        assert_eq!(codes.len(), 5);
        assert_eq!(codes.code_string(b'A').as_deref(), Some("0"));
        assert_eq!(codes.code_string(b'R').as_deref(), Some("10"));
        assert_eq!(codes.code_string(b'C').as_deref(), Some("1100"));
        assert_eq!(codes.code_string(b'D').as_deref(), Some("1101"));
        assert_eq!(codes.code_string(b'B').as_deref(), Some("111"));
        assert_eq!(codes.encoded_bit_len(b"ABRACADABRA"), Some(23));
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let codes = table_for(b"AAAA");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.code_string(b'A').as_deref(), Some("0"));
        assert_eq!(codes.encoded_bit_len(b"AAAA"), Some(4));
    }

    #[test]
    fn test_full_alphabet_is_prefix_free() {
        let message: Vec<u8> = (0..=255u8).chain(b"etaoin".iter().copied()).collect();
        let codes = table_for(&message);
        assert_eq!(codes.len(), 256);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_prefix_detection() {
        let mut codes = table_for(b"AB");
        let mut bad = BitVec::new();
        bad.push(false);
        bad.push(true);
        // "01" now has "0" as a prefix.
        codes.codes.insert(b'C', bad);
        assert!(!codes.is_prefix_free());
    }

    #[test]
    fn test_encode_into() {
        let codes = table_for(b"ABRACADABRA");
        let mut out = BitStream::new();
        codes.encode_into(b"ABC", &mut out).unwrap();
        assert_eq!(out.to_bit_string(), "011111001");

        assert!(codes.encode_into(b"Z", &mut out).is_err());
        assert_eq!(codes.encoded_bit_len(b"AZ"), None);
    }
}
