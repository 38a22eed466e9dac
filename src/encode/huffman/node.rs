// src/encode/huffman/node.rs

/// Node in a Huffman tree.
///
/// Children are owned by their parent. A leaf's weight is its symbol
/// frequency and an internal node's weight is the sum of its children.
/// Trees rebuilt from a serialized frame carry no frequencies, so their
/// weights are all zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        weight: u64,
    },
}

impl TreeNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        TreeNode::Leaf { symbol, weight }
    }

    /// Joins two subtrees; the weight is the sum of both.
    pub fn internal(left: TreeNode, right: TreeNode) -> Self {
        let weight = left.weight() + right.weight();
        TreeNode::Internal {
            left: Box::new(left),
            right: Box::new(right),
            weight,
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            TreeNode::Leaf { weight, .. } => *weight,
            TreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// The symbol stored at a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(*symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    /// The `(left, right)` children of an internal node.
    pub fn children(&self) -> Option<(&TreeNode, &TreeNode)> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }
}
