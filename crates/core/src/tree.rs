//! Huffman tree construction.
//!
//! The builder merges the two lightest nodes of a min-priority queue until a
//! single root remains. Ties on weight are broken by a sequence number handed
//! out on every push (leaves first, in frequency-table order, then each merged
//! parent), which makes the tree a pure function of the table's contents and
//! order. The container stores only the table, so this determinism is what
//! lets the decoder rebuild the encoder's tree.
//!
//! # Single-symbol input
//!
//! A lone leaf would get an empty code, which cannot be written. The builder
//! wraps it in a synthetic root with the leaf on the left and no right child,
//! giving the symbol the one-bit code `0`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// A node of the Huffman tree.
///
/// Internal nodes own their children; subtrees are never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        /// Absent only under the synthetic single-symbol root
        right: Option<Box<Node>>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Follow one edge: `false` is left, `true` is right.
    ///
    /// Returns `None` for a leaf or an absent right child.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => {
                if bit {
                    right.as_deref()
                } else {
                    Some(left)
                }
            }
        }
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => {
                left.leaf_count() + right.as_ref().map_or(0, |r| r.leaf_count())
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => {
                1 + left.depth().max(right.as_ref().map_or(0, |r| r.depth()))
            }
        }
    }
}

/// Priority queue entry: lighter first, then earlier sequence first.
#[derive(Debug)]
struct QueuedNode {
    weight: u64,
    sequence: u64,
    node: Node,
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap pops the greatest)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-priority queue that stamps every pushed node with the next sequence
/// number.
struct MergeQueue {
    heap: BinaryHeap<QueuedNode>,
    next_sequence: u64,
}

impl MergeQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    fn push(&mut self, node: Node) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(QueuedNode {
            weight: node.weight(),
            sequence,
            node,
        });
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|queued| queued.node)
    }
}

/// A Huffman tree built from a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// # Errors
    /// `Error::EmptyInput` if the table has no symbols.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut queue = MergeQueue::with_capacity(table.len());
        for (symbol, weight) in table.iter() {
            queue.push(Node::Leaf { symbol, weight });
        }

        let mut last = None;
        while let Some(left) = queue.pop() {
            match queue.pop() {
                Some(right) => queue.push(Node::merge(left, right)),
                None => last = Some(left),
            }
        }

        let root = match last.ok_or(Error::EmptyInput)? {
            leaf @ Node::Leaf { .. } => Node::Internal {
                weight: leaf.weight(),
                left: Box::new(leaf),
                right: None,
            },
            root => root,
        };

        let tree = Self { root };
        debug!(
            symbols = table.len(),
            weight = tree.weight(),
            depth = tree.depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight, equal to the number of symbols the tree encodes.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
