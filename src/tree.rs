use derivative::Derivative;
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// A node of the coding tree. Internal nodes own both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Queue entry for the builder.
///
/// Ordered by weight, then by creation sequence: leaves are numbered in
/// ascending symbol order, merged nodes after them in the order they are made.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    weight: u64,
    seq: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node,
}

impl Node {
    fn new(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    fn from_children(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds the Huffman tree for `freq`.
    ///
    /// The two lightest nodes are merged until one remains; the first one
    /// taken off the queue becomes the left child. A single-symbol table
    /// yields a lone leaf.
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        if freq.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        let mut pq: BinaryHeap<_> = freq
            .iter()
            .enumerate()
            .map(|(seq, (s, count))| {
                Reverse(Pending {
                    weight: count,
                    seq,
                    node: Node::new(s, count),
                })
            })
            .collect();

        let mut seq = pq.len();
        let root = loop {
            let Some(Reverse(left)) = pq.pop() else {
                return Err(Error::EmptyAlphabet);
            };
            let Some(Reverse(right)) = pq.pop() else {
                break left.node;
            };
            let node = Node::from_children(left.node, right.node);
            pq.push(Reverse(Pending {
                weight: node.weight(),
                seq,
                node,
            }));
            seq += 1;
        };

        debug!(
            "built tree: {} leaves, depth {}, weight {}",
            root.leaf_count(),
            root.depth(),
            root.weight()
        );
        Ok(root)
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Sum over leaves of weight times depth.
    pub fn weighted_path_length(&self) -> u64 {
        fn walk(node: &Node, depth: u64) -> u64 {
            match node {
                Node::Leaf { weight, .. } => weight * depth,
                Node::Internal { left, right, .. } => {
                    walk(left, depth + 1) + walk(right, depth + 1)
                }
            }
        }
        walk(self, 0)
    }
}

/// Shorthand for [`Node::from_frequencies`].
pub fn build_tree(freq: &FrequencyTable) -> Result<Node> {
    Node::from_frequencies(freq)
}
