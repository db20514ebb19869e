//! Huffman tree construction.
//!
//! # Historical Context
//!
//! David Huffman (1952) showed that repeatedly merging the two least frequent
//! nodes yields an optimal prefix code. The greedy merge here runs over a
//! min-priority queue, so building a tree for `N` distinct symbols costs
//! `O(N log N)`.
//!
//! # Representation
//!
//! Nodes live in an arena and refer to their children by index. Each node is
//! referenced by at most one parent. A tree produced by [`HuffmanTree::build`]
//! is strictly binary; a tree assembled from parts (for example deserialized)
//! may not be, and the consumers report that when they run into it.
//!
//! # Tie-breaking
//!
//! Leaves are created in ascending symbol byte order and take ids `0..N`.
//! Internal nodes take ids `N, N+1, ...` as they are created. The queue is keyed
//! by `(frequency, id)`, so among equal frequencies leaves come before internal
//! nodes, leaves in symbol order, internal nodes in creation order. The first
//! node taken becomes the left child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bits::{Bit, BitString};
use crate::error::{Error, Result};
use crate::frequency::{FrequencyEntry, FrequencyTable};
use crate::symbol::Symbol;

/// Index of a node in a tree's arena.
pub type NodeId = usize;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Owns one symbol.
    Leaf {
        /// The symbol.
        symbol: Symbol,
        /// Its frequency.
        freq: u64,
    },
    /// Owns its children; sum of their frequencies.
    Internal {
        /// Child reached with a 0 bit.
        left: Option<NodeId>,
        /// Child reached with a 1 bit.
        right: Option<NodeId>,
        /// Combined frequency.
        freq: u64,
    },
}

impl Node {
    /// Frequency (weight) of the node.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Queue entry for the greedy merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    freq: u64,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        (other.freq, other.id).cmp(&(self.freq, self.id))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Deserialize)]
struct TreeParts {
    nodes: Vec<Node>,
    root: NodeId,
}

impl TryFrom<TreeParts> for HuffmanTree {
    type Error = Error;

    fn try_from(parts: TreeParts) -> Result<Self> {
        HuffmanTree::from_parts(parts.nodes, parts.root)
    }
}

/// A binary prefix-code tree.
///
/// Read-only once built; share it by reference between encoders and decoders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TreeParts")]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from `(symbol, frequency)` entries.
    ///
    /// Entry order does not matter. Fails with [`Error::EmptyInput`] when there
    /// are no entries, [`Error::ZeroFrequency`] for a zero count, and
    /// [`Error::DuplicateSymbol`] if a symbol repeats. Fails with
    /// [`Error::FrequencyOverflow`] if the total weight does not fit in a `u64`.
    pub fn build(entries: impl IntoIterator<Item = FrequencyEntry>) -> Result<Self> {
        let mut entries: Vec<FrequencyEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(Error::EmptyInput);
        }
        entries.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        if let Some(pair) = entries.windows(2).find(|w| w[0].symbol == w[1].symbol) {
            return Err(Error::DuplicateSymbol {
                symbol: pair[0].symbol.to_string(),
            });
        }
        if let Some(entry) = entries.iter().find(|e| e.count == 0) {
            return Err(Error::ZeroFrequency {
                symbol: entry.symbol.to_string(),
            });
        }

        let leaf_count = entries.len();
        let mut nodes = Vec::with_capacity(2 * leaf_count - 1);
        nodes.extend(entries.into_iter().map(|entry| Node::Leaf {
            symbol: entry.symbol,
            freq: entry.count,
        }));

        let mut pq: BinaryHeap<Pending> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Pending {
                freq: node.freq(),
                id,
            })
            .collect();

        while pq.len() > 1 {
            let (Some(left), Some(right)) = (pq.pop(), pq.pop()) else {
                break;
            };
            let id = nodes.len();
            let freq = left
                .freq
                .checked_add(right.freq)
                .ok_or(Error::FrequencyOverflow)?;
            nodes.push(Node::Internal {
                left: Some(left.id),
                right: Some(right.id),
                freq,
            });
            pq.push(Pending { freq, id });
        }

        let root = pq.pop().map_or(0, |p| p.id);
        let tree = Self { nodes, root };
        debug!(
            leaves = leaf_count,
            nodes = tree.nodes.len(),
            weight = tree.weight(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Build a tree from a frequency table.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        Self::build(table.items())
    }

    /// Assemble a tree from an arena and a root id.
    ///
    /// Only the root is checked here; use [`HuffmanTree::validate`] to check the
    /// whole structure.
    pub fn from_parts(nodes: Vec<Node>, root: NodeId) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::EmptyInput);
        }
        if root >= nodes.len() {
            return Err(Error::MalformedTree {
                node: root,
                reason: "root id out of range",
            });
        }
        Ok(Self { nodes, root })
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by id, `None` if out of range.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Root frequency: total number of symbol occurrences.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].freq()
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Leaves reachable from the root, left to right, with their depth.
    pub fn leaves(&self) -> impl Iterator<Item = (&Symbol, u64, usize)> + '_ {
        let mut stack = vec![(self.root, 0usize)];
        // A well-formed tree pops each node once; the budget stops cycles.
        let mut budget = self.nodes.len();
        std::iter::from_fn(move || {
            while let Some((id, depth)) = stack.pop() {
                budget = budget.checked_sub(1)?;
                match self.nodes.get(id) {
                    Some(Node::Leaf { symbol, freq }) => return Some((symbol, *freq, depth)),
                    Some(Node::Internal { left, right, .. }) => {
                        stack.extend(right.map(|r| (r, depth + 1)));
                        stack.extend(left.map(|l| (l, depth + 1)));
                    }
                    None => {}
                }
            }
            None
        })
    }

    /// Check the structural invariants.
    ///
    /// Every internal node has exactly two children, every child id is in
    /// range and has a single parent, internal weights equal the sum of their
    /// children, and no symbol appears on two leaves.
    pub fn validate(&self) -> Result<()> {
        let mut seen = vec![false; self.nodes.len()];
        let mut symbols = std::collections::BTreeSet::new();
        let mut stack = vec![self.root];
        seen[self.root] = true;

        while let Some(id) = stack.pop() {
            match &self.nodes[id] {
                Node::Leaf { symbol, freq } => {
                    if *freq == 0 {
                        return Err(Error::MalformedTree {
                            node: id,
                            reason: "leaf has zero frequency",
                        });
                    }
                    if !symbols.insert(symbol) {
                        return Err(Error::MalformedTree {
                            node: id,
                            reason: "symbol appears on more than one leaf",
                        });
                    }
                }
                Node::Internal { left, right, freq } => {
                    let (Some(l), Some(r)) = (*left, *right) else {
                        return Err(Error::MalformedTree {
                            node: id,
                            reason: "internal node without two children",
                        });
                    };
                    for child in [l, r] {
                        match seen.get_mut(child) {
                            None => {
                                return Err(Error::MalformedTree {
                                    node: id,
                                    reason: "child id out of range",
                                })
                            }
                            Some(true) => {
                                return Err(Error::MalformedTree {
                                    node: child,
                                    reason: "node has more than one parent",
                                })
                            }
                            Some(flag) => *flag = true,
                        }
                    }
                    if self.nodes[l].freq().checked_add(self.nodes[r].freq()) != Some(*freq) {
                        return Err(Error::MalformedTree {
                            node: id,
                            reason: "weight is not the sum of its children",
                        });
                    }
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
        Ok(())
    }

    /// Find the code of `symbol` by searching the tree, without a code table.
    ///
    /// A single-leaf tree gives every occurrence the one-bit code `0`.
    pub fn code_for(&self, symbol: impl AsRef<[u8]>) -> Result<BitString> {
        let target = symbol.as_ref();
        let mut stack = vec![(self.root, BitString::new())];
        let mut budget = self.nodes.len();

        while let Some((id, path)) = stack.pop() {
            budget = budget.checked_sub(1).ok_or(Error::MalformedTree {
                node: id,
                reason: "node reachable more than once",
            })?;
            match self.nodes.get(id) {
                Some(Node::Leaf { symbol, .. }) if symbol.as_bytes() == target => {
                    return Ok(if path.is_empty() {
                        BitString::from(vec![Bit::Zero])
                    } else {
                        path
                    });
                }
                Some(Node::Leaf { .. }) => {}
                Some(Node::Internal {
                    left: Some(l),
                    right: Some(r),
                    ..
                }) => {
                    let mut right_path = path.clone();
                    right_path.push(Bit::One);
                    stack.push((*r, right_path));

                    let mut left_path = path;
                    left_path.push(Bit::Zero);
                    stack.push((*l, left_path));
                }
                Some(Node::Internal { .. }) => {
                    return Err(Error::MalformedTree {
                        node: id,
                        reason: "internal node without two children",
                    });
                }
                None => {
                    return Err(Error::MalformedTree {
                        node: id,
                        reason: "child id out of range",
                    });
                }
            }
        }

        Err(Error::UnknownSymbol {
            symbol: Symbol::lossy(target),
        })
    }
}
