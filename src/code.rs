//! Code table derivation.
//!
//! Walks a [`HuffmanTree`] depth-first and records, for every leaf, the path
//! from the root (left edge = 0, right edge = 1). Each branch owns its own copy
//! of the path, so sibling subtrees never see each other's bits.

use std::collections::BTreeMap;

use tracing::debug;

use crate::bits::{Bit, BitString};
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Mapping from symbol to its prefix-free code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, BitString>,
}

impl CodeTable {
    /// Derive the code of every leaf of `tree`.
    ///
    /// A tree whose root is a leaf gets the single code `0`, so each occurrence
    /// still produces one bit. Fails with [`Error::MalformedTree`] if an
    /// internal node does not have exactly two children, a child id is out of
    /// range, a node is reachable twice, or a symbol sits on two leaves.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut visited = vec![false; tree.nodes().len()];
        let mut stack = vec![(tree.root(), BitString::new())];

        while let Some((id, path)) = stack.pop() {
            match visited.get_mut(id) {
                None => {
                    return Err(Error::MalformedTree {
                        node: id,
                        reason: "child id out of range",
                    })
                }
                Some(true) => {
                    return Err(Error::MalformedTree {
                        node: id,
                        reason: "node reachable more than once",
                    })
                }
                Some(flag) => *flag = true,
            }

            match tree.node(id) {
                Some(Node::Leaf { symbol, .. }) => {
                    let code = if path.is_empty() {
                        BitString::from(vec![Bit::Zero])
                    } else {
                        path
                    };
                    if codes.insert(symbol.clone(), code).is_some() {
                        return Err(Error::MalformedTree {
                            node: id,
                            reason: "symbol appears on more than one leaf",
                        });
                    }
                }
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
                Some(Node::Internal { .. }) | None => {
                    return Err(Error::MalformedTree {
                        node: id,
                        reason: "internal node without two children",
                    })
                }
            }
        }

        let table = Self { codes };
        debug!(
            entries = table.len(),
            max_len = table.max_len(),
            "derived code table"
        );
        Ok(table)
    }

    /// Code for `symbol`, if it has one.
    pub fn get(&self, symbol: impl AsRef<[u8]>) -> Option<&BitString> {
        self.codes.get(symbol.as_ref())
    }

    /// Number of entries (one per leaf).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Iterate entries in symbol byte order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BitString)> + '_ {
        self.codes.iter()
    }
}
