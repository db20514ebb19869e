//! Huffman encoding and decoding.
//!
//! The encoder maps each symbol through a [`CodeTable`]. The decoder walks the
//! tree one bit at a time: 0 goes left, 1 goes right, reaching a leaf emits its
//! symbol and returns to the root. A stream that ends anywhere but the root
//! is truncated.

use tracing::debug;

use crate::bits::{Bit, BitString};
use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node, NodeId};

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    codes: CodeTable,
}

impl HuffmanEncoder {
    /// Create an encoder from an existing code table.
    pub fn new(codes: CodeTable) -> Self {
        Self { codes }
    }

    /// Create an encoder for `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        Ok(Self::new(CodeTable::from_tree(tree)?))
    }

    /// The code table in use.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Encode one symbol, appending its code to `out`.
    pub fn encode_symbol(&self, symbol: impl AsRef<[u8]>, out: &mut BitString) -> Result<()> {
        let symbol = symbol.as_ref();
        let code = self.codes.get(symbol).ok_or_else(|| Error::UnknownSymbol {
            symbol: Symbol::lossy(symbol),
        })?;
        out.extend_from(code);
        Ok(())
    }

    /// Encode a symbol sequence into a bit stream.
    ///
    /// Fails with [`Error::UnknownSymbol`] on the first symbol without a code;
    /// nothing is skipped.
    pub fn encode<I>(&self, symbols: I) -> Result<BitString>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let symbols = symbols.into_iter();
        let mut bits = BitString::with_capacity(symbols.size_hint().0);
        for symbol in symbols {
            self.encode_symbol(symbol, &mut bits)?;
        }
        Ok(bits)
    }
}

/// Huffman decoder. Borrows the tree it walks.
#[derive(Debug, Clone, Copy)]
pub struct HuffmanDecoder<'a> {
    tree: &'a HuffmanTree,
}

impl<'a> HuffmanDecoder<'a> {
    /// Create a decoder over `tree`.
    ///
    /// A tree with a cycle is rejected while decoding with
    /// [`Error::CorruptStream`] at the bit that closes or overruns the cycle.
    pub fn new(tree: &'a HuffmanTree) -> Self {
        Self { tree }
    }

    /// Decode a bit stream into a symbol sequence.
    pub fn decode(&self, bits: &BitString) -> Result<Vec<&'a Symbol>> {
        let mut out = Vec::new();
        self.decode_with(bits, |symbol| out.push(symbol))?;
        Ok(out)
    }

    /// Decode a bit stream and concatenate the symbols' bytes.
    pub fn decode_bytes(&self, bits: &BitString) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode_with(bits, |symbol| out.extend_from_slice(symbol.as_bytes()))?;
        Ok(out)
    }

    /// Decode a bit stream, handing each symbol to `emit` as soon as its last
    /// bit is read.
    ///
    /// Symbols emitted before an error has been returned are not retracted.
    pub fn decode_with<F>(&self, bits: &BitString, mut emit: F) -> Result<()>
    where
        F: FnMut(&'a Symbol),
    {
        let root = self.tree.root();
        let mut at: NodeId = root;
        let mut code_start = 0;

        for (position, bit) in bits.iter().enumerate() {
            let next = match self.tree.node(at) {
                Some(Node::Internal { left, right, .. }) => match bit {
                    Bit::Zero => *left,
                    Bit::One => *right,
                },
                // Only a single-leaf root is ever current: its code is `0`.
                Some(Node::Leaf { .. }) => (bit == Bit::Zero).then_some(at),
                None => None,
            };

            match next.and_then(|id| self.tree.node(id).map(|node| (id, node))) {
                Some((_, Node::Leaf { symbol, .. })) => {
                    emit(symbol);
                    at = root;
                    code_start = position + 1;
                }
                // A path never revisits the root and is never deeper than the
                // arena is large; anything else is a cycle in the tree.
                Some((id, Node::Internal { .. }))
                    if id != root && position - code_start < self.tree.nodes().len() =>
                {
                    at = id
                }
                _ => {
                    debug!(position, "decode stepped onto a missing node or a cycle");
                    return Err(Error::CorruptStream { position });
                }
            }
        }

        if at != root {
            let pending = bits.len() - code_start;
            debug!(position = code_start, pending, "decode ended mid-code");
            return Err(Error::TruncatedStream {
                position: code_start,
                pending,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{FrequencyEntry, FrequencyTable};

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_huffman_roundtrip() {
        let data = "abracadabra";
        let table: FrequencyTable = data.bytes().map(|b| [b]).collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();

        let encoder = HuffmanEncoder::from_tree(&tree).unwrap();
        let encoded = encoder.encode(data.bytes().map(|b| [b])).unwrap();

        let decoder = HuffmanDecoder::new(&tree);
        let decoded = decoder.decode_bytes(&encoded).unwrap();

        assert_eq!(data.as_bytes(), decoded.as_slice());
    }

    #[test]
    fn test_aabbbc() {
        let tree = HuffmanTree::build(vec![
            FrequencyEntry::new("a", 2),
            FrequencyEntry::new("b", 3),
            FrequencyEntry::new("c", 1),
        ])
        .unwrap();
        let encoder = HuffmanEncoder::from_tree(&tree).unwrap();
        let encoded = encoder.encode(["a", "a", "b", "b", "b", "c"]).unwrap();
        assert_eq!(encoded.to_string(), "1111000010");

        let decoded = HuffmanDecoder::new(&tree).decode_bytes(&encoded).unwrap();
        assert_eq!(decoded, b"aabbbc");
    }

    #[test]
    fn test_unknown_symbol_is_reported() {
        let tree = HuffmanTree::build(vec![FrequencyEntry::new("a", 1), FrequencyEntry::new("b", 1)])
            .unwrap();
        let encoder = HuffmanEncoder::from_tree(&tree).unwrap();
        assert_eq!(
            encoder.encode(["a", "q", "b"]),
            Err(Error::UnknownSymbol {
                symbol: "q".to_string()
            })
        );
    }

    #[test]
    fn test_single_symbol_stream() {
        let tree = HuffmanTree::build(vec![FrequencyEntry::new("x", 4)]).unwrap();
        let encoder = HuffmanEncoder::from_tree(&tree).unwrap();
        let encoded = encoder.encode(["x", "x", "x"]).unwrap();
        assert_eq!(encoded.to_string(), "000");

        let decoder = HuffmanDecoder::new(&tree);
        assert_eq!(decoder.decode_bytes(&encoded).unwrap(), b"xxx");
        assert_eq!(
            decoder.decode(&bits("01")),
            Err(Error::CorruptStream { position: 1 })
        );
    }

    #[test]
    fn test_truncated_stream() {
        let tree = HuffmanTree::build(vec![
            FrequencyEntry::new("a", 2),
            FrequencyEntry::new("b", 3),
            FrequencyEntry::new("c", 1),
        ])
        .unwrap();
        let decoder = HuffmanDecoder::new(&tree);
        // "0" = b, then "1" starts a two-bit code and the stream stops.
        assert_eq!(
            decoder.decode(&bits("01")),
            Err(Error::TruncatedStream {
                position: 1,
                pending: 1
            })
        );
        assert!(decoder.decode(&BitString::new()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_child_is_corrupt() {
        let nodes = vec![
            Node::Leaf {
                symbol: Symbol::from("a"),
                freq: 1,
            },
            Node::Internal {
                left: Some(0),
                right: None,
                freq: 1,
            },
        ];
        let tree = HuffmanTree::from_parts(nodes, 1).unwrap();
        let decoder = HuffmanDecoder::new(&tree);
        assert_eq!(decoder.decode_bytes(&bits("00")).unwrap(), b"aa");
        assert_eq!(
            decoder.decode(&bits("001")),
            Err(Error::CorruptStream { position: 2 })
        );
    }

    #[test]
    fn test_back_edge_to_root_is_corrupt() {
        // Root 2 reaches node 1 with a 1 bit, and node 1 leads back to 2 with a 0 bit.
        let nodes = vec![
            Node::Leaf {
                symbol: Symbol::from("a"),
                freq: 1,
            },
            Node::Internal {
                left: Some(2),
                right: Some(0),
                freq: 1,
            },
            Node::Internal {
                left: Some(0),
                right: Some(1),
                freq: 2,
            },
        ];
        let tree = HuffmanTree::from_parts(nodes, 2).unwrap();
        let decoder = HuffmanDecoder::new(&tree);
        assert_eq!(decoder.decode_bytes(&bits("011")).unwrap(), b"aa");
        assert_eq!(
            decoder.decode_bytes(&bits("10")),
            Err(Error::CorruptStream { position: 1 })
        );
    }

    #[test]
    fn test_cycle_below_root_is_corrupt() {
        // Nodes 1 and 2 point at each other; the root hangs them on its right.
        let nodes = vec![
            Node::Leaf {
                symbol: Symbol::from("a"),
                freq: 1,
            },
            Node::Internal {
                left: Some(2),
                right: Some(0),
                freq: 1,
            },
            Node::Internal {
                left: Some(1),
                right: Some(0),
                freq: 1,
            },
            Node::Internal {
                left: Some(0),
                right: Some(1),
                freq: 2,
            },
        ];
        let tree = HuffmanTree::from_parts(nodes, 3).unwrap();
        let decoder = HuffmanDecoder::new(&tree);
        let looping: BitString = std::iter::once(Bit::One)
            .chain(std::iter::repeat(Bit::Zero).take(10))
            .collect();
        assert_eq!(
            decoder.decode(&looping),
            Err(Error::CorruptStream { position: 4 })
        );
    }
}
