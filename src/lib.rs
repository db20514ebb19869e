//! # Huffman coding for text
//!
//! *Greedy prefix codes from symbol frequencies.*
//!
//! ## Intuition First
//!
//! Morse code gives the common letter `e` a single dot and the rare `q` four
//! symbols. Huffman coding does the same thing optimally: frequent symbols get
//! short bit strings, rare ones long bit strings, and no code is the start of
//! another, so a stream can be split back into symbols without separators.
//!
//! ## The Problem
//!
//! Given counts for a set of symbols, find a binary tree whose leaves are the
//! symbols and whose weighted path length `sum(count * depth)` is minimal. The
//! root-to-leaf path (left = 0, right = 1) is the symbol's code.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Top-down splitting (Shannon-Fano), not always optimal
//! 1952  Huffman     Bottom-up greedy merge, provably optimal prefix code
//! 1976  Rissanen    Arithmetic coding removes the whole-bit restriction
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! text -> symbols -> FrequencyTable -> HuffmanTree -> CodeTable -> HuffmanEncoder -> bits
//!                                           |
//!                                           +-----------------> HuffmanDecoder <- bits
//! ```
//!
//! Symbols are single characters or word/whitespace tokens ([`SymbolMode`]).
//! The encoded stream is a [`BitString`], written as ASCII `'0'`/`'1'` or
//! packed 8 bits per byte.
//!
//! ## Determinism
//!
//! Frequency ties are broken by symbol byte order for leaves and by creation
//! order for merged nodes, with leaves first. Two parties holding the same
//! frequency table therefore build the same tree.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: no tree exists; reported as [`Error::EmptyInput`].
//! 2. **One distinct symbol**: the tree is a single leaf. Its code is `0`, one
//!    bit per occurrence, so the occurrence count survives the round trip.
//! 3. **Foreign symbols or damaged streams**: reported, never skipped.
//!
//! ## Example
//!
//! ```
//! use hufftext::{CodecConfig, HuffmanCodec};
//!
//! let text = "abracadabra";
//! let codec = HuffmanCodec::from_text(text, CodecConfig::default())?;
//! let bits = codec.encode_text(text)?;
//! assert_eq!(codec.decode_text(&bits)?, text);
//! # Ok::<(), hufftext::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code;
pub mod codec;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod symbol;
pub mod token;
pub mod tree;

pub use bits::{Bit, BitString};
pub use code::CodeTable;
pub use codec::{EncodedText, HuffmanCodec};
pub use config::CodecConfig;
pub use error::{Error, Result};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use huffman::{HuffmanDecoder, HuffmanEncoder};
pub use symbol::Symbol;
pub use token::{SymbolMode, Tokens};
pub use tree::{HuffmanTree, Node, NodeId};
