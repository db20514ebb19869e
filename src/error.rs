//! Error types for Huffman tree construction, encoding and decoding.

use thiserror::Error;

/// Error variants for Huffman operations.
///
/// Every variant is recoverable: the library reports it and stops, the caller
/// decides what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No symbols to build a tree from.
    #[error("empty input: cannot build a tree from zero symbols")]
    EmptyInput,

    /// A frequency entry carried a count of zero.
    #[error("symbol {symbol:?} has zero frequency")]
    ZeroFrequency {
        /// Lossy rendering of the offending symbol.
        symbol: String,
    },

    /// The same symbol was supplied twice to the tree builder.
    #[error("symbol {symbol:?} appears more than once")]
    DuplicateSymbol {
        /// Lossy rendering of the offending symbol.
        symbol: String,
    },

    /// Summed frequencies do not fit in a `u64`.
    #[error("frequency overflow: combined weight exceeds u64::MAX")]
    FrequencyOverflow,

    /// A structural invariant of the tree does not hold.
    #[error("malformed tree at node {node}: {reason}")]
    MalformedTree {
        /// Arena id of the node where the defect was found.
        node: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Encode was asked for a symbol that has no code.
    #[error("unknown symbol {symbol:?}")]
    UnknownSymbol {
        /// Lossy rendering of the offending symbol.
        symbol: String,
    },

    /// Decode traversal stepped onto a missing node or into a cycle.
    #[error("corrupt stream: no node or a cycle for bit at position {position}")]
    CorruptStream {
        /// Index of the bit that led nowhere.
        position: usize,
    },

    /// The bit stream ended partway through a code.
    #[error("truncated stream: {pending} trailing bits from position {position} match no symbol")]
    TruncatedStream {
        /// Index of the first bit of the unfinished code.
        position: usize,
        /// Number of bits consumed into the unfinished code.
        pending: usize,
    },

    /// A textual bit stream contained something other than '0' or '1'.
    #[error("invalid bit character {found:?} at position {position}")]
    InvalidBit {
        /// The character found.
        found: char,
        /// Its index in the input.
        position: usize,
    },

    /// A packed bit length exceeds the bytes supplied.
    #[error("packed stream claims {bits} bits but only {available} are available")]
    PackedLength {
        /// Requested bit length.
        bits: usize,
        /// Bits actually present in the buffer.
        available: usize,
    },

    /// Decoded symbols did not form valid UTF-8 text.
    #[error("decoded text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
