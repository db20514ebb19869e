//! Symbols: the indivisible units that get counted and coded.
//!
//! A symbol is an opaque byte string. Equality is exact byte equality and
//! ordering is lexicographic byte order, which is what the tree builder uses
//! to break frequency ties.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single character or a whole word/whitespace token.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(Vec<u8>);

impl Symbol {
    /// Create a symbol from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The symbol's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the symbol has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn lossy(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl Borrow<[u8]> for Symbol {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Symbol {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self(c.encode_utf8(&mut buf).as_bytes().to_vec())
    }
}

impl From<u8> for Symbol {
    fn from(b: u8) -> Self {
        Self(vec![b])
    }
}

impl From<&[u8]> for Symbol {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Symbol {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order() {
        let mut syms: Vec<Symbol> = ["b", "a", "ab", " ", "B"].into_iter().map(Symbol::from).collect();
        syms.sort();
        let rendered: Vec<String> = syms.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec![" ", "B", "a", "ab", "b"]);
    }

    #[test]
    fn test_char_and_str_agree() {
        assert_eq!(Symbol::from('é'), Symbol::from("é"));
        assert_eq!(Symbol::from(b'x'), Symbol::from("x"));
        assert_eq!(Symbol::from('é').len(), 2);
    }
}
