//! Bit sequences.
//!
//! The encoded stream is an ordered sequence of single bits. Its textual form
//! is one ASCII '0' or '1' per bit. A packed form (8 bits per byte, MSB-first,
//! final byte zero-padded) is available for callers that want it; the bit
//! length must then be carried alongside the bytes.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A single bit. `Zero` is the left edge of a tree, `One` the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    /// 0, left.
    Zero,
    /// 1, right.
    One,
}

impl Bit {
    /// ASCII character for this bit.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

/// An owned, growable sequence of bits.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<Bit>,
}

impl BitString {
    /// An empty bit string.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty bit string with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Append one bit.
    pub fn push(&mut self, bit: Bit) {
        self.bits.push(bit);
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether there are no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits as a slice.
    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    /// Iterate bits in order.
    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    /// Whether `self` is a prefix of `other` (every string is a prefix of itself).
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Pack into bytes, MSB-first, padding the last byte with zeros.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, bit) in self.bits.iter().enumerate() {
            if *bit == Bit::One {
                bytes[i / 8] |= 1 << (7 - i % 8);
            }
        }
        bytes
    }

    /// Unpack the first `bit_len` bits of `bytes`.
    pub fn from_packed(bytes: &[u8], bit_len: usize) -> Result<Self> {
        let available = bytes.len() * 8;
        if bit_len > available {
            return Err(Error::PackedLength {
                bits: bit_len,
                available,
            });
        }
        let bits = (0..bit_len)
            .map(|i| Bit::from((bytes[i / 8] >> (7 - i % 8)) & 1 == 1))
            .collect();
        Ok(Self { bits })
    }
}

impl From<Vec<Bit>> for BitString {
    fn from(bits: Vec<Bit>) -> Self {
        Self { bits }
    }
}

impl FromIterator<Bit> for BitString {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl FromStr for BitString {
    type Err = Error;

    /// Parse the ASCII form. Anything other than '0' or '1' is rejected.
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(Bit::Zero),
                '1' => Ok(Bit::One),
                found => Err(Error::InvalidBit { found, position }),
            })
            .collect()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.bits.iter().map(|b| b.as_char()).collect();
        f.write_str(&s)
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({})", self)
    }
}
