//! Text pipeline.
//!
//! Ties the pieces together: text is split into symbols, counted, a tree is
//! built from the counts and a code table derived from the tree. The same
//! codec then encodes text to bits and decodes bits back to text.
//!
//! [`HuffmanCodec::encode`] produces the stream in the form the config asks
//! for: ASCII `'0'`/`'1'`, or packed 8 bits per byte with the bit length
//! carried alongside.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bits::BitString;
use crate::code::CodeTable;
use crate::config::CodecConfig;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::huffman::{HuffmanDecoder, HuffmanEncoder};
use crate::tree::HuffmanTree;

/// An encoded stream ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum EncodedText {
    /// One ASCII '0' or '1' per bit.
    Ascii {
        /// The bits as text.
        bits: String,
    },
    /// MSB-first, final byte zero-padded.
    Packed {
        /// Packed bytes.
        bytes: Vec<u8>,
        /// Number of meaningful bits in `bytes`.
        bit_len: usize,
    },
}

impl EncodedText {
    /// Wrap `bits` in the requested form.
    pub fn from_bits(bits: &BitString, packed: bool) -> Self {
        if packed {
            EncodedText::Packed {
                bytes: bits.to_packed(),
                bit_len: bits.len(),
            }
        } else {
            EncodedText::Ascii {
                bits: bits.to_string(),
            }
        }
    }

    /// Recover the bit sequence.
    pub fn to_bits(&self) -> Result<BitString> {
        match self {
            EncodedText::Ascii { bits } => bits.parse(),
            EncodedText::Packed { bytes, bit_len } => BitString::from_packed(bytes, *bit_len),
        }
    }
}

/// A Huffman codec for text.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    config: CodecConfig,
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    encoder: HuffmanEncoder,
}

impl HuffmanCodec {
    /// Build a codec whose alphabet is the symbols of `text`.
    ///
    /// Fails with [`Error::EmptyInput`](crate::Error::EmptyInput) if `text` is empty.
    pub fn from_text(text: &str, config: CodecConfig) -> Result<Self> {
        let frequencies: FrequencyTable = config.mode.tokens(text).collect();
        Self::from_frequencies(frequencies, config)
    }

    /// Build a codec from a frequency table, for example one shipped alongside
    /// an encoded stream. The resulting tree is identical to the sender's.
    pub fn from_frequencies(frequencies: FrequencyTable, config: CodecConfig) -> Result<Self> {
        let occurrences = frequencies.total()?;
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let encoder = HuffmanEncoder::from_tree(&tree)?;
        info!(
            mode = ?config.mode,
            symbols = frequencies.len(),
            occurrences,
            "huffman codec ready"
        );
        Ok(Self {
            config,
            frequencies,
            tree,
            encoder,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The frequency table the tree was built from.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// The tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The code table.
    pub fn codes(&self) -> &CodeTable {
        self.encoder.codes()
    }

    /// A decoder over this codec's tree.
    pub fn decoder(&self) -> HuffmanDecoder<'_> {
        HuffmanDecoder::new(&self.tree)
    }

    /// Encode `text`. Every symbol must be in the codec's alphabet.
    pub fn encode_text(&self, text: &str) -> Result<BitString> {
        let bits = self.encoder.encode(self.config.mode.tokens(text))?;
        debug!(input_bytes = text.len(), bits = bits.len(), "encoded text");
        Ok(bits)
    }

    /// Decode `bits` back to text.
    pub fn decode_text(&self, bits: &BitString) -> Result<String> {
        let bytes = self.decoder().decode_bytes(bits)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Encode `text` into the wire form selected by `config.pack_bits`.
    pub fn encode(&self, text: &str) -> Result<EncodedText> {
        let bits = self.encode_text(text)?;
        Ok(EncodedText::from_bits(&bits, self.config.pack_bits))
    }

    /// Decode a stream in either wire form.
    pub fn decode(&self, encoded: &EncodedText) -> Result<String> {
        self.decode_text(&encoded.to_bits()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::token::SymbolMode;

    const TEXT: &str = "the cat sat on the mat and the cat ate the rat";

    #[test]
    fn test_chars_roundtrip() {
        let codec = HuffmanCodec::from_text(TEXT, CodecConfig::default()).unwrap();
        let bits = codec.encode_text(TEXT).unwrap();
        assert!(bits.len() < TEXT.len() * 8);
        assert_eq!(codec.decode_text(&bits).unwrap(), TEXT);
    }

    #[test]
    fn test_words_roundtrip() {
        let codec = HuffmanCodec::from_text(TEXT, CodecConfig::words()).unwrap();
        assert_eq!(codec.config().mode, SymbolMode::Words);
        assert_eq!(codec.frequencies().get("the"), 4);
        assert_eq!(codec.frequencies().get(" "), 11);
        assert_eq!(Ok(codec.tree().weight()), codec.frequencies().total());

        let bits = codec.encode_text(TEXT).unwrap();
        assert_eq!(codec.decode_text(&bits).unwrap(), TEXT);
    }

    #[test]
    fn test_receiver_rebuilds_from_frequencies() {
        let sender = HuffmanCodec::from_text(TEXT, CodecConfig::words()).unwrap();
        let bits = sender.encode_text(TEXT).unwrap();
        let shipped = serde_json::to_string(sender.frequencies()).unwrap();

        let table: FrequencyTable = serde_json::from_str(&shipped).unwrap();
        let receiver = HuffmanCodec::from_frequencies(table, CodecConfig::words()).unwrap();
        assert_eq!(receiver.tree(), sender.tree());
        assert_eq!(receiver.decode_text(&bits).unwrap(), TEXT);
    }

    #[test]
    fn test_text_outside_alphabet() {
        let codec = HuffmanCodec::from_text("abc", CodecConfig::default()).unwrap();
        assert!(matches!(
            codec.encode_text("abd"),
            Err(Error::UnknownSymbol { symbol }) if symbol == "d"
        ));
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(
            HuffmanCodec::from_text("", CodecConfig::default()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_packed_transport() {
        let codec = HuffmanCodec::from_text(TEXT, CodecConfig::default()).unwrap();
        let bits = codec.encode_text(TEXT).unwrap();
        let packed = bits.to_packed();
        let unpacked = BitString::from_packed(&packed, bits.len()).unwrap();
        assert_eq!(codec.decode_text(&unpacked).unwrap(), TEXT);
    }

    #[test]
    fn test_wire_form_follows_config() {
        let ascii = HuffmanCodec::from_text(TEXT, CodecConfig::default()).unwrap();
        let encoded = ascii.encode(TEXT).unwrap();
        assert!(matches!(&encoded, EncodedText::Ascii { bits } if bits.chars().all(|c| c == '0' || c == '1')));
        assert_eq!(ascii.decode(&encoded).unwrap(), TEXT);

        let config = CodecConfig {
            pack_bits: true,
            ..CodecConfig::default()
        };
        let packed = HuffmanCodec::from_text(TEXT, config).unwrap();
        let encoded = packed.encode(TEXT).unwrap();
        let EncodedText::Packed { bytes, bit_len } = &encoded else {
            panic!("expected packed form, got {encoded:?}");
        };
        assert_eq!(*bit_len, ascii.encode_text(TEXT).unwrap().len());
        assert_eq!(bytes.len(), bit_len.div_ceil(8));
        assert_eq!(packed.decode(&encoded).unwrap(), TEXT);

        // Either codec reads either form.
        assert_eq!(ascii.decode(&encoded).unwrap(), TEXT);
    }

    #[test]
    fn test_wire_form_json() {
        let config = CodecConfig {
            pack_bits: true,
            ..CodecConfig::default()
        };
        let codec = HuffmanCodec::from_text("aabbbc", config).unwrap();
        let json = serde_json::to_string(&codec.encode("aabbbc").unwrap()).unwrap();
        assert!(json.contains(r#""format":"packed""#));
        let back: EncodedText = serde_json::from_str(&json).unwrap();
        assert_eq!(codec.decode(&back).unwrap(), "aabbbc");
    }

    #[test]
    fn test_ascii_with_bad_character() {
        let codec = HuffmanCodec::from_text("ab", CodecConfig::default()).unwrap();
        let encoded = EncodedText::Ascii {
            bits: "01x".to_string(),
        };
        assert!(matches!(
            codec.decode(&encoded),
            Err(Error::InvalidBit { found: 'x', position: 2 })
        ));
    }
}
