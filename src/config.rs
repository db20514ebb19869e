//! Codec configuration.

use serde::{Deserialize, Serialize};

use crate::token::SymbolMode;

/// Settings for a [`HuffmanCodec`](crate::codec::HuffmanCodec).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// How text is cut into symbols
    #[serde(default)]
    pub mode: SymbolMode,

    /// [`HuffmanCodec::encode`](crate::codec::HuffmanCodec::encode) emits the
    /// packed (8 bits per byte) form instead of ASCII
    #[serde(default)]
    pub pack_bits: bool,
}

impl CodecConfig {
    /// Configuration for word/whitespace tokens.
    pub fn words() -> Self {
        Self {
            mode: SymbolMode::Words,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
