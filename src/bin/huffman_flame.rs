use hufftext::{CodecConfig, HuffmanCodec};

fn main() -> hufftext::Result<()> {
    let text = "the quick brown fox jumps over the lazy dog while the cat sleeps ".repeat(2000);

    for config in [CodecConfig::default(), CodecConfig::words()] {
        let codec = HuffmanCodec::from_text(&text, config)?;
        for _ in 0..50 {
            let bits = codec.encode_text(&text)?;
            let decoded = codec.decode_text(&bits)?;
            assert_eq!(decoded.len(), text.len());
        }
    }
    Ok(())
}
