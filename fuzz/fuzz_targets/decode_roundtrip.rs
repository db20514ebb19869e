#![no_main]
use hufftext::{BitString, CodecConfig, Error, HuffmanCodec, HuffmanEncoder, SymbolMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (String, Vec<u8>, bool)| {
    let (text, noise, words) = data;
    let mode = if words { SymbolMode::Words } else { SymbolMode::Chars };
    let config = CodecConfig {
        mode,
        ..CodecConfig::default()
    };

    let codec = match HuffmanCodec::from_text(&text, config) {
        Ok(codec) => codec,
        Err(Error::EmptyInput) => {
            assert!(text.is_empty());
            return;
        }
        Err(e) => panic!("unexpected build error: {e}"),
    };

    let bits = codec.encode_text(&text).unwrap();
    assert_eq!(codec.decode_text(&bits).unwrap(), text);

    // Arbitrary bits either decode to symbols that re-encode to the same bits,
    // or fail as a damaged stream.
    let junk = BitString::from_packed(&noise, noise.len() * 8).unwrap();
    let encoder = HuffmanEncoder::new(codec.codes().clone());
    match codec.decoder().decode(&junk) {
        Ok(symbols) => {
            let reencoded = encoder.encode(symbols.iter().map(|s| s.as_bytes())).unwrap();
            assert_eq!(reencoded, junk);
        }
        Err(Error::TruncatedStream { position, pending }) => {
            assert_eq!(position + pending, junk.len());
            let prefix: BitString = junk.iter().take(position).collect();
            assert!(codec.decoder().decode(&prefix).is_ok());
        }
        Err(Error::CorruptStream { position }) => assert!(position < junk.len()),
        Err(e) => panic!("unexpected decode error: {e}"),
    }
});
