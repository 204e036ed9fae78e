#![no_main]

use contract_codecs::lz::{LzDecoder, LzEncoder};
use contract_codecs::{Context, Decoder, Encoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if data.is_empty() {
        return;
    }
    let mut compressed = String::new();

    {
        let mut encoder =
            LzEncoder::new(data, &mut compressed, Context::default());
        let written = encoder.encode().unwrap();
        assert_eq!(written, compressed.chars().count());
    }

    let mut decompressed = String::new();
    {
        let mut decoder = LzDecoder::new(&compressed, &mut decompressed);
        let (consumed, written) = decoder.decode().unwrap();
        assert_eq!(consumed, compressed.chars().count());
        assert_eq!(written, decompressed.chars().count());
    }
    assert_eq!(decompressed, data);
});
