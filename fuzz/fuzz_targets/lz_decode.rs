#![no_main]

use contract_codecs::lz::LzDecoder;
use contract_codecs::Decoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let mut decompressed = String::new();
    {
        let mut decoder = LzDecoder::new(data, &mut decompressed);
        let _ = decoder.decode();
    }
});
