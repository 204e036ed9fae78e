#![no_main]

use contract_codecs::rle;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(plain) = rle::decode(data) {
        assert_eq!(rle::decode(&rle::encode(&plain)).unwrap(), plain);
    }
});
