#![no_main]

use contract_codecs::hamming;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = hamming::decode(data);
});
