#![no_main]

use libfuzzer_sys::fuzz_target;
use pngine_asm::decode_all;

fuzz_target!(|data: &[u8]| {
    let _ = decode_all(data);
});
