#![no_main]

use libfuzzer_sys::fuzz_target;
use pngine_container::Module;

fuzz_target!(|data: &[u8]| {
    let _ = Module::deserialize(data);
});
