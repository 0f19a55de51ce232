#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoder = psdoc::PSDDecoder::new(data);
    let _ = decoder.decode();
});
