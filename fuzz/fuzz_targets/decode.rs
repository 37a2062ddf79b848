#![no_main]
use libfuzzer_sys::fuzz_target;
use snap_rs::decode;

fuzz_target!(|data: &[u8]| {
    if let Some(len) = decode::get_uncompressed_length(data) {
        // Cap the allocation so a single absurd length field can't OOM the fuzzer.
        if len as usize > 64 * 1024 * 1024 {
            return;
        }
        let mut out = vec![0u8; len as usize];
        let _ = decode::decompress(data, &mut out);
    }
});
