#![no_main]
use libfuzzer_sys::fuzz_target;
use snap_rs::prelude::*;

fuzz_target!(|data: &[u8]| {
    let compressed = compress_to_vec(data, Level::Fast).expect("compression must not fail");
    assert!(compressed.len() <= max_compressed_length(data.len()));

    let decompressed = decompress_to_vec(&compressed).expect("decompressing our own output must succeed");
    assert_eq!(decompressed, data, "round trip did not reproduce the input");
});
