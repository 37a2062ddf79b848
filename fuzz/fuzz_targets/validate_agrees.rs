#![no_main]
use libfuzzer_sys::fuzz_target;
use snap_rs::decode;
use snap_rs::validate::is_valid_compressed;

// Arbitrary byte soup almost never decodes, but whenever the validator calls
// a stream legal, the decoder must actually agree -- a mismatch here means
// the validator shadow has drifted from the real decode loop.
fuzz_target!(|data: &[u8]| {
    if !is_valid_compressed(data) {
        return;
    }
    let len = decode::get_uncompressed_length(data).expect("validator accepted an unparsable length prefix");
    let mut out = vec![0u8; len as usize];
    decode::decompress(data, &mut out).expect("validator accepted a stream the decoder rejects");
});
