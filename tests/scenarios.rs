//! End-to-end scenarios straight out of the format's concrete test vectors:
//! empty input, single bytes, fragment-boundary sizes, and the handcrafted
//! pattern-extension stream.

use snap_rs::prelude::*;

fn round_trip(input: &[u8]) -> Vec<u8> {
    let compressed = compress_to_vec(input, Level::Fast).unwrap();
    assert!(is_valid_compressed(&compressed));
    let decompressed = decompress_to_vec(&compressed).unwrap();
    assert_eq!(decompressed, input);
    compressed
}

#[test]
fn empty_input() {
    let compressed = round_trip(b"");
    assert_eq!(compressed, vec![0x00]);
}

#[test]
fn single_byte() {
    let compressed = round_trip(b"A");
    assert_eq!(compressed, vec![0x01, 0x00, b'A']);
}

#[test]
fn hundred_repeated_bytes_compress_smaller() {
    let input = vec![b'a'; 100];
    let compressed = round_trip(&input);
    assert!(compressed.len() < 100);
}

#[test]
fn repeated_pattern_compresses_smaller() {
    let input = b"abcdefgh".repeat(20);
    let compressed = round_trip(&input);
    assert!(compressed.len() < input.len());
}

#[test]
fn printable_ascii_range() {
    let input: Vec<u8> = (0x20u8..=0x7E).collect();
    round_trip(&input);
}

#[test]
fn handcrafted_pattern_extension_stream() {
    // varint(9), literal "abc", copy2(offset=3, length=6)
    let stream = [0x09, 0x08, b'a', b'b', b'c', 0x16, 0x03, 0x00];
    assert_eq!(decompress_to_vec(&stream).unwrap(), b"abcabcabc");
}

#[test]
fn literal_length_thresholds() {
    for &len in &[59usize, 60, 61, 62, 255, 256, 257, 65535, 65536, 65537, 16_777_215, 16_777_216, 16_777_217] {
        let input: Vec<u8> = (0..len).map(|i| b'a' + (i % 26) as u8).collect();
        round_trip(&input);
    }
}

#[test]
fn copy_length_boundaries() {
    // Repeating a 4-byte motif exercises the copy-1/copy-2 chunking paths
    // end to end, but which exact copy lengths the encoder emits depends on
    // where its hash table happens to find a match -- it isn't guaranteed to
    // land on any specific length. The named boundary lengths (11, 12, 63,
    // 64, 65, 1024) are asserted deterministically against `emit_copy`
    // directly in `encode.rs`'s unit tests; this is a supplementary
    // black-box sanity sweep over the same chunking machinery.
    for &repeats in &[2usize, 3, 16, 17, 64, 65, 300] {
        let input = b"wxyz".repeat(repeats);
        round_trip(&input);
    }
}

#[test]
fn offset_boundaries() {
    // A short prefix, then enough filler to push the back-reference to the
    // prefix past the copy-1 (2047) and copy-2 (65535) offset limits, then
    // the prefix repeated so the encoder must emit a copy with that offset.
    for &offset in &[4usize, 2047, 2048, 65535, 65536] {
        let mut input = b"ABCD".to_vec();
        input.extend(std::iter::repeat(b'.').take(offset.saturating_sub(4)));
        input.extend_from_slice(b"ABCD");
        round_trip(&input);
    }
}

#[test]
fn exact_fragment_sizes() {
    for &len in &[65535usize, 65536, 65537] {
        let input: Vec<u8> = (0..len).map(|i| ((i * 31) % 256) as u8).collect();
        round_trip(&input);
    }
}

#[test]
fn small_copy_with_varying_gap() {
    for i in 0..32 {
        let mut s = b"aaaa".to_vec();
        s.extend(std::iter::repeat(b'b').take(i));
        s.extend_from_slice(b"aaaabbbb");
        round_trip(&s);
    }
}

#[test]
fn small_regular_increasing_sizes() {
    let mut i = 1usize;
    while i < 20_000 {
        let buf: Vec<u8> = (0..i).map(|j| (j % 10) as u8 + b'a').collect();
        round_trip(&buf);
        i += 23;
    }
}
