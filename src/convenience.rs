//! Allocating convenience wrappers around the buffer-based core API.
//!
//! The core `compress`/`decompress` operate on caller-supplied buffers so
//! the hot path never allocates; these wrappers size and own that buffer
//! for callers who just want a `Vec<u8>` back.

use fehler::{throw, throws};

use crate::decode;
use crate::encode::{self, Level};
use crate::error::{CorruptionKind, SnappyError};

/// Compress `input`, allocating a `Vec<u8>` sized to [`encode::max_compressed_length`].
#[throws(SnappyError)]
pub fn compress_to_vec(input: &[u8], level: Level) -> Vec<u8> {
    let mut out = vec![0u8; encode::max_compressed_length(input.len())];
    let written = encode::compress(input, &mut out, level)?;
    out.truncate(written);
    out
}

/// Decompress `input`, allocating a `Vec<u8>` sized to the stream's declared length.
#[throws(SnappyError)]
pub fn decompress_to_vec(input: &[u8]) -> Vec<u8> {
    let len = match decode::get_uncompressed_length(input) {
        Some(len) => len,
        None => throw!(SnappyError::corrupted(CorruptionKind::MalformedVarint)),
    };
    let mut out = vec![0u8; len as usize];
    let written = decode::decompress(input, &mut out)?;
    out.truncate(written);
    out
}
