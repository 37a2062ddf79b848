//! A structural shadow of [`crate::decode`] that checks legality without
//! materializing any output.
//!
//! Kept as its own traversal rather than a "write / no-write" flag threaded
//! through the decoder: the decoder's hot path should not carry
//! validation-mode branches, and the two share only the pure tag-decoding
//! helpers in [`crate::tag`].

use byteorder::{ByteOrder, LE};

use crate::decode::read_literal_length;
use crate::tag::{self, TagType};
use crate::varint;

#[cfg(feature = "tracing")]
macro_rules! reject {
    ($reason:expr) => {{
        tracing::debug!(reason = $reason, "rejecting snappy stream");
        return false;
    }};
}
#[cfg(not(feature = "tracing"))]
macro_rules! reject {
    ($reason:expr) => {{
        let _ = $reason;
        return false;
    }};
}

/// Is `input` a well-formed Snappy block stream?
///
/// Equivalent to "would [`crate::decode::decompress`] succeed against a
/// sufficiently large output buffer" — but does not allocate or write
/// anything, and rejects trailing bytes after an otherwise complete payload.
pub fn is_valid_compressed(input: &[u8]) -> bool {
    let (uncompressed_length, varint_len) = match varint::decode(input) {
        Ok(v) => v,
        Err(_) => reject!("malformed varint"),
    };
    let uncompressed_length = uncompressed_length as usize;

    let mut ip = varint_len;
    let mut op = 0usize;

    while ip < input.len() {
        let tag_byte = input[ip];
        ip += 1;

        match tag::tag_type(tag_byte) {
            TagType::Literal => {
                let length = match read_literal_length(input, &mut ip, tag_byte) {
                    Ok(l) => l,
                    Err(_) => reject!("truncated literal length"),
                };
                if ip + length > input.len() {
                    reject!("literal overruns input");
                }
                // u64 so this holds on 32-bit targets too, where op/length near u32::MAX would wrap in usize.
                if op as u64 + length as u64 > uncompressed_length as u64 {
                    reject!("literal overruns declared output length");
                }
                ip += length;
                op += length;
            }
            TagType::Copy1 => {
                let offset_byte = match input.get(ip) {
                    Some(&b) => b,
                    None => reject!("truncated copy1"),
                };
                ip += 1;
                let length = usize::from(tag::copy1_len(tag_byte));
                let offset =
                    usize::from(tag::copy1_offset_high(tag_byte) | u16::from(offset_byte));
                if !check_copy(&mut op, offset, length, uncompressed_length) {
                    reject!("invalid copy1");
                }
            }
            TagType::Copy2 => {
                let bytes = match input.get(ip..ip + 2) {
                    Some(b) => b,
                    None => reject!("truncated copy2"),
                };
                ip += 2;
                let length = usize::from(tag::copy24_len(tag_byte));
                let offset = usize::from(LE::read_u16(bytes));
                if !check_copy(&mut op, offset, length, uncompressed_length) {
                    reject!("invalid copy2");
                }
            }
            TagType::Copy4 => {
                let bytes = match input.get(ip..ip + 4) {
                    Some(b) => b,
                    None => reject!("truncated copy4"),
                };
                ip += 4;
                let length = usize::from(tag::copy24_len(tag_byte));
                let offset = LE::read_u32(bytes) as usize;
                if !check_copy(&mut op, offset, length, uncompressed_length) {
                    reject!("invalid copy4");
                }
            }
        }
    }

    if op != uncompressed_length {
        reject!("output length mismatch");
    }
    if ip != input.len() {
        reject!("trailing bytes after payload");
    }

    true
}

fn check_copy(op: &mut usize, offset: usize, length: usize, uncompressed_length: usize) -> bool {
    if offset == 0 || offset > *op {
        return false;
    }
    // u64: same overflow concern as the literal-length check above.
    if *op as u64 + length as u64 > uncompressed_length as u64 {
        return false;
    }
    *op += length;
    true
}
