//! The LZ77 match-finder and tag-based encoder.
//!
//! Mirrors the hash-table discipline of the reference Snappy encoder: one
//! fixed-size table of 16-bit fragment-relative positions, a single-pass
//! probe-and-extend loop, and a growing skip step on unsuccessful probes so
//! incompressible input still encodes in linear time.

use byteorder::{ByteOrder, LE};

use crate::error::SnappyError;
use crate::tag;
use crate::varint;

/// `compression_level` option from the external interface. `Better` is
/// reserved by the format (a denser double-hash search is legal) but not
/// implemented here; it currently compresses identically to `Fast`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Level {
    #[default]
    Fast,
    Better,
}

/// The reference hashes with a fixed shift derived from this constant,
/// independent of the actual table size in use; only the final mask varies.
const MAX_HASH_TABLE_BITS: u32 = 15;

/// Fragments are at most 64 KiB so that hash-table entries (positions within
/// a fragment) always fit in 16 bits.
const BLOCK_SIZE: usize = 1 << 16;

/// `32 + n + floor(n / 6)`, the documented worst-case compressed size.
pub fn max_compressed_length(n: usize) -> usize {
    32 + n + n / 6
}

/// A writable region with a running cursor, bounds-checked on every write.
///
/// The encoder is guaranteed by construction to never exceed
/// [`max_compressed_length`], so in a correct build these checks never trip;
/// they exist so a caller who got the buffer size wrong gets a clean error
/// instead of a panic.
struct OutCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> OutCursor<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        OutCursor { buf, pos: 0 }
    }

    fn push(&mut self, byte: u8) -> Result<(), SnappyError> {
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(SnappyError::InsufficientBuffer {
                needed: self.pos + 1,
                available: self.buf.len(),
            })?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    fn extend(&mut self, data: &[u8]) -> Result<(), SnappyError> {
        let end = self.pos + data.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(SnappyError::InsufficientBuffer {
                needed: end,
                available: self.buf.len(),
            })?;
        dst.copy_from_slice(data);
        self.pos = end;
        Ok(())
    }
}

struct HashTable {
    table: Vec<u16>,
    mask: usize,
}

impl HashTable {
    fn for_fragment(fragment_len: usize) -> Self {
        let clamped = fragment_len.clamp(256, 1 << MAX_HASH_TABLE_BITS);
        let size = clamped.next_power_of_two();
        HashTable {
            table: vec![0u16; size],
            mask: size - 1,
        }
    }

    #[inline]
    fn hash(&self, w: u32) -> usize {
        let h = w.wrapping_mul(0x1E35_A7BD) >> (32 - MAX_HASH_TABLE_BITS);
        (h as usize) & self.mask
    }

    #[inline]
    fn get(&self, w: u32) -> usize {
        self.table[self.hash(w)] as usize
    }

    #[inline]
    fn set(&mut self, w: u32, pos: usize) {
        let h = self.hash(w);
        // pos is always < BLOCK_SIZE (65536), which barely overflows u16 at
        // its top value (65535 is the max valid index); BLOCK_SIZE itself is
        // never a position that gets inserted.
        self.table[h] = pos as u16;
    }
}

fn emit_literal(out: &mut OutCursor, data: &[u8]) -> Result<(), SnappyError> {
    let (tag_byte, extra, extra_len) = tag::encode_literal_tag(data.len() as u32);
    out.push(tag_byte)?;
    out.extend(&extra[..extra_len])?;
    out.extend(data)
}

fn emit_copy(out: &mut OutCursor, offset: u32, mut length: usize) -> Result<(), SnappyError> {
    debug_assert!(offset >= 1);
    debug_assert!(length >= 4);

    if length <= 11 && offset < 2048 {
        let (tag_byte, off_byte) = tag::encode_copy1(offset as u16, length as u8);
        out.push(tag_byte)?;
        return out.push(off_byte);
    }

    while length >= 64 {
        let (tag_byte, bytes) = tag::encode_copy2(offset as u16, 64);
        out.push(tag_byte)?;
        out.extend(&bytes)?;
        length -= 64;
    }
    if length == 0 {
        return Ok(());
    }
    if offset < 65536 {
        let (tag_byte, bytes) = tag::encode_copy2(offset as u16, length as u8);
        out.push(tag_byte)?;
        out.extend(&bytes)
    } else {
        let (tag_byte, bytes) = tag::encode_copy4(offset, length as u8);
        out.push(tag_byte)?;
        out.extend(&bytes)
    }
}

/// Extend a 4-byte match as far as it goes. `ip` and `candidate` are both
/// relative to `input`, with `candidate < ip`. Returns the total match length
/// (always `>= 4`).
fn extend_match(input: &[u8], ip: usize, candidate: usize) -> usize {
    let n = input.len();
    let mut a = ip + 4;
    let mut b = candidate + 4;
    while a < n && input[a] == input[b] {
        a += 1;
        b += 1;
    }
    a - ip
}

/// Encode one fragment (at most [`BLOCK_SIZE`] bytes) of `input`, with hash
/// table offsets relative to the start of the fragment.
fn encode_fragment(input: &[u8], out: &mut OutCursor) -> Result<(), SnappyError> {
    let n = input.len();
    let mut table = HashTable::for_fragment(n);

    let mut ip = 0usize;
    let mut next_emit = 0usize;
    let mut skip: u32 = 32;

    while ip + 16 <= n {
        let w = LE::read_u32(&input[ip..]);
        let h = table.hash(w);
        let candidate = table.table[h] as usize;
        table.table[h] = ip as u16;

        if candidate != 0 && ip - candidate <= 0xFFFF && LE::read_u32(&input[candidate..]) == w {
            if next_emit < ip {
                emit_literal(out, &input[next_emit..ip])?;
            }

            let match_len = extend_match(input, ip, candidate);
            emit_copy(out, (ip - candidate) as u32, match_len)?;

            ip += match_len;
            next_emit = ip;
            skip = 32;

            // Seed a candidate at ip-1 so a match overlapping the copy we
            // just emitted can still be found later.
            if ip >= 1 && ip + 3 <= n {
                let w2 = LE::read_u32(&input[ip - 1..]);
                table.set(w2, ip - 1);
            }
            continue;
        }

        ip += (skip >> 5) as usize;
        skip += 1;
    }

    if next_emit < n {
        emit_literal(out, &input[next_emit..])?;
    }
    Ok(())
}

/// Compress `input` into `output`, returning the number of bytes written.
///
/// `output` must be at least [`max_compressed_length`]`(input.len())` bytes.
pub fn compress(input: &[u8], output: &mut [u8], _level: Level) -> Result<usize, SnappyError> {
    let n = input.len();
    if n > u32::MAX as usize {
        return Err(SnappyError::InputTooLarge { len: n });
    }

    let required = max_compressed_length(n);
    if output.len() < required {
        return Err(SnappyError::InsufficientBuffer {
            needed: required,
            available: output.len(),
        });
    }

    let mut out = OutCursor::new(output);
    let (varint_bytes, varint_len) = varint::encode_to_array(n as u32);
    out.extend(&varint_bytes[..varint_len])?;

    if n == 0 {
        return Ok(out.pos);
    }
    if n < 4 {
        emit_literal(&mut out, input)?;
        return Ok(out.pos);
    }

    let mut offset = 0;
    while offset < n {
        let fragment_len = std::cmp::min(BLOCK_SIZE, n - offset);
        encode_fragment(&input[offset..offset + fragment_len], &mut out)?;
        offset += fragment_len;
    }

    Ok(out.pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decompress;

    fn round_trip(input: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; max_compressed_length(input.len())];
        let written = compress(input, &mut out, Level::Fast).unwrap();
        out.truncate(written);
        out
    }

    #[test]
    fn empty_input_is_one_byte() {
        let compressed = round_trip(b"");
        assert_eq!(compressed, vec![0x00]);
    }

    #[test]
    fn single_byte_input() {
        let compressed = round_trip(b"A");
        assert_eq!(compressed, vec![0x01, 0x00, b'A']);
    }

    #[test]
    fn repeated_byte_compresses_and_round_trips() {
        let input = vec![b'a'; 100];
        let compressed = round_trip(&input);
        assert!(compressed.len() < 100);
        let mut decoded = vec![0u8; input.len()];
        let written = decompress(&compressed, &mut decoded).unwrap();
        assert_eq!(&decoded[..written], input.as_slice());
    }

    #[test]
    fn insufficient_buffer_is_reported() {
        let input = vec![0u8; 100];
        let mut out = vec![0u8; 1];
        assert_eq!(
            compress(&input, &mut out, Level::Fast),
            Err(SnappyError::InsufficientBuffer {
                needed: max_compressed_length(100),
                available: 1
            })
        );
    }

    #[test]
    fn size_bound_holds_across_lengths() {
        for &len in &[0usize, 1, 3, 4, 60, 61, 256, 257, 65536, 65537, 131072] {
            let input: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let mut out = vec![0u8; max_compressed_length(len)];
            let written = compress(&input, &mut out, Level::Fast).unwrap();
            assert!(written <= max_compressed_length(len));
        }
    }

    /// Drives `emit_copy` directly across the named length boundaries: 11
    /// is the last length that fits a copy-1 op, 12 is the first that must
    /// spill to copy-2, 63/64 are the last lengths a single copy-2 chunk can
    /// hold, and 65/1024 force the 64-byte chunking loop to run once or
    /// several times (1024 divides evenly, leaving no residual chunk).
    #[test]
    fn emit_copy_length_boundaries() {
        let sizes_and_offsets = [
            (11usize, 5u32, 2),  // copy-1: tag + 1 offset byte
            (12, 5, 3),          // copy-2: tag + 2 offset bytes
            (63, 100, 3),        // single copy-2 chunk
            (64, 100, 3),        // single copy-2 chunk, exactly at the cap
            (65, 100, 6),        // one 64-chunk + a 1-byte residual copy-2
            (1024, 100, 16 * 3), // sixteen 64-byte chunks, no residual
        ];
        for &(length, offset, expected_bytes) in &sizes_and_offsets {
            let mut buf = vec![0u8; 128];
            let mut out = OutCursor::new(&mut buf);
            emit_copy(&mut out, offset, length).unwrap();
            assert_eq!(out.pos, expected_bytes, "length={length}");
        }
    }
}
