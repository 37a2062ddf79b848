//! The decoder: reads tags, performs literal and back-reference copies, and
//! verifies exact output-length consumption.
//!
//! Every bounds check named in the abstract algorithm is present and
//! mandatory here, even where a hand-tuned implementation might fuse two of
//! them — this module is the thing adversarial input actually runs against.

use byteorder::{ByteOrder, LE};

use crate::error::{CorruptionKind, SnappyError};
use crate::tag::{self, LiteralLen, TagType};
use crate::varint;

/// Decode just the leading varint, without touching the rest of the stream.
/// `None` if the prefix is malformed. O(1) — at most 5 bytes are read.
pub fn get_uncompressed_length(input: &[u8]) -> Option<u32> {
    varint::decode(input).ok().map(|(v, _)| v)
}

/// Decompress `input` into `output`, returning the number of bytes written
/// (equal to the stream's declared uncompressed length on success).
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize, SnappyError> {
    let (uncompressed_length, varint_len) = varint::decode(input)?;
    let uncompressed_length = uncompressed_length as usize;

    if output.len() < uncompressed_length {
        return Err(SnappyError::InsufficientBuffer {
            needed: uncompressed_length,
            available: output.len(),
        });
    }

    let mut ip = varint_len;
    let mut op = 0usize;

    while ip < input.len() {
        if op == uncompressed_length {
            return Err(SnappyError::corrupted(CorruptionKind::TrailingBytes));
        }

        let tag_byte = input[ip];
        ip += 1;

        match tag::tag_type(tag_byte) {
            TagType::Literal => {
                let length = read_literal_length(input, &mut ip, tag_byte)?;
                let src = input
                    .get(ip..ip + length)
                    .ok_or_else(|| SnappyError::corrupted(CorruptionKind::LiteralOverrunsInput))?;
                // u64 so this holds on 32-bit targets too, where op/length near u32::MAX would wrap in usize.
                if op as u64 + length as u64 > uncompressed_length as u64 {
                    return Err(SnappyError::corrupted(CorruptionKind::OutputOverrun));
                }
                output[op..op + length].copy_from_slice(src);
                ip += length;
                op += length;
            }
            TagType::Copy1 => {
                let &offset_byte = input
                    .get(ip)
                    .ok_or_else(|| SnappyError::corrupted(CorruptionKind::UnexpectedEnd))?;
                ip += 1;
                let length = usize::from(tag::copy1_len(tag_byte));
                let offset = usize::from(tag::copy1_offset_high(tag_byte) | u16::from(offset_byte));
                apply_copy(output, &mut op, offset, length, uncompressed_length)?;
            }
            TagType::Copy2 => {
                let bytes = input
                    .get(ip..ip + 2)
                    .ok_or_else(|| SnappyError::corrupted(CorruptionKind::UnexpectedEnd))?;
                ip += 2;
                let length = usize::from(tag::copy24_len(tag_byte));
                let offset = usize::from(LE::read_u16(bytes));
                apply_copy(output, &mut op, offset, length, uncompressed_length)?;
            }
            TagType::Copy4 => {
                let bytes = input
                    .get(ip..ip + 4)
                    .ok_or_else(|| SnappyError::corrupted(CorruptionKind::UnexpectedEnd))?;
                ip += 4;
                let length = usize::from(tag::copy24_len(tag_byte));
                let offset = LE::read_u32(bytes) as usize;
                apply_copy(output, &mut op, offset, length, uncompressed_length)?;
            }
        }
    }

    if op != uncompressed_length {
        return Err(SnappyError::corrupted(CorruptionKind::OutputUnderrun));
    }

    Ok(op)
}

/// Shared by the decoder and the validator: reads the literal-length extra
/// bytes (if any) following a literal tag, advancing `ip` past them.
pub(crate) fn read_literal_length(
    input: &[u8],
    ip: &mut usize,
    tag_byte: u8,
) -> Result<usize, SnappyError> {
    match tag::literal_len(tag_byte) {
        LiteralLen::Direct(n) => Ok(n as usize),
        LiteralLen::Extra(extra_count) => {
            let extra_count = usize::from(extra_count);
            let extra = input
                .get(*ip..*ip + extra_count)
                .ok_or_else(|| SnappyError::corrupted(CorruptionKind::UnexpectedEnd))?;
            *ip += extra_count;
            let mut buf = [0u8; 4];
            buf[..extra_count].copy_from_slice(extra);
            Ok((LE::read_u32(&buf) as usize) + 1)
        }
    }
}

fn apply_copy(
    output: &mut [u8],
    op: &mut usize,
    offset: usize,
    length: usize,
    uncompressed_length: usize,
) -> Result<(), SnappyError> {
    if offset == 0 {
        return Err(SnappyError::corrupted(CorruptionKind::ZeroOffset));
    }
    if offset > *op {
        return Err(SnappyError::corrupted(CorruptionKind::OffsetOutOfRange));
    }
    // u64: same overflow concern as the literal-length check above.
    if *op as u64 + length as u64 > uncompressed_length as u64 {
        return Err(SnappyError::corrupted(CorruptionKind::OutputOverrun));
    }

    copy_overlapping(output, *op, offset, length);
    *op += length;
    Ok(())
}

/// The overlap-aware copy (pattern extension): when `offset < length` the
/// source region overlaps the destination, and bytes this call writes are
/// themselves read later in the same call. A straight `memmove` is wrong
/// here; only the `offset >= length` case may use one.
fn copy_overlapping(output: &mut [u8], op: usize, offset: usize, length: usize) {
    if offset >= length {
        let (head, tail) = output.split_at_mut(op);
        tail[..length].copy_from_slice(&head[op - offset..op - offset + length]);
    } else {
        for k in 0..length {
            output[op + k] = output[op - offset + k];
        }
    }
}
