//! Error types shared by the encoder, decoder and validator.

use thiserror::Error;

/// Why a compressed stream was rejected as corrupt.
///
/// Kept as a nested enum rather than flattening into [`SnappyError`] directly:
/// callers that only care about "is this legal" match on [`SnappyError::Corrupted`],
/// while anything that wants to log or report the defect gets the specific reason.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum CorruptionKind {
    #[error("the uncompressed-length varint is malformed (more than 5 bytes, or truncated input)")]
    MalformedVarint,
    #[error("input ended in the middle of an operation")]
    UnexpectedEnd,
    #[error("a literal's bytes run past the end of the input")]
    LiteralOverrunsInput,
    #[error("a copy offset of zero is never valid")]
    ZeroOffset,
    #[error("a copy offset points before the start of the output produced so far")]
    OffsetOutOfRange,
    #[error("the operations produced more output than the declared uncompressed length")]
    OutputOverrun,
    #[error("the stream ended before producing the declared uncompressed length")]
    OutputUnderrun,
    #[error("there are bytes left in the input after the last complete operation")]
    TrailingBytes,
}

/// The three externally-visible failure modes of this codec.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum SnappyError {
    #[error("input of {len} bytes exceeds the maximum supported length of u32::MAX bytes")]
    InputTooLarge { len: usize },

    #[error("output buffer of {available} bytes is smaller than the {needed} bytes required")]
    InsufficientBuffer { needed: usize, available: usize },

    #[error("corrupted snappy stream: {0}")]
    Corrupted(CorruptionKind),
}

impl SnappyError {
    pub(crate) fn corrupted(kind: CorruptionKind) -> Self {
        SnappyError::Corrupted(kind)
    }
}

pub type Result<T> = std::result::Result<T, SnappyError>;
