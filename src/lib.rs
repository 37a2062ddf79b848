//! A byte-exact implementation of the Snappy block compression format.
//!
//! This crate implements the raw Snappy block codec: a fast LZ77-family
//! compressor that trades ratio for throughput. It does not implement the
//! Snappy-frame streaming/checksum layer, nor a command-line driver.
//!
//! The codec is split into five pieces, leaves first: a varint codec for the
//! uncompressed-length prefix, a tag codec for the per-operation bit layout,
//! an [`encode`]r, a [`decode`]r, and a [`validate`]ing decoder shadow that
//! checks legality without writing output.
//!
//! ```
//! use snap_rs::prelude::*;
//!
//! let input = b"hello hello hello hello";
//! let compressed = compress_to_vec(input, Level::Fast).unwrap();
//! assert!(is_valid_compressed(&compressed));
//! assert_eq!(decompress_to_vec(&compressed).unwrap(), input);
//! ```

#![forbid(unsafe_code)]

mod tag;
mod varint;

pub mod convenience;
pub mod decode;
pub mod encode;
pub mod error;
pub mod prelude;
pub mod validate;

pub use convenience::{compress_to_vec, decompress_to_vec};
pub use decode::{decompress, get_uncompressed_length};
pub use encode::{compress, max_compressed_length, Level};
pub use error::{CorruptionKind, Result, SnappyError};
pub use validate::is_valid_compressed;
