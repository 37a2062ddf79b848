//! `use snap_rs::prelude::*;` for the common entry points.

pub use crate::convenience::{compress_to_vec, decompress_to_vec};
pub use crate::decode::{decompress, get_uncompressed_length};
pub use crate::encode::{compress, max_compressed_length, Level};
pub use crate::error::{CorruptionKind, SnappyError};
pub use crate::validate::is_valid_compressed;
