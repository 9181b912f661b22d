#![allow(dead_code)]

use std::error;
use std::fmt;

mod compress;
mod varint;

pub use compress::{compress, decompress};
pub use varint::{pack, unpack, unzigzag, zigzag};

/// Errors raised while packing or unpacking the payload bytes that sit between
/// the book cipher's position list and the Reed-Solomon codeword.
#[derive(Debug)]
pub enum PayloadError {
    /// The varint byte stream ended with a continuation bit still set.
    TruncatedVarint,
    /// Bytes remained after the last varint was decoded and no continuation
    /// bit asked for more.
    TrailingGarbage { remaining: usize },
    /// The deflate/zlib decompressor rejected the bytes handed to it.
    CompressionFailed(String),
}

impl error::Error for PayloadError {}
impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TruncatedVarint => {
                write!(f, "varint stream ended mid-integer")
            }
            Self::TrailingGarbage { remaining } => {
                write!(f, "{} trailing byte(s) after last varint", remaining)
            }
            Self::CompressionFailed(detail) => {
                write!(f, "compression codec failed: {}", detail)
            }
        }
    }
}
