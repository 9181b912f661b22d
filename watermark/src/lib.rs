//! DCT-domain quantization-index-modulation watermark.
//!
//! An image is split into non-overlapping 8x8 luminance blocks; each block
//! carries one bit, read or written via [`qim`]. The first 24 blocks carry
//! a big-endian length header, unprotected by any error-correcting code so
//! its own length never depends on a code it hasn't been sized for yet.

use std::error;
use std::fmt;

use log::debug;

pub mod blocks;
pub mod dct;
pub mod qim;

use blocks::BlockGrid;

/// Width, in blocks, of the length header. Fixed at compile time for wire
/// compatibility; never parameterized.
pub const HEADER_BITS: usize = 24;

/// An H x W image of 8-bit RGB samples, row-major, interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RgbImage {
    /// Builds an image from interleaved RGB samples. `pixels.len()` must
    /// equal `width * height * 3`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 3);
        RgbImage { width, height, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let base = (y * self.width + x) * 3;
        (self.pixels[base], self.pixels[base + 1], self.pixels[base + 2])
    }
}

/// Errors raised by the watermark layer.
#[derive(Debug, PartialEq, Eq)]
pub enum WatermarkError {
    /// The image does not have enough 8x8 blocks for the requested bits.
    ImageTooSmall { required_blocks: usize, available_blocks: usize },
    /// A header value was asked to be embedded that does not fit in
    /// [`HEADER_BITS`] bits.
    HeaderValueOverflow { value: u32, max: u32 },
    /// The decoded length header claims more codeword bits, at the caller's
    /// repetition rate, than the image has capacity for. Raised by
    /// [`extract`] before any of those bits are even read.
    InvalidHeader { declared_bits: u32, capacity_bits: u32 },
}

impl error::Error for WatermarkError {}
impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ImageTooSmall { required_blocks, available_blocks } => write!(
                f,
                "image has {} 8x8 block(s) but {} are required",
                available_blocks, required_blocks
            ),
            Self::HeaderValueOverflow { value, max } => {
                write!(f, "header value {} exceeds the {}-bit header width (max {})", value, HEADER_BITS, max)
            }
            Self::InvalidHeader { declared_bits, capacity_bits } => write!(
                f,
                "decoded header declares {} bit(s) but only {} bit(s) of capacity remain",
                declared_bits, capacity_bits
            ),
        }
    }
}

/// Number of 8x8 blocks available in `image`, i.e. `B` in the block-grid
/// accounting: `floor(H/8) * floor(W/8)`.
pub fn capacity_blocks(image: &RgbImage) -> usize {
    (image.height() / dct::N) * (image.width() / dct::N)
}

fn header_to_bits(value: u32) -> [bool; HEADER_BITS] {
    let mut bits = [false; HEADER_BITS];
    for (i, bit) in bits.iter_mut().enumerate() {
        let shift = HEADER_BITS - 1 - i;
        *bit = (value >> shift) & 1 == 1;
    }
    bits
}

fn bits_to_header(bits: &[bool]) -> u32 {
    bits.iter().fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit))
}

/// Embeds a 24-bit `header_value` followed by `payload_bits`, one bit per
/// 8x8 block, in row-major block order. The caller decides what
/// `header_value` and `payload_bits` mean; this layer only places bits.
pub fn embed(image: &RgbImage, header_value: u32, payload_bits: &[bool]) -> Result<RgbImage, WatermarkError> {
    let max_header = (1u32 << HEADER_BITS) - 1;
    if header_value > max_header {
        return Err(WatermarkError::HeaderValueOverflow { value: header_value, max: max_header });
    }

    let available = capacity_blocks(image);
    let required = HEADER_BITS + payload_bits.len();
    if required > available {
        return Err(WatermarkError::ImageTooSmall { required_blocks: required, available_blocks: available });
    }

    let mut grid = BlockGrid::from_image(image);
    let header_bits = header_to_bits(header_value);

    for (i, &bit) in header_bits.iter().chain(payload_bits.iter()).enumerate() {
        let block = grid.get_block(i);
        grid.set_block(i, qim::embed_bit(&block, bit));
    }

    debug!(
        "embedded {} header bit(s) and {} payload bit(s) into {} of {} available block(s)",
        HEADER_BITS,
        payload_bits.len(),
        required,
        available
    );

    Ok(grid.into_image())
}

/// Reads the 24-bit length header out of `image`'s first 24 blocks.
pub fn extract_header(image: &RgbImage) -> Result<u32, WatermarkError> {
    let available = capacity_blocks(image);
    if available < HEADER_BITS {
        return Err(WatermarkError::ImageTooSmall { required_blocks: HEADER_BITS, available_blocks: available });
    }

    let grid = BlockGrid::from_image(image);
    let bits: Vec<bool> = (0..HEADER_BITS).map(|i| qim::extract_bit(&grid.get_block(i))).collect();
    Ok(bits_to_header(&bits))
}

/// Reads `count` payload bits starting `offset` blocks after the header.
pub fn extract_bits(image: &RgbImage, offset: usize, count: usize) -> Result<Vec<bool>, WatermarkError> {
    let available = capacity_blocks(image);
    let required = HEADER_BITS + offset + count;
    if required > available {
        return Err(WatermarkError::ImageTooSmall { required_blocks: required, available_blocks: available });
    }

    let grid = BlockGrid::from_image(image);
    Ok((0..count)
        .map(|i| qim::extract_bit(&grid.get_block(HEADER_BITS + offset + i)))
        .collect())
}

/// Reads the header and every payload bit it declares, validating that the
/// declared length fits the image's remaining capacity once each bit has
/// been repeated `repetition` times. This is the entry point callers that
/// know their inner repetition rate should use; [`extract_header`] and
/// [`extract_bits`] exist separately for callers (and tests) that want the
/// two steps apart.
pub fn extract(image: &RgbImage, repetition: usize) -> Result<(u32, Vec<bool>), WatermarkError> {
    let declared_bits = extract_header(image)?;
    let capacity_bits = (capacity_blocks(image) - HEADER_BITS) as u32;
    let needed_bits = declared_bits as usize * repetition;

    if needed_bits as u64 > capacity_bits as u64 {
        return Err(WatermarkError::InvalidHeader { declared_bits, capacity_bits });
    }

    let bits = extract_bits(image, 0, needed_bits)?;

    debug!(
        "extracted a {} bit header declaring {} codeword bit(s) at repetition {}",
        HEADER_BITS, declared_bits, repetition
    );

    Ok((declared_bits, bits))
}
