//! RGB/YCbCr conversion and the 8x8 block grid walked by the watermark.

use crate::dct::N;
use crate::RgbImage;

/// ITU-R BT.601 forward transform, matching the luminance formula fixed by
/// the wire format. Cb/Cr are carried so the inverse can reconstruct color
/// after only the Y plane has been modified.
fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;
    (y, cb, cr)
}

fn ycbcr_to_rgb(y: f64, cb: f64, cr: f64) -> (u8, u8, u8) {
    let r = y + 1.402 * (cr - 128.0);
    let g = y - 0.344136 * (cb - 128.0) - 0.714136 * (cr - 128.0);
    let b = y + 1.772 * (cb - 128.0);
    (clamp_to_u8(r), clamp_to_u8(g), clamp_to_u8(b))
}

fn clamp_to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// The image decomposed into Y/Cb/Cr planes, with the Y plane addressable
/// as non-overlapping 8x8 blocks in row-major block order.
pub struct BlockGrid {
    width: usize,
    height: usize,
    blocks_wide: usize,
    blocks_high: usize,
    y: Vec<f64>,
    cb: Vec<f64>,
    cr: Vec<f64>,
}

impl BlockGrid {
    pub fn from_image(image: &RgbImage) -> Self {
        let width = image.width();
        let height = image.height();
        let mut y = vec![0.0; width * height];
        let mut cb = vec![0.0; width * height];
        let mut cr = vec![0.0; width * height];

        for row in 0..height {
            for col in 0..width {
                let (r, g, b) = image.pixel(col, row);
                let (yy, cbb, crr) = rgb_to_ycbcr(r, g, b);
                let idx = row * width + col;
                y[idx] = yy;
                cb[idx] = cbb;
                cr[idx] = crr;
            }
        }

        BlockGrid {
            width,
            height,
            blocks_wide: width / N,
            blocks_high: height / N,
            y,
            cb,
            cr,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks_wide * self.blocks_high
    }

    /// Reads the 8x8 luminance block at linear index `i`, in row-major
    /// block order (top-to-bottom rows of blocks, left-to-right within a
    /// row).
    pub fn get_block(&self, i: usize) -> [[f64; N]; N] {
        let (base_row, base_col) = self.block_origin(i);
        let mut block = [[0.0; N]; N];
        for (r, block_row) in block.iter_mut().enumerate() {
            for (c, cell) in block_row.iter_mut().enumerate() {
                *cell = self.y[(base_row + r) * self.width + base_col + c];
            }
        }
        block
    }

    pub fn set_block(&mut self, i: usize, block: [[f64; N]; N]) {
        let (base_row, base_col) = self.block_origin(i);
        for (r, block_row) in block.iter().enumerate() {
            for (c, &cell) in block_row.iter().enumerate() {
                self.y[(base_row + r) * self.width + base_col + c] = cell;
            }
        }
    }

    fn block_origin(&self, i: usize) -> (usize, usize) {
        let block_row = i / self.blocks_wide;
        let block_col = i % self.blocks_wide;
        (block_row * N, block_col * N)
    }

    /// Recombines the (possibly watermarked) Y plane with the untouched
    /// Cb/Cr planes into a full-size RGB image, including any trailing
    /// rows/columns that fell outside the block-aligned region.
    pub fn into_image(self) -> RgbImage {
        let mut pixels = vec![0u8; self.width * self.height * 3];
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = row * self.width + col;
                let (r, g, b) = ycbcr_to_rgb(self.y[idx], self.cb[idx], self.cr[idx]);
                let base = idx * 3;
                pixels[base] = r;
                pixels[base + 1] = g;
                pixels[base + 2] = b;
            }
        }
        RgbImage::new(self.width, self.height, pixels)
    }
}
