//! Quantization index modulation of a single mid-frequency DCT coefficient.

use crate::dct::{dct2d_8x8, idct2d_8x8, N};

/// Quantization step. Fixed by design so the same value means the same
/// thing to every encoder/decoder pair; never exposed as a tunable.
pub const STRENGTH: f64 = 150.0;

/// Lattice displacement, as a fraction of [`STRENGTH`].
pub const ALPHA: f64 = 0.3;

/// Zero-indexed (row, column) of the coefficient carrying the bit, in the
/// DCT convention where (0, 0) is the DC term.
pub const COEFF_ROW: usize = 4;
pub const COEFF_COL: usize = 3;

/// Embeds `bit` into `block` by snapping coefficient (4, 3) to the nearest
/// multiple of [`STRENGTH`] and displacing it by ±α·STRENGTH.
pub fn embed_bit(block: &[[f64; N]; N], bit: bool) -> [[f64; N]; N] {
    let mut coeffs = dct2d_8x8(block);
    let c = coeffs[COEFF_ROW][COEFF_COL];
    let quantized = (c / STRENGTH).round() * STRENGTH;
    let displacement = if bit { ALPHA * STRENGTH } else { -ALPHA * STRENGTH };
    coeffs[COEFF_ROW][COEFF_COL] = quantized + displacement;
    idct2d_8x8(&coeffs)
}

/// Reads the bit embedded by [`embed_bit`]. The slicer compares the
/// coefficient to its own quantization point, which is consistent because
/// the embedder always places the coefficient at `quantized ± α·STRENGTH`.
pub fn extract_bit(block: &[[f64; N]; N]) -> bool {
    let coeffs = dct2d_8x8(block);
    let c = coeffs[COEFF_ROW][COEFF_COL];
    let quantized = (c / STRENGTH).round() * STRENGTH;
    c >= quantized
}
