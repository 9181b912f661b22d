//! Orthonormal type-II 2-D DCT over fixed 8x8 blocks.
//!
//! Implemented directly from the textbook double sum rather than via a
//! separable matrix product or an FFT crate: a single block is 64
//! multiply-adds per coefficient, small enough that clarity wins over
//! shaving constant factors.

use std::f64::consts::PI;

/// Block side length. The watermark operates on no other size.
pub const N: usize = 8;

fn scale(k: usize) -> f64 {
    if k == 0 {
        1.0 / std::f64::consts::SQRT_2
    } else {
        1.0
    }
}

fn basis(index: usize, freq: usize) -> f64 {
    (PI * (2.0 * index as f64 + 1.0) * freq as f64 / (2.0 * N as f64)).cos()
}

/// Forward 2-D DCT-II with orthonormal scaling, so that a coefficient's
/// magnitude means the same thing regardless of implementation.
pub fn dct2d_8x8(block: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut out = [[0.0; N]; N];
    for (u, row) in out.iter_mut().enumerate() {
        for (v, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (x, block_row) in block.iter().enumerate() {
                for (y, &sample) in block_row.iter().enumerate() {
                    sum += sample * basis(x, u) * basis(y, v);
                }
            }
            *cell = 0.25 * scale(u) * scale(v) * sum;
        }
    }
    out
}

/// Inverse of [`dct2d_8x8`]. Exact (up to floating-point rounding) because
/// the forward transform's basis matrix is orthonormal.
pub fn idct2d_8x8(coeffs: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut out = [[0.0; N]; N];
    for (x, row) in out.iter_mut().enumerate() {
        for (y, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (u, coeff_row) in coeffs.iter().enumerate() {
                for (v, &coeff) in coeff_row.iter().enumerate() {
                    sum += scale(u) * scale(v) * coeff * basis(x, u) * basis(y, v);
                }
            }
            *cell = 0.25 * sum;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn constant_block_has_only_a_dc_term() {
        let block = [[42.0; N]; N];
        let coeffs = dct2d_8x8(&block);
        // Derived from the orthonormal formula: a constant block of value v
        // produces F(0,0) = N*v and every other coefficient is zero.
        assert_close(coeffs[0][0], N as f64 * 42.0);
        for (u, row) in coeffs.iter().enumerate() {
            for (v, &c) in row.iter().enumerate() {
                if (u, v) != (0, 0) {
                    assert_close(c, 0.0);
                }
            }
        }
    }

    #[test]
    fn round_trips_a_fixed_block() {
        let block = [
            [52.0, 55.0, 61.0, 66.0, 70.0, 61.0, 64.0, 73.0],
            [63.0, 59.0, 55.0, 90.0, 109.0, 85.0, 69.0, 72.0],
            [62.0, 59.0, 68.0, 113.0, 144.0, 104.0, 66.0, 73.0],
            [63.0, 58.0, 71.0, 122.0, 154.0, 106.0, 70.0, 69.0],
            [67.0, 61.0, 68.0, 104.0, 126.0, 88.0, 68.0, 70.0],
            [79.0, 65.0, 60.0, 70.0, 77.0, 68.0, 58.0, 75.0],
            [85.0, 71.0, 64.0, 59.0, 55.0, 61.0, 65.0, 83.0],
            [87.0, 79.0, 69.0, 68.0, 65.0, 76.0, 78.0, 94.0],
        ];

        let coeffs = dct2d_8x8(&block);
        let back = idct2d_8x8(&coeffs);

        for (row, back_row) in block.iter().zip(back.iter()) {
            for (&sample, &reconstructed) in row.iter().zip(back_row.iter()) {
                assert_close(sample, reconstructed);
            }
        }
    }

    #[test]
    fn round_trips_random_blocks() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut block = [[0.0; N]; N];
            for row in block.iter_mut() {
                for cell in row.iter_mut() {
                    *cell = rng.gen_range(0.0..255.0);
                }
            }
            let back = idct2d_8x8(&dct2d_8x8(&block));
            for (row, back_row) in block.iter().zip(back.iter()) {
                for (&sample, &reconstructed) in row.iter().zip(back_row.iter()) {
                    assert_close(sample, reconstructed);
                }
            }
        }
    }

    #[test]
    fn preserves_energy() {
        let mut rng = rand::thread_rng();
        let mut block = [[0.0; N]; N];
        for row in block.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen_range(-100.0..100.0);
            }
        }

        let energy_in: f64 = block.iter().flatten().map(|v| v * v).sum();
        let coeffs = dct2d_8x8(&block);
        let energy_out: f64 = coeffs.iter().flatten().map(|v| v * v).sum();

        assert!((energy_in - energy_out).abs() < 1e-6);
    }
}
