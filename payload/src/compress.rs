use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;

use crate::PayloadError;

/// Compresses `data` with zlib-format deflate at the maximum compression
/// level. Treated as a trusted, always-succeeding primitive at encode time.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    // Writing to an in-memory Vec<u8> via flate2 cannot fail.
    encoder.write_all(data).expect("in-memory zlib write");
    let compressed = encoder.finish().expect("in-memory zlib finish");
    debug!(
        "compressed {} byte payload to {} bytes",
        data.len(),
        compressed.len()
    );
    compressed
}

/// Inverse of [`compress`]. Any malformed zlib stream is surfaced as
/// [`PayloadError::CompressionFailed`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, PayloadError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| PayloadError::CompressionFailed(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn round_trip_empty() {
        assert_eq!(decompress(&compress(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn round_trip_text() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(4);
        let compressed = compress(&data);
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn round_trip_random_bytes() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let len = rng.gen_range(0..4096);
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let compressed = compress(&data);
            assert_eq!(decompress(&compressed).unwrap(), data);
        }
    }

    #[test]
    fn decompress_garbage_fails() {
        let err = decompress(&[0xff, 0x00, 0x11, 0x22]).unwrap_err();
        assert!(matches!(err, PayloadError::CompressionFailed(_)));
    }
}
