#![allow(dead_code)]

//! Ties the book cipher, payload codec, error-correcting codes and DCT
//! watermark into a single `encode`/`decode` pair.

use std::error;
use std::fmt;

use log::debug;

pub use watermark::RgbImage;

/// Unified error type for the whole pipeline. Each sub-crate gets its own
/// variant rather than being flattened, so a caller can still match on the
/// layer that failed.
#[derive(Debug)]
pub enum StegoError {
    Cipher(cipher::CipherError),
    Payload(payload::PayloadError),
    Ecc(ecc::EccError),
    Watermark(watermark::WatermarkError),
}

impl error::Error for StegoError {}
impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Cipher(e) => write!(f, "book cipher error: {}", e),
            Self::Payload(e) => write!(f, "payload codec error: {}", e),
            Self::Ecc(e) => write!(f, "error-correcting code failure: {}", e),
            Self::Watermark(e) => write!(f, "watermark error: {}", e),
        }
    }
}

impl From<cipher::CipherError> for StegoError {
    fn from(e: cipher::CipherError) -> Self {
        Self::Cipher(e)
    }
}

impl From<payload::PayloadError> for StegoError {
    fn from(e: payload::PayloadError) -> Self {
        Self::Payload(e)
    }
}

impl From<ecc::EccError> for StegoError {
    fn from(e: ecc::EccError) -> Self {
        Self::Ecc(e)
    }
}

impl From<watermark::WatermarkError> for StegoError {
    fn from(e: watermark::WatermarkError) -> Self {
        Self::Watermark(e)
    }
}

/// Hides `plaintext` inside `image`, using `reference_text` as the shared
/// book cipher text. Returns a new image; `image` is never modified in
/// place.
pub fn encode(image: &RgbImage, plaintext: &str, reference_text: &str) -> Result<RgbImage, StegoError> {
    let positions = cipher::PositionCodec::encode(plaintext, reference_text)?;
    let packed = payload::pack(&positions);
    let compressed = payload::compress(&packed);
    let codeword = ecc::outer::encode(&compressed)?;

    let bits = ecc::bytes_to_bits(&codeword);
    let header_bits = bits.len() as u32;
    let repeated = ecc::inner::encode(&bits);

    debug!(
        "encoding {} character message into {} header bit(s) + {} repeated bit(s)",
        plaintext.chars().count(),
        header_bits,
        repeated.len()
    );

    Ok(watermark::embed(image, header_bits, &repeated)?)
}

/// Recovers the message [`encode`] hid in `image`, using the same
/// `reference_text`.
pub fn decode(image: &RgbImage, reference_text: &str) -> Result<String, StegoError> {
    let (header_bits, repeated) = watermark::extract(image, ecc::inner::REPETITION)?;
    debug!("decoded {} header bit(s), read {} repeated bit(s)", header_bits, repeated.len());

    let bits = ecc::inner::decode(&repeated);
    let codeword = ecc::bits_to_bytes(&bits);

    let compressed = ecc::outer::decode(&codeword)?;
    let packed = payload::decompress(&compressed)?;
    let positions = payload::unpack(&packed)?;

    Ok(cipher::PositionCodec::decode(&positions, reference_text)?)
}
