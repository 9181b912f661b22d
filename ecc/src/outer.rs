//! Outer error-correcting code: Reed-Solomon over GF(256).
//!
//! Parameters are fixed by design to interoperate with a single wire format:
//! primitive polynomial 0x11d, generator 2, 64 parity symbols, single
//! codeword (no block splitting).

use log::debug;
use reed_solomon::{Decoder, Encoder};

use crate::EccError;

/// Number of Reed-Solomon parity symbols appended to every codeword.
pub const PARITY_SYMBOLS: usize = 64;

/// Largest payload that fits alongside [`PARITY_SYMBOLS`] parity symbols in a
/// single 255-symbol codeword.
pub const MAX_PAYLOAD_LEN: usize = 255 - PARITY_SYMBOLS;

/// Appends [`PARITY_SYMBOLS`] Reed-Solomon parity symbols to `payload`.
pub fn encode(payload: &[u8]) -> Result<Vec<u8>, EccError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(EccError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    let encoder = Encoder::new(PARITY_SYMBOLS);
    let encoded = encoder.encode(payload);

    debug!(
        "rs encode: {} payload byte(s) -> {} byte codeword ({} parity byte(s))",
        payload.len(),
        encoded.len(),
        PARITY_SYMBOLS
    );

    Ok(encoded.to_vec())
}

/// Corrects up to `PARITY_SYMBOLS / 2` symbol errors in `codeword` and
/// returns the original payload with the parity symbols stripped.
pub fn decode(codeword: &[u8]) -> Result<Vec<u8>, EccError> {
    let decoder = Decoder::new(PARITY_SYMBOLS);
    let recovered = decoder
        .correct(codeword, None)
        .map_err(|_| EccError::UncorrectableErrors)?;

    let data = recovered.data().to_vec();
    debug!("rs decode: {} byte codeword -> {} byte payload", codeword.len(), data.len());

    Ok(data)
}
