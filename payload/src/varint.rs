use log::debug;

use crate::PayloadError;

/// Maps a signed integer to an unsigned one so that small-magnitude values of
/// either sign end up with a small unsigned representation.
///
/// `zigzag(n) = (n << 1) ^ (n >> 63)`: the right shift is arithmetic, so it
/// produces all-ones for negative `n` and all-zeroes for non-negative `n`.
pub fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag`].
pub fn unzigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

/// Appends the base-128 little-endian varint encoding of `value` to `out`.
///
/// Each byte carries 7 payload bits; the high bit (the continuation bit) is
/// set on every byte except the last.
fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
            out.push(byte);
        } else {
            out.push(byte);
            break;
        }
    }
}

/// Decodes one varint starting at `bytes[0]`, returning the value and the
/// number of bytes it consumed.
fn read_varint(bytes: &[u8]) -> Result<(u64, usize), PayloadError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if shift >= 64 {
            // A u64 needs at most 10 continuation bytes (ceil(64/7)); an 11th
            // means the stream is corrupt, not merely long.
            return Err(PayloadError::TruncatedVarint);
        }
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }
    Err(PayloadError::TruncatedVarint)
}

/// Packs a sequence of signed integers into the concatenation of
/// `varint(zigzag(n))` for each `n`, in order.
pub fn pack(values: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 2);
    for &n in values {
        write_varint(zigzag(n), &mut out);
    }
    debug!("packed {} value(s) into {} varint byte(s)", values.len(), out.len());
    out
}

/// Inverse of [`pack`]. Decodes varints greedily until every byte of `bytes`
/// has been consumed; a continuation bit left dangling at the end of the
/// slice is a [`PayloadError::TruncatedVarint`].
pub fn unpack(bytes: &[u8]) -> Result<Vec<i64>, PayloadError> {
    let mut values = Vec::new();
    let mut cursor = 0;
    while cursor < bytes.len() {
        let (raw, consumed) = read_varint(&bytes[cursor..])?;
        values.push(unzigzag(raw));
        cursor += consumed;
    }
    debug!("unpacked {} varint byte(s) into {} value(s)", bytes.len(), values.len());
    Ok(values)
}

/// Decodes a single varint and requires that it account for every byte in
/// `bytes` — anything left over is [`PayloadError::TrailingGarbage`]. Useful
/// when a varint is expected to fill an already-delimited buffer rather than
/// sharing it with the rest of a packed sequence.
pub fn unpack_one(bytes: &[u8]) -> Result<i64, PayloadError> {
    let (raw, consumed) = read_varint(bytes)?;
    if consumed != bytes.len() {
        return Err(PayloadError::TrailingGarbage {
            remaining: bytes.len() - consumed,
        });
    }
    Ok(unzigzag(raw))
}
