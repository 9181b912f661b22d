//! Inner error-correcting code: fixed-rate bit repetition with majority vote.

use log::warn;

/// Number of times each bit is repeated. Fixed at an odd number so a
/// majority vote never ties.
pub const REPETITION: usize = 7;

/// Emits every bit of `bits` [`REPETITION`] times, in order.
pub fn encode(bits: &[bool]) -> Vec<bool> {
    let mut out = Vec::with_capacity(bits.len() * REPETITION);
    for &bit in bits {
        out.extend(std::iter::repeat(bit).take(REPETITION));
    }
    out
}

/// Partitions `bits` into groups of [`REPETITION`] and majority-votes each
/// group back to a single bit. A trailing partial group (fewer than
/// [`REPETITION`] bits) is dropped rather than mis-voted.
pub fn decode(bits: &[bool]) -> Vec<bool> {
    debug_assert!(REPETITION % 2 == 1, "repetition count must be odd to avoid ties");

    let remainder = bits.len() % REPETITION;
    if remainder != 0 {
        warn!("dropping trailing partial repetition group of {} bit(s)", remainder);
    }

    bits.chunks(REPETITION)
        .filter(|group| group.len() == REPETITION)
        .map(|group| {
            let ones = group.iter().filter(|&&bit| bit).count();
            ones * 2 > REPETITION
        })
        .collect()
}
