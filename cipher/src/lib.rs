#![allow(dead_code)]

use std::error;
use std::fmt;

use log::debug;

mod index;

use index::CharIndex;

/// Errors raised while translating between plaintext characters and their
/// positions in a shared reference text.
#[derive(Debug, PartialEq, Eq)]
pub enum CipherError {
    /// A plaintext character (at the given 0-based index into the message)
    /// does not occur anywhere in the reference text.
    CharacterNotInReference { character: char, position: usize },
    /// A reconstructed absolute position fell outside the reference text.
    InvalidPosition { position: i64, reference_len: usize },
}

impl error::Error for CipherError {}
impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CharacterNotInReference {
                character,
                position,
            } => {
                write!(
                    f,
                    "character {:?} at message position {} does not occur in the reference text",
                    character, position
                )
            }
            Self::InvalidPosition {
                position,
                reference_len,
            } => {
                write!(
                    f,
                    "position {} is outside the reference text (len {})",
                    position, reference_len
                )
            }
        }
    }
}

/// The book cipher position encoder/decoder of the watermark pipeline.
///
/// Both `encode` and `decode` treat the reference text as a sequence of
/// Unicode scalar values indexed from zero; byte offsets never leak into the
/// position list, so the same reference text produces the same positions
/// regardless of how many bytes a given character takes in UTF-8.
pub struct PositionCodec;

impl PositionCodec {
    /// Maps every character of `message` to a position in `reference`: the
    /// first position is absolute, every following one is a signed delta from
    /// the previous absolute position (the "anchor").
    ///
    /// Nearest-occurrence ties are broken in favor of the larger (more
    /// forward) index, see [`index::CharIndex::nearest`].
    pub fn encode(message: &str, reference: &str) -> Result<Vec<i64>, CipherError> {
        let ref_chars: Vec<char> = reference.chars().collect();
        let index = CharIndex::build(&ref_chars);

        let mut positions = Vec::with_capacity(message.chars().count());
        let mut anchor: i64 = 0;

        for (i, ch) in message.chars().enumerate() {
            let occurrences =
                index
                    .occurrences(ch)
                    .ok_or(CipherError::CharacterNotInReference {
                        character: ch,
                        position: i,
                    })?;

            let chosen = if i == 0 {
                // Scan forward from index 0: the first occurrence.
                occurrences[0]
            } else {
                index.nearest(occurrences, anchor)
            };

            let emitted = if i == 0 {
                chosen as i64
            } else {
                chosen as i64 - anchor
            };

            positions.push(emitted);
            anchor = chosen as i64;
        }

        debug!(
            "encoded {} character message into {} position(s) against a {} character reference",
            message.chars().count(),
            positions.len(),
            ref_chars.len()
        );

        Ok(positions)
    }

    /// Inverse of [`encode`]: walks the position list, accumulating the
    /// anchor and emitting the reference character at each resulting index.
    pub fn decode(positions: &[i64], reference: &str) -> Result<String, CipherError> {
        let ref_chars: Vec<char> = reference.chars().collect();
        let reference_len = ref_chars.len();

        let mut message = String::with_capacity(positions.len());
        let mut anchor: i64 = 0;

        for (i, &delta) in positions.iter().enumerate() {
            anchor = if i == 0 { delta } else { anchor + delta };

            if anchor < 0 || anchor as usize >= reference_len {
                return Err(CipherError::InvalidPosition {
                    position: anchor,
                    reference_len,
                });
            }

            message.push(ref_chars[anchor as usize]);
        }

        debug!(
            "decoded {} position(s) against a {} character reference into {} character message",
            positions.len(),
            reference_len,
            message.chars().count()
        );

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_simple() {
        // Walking the nearest-occurrence rule by hand against "abcabc":
        // 'b' -> 1 (absolute), 'c' -> nearest to 1 is 2 (delta +1), 'a' ->
        // nearest to 2 is 3 (delta +1, beating index 0 which is twice as far).
        let reference = "abcabc";
        let message = "bca";
        let positions = PositionCodec::encode(message, reference).unwrap();
        assert_eq!(positions, vec![1, 1, 1]);
        assert_eq!(
            PositionCodec::decode(&positions, reference).unwrap(),
            message
        );
    }

    #[test]
    fn tie_break_prefers_forward_index() {
        // 'a' occurs at 0 and 2; anchor at 1 is equidistant from both.
        let reference = "a?a";
        let chars: Vec<char> = reference.chars().collect();
        let index = CharIndex::build(&chars);
        let occurrences = index.occurrences('a').unwrap();
        assert_eq!(index.nearest(occurrences, 1), 2);
    }

    #[test]
    fn end_to_end_scenario() {
        let reference = "at The old house where They lived";
        let message = "The";
        let positions = PositionCodec::encode(message, reference).unwrap();
        // 'T' -> 3 (absolute, first occurrence); 'h' -> nearest to 3 is 4
        // (delta +1); 'e' -> nearest to 4 is 5 (delta +1).
        assert_eq!(positions, vec![3, 1, 1]);
        assert_eq!(
            PositionCodec::decode(&positions, reference).unwrap(),
            message
        );
    }

    #[test]
    fn character_not_in_reference_at_start() {
        let err = PositionCodec::encode("z", "abc").unwrap_err();
        assert_eq!(
            err,
            CipherError::CharacterNotInReference {
                character: 'z',
                position: 0
            }
        );
    }

    #[test]
    fn character_not_in_reference_later() {
        let err = PositionCodec::encode("az", "abc").unwrap_err();
        assert_eq!(
            err,
            CipherError::CharacterNotInReference {
                character: 'z',
                position: 1
            }
        );
    }

    #[test]
    fn decode_rejects_out_of_range_position() {
        let err = PositionCodec::decode(&[100], "abc").unwrap_err();
        assert_eq!(
            err,
            CipherError::InvalidPosition {
                position: 100,
                reference_len: 3
            }
        );
    }

    #[test]
    fn decode_rejects_negative_position() {
        let err = PositionCodec::decode(&[-1], "abc").unwrap_err();
        assert_eq!(
            err,
            CipherError::InvalidPosition {
                position: -1,
                reference_len: 3
            }
        );
    }

    #[test]
    fn empty_message_round_trips_to_empty() {
        let positions = PositionCodec::encode("", "abc").unwrap();
        assert!(positions.is_empty());
        assert_eq!(PositionCodec::decode(&positions, "abc").unwrap(), "");
    }

    #[test]
    fn unicode_reference_and_message() {
        let reference = "héllo wörld";
        let message = "wörld";
        let positions = PositionCodec::encode(message, reference).unwrap();
        assert_eq!(
            PositionCodec::decode(&positions, reference).unwrap(),
            message
        );
    }
}
