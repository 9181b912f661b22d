use cipher::{CipherError, PositionCodec};
use rand::seq::SliceRandom;
use rand::Rng;

const NOVEL_EXCERPT: &str = "It was the best of times, it was the worst of times, it was \
the age of wisdom, it was the age of foolishness, it was the epoch of belief, it was the \
epoch of incredulity, it was the season of Light, it was the season of Darkness, it was \
the spring of hope, it was the winter of despair.";

#[test]
fn round_trips_every_character_of_a_long_excerpt() {
    let positions = PositionCodec::encode(NOVEL_EXCERPT, NOVEL_EXCERPT).unwrap();
    let decoded = PositionCodec::decode(&positions, NOVEL_EXCERPT).unwrap();
    assert_eq!(decoded, NOVEL_EXCERPT);
}

#[test]
fn round_trips_random_substrings_of_the_reference() {
    let reference_chars: Vec<char> = NOVEL_EXCERPT.chars().collect();
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let len = rng.gen_range(0..32);
        let message: String = (0..len)
            .map(|_| *reference_chars.choose(&mut rng).unwrap())
            .collect();

        let positions = PositionCodec::encode(&message, NOVEL_EXCERPT).unwrap();
        assert_eq!(positions.len(), message.chars().count());

        let decoded = PositionCodec::decode(&positions, NOVEL_EXCERPT).unwrap();
        assert_eq!(decoded, message);
    }
}

#[test]
fn rejects_a_character_missing_from_the_reference() {
    let err = PositionCodec::encode("times ß", NOVEL_EXCERPT).unwrap_err();
    match err {
        CipherError::CharacterNotInReference { character, .. } => assert_eq!(character, 'ß'),
        other => panic!("expected CharacterNotInReference, got {:?}", other),
    }
}
