//! Property-based tests for the codec and the scramble cipher.
//!
//! ## Test Categories
//! 1. **Checksums**: chaining over arbitrary splits
//! 2. **Cipher**: unscramble inverts scramble for every key
//! 3. **Codec**: encode/decode round trips on generated puzzles
//! 4. **Decoder robustness**: arbitrary bytes never panic

use puz::{
    CodecConfig, Puzzle, ScrambleKey, checksum, checksum_of, decode, decode_with_config, encode,
    rebus_key_from_char, rebus_key_to_char, required_clue_count, scramble, scramble_text,
    unscramble, unscramble_text,
};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Proptest Strategies
// ─────────────────────────────────────────────────────────────────────────────

fn scramble_key() -> impl Strategy<Value = ScrambleKey> {
    (0_u16..=9999).prop_map(|value| ScrambleKey::try_from(value).unwrap())
}

/// Grids of the given dimensions filled from `cell`.
fn grid(
    dims: impl Strategy<Value = (u8, u8)>,
    cell: impl Strategy<Value = String> + Clone,
) -> impl Strategy<Value = (u8, u8, String)> {
    dims.prop_flat_map(move |(width, height)| {
        let size = usize::from(width) * usize::from(height);
        (
            Just(width),
            Just(height),
            prop::collection::vec(cell.clone(), size).prop_map(|cells| cells.concat()),
        )
    })
}

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[ -~]{1,16}")
}

fn puzzle_from(grid: impl Strategy<Value = (u8, u8, String)>) -> impl Strategy<Value = Puzzle> {
    grid.prop_flat_map(|(width, height, solution)| {
        let count = required_clue_count(&solution, width);
        (
            Just((width, height, solution)),
            prop::collection::vec("[ -~\u{a0}-\u{ff}]{0,20}", count),
            optional_text(),
            optional_text(),
            optional_text(),
            optional_text(),
        )
    })
    .prop_map(|((width, height, solution), clues, title, author, copyright, notepad)| {
        let mut puzzle = Puzzle::new(width, height, solution, clues);
        puzzle.title = title;
        puzzle.author = author;
        puzzle.copyright = copyright;
        puzzle.notepad = notepad;
        puzzle
    })
}

/// Puzzles of any shape mixing letters, digits and black squares.
fn puzzle() -> impl Strategy<Value = Puzzle> {
    let cell = prop_oneof![
        4 => "[A-Z]",
        1 => "[0-9]",
        2 => Just(".".to_owned()),
    ];
    puzzle_from(grid((1_u8..=8, 1_u8..=8), cell))
}

/// Letter-only puzzles large enough to scramble.
fn scramblable_puzzle() -> impl Strategy<Value = Puzzle> {
    let cell = prop_oneof![6 => "[A-Z]", 1 => Just(".".to_owned())];
    puzzle_from(grid((4_u8..=10, 4_u8..=10), cell))
}

// ─────────────────────────────────────────────────────────────────────────────
// Checksums
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn checksum_chains_over_any_split(data in prop::collection::vec(any::<u8>(), 0..512), split in any::<prop::sample::Index>()) {
        let split = split.index(data.len() + 1);
        let (head, tail) = data.split_at(split);
        prop_assert_eq!(checksum(tail, checksum_of(head)), checksum_of(&data));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cipher
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn unscramble_text_inverts_scramble_text(text in "[A-Z]{12,300}", key in scramble_key()) {
        let ciphertext = scramble_text(&text, key)?;
        prop_assert_eq!(ciphertext.len(), text.len());
        prop_assert!(ciphertext.bytes().all(|b| b.is_ascii_uppercase()));
        prop_assert_eq!(unscramble_text(&ciphertext, key)?, text);
    }

    #[test]
    fn scrambled_puzzles_unscramble(puzzle in scramblable_puzzle(), key in scramble_key()) {
        let letters = puzzle.solution.bytes().filter(u8::is_ascii_uppercase).count();
        prop_assume!(letters >= 12);

        let scrambled = scramble(&puzzle, key)?;
        prop_assert!(scrambled.is_scrambled);
        let blocks = |p: &Puzzle| p.solution.match_indices('.').map(|(i, _)| i).collect::<Vec<_>>();
        prop_assert_eq!(blocks(&scrambled), blocks(&puzzle));
        prop_assert_eq!(unscramble(&scrambled, key)?, puzzle);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Codec
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn decode_inverts_encode(puzzle in puzzle()) {
        let bytes = encode(&puzzle)?;
        let decoded = decode(&bytes)?;
        let expected = puzzle.clone().with_state(puzzle.effective_state().into_owned());
        prop_assert_eq!(&decoded, &expected);
        prop_assert_eq!(encode(&decoded)?, bytes);
    }

    #[test]
    fn decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_with_config(&bytes, &CodecConfig::lenient());
    }

    #[test]
    fn decoder_never_panics_on_corrupted_files(puzzle in puzzle(), flips in prop::collection::vec((any::<prop::sample::Index>(), 1_u8..=255), 1..4)) {
        let mut bytes = encode(&puzzle)?;
        for (index, mask) in flips {
            let at = index.index(bytes.len());
            bytes[at] ^= mask;
        }
        let _ = decode(&bytes);
        let _ = decode_with_config(&bytes, &CodecConfig::lenient());
    }

    #[test]
    fn rebus_keys_map_back(key in 0_u8..=68) {
        let ch = rebus_key_to_char(key).unwrap();
        prop_assert_eq!(rebus_key_from_char(ch), Some(key));
    }
}
