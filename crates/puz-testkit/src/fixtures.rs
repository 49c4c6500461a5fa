//! Pre-built puzzles and encoded files.

use puz::Puzzle;

// ─────────────────────────────────────────────────────────────────────────────
// Tiny puzzle
// ─────────────────────────────────────────────────────────────────────────────

/// A 2x2 grid, four clues, title/author/copyright set, version 1.3.
#[must_use]
pub fn tiny_puzzle() -> Puzzle {
    Puzzle::new(2, 2, "ABCD", clues(["1A", "1D", "2D", "3A"]))
        .with_title("Test")
        .with_author("Me")
        .with_copyright("(c)")
}

/// [`tiny_puzzle`] as written by [`puz::encode`].
#[rustfmt::skip]
pub const TINY_PUZZLE_BYTES: [u8; 85] = [
    0x0e, 0xea,                                                 // file checksum
    b'A', b'C', b'R', b'O', b'S', b'S', b'&', b'D', b'O', b'W', b'N', 0x00,
    0x00, 0x2c,                                                 // header checksum
    0x49, 0x3d, 0x1c, 0xa3, 0x6d, 0x74, 0x25, 0x21,             // ICHEATED
    b'1', b'.', b'3', 0x00,                                     // version
    0x00, 0x00,                                                 // reserved 0x1C
    0x00, 0x00,                                                 // scrambled checksum
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x02, 0x02,                                                 // width, height
    0x04, 0x00,                                                 // clue count
    0x00, 0x00,                                                 // bitmask
    0x00, 0x00,                                                 // scrambled tag
    b'A', b'B', b'C', b'D',
    b'-', b'-', b'-', b'-',
    b'T', b'e', b's', b't', 0x00,
    b'M', b'e', 0x00,
    b'(', b'c', b')', 0x00,
    b'1', b'A', 0x00, b'1', b'D', 0x00, b'2', b'D', 0x00, b'3', b'A', 0x00,
    0x00,                                                       // notepad
];

// ─────────────────────────────────────────────────────────────────────────────
// Scramblable puzzles
// ─────────────────────────────────────────────────────────────────────────────

/// An open 4x4 grid with eight clues.
#[must_use]
pub fn open_four_by_four() -> Puzzle {
    Puzzle::new(4, 4, "ABCDEFGHIJKLMNOP", numbered_clues(8))
}

/// A 4x4 grid with black squares in the bottom corners.
#[must_use]
pub fn four_by_four_with_blocks() -> Puzzle {
    Puzzle::new(4, 4, "ABCDEFGHIJKL.NO.", numbered_clues(8))
}

/// An open grid five wide and four tall.
#[must_use]
pub fn five_by_four() -> Puzzle {
    Puzzle::new(5, 4, "ABCDEFGHIJKLMNOPQRST", numbered_clues(9))
}

/// Letters of a 15x15 daily puzzle, black squares removed, in row order.
pub const DAILY_LETTERS: &str = "FLAGFOCISALUTEARLRAINALONESPEAKOFTHEDEVILSPADEYAPSETETEASLEOLEXSITONTHEFENCEASHSOAPGOTONGLIBPHOTOOTTOAESOPCIRCEINSTAYTHECOURSEEPIROWRAMPCODTREEISLIPOBEDIENCESCHOOLLOUIETHEEOCTOEXPOSYOGATHAW";

/// `count` clues named `clue 0`, `clue 1`, ...
#[must_use]
pub fn numbered_clues(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("clue {i}")).collect()
}

fn clues<const N: usize>(texts: [&str; N]) -> Vec<String> {
    texts.iter().map(|&text| text.to_owned()).collect()
}
