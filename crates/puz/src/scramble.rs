//! Solution scrambling with a four-digit key.
//!
//! The cipher works on the solution read column by column with black squares
//! removed. Letters are shuffled along a stride-16 diagonal, then four rounds
//! add key digits along shorter diagonals and rotate the buffer. The checksum
//! of the plain text is stored in the header so a key can be verified.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::checksum::checksum_of;
use crate::error::CipherError;
use crate::grid::{is_black_square, transpose};
use crate::puzzle::Puzzle;
use crate::validate::validate;

/// Fewest letters a scrambled solution may have.
pub const MIN_SCRAMBLE_LEN: usize = 12;

const ALPHABET_LEN: u8 = 26;

/// Stride of the initial diagonal shuffle.
const SHUFFLE_STRIDE: usize = 16;

/// Four-digit scramble key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrambleKey([u8; 4]);

impl ScrambleKey {
    /// Build a key from four decimal digits.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidKey`] if any digit is above 9.
    pub fn from_digits(digits: [u8; 4]) -> Result<Self, CipherError> {
        if digits.iter().any(|&d| d > 9) {
            return Err(CipherError::InvalidKey(format!("{digits:?}")));
        }
        Ok(Self(digits))
    }

    /// The four digits.
    #[must_use]
    pub const fn digits(self) -> [u8; 4] {
        self.0
    }

    fn digit(self, index: usize) -> u8 {
        self.0[index % 4]
    }
}

impl FromStr for ScrambleKey {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| CipherError::InvalidKey(s.to_owned()))?;
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(CipherError::InvalidKey(s.to_owned()));
        }
        Ok(Self(bytes.map(|b| b - b'0')))
    }
}

impl TryFrom<&str> for ScrambleKey {
    type Error = CipherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for ScrambleKey {
    type Error = CipherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<u16> for ScrambleKey {
    type Error = CipherError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value > 9999 {
            return Err(CipherError::InvalidKey(value.to_string()));
        }
        format!("{value:04}").parse()
    }
}

impl From<ScrambleKey> for String {
    fn from(value: ScrambleKey) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ScrambleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// Positions visited by a stride walk over `size` cells.
///
/// Starting before the first cell, each step advances by `stride` and wraps by
/// `size | 1`. Yields `(step, position)`.
fn diagonal_walk(size: usize, stride: usize) -> impl Iterator<Item = (usize, usize)> {
    let wrap = size | 1;
    // one past the cursor, so the "before the first cell" start is 0
    let mut next = 0usize;
    (0..size).map(move |step| {
        next += stride;
        while next > size {
            next -= wrap;
        }
        (step, next.saturating_sub(1))
    })
}

/// Block length rotated in round `round`.
fn rotation_len(round: usize, size: usize) -> usize {
    let n = 1usize << (4 - round);
    if n > size { n - (size | 1) } else { n }
}

fn to_values(text: &str) -> Result<Vec<u8>, CipherError> {
    let values = text
        .chars()
        .map(|ch| match u8::try_from(ch) {
            Ok(byte @ b'A'..=b'Z') => Ok(byte - b'A'),
            _ => Err(CipherError::NonAlphabetic { character: ch }),
        })
        .collect::<Result<Vec<u8>, _>>()?;
    if values.len() < MIN_SCRAMBLE_LEN {
        return Err(CipherError::TooShort {
            min: MIN_SCRAMBLE_LEN,
            found: values.len(),
        });
    }
    Ok(values)
}

fn from_values(values: &[u8]) -> String {
    values.iter().map(|&v| char::from(b'A' + v)).collect()
}

/// Scramble an uppercase plain text of at least twelve letters.
///
/// # Errors
/// Returns [`CipherError::NonAlphabetic`] for any character outside `A`-`Z`
/// and [`CipherError::TooShort`] for fewer than twelve letters.
pub fn scramble_text(plaintext: &str, key: ScrambleKey) -> Result<String, CipherError> {
    let input = to_values(plaintext)?;
    let size = input.len();

    let mut buf = input.clone();
    for (i, j) in diagonal_walk(size, SHUFFLE_STRIDE) {
        buf[j] = input[i];
    }

    for (round, &rotations) in key.digits().iter().enumerate() {
        for (i, j) in diagonal_walk(size, 1 << (4 - round)) {
            buf[j] = (buf[j] + key.digit(i)) % ALPHABET_LEN;
        }

        let n = rotation_len(round, size);
        for _ in 0..rotations {
            buf.rotate_left(n);
            if size % 2 == 0 {
                buf[size - n..].rotate_right(1);
            }
        }
    }

    Ok(from_values(&buf))
}

/// Invert [`scramble_text`].
///
/// # Errors
/// Same conditions as [`scramble_text`].
pub fn unscramble_text(ciphertext: &str, key: ScrambleKey) -> Result<String, CipherError> {
    let mut buf = to_values(ciphertext)?;
    let size = buf.len();

    for (round, &rotations) in key.digits().iter().enumerate().rev() {
        let n = rotation_len(round, size);
        for _ in 0..rotations {
            if size % 2 == 0 {
                buf[size - n..].rotate_left(1);
            }
            buf.rotate_right(n);
        }

        for (i, j) in diagonal_walk(size, 1 << (4 - round)) {
            buf[j] = (buf[j] + ALPHABET_LEN - key.digit(i)) % ALPHABET_LEN;
        }
    }

    let shuffled = buf.clone();
    for (i, j) in diagonal_walk(size, SHUFFLE_STRIDE) {
        buf[i] = shuffled[j];
    }

    Ok(from_values(&buf))
}

/// Column-major solution letters with black squares removed.
fn extract_letters(puzzle: &Puzzle) -> String {
    transpose(
        &puzzle.solution,
        usize::from(puzzle.height),
        usize::from(puzzle.width),
    )
    .chars()
    .filter(|&ch| !is_black_square(ch))
    .collect()
}

/// Put `letters` back into the white cells of `puzzle`'s solution.
fn replace_letters(puzzle: &Puzzle, letters: &str) -> String {
    let rows = usize::from(puzzle.height);
    let cols = usize::from(puzzle.width);
    let mut letters = letters.chars();
    let columns: String = transpose(&puzzle.solution, rows, cols)
        .chars()
        .map(|ch| {
            if is_black_square(ch) {
                ch
            } else {
                letters.next().unwrap_or(ch)
            }
        })
        .collect();
    transpose(&columns, cols, rows)
}

/// Scramble a puzzle's solution.
///
/// Returns a new puzzle; the input is unchanged.
///
/// # Errors
/// Returns [`CipherError`] if the key is invalid, the puzzle is already
/// scrambled or invalid, or the solution is not scramblable.
#[instrument(skip_all, fields(width = puzzle.width, height = puzzle.height))]
pub fn scramble<K>(puzzle: &Puzzle, key: K) -> Result<Puzzle, CipherError>
where
    K: TryInto<ScrambleKey>,
    CipherError: From<K::Error>,
{
    let key = key.try_into()?;
    if puzzle.is_scrambled {
        return Err(CipherError::AlreadyScrambled);
    }
    validate(puzzle)?;

    let plaintext = extract_letters(puzzle);
    let scrambled_checksum = checksum_of(plaintext.as_bytes());
    let ciphertext = scramble_text(&plaintext, key)?;

    let mut scrambled = puzzle.clone();
    scrambled.solution = replace_letters(puzzle, &ciphertext);
    scrambled.is_scrambled = true;
    scrambled.misc.scrambled_checksum = Some(scrambled_checksum);
    validate(&scrambled)?;

    debug!(
        letters = plaintext.len(),
        scrambled_checksum, "Scrambled puzzle solution"
    );
    Ok(scrambled)
}

/// Unscramble a puzzle's solution, verifying the key against the stored
/// checksum.
///
/// Returns a new puzzle; the input is unchanged.
///
/// # Errors
/// Returns [`CipherError::WrongKey`] if the recovered solution does not match
/// the stored checksum, and other [`CipherError`]s for invalid input.
#[instrument(skip_all, fields(width = puzzle.width, height = puzzle.height))]
pub fn unscramble<K>(puzzle: &Puzzle, key: K) -> Result<Puzzle, CipherError>
where
    K: TryInto<ScrambleKey>,
    CipherError: From<K::Error>,
{
    let key = key.try_into()?;
    if !puzzle.is_scrambled {
        return Err(CipherError::NotScrambled);
    }
    let expected = puzzle
        .misc
        .scrambled_checksum
        .ok_or(CipherError::MissingScrambledChecksum)?;
    validate(puzzle)?;

    let ciphertext = extract_letters(puzzle);
    let plaintext = unscramble_text(&ciphertext, key)?;
    let computed = checksum_of(plaintext.as_bytes());
    if computed != expected {
        debug!(expected, computed, "Scramble key rejected");
        return Err(CipherError::WrongKey { expected, computed });
    }

    let mut unscrambled = puzzle.clone();
    unscrambled.solution = replace_letters(puzzle, &plaintext);
    unscrambled.is_scrambled = false;
    unscrambled.misc.scrambled_checksum = None;
    validate(&unscrambled)?;

    debug!(letters = plaintext.len(), "Unscrambled puzzle solution");
    Ok(unscrambled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ScrambleKey {
        s.parse().unwrap()
    }

    #[test]
    fn parses_keys() {
        assert_eq!(key("1234").digits(), [1, 2, 3, 4]);
        assert_eq!(key("0000").to_string(), "0000");
        assert_eq!(ScrambleKey::try_from(42u16).unwrap().to_string(), "0042");
        for bad in ["123", "12345", "12a4", "", "１２３"] {
            assert_eq!(
                bad.parse::<ScrambleKey>(),
                Err(CipherError::InvalidKey(bad.into())),
                "key {bad:?}"
            );
        }
        assert!(ScrambleKey::try_from(10_000u16).is_err());
        assert!(ScrambleKey::from_digits([1, 2, 3, 10]).is_err());
    }

    #[test]
    fn walk_visits_every_cell_once() {
        for size in 1..64 {
            for stride in [1, 2, 4, 8, 16] {
                let mut seen = vec![false; size];
                for (_, j) in diagonal_walk(size, stride) {
                    assert!(!seen[j], "size {size} stride {stride} revisits {j}");
                    seen[j] = true;
                }
                assert!(seen.iter().all(|&s| s), "size {size} stride {stride}");
            }
        }
    }

    #[test]
    fn scrambles_twelve_letters() {
        let plain = "AAAAAAAAAAAA";
        let vectors = [
            ("1000", "BBABBACBADBB"),
            ("0100", "CAABAACCBBCB"),
            ("0010", "CABBBCBBCABA"),
            ("0001", "CABCABBBCCAA"),
            ("9999", "KKKKKKKKKKKK"),
        ];
        for (k, expected) in vectors {
            let scrambled = scramble_text(plain, key(k)).unwrap();
            assert_eq!(scrambled, expected, "key {k}");
            assert_eq!(unscramble_text(&scrambled, key(k)).unwrap(), plain, "key {k}");
        }
    }

    #[test]
    fn scrambles_odd_lengths() {
        assert_eq!(scramble_text(&"A".repeat(13), key("1000")).unwrap(), "BBABBACBADBBE");
        assert_eq!(scramble_text(&"A".repeat(15), key("0100")).unwrap(), "ABABBBACCCBCCBA");
    }

    #[test]
    fn rejects_unscramblable_text() {
        assert_eq!(
            scramble_text("ABCdEFGHIJKL", key("1234")),
            Err(CipherError::NonAlphabetic { character: 'd' })
        );
        assert_eq!(
            unscramble_text("", key("1234")),
            Err(CipherError::TooShort { min: 12, found: 0 })
        );
    }

    fn four_by_four() -> Puzzle {
        let clues = (0..8).map(|i| format!("clue {i}")).collect();
        Puzzle::new(4, 4, "ABCDEFGHIJKLMNOP", clues)
    }

    #[test]
    fn scrambles_puzzle() {
        let puzzle = four_by_four();
        let scrambled = scramble(&puzzle, "9999").unwrap();
        assert_eq!(scrambled.solution, "ZLMNKPOQSTUVWXYR");
        assert!(scrambled.is_scrambled);
        assert_eq!(scrambled.misc.scrambled_checksum, Some(7));
        // input untouched
        assert_eq!(puzzle.solution, "ABCDEFGHIJKLMNOP");

        let restored = unscramble(&scrambled, key("9999")).unwrap();
        assert_eq!(restored, puzzle);
    }

    #[test]
    fn keeps_black_squares_in_place() {
        let clues = (0..8).map(|i| format!("clue {i}")).collect();
        let puzzle = Puzzle::new(4, 4, "ABCDEFGHIJKL.NO.", clues);
        let scrambled = scramble(&puzzle, "9999").unwrap();
        assert_eq!(scrambled.solution, "MQTYUPKNRLVO.SX.");
        assert_eq!(scrambled.misc.scrambled_checksum, Some(64907));
        assert_eq!(unscramble(&scrambled, "9999").unwrap(), puzzle);
    }

    #[test]
    fn wrong_key_is_detected() {
        let scrambled = scramble(&four_by_four(), "9999").unwrap();
        assert!(matches!(
            unscramble(&scrambled, "1234"),
            Err(CipherError::WrongKey { expected: 7, .. })
        ));
    }

    #[test]
    fn state_checks() {
        let puzzle = four_by_four();
        assert_eq!(unscramble(&puzzle, "1234"), Err(CipherError::NotScrambled));

        let scrambled = scramble(&puzzle, "1234").unwrap();
        assert_eq!(scramble(&scrambled, "1234"), Err(CipherError::AlreadyScrambled));

        let mut missing = scrambled;
        missing.misc.scrambled_checksum = None;
        assert_eq!(
            unscramble(&missing, "1234"),
            Err(CipherError::MissingScrambledChecksum)
        );

        assert_eq!(
            scramble(&puzzle, "12"),
            Err(CipherError::InvalidKey("12".into()))
        );
    }

    #[test]
    fn rejects_short_or_non_alphabetic_solutions() {
        let clues = (0..6).map(|i| format!("clue {i}")).collect();
        let small = Puzzle::new(3, 3, "ABCDEFGHI", clues);
        assert_eq!(
            scramble(&small, "1234"),
            Err(CipherError::TooShort { min: 12, found: 9 })
        );

        let clues = (0..8).map(|i| format!("clue {i}")).collect();
        let digits = Puzzle::new(4, 4, "ABCDEFGH1JKLMNOP", clues);
        assert_eq!(
            scramble(&digits, "1234"),
            Err(CipherError::NonAlphabetic { character: '1' })
        );
    }
}
