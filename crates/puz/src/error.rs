//! Error types for PUZ decoding, encoding, validation and scrambling.

use thiserror::Error;

/// Structural problems with the binary container itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The `ACROSS&DOWN` signature was not found at a usable position.
    #[error("file does not appear to be a PUZ file: signature not found")]
    MissingSignature,

    /// The buffer ended before a fixed-size field could be read.
    #[error("truncated {field}: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Field being read.
        field: &'static str,
        /// Offset of the read within the (preamble-stripped) buffer.
        offset: usize,
        /// Bytes required.
        needed: usize,
        /// Bytes remaining.
        available: usize,
    },

    /// The header version string is not `major.minor[patch]`.
    #[error("invalid file version {0:?}: expected #.#[#]")]
    InvalidVersion(String),

    /// A string field could not be decoded with the file's text encoding.
    #[error("{field} is not valid {encoding}")]
    InvalidText {
        /// Field being decoded.
        field: &'static str,
        /// Encoding name.
        encoding: &'static str,
    },

    /// The header promised more clues than the file contains.
    #[error("failed to read clue {index} of {count}")]
    MissingClue {
        /// Zero-based index of the missing clue.
        index: usize,
        /// Clue count declared in the header.
        count: usize,
    },
}

/// One of the three header checksums did not match the file contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// Checksum over the header dimension block.
    #[error("header checksum mismatch: stored {stored:#06x}, computed {computed:#06x}")]
    Header {
        /// Value stored in the file.
        stored: u16,
        /// Value computed from the decoded contents.
        computed: u16,
    },

    /// Whole-file checksum.
    #[error("file checksum mismatch: stored {stored:#06x}, computed {computed:#06x}")]
    File {
        /// Value stored in the file.
        stored: u16,
        /// Value computed from the decoded contents.
        computed: u16,
    },

    /// Masked "ICHEATED" checksum.
    #[error("ICHEATED checksum mismatch: stored {stored:02x?}, computed {computed:02x?}")]
    ICheated {
        /// Value stored in the file.
        stored: [u8; 8],
        /// Value computed from the decoded contents.
        computed: [u8; 8],
    },
}

/// A malformed extension section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    /// The section header or payload runs past the end of the buffer.
    #[error("section {tag} truncated at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        /// Section tag (may be partial).
        tag: String,
        /// Offset where the section starts.
        offset: usize,
        /// Bytes required.
        needed: usize,
        /// Bytes remaining.
        available: usize,
    },

    /// Payload checksum does not match.
    #[error("section {tag} checksum mismatch: stored {stored:#06x}, computed {computed:#06x}")]
    ChecksumMismatch {
        /// Section tag.
        tag: String,
        /// Value stored in the section header.
        stored: u16,
        /// Value computed from the payload.
        computed: u16,
    },

    /// The byte after the payload is not 0x00.
    #[error("section {tag} terminator must be 0x00, found {found:#04x}")]
    MissingTerminator {
        /// Section tag.
        tag: String,
        /// Byte found in the terminator position.
        found: u8,
    },

    /// The payload of a known section does not have the expected shape.
    #[error("section {tag} payload is malformed: {reason}")]
    InvalidPayload {
        /// Section tag.
        tag: String,
        /// What was wrong.
        reason: String,
    },

    /// An unrecognised section was found while unknown sections are rejected.
    #[error("unknown section {tag}")]
    UnknownSection {
        /// Section tag.
        tag: String,
    },
}

/// A puzzle invariant does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `file_version` is not `major.minor[patch]` or does not fit the header.
    #[error("FileVersion must match the supported format: #.#[#]. Found {0:?}")]
    InvalidFileVersion(String),

    /// Width or height is zero.
    #[error("Puzzle dimensions must be positive. Found {width}x{height}")]
    EmptyGrid {
        /// Declared width.
        width: u8,
        /// Declared height.
        height: u8,
    },

    /// Solution length disagrees with the dimensions.
    #[error(
        "Puzzle width & height suggest solution should be {expected} characters long. Found {found} characters instead."
    )]
    SolutionLength {
        /// `width * height`.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// Solution contains a character outside the permitted alphabet.
    #[error(
        "Puzzle solution may only contain ., :, alphanumeric characters and the following symbols: @, #, $, %, &, +, ? Found {character:?} at index {index}"
    )]
    InvalidSolutionCharacter {
        /// Offending character.
        character: char,
        /// Cell index.
        index: usize,
    },

    /// State length disagrees with the dimensions.
    #[error(
        "Puzzle width & height suggest state should be {expected} characters long. Found {found} characters instead."
    )]
    StateLength {
        /// `width * height`.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// A black square appears in only one of `solution` and `state`.
    #[error("Black Squares in solution and state must match. Mismatch at index {index}")]
    BlackSquareMismatch {
        /// Cell index.
        index: usize,
    },

    /// State contains a character outside the permitted alphabet.
    #[error(
        "Puzzle state may only contain -, ., :, alphanumeric characters and the following symbols: @, #, $, %, &, +, ? Found {character:?} at index {index}"
    )]
    InvalidStateCharacter {
        /// Offending character.
        character: char,
        /// Cell index.
        index: usize,
    },

    /// Clue count disagrees with the grid.
    #[error("Puzzle solution expects {expected} clues, but found {found} clues")]
    ClueCount {
        /// Count derived from the grid.
        expected: usize,
        /// `clues.len()`.
        found: usize,
    },

    /// More clues than the header can describe.
    #[error("Puzzle has {found} clues but the file format allows at most {max}")]
    TooManyClues {
        /// `clues.len()`.
        found: usize,
        /// `u16::MAX`.
        max: usize,
    },

    /// Markup grid length disagrees with the solution.
    #[error(
        "Markup grid should match puzzle solution in length. Expected length {expected}, but got {found}"
    )]
    MarkupLength {
        /// Solution length.
        expected: usize,
        /// Markup length.
        found: usize,
    },

    /// Rebus grid length disagrees with the solution.
    #[error(
        "Rebus grid should match puzzle solution in length.  Expected length {expected}, but got {found}"
    )]
    RebusGridLength {
        /// Solution length.
        expected: usize,
        /// Rebus grid length.
        found: usize,
    },

    /// A rebus key cannot be written as a two-character table key.
    #[error("Rebus key {key} is out of range: keys must be below {max}")]
    RebusKeyOutOfRange {
        /// Offending key.
        key: u8,
        /// Exclusive upper bound.
        max: u8,
    },

    /// A rebus grid cell names a key that has no substitution.
    #[error("Rebus grid references key that is not found in solution: \"{key}\"")]
    MissingRebusKey {
        /// Offending key.
        key: u8,
    },

    /// A rebus substitution would corrupt the solution table.
    #[error("Rebus substitution for key {key} contains an unsupported character {character:?}")]
    InvalidRebusSubstitution {
        /// Key of the substitution.
        key: u8,
        /// Offending character.
        character: char,
    },

    /// Rebus state length disagrees with the solution.
    #[error(
        "Rebus state should match puzzle solution in length.  Expected length {expected}, but got {found}"
    )]
    RebusStateLength {
        /// Solution length.
        expected: usize,
        /// Rebus state length.
        found: usize,
    },

    /// A scrambled puzzle must carry the checksum of its plain solution.
    #[error("Scrambled puzzle is missing its scrambled checksum")]
    MissingScrambledChecksum,
}

/// Errors produced by [`crate::decode()`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Container structure problem.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Header checksum problem.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// Extension section problem.
    #[error(transparent)]
    Section(#[from] SectionError),
}

/// Errors produced by [`crate::encode()`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The puzzle failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An extension section could not be framed.
    #[error(transparent)]
    Section(#[from] SectionError),

    /// A string field contains characters the file encoding cannot represent.
    #[error("{field} contains {character:?}, which cannot be encoded as {encoding}")]
    UnencodableText {
        /// Field being encoded.
        field: &'static str,
        /// Offending character.
        character: char,
        /// Encoding name.
        encoding: &'static str,
    },
}

/// Errors produced by [`crate::scramble()`] and [`crate::unscramble()`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The key is not exactly four decimal digits.
    #[error("scramble key must be exactly 4 digits, got {0:?}")]
    InvalidKey(String),

    /// `scramble` was called on a scrambled puzzle.
    #[error("Puzzle is already scrambled!")]
    AlreadyScrambled,

    /// `unscramble` was called on an unscrambled puzzle.
    #[error("Puzzle is not scrambled!")]
    NotScrambled,

    /// `unscramble` needs the stored plaintext checksum.
    #[error("scrambled puzzle has no scrambled checksum to verify against")]
    MissingScrambledChecksum,

    /// The solution contains a playable square that is not `A`-`Z`.
    #[error(
        "Scrambling a puzzle that has non-alphabetical characters in the solution is not supported. Found {character:?}"
    )]
    NonAlphabetic {
        /// Offending character.
        character: char,
    },

    /// Fewer than the minimum number of letters.
    #[error(
        "Scrambling is not supported for puzzles with less than {min} characters. Found {found} characters."
    )]
    TooShort {
        /// Minimum letters.
        min: usize,
        /// Letters found.
        found: usize,
    },

    /// The recovered plaintext does not match the stored checksum.
    #[error("wrong key or corrupt puzzle: expected checksum {expected:#06x}, got {computed:#06x}")]
    WrongKey {
        /// Stored scrambled checksum.
        expected: u16,
        /// Checksum of the recovered plaintext.
        computed: u16,
    },

    /// The puzzle failed validation before or after the transform.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<std::convert::Infallible> for CipherError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzError {
    /// See [`DecodeError`].
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// See [`EncodeError`].
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// See [`CipherError`].
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for crate operations.
pub type PuzResult<T> = Result<T, PuzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::ClueCount {
            expected: 4,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "Puzzle solution expects 4 clues, but found 5 clues"
        );

        let err = ValidationError::SolutionLength {
            expected: 4,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Puzzle width & height suggest solution should be 4 characters long. Found 1 characters instead."
        );

        let err = ValidationError::MissingRebusKey { key: 7 };
        assert!(err.to_string().contains("\"7\""));
    }

    #[test]
    fn checksum_error_display() {
        let err = ChecksumError::Header {
            stored: 0x1234,
            computed: 0xabcd,
        };
        assert_eq!(
            err.to_string(),
            "header checksum mismatch: stored 0x1234, computed 0xabcd"
        );

        let err = ChecksumError::ICheated {
            stored: [0; 8],
            computed: [1; 8],
        };
        assert!(err.to_string().starts_with("ICHEATED checksum mismatch"));
    }

    #[test]
    fn section_error_display() {
        let err = SectionError::MissingTerminator {
            tag: "GEXT".into(),
            found: 0x41,
        };
        assert_eq!(
            err.to_string(),
            "section GEXT terminator must be 0x00, found 0x41"
        );
    }

    #[test]
    fn cipher_error_display() {
        let err = CipherError::TooShort { min: 12, found: 4 };
        assert!(err.to_string().contains("less than 12 characters"));

        let err = CipherError::WrongKey {
            expected: 7,
            computed: 9,
        };
        assert!(err.to_string().starts_with("wrong key or corrupt puzzle"));
    }

    #[test]
    fn nested_errors_are_transparent() {
        let inner = FormatError::MissingSignature;
        let err = PuzError::from(DecodeError::from(inner.clone()));
        assert_eq!(err.to_string(), inner.to_string());

        let err = CipherError::from(ValidationError::MissingScrambledChecksum);
        assert_eq!(
            err.to_string(),
            "Scrambled puzzle is missing its scrambled checksum"
        );
    }
}
