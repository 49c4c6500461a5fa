//! Codec for the binary `.puz` crossword format and its solution scrambler.
//!
//! A PUZ file is a fixed 52-byte header, the solution and player grids, a run
//! of null-terminated strings (title, author, copyright, clues, notepad) and a
//! sequence of optional extension sections (rebus, markup, timer). Three
//! 16-bit checksums in the header cover the grids and the strings.
//!
//! # Modules
//!
//! - [`checksum`] - the rolling checksum every PUZ checksum is built from
//! - [`header`] - fixed header layout and checksum computation
//! - [`section`] - extension section framing and the timer payload
//! - [`rebus`] - rebus grid, table and user-state payloads
//! - [`markup`] - per-cell markup flags
//! - [`grid`] - black squares, clue starts and numbering
//! - [`cursor`] - sequential reader/writer over the string block
//! - [`encoding`] - version parsing and text encoding
//!
//! # Example: Round Trip
//!
//! ```rust
//! use puz::{Puzzle, decode, encode};
//!
//! let clues = vec!["1A".into(), "1D".into(), "2D".into(), "3A".into()];
//! let puzzle = Puzzle::new(2, 2, "ABCD", clues).with_title("Tiny");
//!
//! let bytes = encode(&puzzle).unwrap();
//! let decoded = decode(&bytes).unwrap();
//!
//! assert_eq!(decoded.title.as_deref(), Some("Tiny"));
//! assert_eq!(encode(&decoded).unwrap(), bytes);
//! ```
//!
//! # Example: Scrambling
//!
//! ```rust
//! use puz::{Puzzle, scramble, unscramble};
//!
//! let clues = (0..8).map(|i| format!("clue {i}")).collect();
//! let puzzle = Puzzle::new(4, 4, "ABCDEFGHIJKLMNOP", clues);
//!
//! let scrambled = scramble(&puzzle, "9999").unwrap();
//! assert_eq!(scrambled.solution, "ZLMNKPOQSTUVWXYR");
//! assert_eq!(unscramble(&scrambled, "9999").unwrap(), puzzle);
//! ```

#![forbid(unsafe_code)]

pub mod checksum;
mod config;
pub mod cursor;
mod decode;
mod encode;
pub mod encoding;
mod error;
pub mod grid;
pub mod header;
pub mod markup;
mod puzzle;
pub mod rebus;
mod scramble;
pub mod section;
mod validate;

pub use checksum::{checksum, checksum_of};
pub use config::CodecConfig;
pub use decode::{decode, decode_with_config};
pub use encode::encode;
pub use encoding::{DEFAULT_FILE_VERSION, Encoding, FileVersion, encoding_for};
pub use error::{
    ChecksumError, CipherError, DecodeError, EncodeError, FormatError, PuzError, PuzResult,
    SectionError, ValidationError,
};
pub use grid::{blank_state, grid_numbering, required_clue_count};
pub use markup::SquareMarkup;
pub use puzzle::{Misc, Puzzle, Timer};
pub use rebus::{Rebus, rebus_key_from_char, rebus_key_to_char};
pub use scramble::{
    MIN_SCRAMBLE_LEN, ScrambleKey, scramble, scramble_text, unscramble, unscramble_text,
};
pub use validate::validate;
