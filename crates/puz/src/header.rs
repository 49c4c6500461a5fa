//! Fixed 52-byte PUZ header.
//!
//! # Wire Format
//!
//! ```text
//! PUZ HEADER (little-endian)
//!
//!   Bytes 0x00-0x01: File checksum (u16)
//!   Bytes 0x02-0x0D: Signature "ACROSS&DOWN\0"
//!   Bytes 0x0E-0x0F: Header checksum (u16, over bytes 0x2C-0x33)
//!   Bytes 0x10-0x17: Masked "ICHEATED" checksum
//!   Bytes 0x18-0x1B: Version string, NUL padded ("1.3\0")
//!   Bytes 0x1C-0x1D: Reserved (u16)
//!   Bytes 0x1E-0x1F: Scrambled checksum (u16)
//!   Bytes 0x20-0x2B: Reserved (12 bytes)
//!   Byte  0x2C:      Width
//!   Byte  0x2D:      Height
//!   Bytes 0x2E-0x2F: Clue count (u16)
//!   Bytes 0x30-0x31: Unknown bitmask (u16)
//!   Bytes 0x32-0x33: Scrambled tag (u16, 0x0004 when scrambled)
//!
//!   Fixed header: 52 bytes
//! ```

use crate::checksum::{checksum, checksum_of};
use crate::encoding::latin1_to_string;
use crate::error::FormatError;

/// File signature found at offset 0x02.
pub const FILE_SIGNATURE: [u8; 12] = *b"ACROSS&DOWN\0";

/// Fixed header length in bytes.
pub const HEADER_LEN: usize = 0x34;

/// Mask applied to the ICHEATED checksum.
pub const ICHEATED_MASK: [u8; 8] = *b"ICHEATED";

/// Scrambled-tag value written for scrambled puzzles.
pub const SCRAMBLED_TAG: u16 = 0x0004;

/// Width of the version field.
pub const VERSION_LEN: usize = 4;

/// Offset of the signature relative to the start of the file.
pub const SIGNATURE_OFFSET: usize = 0x02;

/// Start of the block covered by the header checksum.
pub const HEADER_CHECKSUM_BLOCK: usize = 0x2C;

/// Parsed PUZ header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    /// Whole-file checksum.
    pub file_checksum: u16,
    /// Checksum over bytes 0x2C-0x33.
    pub header_checksum: u16,
    /// Masked ICHEATED checksum.
    pub icheated_checksum: [u8; 8],
    /// Version string with NUL padding removed.
    pub version: String,
    /// Reserved u16 at 0x1C.
    pub reserved_1c: u16,
    /// Checksum of the unscrambled solution.
    pub scrambled_checksum: u16,
    /// Reserved bytes at 0x20.
    pub reserved_20: [u8; 12],
    /// Grid width.
    pub width: u8,
    /// Grid height.
    pub height: u8,
    /// Number of clues.
    pub clue_count: u16,
    /// Unknown bitmask at 0x30.
    pub reserved_30: u16,
    /// Non-zero when the solution is scrambled.
    pub scrambled_tag: u16,
}

impl Header {
    /// Encode the header to bytes (52 bytes).
    ///
    /// Versions longer than four bytes are truncated; callers validate first.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];

        buf[0x00..0x02].copy_from_slice(&self.file_checksum.to_le_bytes());
        buf[0x02..0x0E].copy_from_slice(&FILE_SIGNATURE);
        buf[0x0E..0x10].copy_from_slice(&self.header_checksum.to_le_bytes());
        buf[0x10..0x18].copy_from_slice(&self.icheated_checksum);
        for (slot, byte) in buf[0x18..0x1C].iter_mut().zip(self.version.bytes()) {
            *slot = byte;
        }
        buf[0x1C..0x1E].copy_from_slice(&self.reserved_1c.to_le_bytes());
        buf[0x1E..0x20].copy_from_slice(&self.scrambled_checksum.to_le_bytes());
        buf[0x20..0x2C].copy_from_slice(&self.reserved_20);
        buf[0x2C] = self.width;
        buf[0x2D] = self.height;
        buf[0x2E..0x30].copy_from_slice(&self.clue_count.to_le_bytes());
        buf[0x30..0x32].copy_from_slice(&self.reserved_30.to_le_bytes());
        buf[0x32..0x34].copy_from_slice(&self.scrambled_tag.to_le_bytes());

        buf
    }

    /// Decode a header from the start of `bytes`.
    ///
    /// The signature is assumed to be present; see [`locate_signature`].
    ///
    /// # Errors
    /// Returns [`FormatError::Truncated`] if fewer than 52 bytes are available.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_LEN {
            return Err(FormatError::Truncated {
                field: "header",
                offset: 0,
                needed: HEADER_LEN,
                available: bytes.len(),
            });
        }

        let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);

        let mut icheated_checksum = [0u8; 8];
        icheated_checksum.copy_from_slice(&bytes[0x10..0x18]);
        let mut reserved_20 = [0u8; 12];
        reserved_20.copy_from_slice(&bytes[0x20..0x2C]);

        let version_field = &bytes[0x18..0x1C];
        let version_end = version_field
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(VERSION_LEN);

        Ok(Self {
            file_checksum: u16_at(0x00),
            header_checksum: u16_at(0x0E),
            icheated_checksum,
            version: latin1_to_string(&version_field[..version_end]),
            reserved_1c: u16_at(0x1C),
            scrambled_checksum: u16_at(0x1E),
            reserved_20,
            width: bytes[0x2C],
            height: bytes[0x2D],
            clue_count: u16_at(0x2E),
            reserved_30: u16_at(0x30),
            scrambled_tag: u16_at(0x32),
        })
    }

    /// Whether the scrambled tag is set.
    #[must_use]
    pub const fn is_scrambled(&self) -> bool {
        self.scrambled_tag != 0
    }

    /// Number of grid cells.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Checksum over the dimension block (0x2C-0x33).
    #[must_use]
    pub fn compute_header_checksum(&self) -> u16 {
        checksum_of(&self.encode()[HEADER_CHECKSUM_BLOCK..])
    }
}

/// Find the start of the PUZ file within `bytes`.
///
/// Returns the offset of the first header byte; anything before it is
/// preamble.
///
/// # Errors
/// Returns [`FormatError::MissingSignature`] if the signature is absent or
/// starts too early to leave room for the file checksum.
pub fn locate_signature(bytes: &[u8]) -> Result<usize, FormatError> {
    bytes
        .windows(FILE_SIGNATURE.len())
        .position(|window| window == FILE_SIGNATURE)
        .filter(|&index| index >= SIGNATURE_OFFSET)
        .map(|index| index - SIGNATURE_OFFSET)
        .ok_or(FormatError::MissingSignature)
}

/// The three checksums stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderChecksums {
    /// Checksum over the dimension block.
    pub header: u16,
    /// Whole-file checksum, seeded with the header checksum.
    pub file: u16,
    /// Masked per-component checksum.
    pub icheated: [u8; 8],
}

impl HeaderChecksums {
    /// Compute all three checksums from the encoded file components.
    ///
    /// `meta` is the output of [`meta_strings`].
    #[must_use]
    pub fn compute(header: &Header, solution: &[u8], state: &[u8], meta: &[u8]) -> Self {
        let header_sum = header.compute_header_checksum();

        let mut file = checksum(solution, header_sum);
        file = checksum(state, file);
        file = checksum(meta, file);

        let solution_sum = checksum_of(solution);
        let state_sum = checksum_of(state);
        let meta_sum = checksum_of(meta);

        let [h_lo, h_hi] = header_sum.to_le_bytes();
        let [s_lo, s_hi] = solution_sum.to_le_bytes();
        let [t_lo, t_hi] = state_sum.to_le_bytes();
        let [m_lo, m_hi] = meta_sum.to_le_bytes();
        let mut icheated = [h_lo, s_lo, t_lo, m_lo, h_hi, s_hi, t_hi, m_hi];
        for (byte, mask) in icheated.iter_mut().zip(ICHEATED_MASK) {
            *byte ^= mask;
        }

        Self {
            header: header_sum,
            file,
            icheated,
        }
    }
}

/// Concatenate the string fields covered by the file and ICHEATED checksums.
///
/// Non-empty title, author and copyright are NUL terminated; clues are not.
/// The notepad (NUL terminated) is included only when `include_notepad` is set.
pub fn meta_strings<'a>(
    title: &[u8],
    author: &[u8],
    copyright: &[u8],
    clues: impl IntoIterator<Item = &'a [u8]>,
    notepad: &[u8],
    include_notepad: bool,
) -> Vec<u8> {
    let mut out = Vec::new();
    for field in [title, author, copyright] {
        if !field.is_empty() {
            out.extend_from_slice(field);
            out.push(0);
        }
    }
    for clue in clues {
        out.extend_from_slice(clue);
    }
    if include_notepad && !notepad.is_empty() {
        out.extend_from_slice(notepad);
        out.push(0);
    }
    out
}
