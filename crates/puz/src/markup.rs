//! Per-cell markup flags stored in the `GEXT` section.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Markup flags for a single grid cell.
    ///
    /// Bits without a name are kept as-is so unknown markup survives a round trip.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SquareMarkup: u8 {
        /// The cell was incorrect at some point.
        const PREVIOUSLY_INCORRECT = 0x10;
        /// The cell is currently incorrect.
        const INCORRECT            = 0x20;
        /// The cell's answer was revealed.
        const REVEALED             = 0x40;
        /// The cell is circled.
        const CIRCLED              = 0x80;
    }
}

impl SquareMarkup {
    /// Decode one `GEXT` byte, retaining unknown bits.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte)
    }

    /// Encode to one `GEXT` byte.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.bits()
    }
}

/// Decode a `GEXT` payload.
#[must_use]
pub fn decode_markup(data: &[u8]) -> Vec<SquareMarkup> {
    data.iter().copied().map(SquareMarkup::from_byte).collect()
}

/// Encode a `GEXT` payload.
#[must_use]
pub fn encode_markup(markup: &[SquareMarkup]) -> Vec<u8> {
    markup.iter().map(|cell| cell.to_byte()).collect()
}
