//! Extension sections ("chunks") that follow the string block.
//!
//! # Wire Format
//!
//! ```text
//!   Bytes 0-3:   Tag (ASCII, e.g. "GEXT")
//!   Bytes 4-5:   Payload length (u16 LE)
//!   Bytes 6-7:   Payload checksum (u16 LE, zero seed)
//!   Bytes 8..N:  Payload
//!   Byte  N:     0x00 terminator
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::checksum::checksum_of;
use crate::cursor::PuzzleReader;
use crate::encoding::latin1_to_string;
use crate::error::SectionError;
use crate::puzzle::Timer;

/// Tag, length and checksum.
pub const SECTION_HEADER_LEN: usize = 8;

static TIMER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+),([01])$").expect("valid timer regex"));

/// Extension sections this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// `GRBS`: per-cell rebus keys.
    RebusGrid,
    /// `RTBL`: rebus key to substitution table.
    RebusSolution,
    /// `LTIM`: elapsed time and paused flag.
    Timer,
    /// `GEXT`: per-cell markup flags.
    Markup,
    /// `RUSR`: per-cell user rebus entries.
    RebusState,
}

impl SectionKind {
    /// Order in which sections are written.
    pub const ENCODE_ORDER: [Self; 5] = [
        Self::RebusGrid,
        Self::RebusSolution,
        Self::Timer,
        Self::Markup,
        Self::RebusState,
    ];

    /// Four-byte tag.
    #[must_use]
    pub const fn tag(self) -> [u8; 4] {
        match self {
            Self::RebusGrid => *b"GRBS",
            Self::RebusSolution => *b"RTBL",
            Self::Timer => *b"LTIM",
            Self::Markup => *b"GEXT",
            Self::RebusState => *b"RUSR",
        }
    }

    /// Look up a tag.
    #[must_use]
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        Self::ENCODE_ORDER.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&latin1_to_string(&self.tag()))
    }
}

/// One raw extension section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSection {
    /// Four-byte tag.
    pub tag: [u8; 4],
    /// Payload bytes.
    pub data: Vec<u8>,
}

impl ExtensionSection {
    /// Create a section for a known kind.
    #[must_use]
    pub fn new(kind: SectionKind, data: Vec<u8>) -> Self {
        Self {
            tag: kind.tag(),
            data,
        }
    }

    /// Tag as text, for logs and errors.
    #[must_use]
    pub fn tag_name(&self) -> String {
        latin1_to_string(&self.tag)
    }

    /// Known kind, if any.
    #[must_use]
    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::from_tag(self.tag)
    }

    /// Read one section and verify its checksum and terminator.
    ///
    /// # Errors
    /// Returns [`SectionError`] if the section is truncated, its checksum does
    /// not match, or the terminator is not 0x00.
    pub fn read(reader: &mut PuzzleReader<'_>) -> Result<Self, SectionError> {
        let offset = reader.position();
        let available = reader.remaining();

        let truncated = |tag: String, needed: usize| SectionError::Truncated {
            tag,
            offset,
            needed,
            available,
        };

        if available < SECTION_HEADER_LEN {
            let partial = reader
                .read_bytes(available.min(4), "section tag")
                .unwrap_or_default();
            return Err(truncated(latin1_to_string(partial), SECTION_HEADER_LEN));
        }
        let header = reader
            .read_bytes(SECTION_HEADER_LEN, "section header")
            .map_err(|_| truncated(String::new(), SECTION_HEADER_LEN))?;
        let tag = [header[0], header[1], header[2], header[3]];
        let len = usize::from(u16::from_le_bytes([header[4], header[5]]));
        let stored = u16::from_le_bytes([header[6], header[7]]);
        let tag_name = latin1_to_string(&tag);

        let body = reader
            .read_bytes(len + 1, "section payload")
            .map_err(|_| truncated(tag_name.clone(), SECTION_HEADER_LEN + len + 1))?;
        let (data, terminator) = body.split_at(len);

        let computed = checksum_of(data);
        if computed != stored {
            return Err(SectionError::ChecksumMismatch {
                tag: tag_name,
                stored,
                computed,
            });
        }
        if terminator[0] != 0 {
            return Err(SectionError::MissingTerminator {
                tag: tag_name,
                found: terminator[0],
            });
        }

        Ok(Self {
            tag,
            data: data.to_vec(),
        })
    }

    /// Append the framed section to `out`.
    ///
    /// # Errors
    /// Returns [`SectionError::InvalidPayload`] if the payload does not fit in
    /// a u16 length.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), SectionError> {
        let len = u16::try_from(self.data.len()).map_err(|_| SectionError::InvalidPayload {
            tag: self.tag_name(),
            reason: format!("payload of {} bytes exceeds {}", self.data.len(), u16::MAX),
        })?;
        out.reserve(SECTION_HEADER_LEN + self.data.len() + 1);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&checksum_of(&self.data).to_le_bytes());
        out.extend_from_slice(&self.data);
        out.push(0);
        Ok(())
    }
}

/// Parse an `LTIM` payload (`"<seconds>,<0|1>"`).
pub fn decode_timer(data: &[u8]) -> Result<Timer, SectionError> {
    let invalid = |reason: &str| SectionError::InvalidPayload {
        tag: SectionKind::Timer.to_string(),
        reason: reason.to_owned(),
    };

    let text = latin1_to_string(data);
    let captures = TIMER_REGEX
        .captures(&text)
        .ok_or_else(|| invalid("timer data doesn't match <seconds>,<0|1>"))?;
    let seconds_elapsed = captures[1]
        .parse()
        .map_err(|_| invalid("elapsed seconds out of range"))?;

    Ok(Timer {
        seconds_elapsed,
        is_paused: &captures[2] == "1",
    })
}

/// Format an `LTIM` payload.
#[must_use]
pub fn encode_timer(timer: &Timer) -> Vec<u8> {
    format!("{},{}", timer.seconds_elapsed, u8::from(timer.is_paused)).into_bytes()
}
