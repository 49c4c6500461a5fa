//! File version parsing and version-dependent text encoding.
//!
//! Files with major version 2 or later store text as UTF-8. Older files use
//! ISO-8859-1, where every byte maps to the code point of the same value.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EncodeError, FormatError};

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)[0-9A-Za-z]?$").expect("valid version regex"));

/// Version stamped on puzzles built in memory.
pub const DEFAULT_FILE_VERSION: &str = "1.3";

/// Parsed `major.minor[patch]` file version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileVersion {
    /// Major version.
    pub major: u16,
    /// Minor version.
    pub minor: u16,
}

impl FileVersion {
    /// Parse a version string such as `1.3` or `1.2c`.
    ///
    /// Returns `None` if the string does not match `#.#[#]`.
    #[must_use]
    pub fn parse(version: &str) -> Option<Self> {
        let captures = VERSION_REGEX.captures(version)?;
        let major = captures.get(1)?.as_str().parse().ok()?;
        let minor = captures.get(2)?.as_str().parse().ok()?;
        Some(Self { major, minor })
    }

    /// Whether the notepad participates in the file checksums.
    #[must_use]
    pub fn checksums_notepad(self) -> bool {
        self >= Self { major: 1, minor: 3 }
    }
}

/// Text encoding of a PUZ file's string sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// ISO-8859-1, one byte per character.
    Latin1,
    /// UTF-8.
    Utf8,
}

impl Encoding {
    /// Encoding name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Utf8 => "UTF-8",
        }
    }

    /// Decode `bytes` as text.
    pub fn decode(self, bytes: &[u8], field: &'static str) -> Result<String, FormatError> {
        match self {
            Self::Latin1 => Ok(latin1_to_string(bytes)),
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::InvalidText {
                field,
                encoding: self.name(),
            }),
        }
    }

    /// Encode `text` into bytes, appending to `out`.
    pub fn encode_into(
        self,
        text: &str,
        field: &'static str,
        out: &mut Vec<u8>,
    ) -> Result<(), EncodeError> {
        match self {
            Self::Latin1 => string_to_latin1_into(text, out).map_err(|character| {
                EncodeError::UnencodableText {
                    field,
                    character,
                    encoding: self.name(),
                }
            }),
            Self::Utf8 => {
                out.extend_from_slice(text.as_bytes());
                Ok(())
            }
        }
    }

    /// Encode `text` into a new byte vector.
    pub fn encode(self, text: &str, field: &'static str) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(text.len());
        self.encode_into(text, field, &mut out)?;
        Ok(out)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Select the text encoding for a file version string.
pub fn encoding_for(file_version: &str) -> Result<Encoding, FormatError> {
    let version = FileVersion::parse(file_version)
        .ok_or_else(|| FormatError::InvalidVersion(file_version.to_owned()))?;
    Ok(if version.major >= 2 {
        Encoding::Utf8
    } else {
        Encoding::Latin1
    })
}

/// Map each byte to the code point of the same value.
pub(crate) fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`latin1_to_string`]; returns the first unrepresentable char.
pub(crate) fn string_to_latin1_into(text: &str, out: &mut Vec<u8>) -> Result<(), char> {
    for ch in text.chars() {
        let byte = u8::try_from(u32::from(ch)).map_err(|_| ch)?;
        out.push(byte);
    }
    Ok(())
}
