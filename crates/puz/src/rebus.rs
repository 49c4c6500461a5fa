//! Rebus squares: cells whose answer is more than one character.
//!
//! Three optional sections describe a rebus puzzle. `GRBS` maps each cell to a
//! key, `RTBL` maps keys to substitution strings and `RUSR` holds the player's
//! own multi-character entries.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::encoding::{Encoding, latin1_to_string};
use crate::error::{EncodeError, SectionError};
use crate::section::SectionKind;

static REBUS_TABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ 0-9]\d:[^:;]*?;)*$").expect("valid rebus table regex"));

/// Exclusive upper bound on rebus keys (keys are written as two digits).
pub const MAX_REBUS_KEY: u8 = 100;

/// Symbols that follow the digits in the key alphabet.
const KEY_SYMBOLS: &[u8; 7] = b"@#$%&+?";

/// Rebus data attached to a puzzle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebus {
    /// Per-cell key into [`Rebus::solution`], `None` for ordinary cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Option<u8>>>,
    /// Substitution string for each key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<BTreeMap<u8, String>>,
    /// Per-cell user rebus entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<Option<String>>>,
}

impl Rebus {
    /// Whether no part is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid.is_none() && self.solution.is_none() && self.state.is_none()
    }

    /// Substitution for the cell at `index`, if it is a rebus cell.
    #[must_use]
    pub fn substitution_at(&self, index: usize) -> Option<&str> {
        let key = (*self.grid.as_ref()?.get(index)?)?;
        self.solution.as_ref()?.get(&key).map(String::as_str)
    }
}

/// Decode a `GRBS` payload. Byte `0` is an ordinary cell; byte `v` is key `v - 1`.
#[must_use]
pub fn decode_grid(data: &[u8]) -> Vec<Option<u8>> {
    data.iter().map(|&byte| byte.checked_sub(1)).collect()
}

/// Encode a `GRBS` payload.
#[must_use]
pub fn encode_grid(grid: &[Option<u8>]) -> Vec<u8> {
    grid.iter()
        .map(|cell| cell.map_or(0, |key| key.saturating_add(1)))
        .collect()
}

/// Decode an `RTBL` payload such as `" 0:HEART; 1:SPADE;"`.
pub fn decode_table(data: &[u8]) -> Result<BTreeMap<u8, String>, SectionError> {
    let invalid = |reason: String| SectionError::InvalidPayload {
        tag: SectionKind::RebusSolution.to_string(),
        reason,
    };

    let text = latin1_to_string(data);
    if !REBUS_TABLE_REGEX.is_match(&text) {
        return Err(invalid(format!("unexpected rebus table format {text:?}")));
    }

    text.split_terminator(';')
        .map(|entry| {
            let (key, value) = entry
                .split_once(':')
                .ok_or_else(|| invalid(format!("rebus entry {entry:?} has no key")))?;
            let key = key
                .trim()
                .parse::<u8>()
                .map_err(|_| invalid(format!("rebus key {key:?} is not a number")))?;
            Ok((key, value.to_owned()))
        })
        .collect()
}

/// Encode an `RTBL` payload. Keys are right-aligned in two columns.
pub fn encode_table(table: &BTreeMap<u8, String>) -> Result<Vec<u8>, EncodeError> {
    let text: String = table
        .iter()
        .map(|(key, value)| format!("{key:>2}:{value};"))
        .collect();
    Encoding::Latin1.encode(&text, "rebus solution")
}

/// Decode a `RUSR` payload: NUL-separated entries with one trailing NUL.
#[must_use]
pub fn decode_state(data: &[u8]) -> Vec<Option<String>> {
    let body = data.strip_suffix(&[0]).unwrap_or(data);
    body.split(|&byte| byte == 0)
        .map(|entry| (!entry.is_empty()).then(|| latin1_to_string(entry)))
        .collect()
}

/// Encode a `RUSR` payload.
pub fn encode_state(state: &[Option<String>]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    for entry in state {
        if let Some(entry) = entry {
            Encoding::Latin1.encode_into(entry, "rebus state", &mut out)?;
        }
        out.push(0);
    }
    Ok(out)
}

/// Map a key character to its rebus key.
///
/// `1`-`9` are 0-8, `0` is 9, `@#$%&+?` are 10-16, `A`-`Z` are 17-42 and
/// `a`-`z` are 43-68.
#[must_use]
pub fn rebus_key_from_char(ch: char) -> Option<u8> {
    let byte = u8::try_from(ch).ok()?;
    match byte {
        b'1'..=b'9' => Some(byte - b'1'),
        b'0' => Some(9),
        b'A'..=b'Z' => Some(byte - b'A' + 17),
        b'a'..=b'z' => Some(byte - b'a' + 43),
        _ => KEY_SYMBOLS
            .iter()
            .position(|&symbol| symbol == byte)
            .and_then(|offset| u8::try_from(offset + 10).ok()),
    }
}

/// Inverse of [`rebus_key_from_char`].
#[must_use]
pub fn rebus_key_to_char(key: u8) -> Option<char> {
    let byte = match key {
        0..=8 => b'1' + key,
        9 => b'0',
        10..=16 => KEY_SYMBOLS[usize::from(key - 10)],
        17..=42 => b'A' + (key - 17),
        43..=68 => b'a' + (key - 43),
        _ => return None,
    };
    Some(char::from(byte))
}
