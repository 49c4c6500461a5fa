//! [`Puzzle`] to bytes.

use tracing::{debug, instrument};

use crate::cursor::PuzzleWriter;
use crate::encoding::{FileVersion, encoding_for};
use crate::error::{EncodeError, ValidationError};
use crate::header::{HEADER_LEN, Header, HeaderChecksums, SCRAMBLED_TAG};
use crate::markup::encode_markup;
use crate::puzzle::Puzzle;
use crate::rebus::{encode_grid, encode_state, encode_table};
use crate::section::{ExtensionSection, SectionKind, encode_timer};
use crate::validate::validate;

/// Encode a puzzle as a PUZ file.
///
/// The puzzle is validated first. Checksums are computed from its contents;
/// a preamble, if any, is written before the header.
///
/// # Errors
/// Returns [`EncodeError`] if the puzzle is invalid or holds text the file
/// encoding cannot represent.
#[instrument(skip_all, fields(width = puzzle.width, height = puzzle.height))]
pub fn encode(puzzle: &Puzzle) -> Result<Vec<u8>, EncodeError> {
    validate(puzzle)?;

    let invalid_version = || ValidationError::InvalidFileVersion(puzzle.file_version.clone());
    let encoding = encoding_for(&puzzle.file_version).map_err(|_| invalid_version())?;
    let version = FileVersion::parse(&puzzle.file_version).ok_or_else(invalid_version)?;
    let clue_count = u16::try_from(puzzle.clues.len()).map_err(|_| ValidationError::TooManyClues {
        found: puzzle.clues.len(),
        max: usize::from(u16::MAX),
    })?;

    let mut body = PuzzleWriter::with_capacity(encoding, 2 * puzzle.grid_size() + 256);
    body.write_string(&puzzle.solution, "solution")?;
    let solution_end = body.len();
    body.write_string(&puzzle.effective_state(), "state")?;
    let state_end = body.len();

    // Meta strings: non-empty fields with terminators, clues without.
    let mut meta = Vec::new();
    for (field, value) in [
        ("title", &puzzle.title),
        ("author", &puzzle.author),
        ("copyright", &puzzle.copyright),
    ] {
        let start = body.len();
        body.write_zstring(value.as_deref(), field)?;
        let written = &body.as_bytes()[start..];
        if written.len() > 1 {
            meta.extend_from_slice(written);
        }
    }
    for clue in &puzzle.clues {
        let start = body.len();
        body.write_zstring(Some(clue), "clue")?;
        meta.extend_from_slice(&body.as_bytes()[start..body.len() - 1]);
    }
    let start = body.len();
    body.write_zstring(puzzle.notepad.as_deref(), "notepad")?;
    let written = &body.as_bytes()[start..];
    if version.checksums_notepad() && written.len() > 1 {
        meta.extend_from_slice(written);
    }

    let mut header = Header {
        version: puzzle.file_version.clone(),
        reserved_1c: puzzle.misc.reserved_1c,
        scrambled_checksum: puzzle.misc.scrambled_checksum.unwrap_or(0),
        reserved_20: puzzle.misc.reserved_20,
        width: puzzle.width,
        height: puzzle.height,
        clue_count,
        reserved_30: puzzle.misc.reserved_30,
        scrambled_tag: if puzzle.is_scrambled { SCRAMBLED_TAG } else { 0 },
        ..Header::default()
    };
    let strings = body.as_bytes();
    let sums = HeaderChecksums::compute(
        &header,
        &strings[..solution_end],
        &strings[solution_end..state_end],
        &meta,
    );
    header.header_checksum = sums.header;
    header.file_checksum = sums.file;
    header.icheated_checksum = sums.icheated;

    let preamble = puzzle.misc.preamble.as_deref().unwrap_or_default();
    let mut out = Vec::with_capacity(preamble.len() + HEADER_LEN + strings.len());
    out.extend_from_slice(preamble);
    out.extend_from_slice(&header.encode());
    out.extend_from_slice(strings);

    let rebus = puzzle.rebus.as_ref();
    for kind in SectionKind::ENCODE_ORDER {
        let payload = match kind {
            SectionKind::RebusGrid => rebus.and_then(|r| r.grid.as_deref()).map(encode_grid),
            SectionKind::RebusSolution => rebus
                .and_then(|r| r.solution.as_ref())
                .map(encode_table)
                .transpose()?,
            SectionKind::Timer => puzzle.timer.as_ref().map(encode_timer),
            SectionKind::Markup => puzzle.markup.as_deref().map(encode_markup),
            SectionKind::RebusState => rebus
                .and_then(|r| r.state.as_deref())
                .map(encode_state)
                .transpose()?,
        };
        if let Some(data) = payload {
            debug!(tag = %kind, len = data.len(), "Encoding extension section");
            ExtensionSection::new(kind, data).write_to(&mut out)?;
        }
    }

    debug!(
        len = out.len(),
        file_checksum = sums.file,
        header_checksum = sums.header,
        "Encoded puzzle"
    );
    Ok(out)
}
