//! Bytes to [`Puzzle`].

use tracing::{debug, instrument, warn};

use crate::config::CodecConfig;
use crate::cursor::PuzzleReader;
use crate::encoding::{Encoding, FileVersion, encoding_for};
use crate::error::{ChecksumError, DecodeError, FormatError, SectionError};
use crate::header::{HEADER_LEN, Header, HeaderChecksums, locate_signature, meta_strings};
use crate::markup::decode_markup;
use crate::puzzle::{Misc, Puzzle};
use crate::rebus::{Rebus, decode_grid, decode_state, decode_table};
use crate::section::{ExtensionSection, SectionKind, decode_timer};

/// Decode a PUZ file with the default configuration.
///
/// # Errors
/// Returns [`DecodeError`] if the file is malformed or a checksum does not
/// match.
pub fn decode(bytes: &[u8]) -> Result<Puzzle, DecodeError> {
    decode_with_config(bytes, &CodecConfig::default())
}

fn text(
    encoding: Encoding,
    bytes: &[u8],
    field: &'static str,
) -> Result<Option<String>, FormatError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    encoding.decode(bytes, field).map(Some)
}

/// Decode a PUZ file.
///
/// Bytes before the file signature are kept in [`Misc::preamble`].
///
/// # Errors
/// Returns [`DecodeError`] if the file is malformed, a section is corrupt, or
/// a checksum enabled in `config` does not match.
#[instrument(skip_all, fields(len = bytes.len()))]
pub fn decode_with_config(bytes: &[u8], config: &CodecConfig) -> Result<Puzzle, DecodeError> {
    let start = locate_signature(bytes)?;
    let (preamble, buf) = bytes.split_at(start);

    let header = Header::decode(buf)?;
    let encoding = encoding_for(&header.version)?;
    debug!(
        version = %header.version,
        width = header.width,
        height = header.height,
        clues = header.clue_count,
        %encoding,
        preamble = start,
        "Decoded puzzle header"
    );

    let mut reader = PuzzleReader::new(buf, encoding, HEADER_LEN);
    let size = header.grid_size();
    let solution = reader.read_bytes(size, "solution")?;
    let state = reader.read_bytes(size, "state")?;

    let title = reader.read_null_terminated_bytes().unwrap_or_default();
    let author = reader.read_null_terminated_bytes().unwrap_or_default();
    let copyright = reader.read_null_terminated_bytes().unwrap_or_default();

    let count = usize::from(header.clue_count);
    let mut clues = Vec::with_capacity(count);
    for index in 0..count {
        if !reader.has_remaining() {
            return Err(FormatError::MissingClue { index, count }.into());
        }
        clues.push(reader.read_null_terminated_bytes().unwrap_or_default());
    }

    let notepad = reader.read_null_terminated_bytes().unwrap_or_default();

    let mut rebus = Rebus::default();
    let mut markup = None;
    let mut timer = None;
    while reader.has_remaining() {
        let section = ExtensionSection::read(&mut reader)?;
        let Some(kind) = section.kind() else {
            if !config.ignore_unknown_sections {
                return Err(SectionError::UnknownSection {
                    tag: section.tag_name(),
                }
                .into());
            }
            warn!(
                tag = %section.tag_name(),
                len = section.data.len(),
                "Ignoring unknown extension section"
            );
            continue;
        };

        match kind {
            SectionKind::RebusGrid => rebus.grid = Some(decode_grid(&section.data)),
            SectionKind::RebusSolution => rebus.solution = Some(decode_table(&section.data)?),
            SectionKind::RebusState => rebus.state = Some(decode_state(&section.data)),
            SectionKind::Markup => markup = Some(decode_markup(&section.data)),
            SectionKind::Timer => timer = Some(decode_timer(&section.data)?),
        }
        debug!(tag = %kind, len = section.data.len(), "Decoded extension section");
    }

    let include_notepad = FileVersion::parse(&header.version)
        .is_some_and(FileVersion::checksums_notepad);
    let meta = meta_strings(
        title,
        author,
        copyright,
        clues.iter().copied(),
        notepad,
        include_notepad,
    );
    let computed = HeaderChecksums::compute(&header, solution, state, &meta);
    verify_checksums(&header, &computed, config)?;

    let puzzle = Puzzle {
        title: text(encoding, title, "title")?,
        author: text(encoding, author, "author")?,
        copyright: text(encoding, copyright, "copyright")?,
        notepad: text(encoding, notepad, "notepad")?,
        file_version: header.version.clone(),
        width: header.width,
        height: header.height,
        is_scrambled: header.is_scrambled(),
        solution: encoding.decode(solution, "solution")?,
        state: Some(encoding.decode(state, "state")?),
        clues: clues
            .iter()
            .map(|clue| encoding.decode(clue, "clue"))
            .collect::<Result<_, _>>()?,
        rebus: (!rebus.is_empty()).then_some(rebus),
        markup,
        timer,
        misc: Misc {
            reserved_1c: header.reserved_1c,
            reserved_20: header.reserved_20,
            reserved_30: header.reserved_30,
            preamble: (!preamble.is_empty()).then(|| preamble.to_vec()),
            scrambled_checksum: (header.is_scrambled() || header.scrambled_checksum != 0)
                .then_some(header.scrambled_checksum),
        },
    };

    Ok(puzzle)
}

fn verify_checksums(
    header: &Header,
    computed: &HeaderChecksums,
    config: &CodecConfig,
) -> Result<(), ChecksumError> {
    if config.verify_header_checksum && header.header_checksum != computed.header {
        return Err(ChecksumError::Header {
            stored: header.header_checksum,
            computed: computed.header,
        });
    }
    if config.verify_file_checksum && header.file_checksum != computed.file {
        return Err(ChecksumError::File {
            stored: header.file_checksum,
            computed: computed.file,
        });
    }
    if config.verify_icheated_checksum && header.icheated_checksum != computed.icheated {
        return Err(ChecksumError::ICheated {
            stored: header.icheated_checksum,
            computed: computed.icheated,
        });
    }
    Ok(())
}
