//! Sequential reader and writer over the body of a PUZ file.

use crate::encoding::Encoding;
use crate::error::{EncodeError, FormatError};

/// Forward-only cursor over a PUZ buffer.
///
/// Reads advance the cursor. A null-terminated read stops at the next 0x00 (or
/// the end of the buffer) and leaves the cursor after the terminator.
#[derive(Debug, Clone)]
pub struct PuzzleReader<'a> {
    buf: &'a [u8],
    pos: usize,
    encoding: Encoding,
}

impl<'a> PuzzleReader<'a> {
    /// Create a reader positioned at `pos`.
    #[must_use]
    pub const fn new(buf: &'a [u8], encoding: Encoding, pos: usize) -> Self {
        Self { buf, pos, encoding }
    }

    /// Current offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Whether any bytes are left.
    #[must_use]
    pub const fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    /// Read exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], FormatError> {
        if self.remaining() < len {
            return Err(FormatError::Truncated {
                field,
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let buf = self.buf;
        let bytes = &buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read `len` bytes and decode them as text.
    ///
    /// A zero-length read yields `None`.
    pub fn read_string(
        &mut self,
        len: usize,
        field: &'static str,
    ) -> Result<Option<String>, FormatError> {
        if len == 0 {
            return Ok(None);
        }
        let bytes = self.read_bytes(len, field)?;
        self.encoding.decode(bytes, field).map(Some)
    }

    /// Read raw bytes up to the next 0x00 (or end of buffer) and skip the
    /// terminator. Yields `None` for an empty span.
    pub fn read_null_terminated_bytes(&mut self) -> Option<&'a [u8]> {
        let buf = self.buf;
        let start = self.pos.min(buf.len());
        let end = buf[start..]
            .iter()
            .position(|&b| b == 0)
            .map_or(buf.len(), |offset| start + offset);
        self.pos = end + 1;
        (end > start).then(|| &buf[start..end])
    }

    /// Read a null-terminated string. Yields `None` for an empty span.
    pub fn read_zstring(&mut self, field: &'static str) -> Result<Option<String>, FormatError> {
        self.read_null_terminated_bytes()
            .map(|bytes| self.encoding.decode(bytes, field))
            .transpose()
    }
}

/// Append-only writer for the body of a PUZ file.
#[derive(Debug, Clone)]
pub struct PuzzleWriter {
    buf: Vec<u8>,
    encoding: Encoding,
}

impl PuzzleWriter {
    /// Create an empty writer.
    #[must_use]
    pub const fn new(encoding: Encoding) -> Self {
        Self {
            buf: Vec::new(),
            encoding,
        }
    }

    /// Create an empty writer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(encoding: Encoding, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            encoding,
        }
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append text without a terminator.
    pub fn write_string(&mut self, text: &str, field: &'static str) -> Result<(), EncodeError> {
        self.encoding.encode_into(text, field, &mut self.buf)
    }

    /// Append text followed by 0x00. An absent value writes only the terminator.
    pub fn write_zstring(
        &mut self,
        text: Option<&str>,
        field: &'static str,
    ) -> Result<(), EncodeError> {
        if let Some(text) = text {
            self.write_string(text, field)?;
        }
        self.buf.push(0);
        Ok(())
    }

    /// Number of bytes written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_length_reads() {
        let mut reader = PuzzleReader::new(b"ABCD----", Encoding::Latin1, 0);
        assert_eq!(reader.read_string(4, "solution").unwrap().as_deref(), Some("ABCD"));
        assert_eq!(reader.read_string(0, "empty").unwrap(), None);
        assert_eq!(reader.read_string(4, "state").unwrap().as_deref(), Some("----"));
        assert!(!reader.has_remaining());
    }

    #[test]
    fn truncated_fixed_read() {
        let mut reader = PuzzleReader::new(b"ABC", Encoding::Latin1, 1);
        assert_eq!(
            reader.read_string(4, "solution"),
            Err(FormatError::Truncated {
                field: "solution",
                offset: 1,
                needed: 4,
                available: 2,
            })
        );
    }

    #[test]
    fn null_terminated_reads() {
        let mut reader = PuzzleReader::new(b"Title\0\0Tail", Encoding::Latin1, 0);
        assert_eq!(reader.read_zstring("title").unwrap().as_deref(), Some("Title"));
        assert_eq!(reader.position(), 6);
        // adjacent terminator is "absent"
        assert_eq!(reader.read_zstring("author").unwrap(), None);
        assert_eq!(reader.position(), 7);
        // no terminator left: read to the end
        assert_eq!(reader.read_zstring("notepad").unwrap().as_deref(), Some("Tail"));
        assert!(!reader.has_remaining());
        assert_eq!(reader.read_zstring("past end").unwrap(), None);
    }

    #[test]
    fn writer_terminates_strings() {
        let mut writer = PuzzleWriter::new(Encoding::Latin1);
        writer.write_string("AB", "solution").unwrap();
        writer.write_zstring(Some("T"), "title").unwrap();
        writer.write_zstring(None, "author").unwrap();
        writer.write_bytes(&[0xff]);
        assert_eq!(writer.len(), 6);
        assert_eq!(writer.into_bytes(), b"ABT\0\0\xff".to_vec());
    }

    #[test]
    fn writer_reports_unencodable_text() {
        let mut writer = PuzzleWriter::new(Encoding::Latin1);
        let err = writer.write_zstring(Some("\u{263a}"), "title").unwrap_err();
        assert!(matches!(err, EncodeError::UnencodableText { field: "title", .. }));
        assert!(writer.is_empty());
    }
}
