//! In-memory puzzle model.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::encoding::DEFAULT_FILE_VERSION;
use crate::grid::blank_state;
use crate::markup::SquareMarkup;
use crate::rebus::Rebus;

/// Solve timer stored in the `LTIM` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Timer {
    /// Seconds elapsed.
    pub seconds_elapsed: u64,
    /// Whether the timer is stopped.
    pub is_paused: bool,
}

/// Header fields with no known meaning, preserved for byte-exact round trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misc {
    /// Reserved u16 at 0x1C.
    pub reserved_1c: u16,
    /// Reserved bytes at 0x20.
    pub reserved_20: [u8; 12],
    /// Unknown bitmask at 0x30.
    pub reserved_30: u16,
    /// Bytes found before the file signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<Vec<u8>>,
    /// Checksum of the unscrambled solution, present while scrambled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrambled_checksum: Option<u16>,
}

/// A crossword puzzle.
///
/// `solution` and `state` are row-major strings of `width * height` cells.
/// Black squares are `.` or `:`; unfilled state cells are `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Copyright notice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notepad: Option<String>,
    /// File version, `major.minor[patch]`.
    pub file_version: String,
    /// Columns.
    pub width: u8,
    /// Rows.
    pub height: u8,
    /// Whether `solution` is scrambled.
    #[serde(default)]
    pub is_scrambled: bool,
    /// Answer grid.
    pub solution: String,
    /// Player's grid; `None` means blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Clues in grid order, across before down at a shared cell.
    pub clues: Vec<String>,
    /// Rebus squares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebus: Option<Rebus>,
    /// Per-cell markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<Vec<SquareMarkup>>,
    /// Solve timer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<Timer>,
    /// Opaque header fields.
    #[serde(default)]
    pub misc: Misc,
}

impl Puzzle {
    /// Create an unscrambled puzzle with no metadata.
    pub fn new(width: u8, height: u8, solution: impl Into<String>, clues: Vec<String>) -> Self {
        Self {
            title: None,
            author: None,
            copyright: None,
            notepad: None,
            file_version: DEFAULT_FILE_VERSION.to_owned(),
            width,
            height,
            is_scrambled: false,
            solution: solution.into(),
            state: None,
            clues,
            rebus: None,
            markup: None,
            timer: None,
            misc: Misc::default(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the copyright notice.
    #[must_use]
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    /// Set the notepad.
    #[must_use]
    pub fn with_notepad(mut self, notepad: impl Into<String>) -> Self {
        self.notepad = Some(notepad.into());
        self
    }

    /// Set the file version.
    #[must_use]
    pub fn with_file_version(mut self, file_version: impl Into<String>) -> Self {
        self.file_version = file_version.into();
        self
    }

    /// Set the player's grid.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Attach rebus data.
    #[must_use]
    pub fn with_rebus(mut self, rebus: Rebus) -> Self {
        self.rebus = Some(rebus);
        self
    }

    /// Attach per-cell markup.
    #[must_use]
    pub fn with_markup(mut self, markup: Vec<SquareMarkup>) -> Self {
        self.markup = Some(markup);
        self
    }

    /// Attach a timer.
    #[must_use]
    pub fn with_timer(mut self, timer: Timer) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Number of cells.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// The player's grid, or a blank grid if none is stored.
    #[must_use]
    pub fn effective_state(&self) -> Cow<'_, str> {
        self.state
            .as_deref()
            .map_or_else(|| Cow::Owned(blank_state(&self.solution)), Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clues(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("clue {i}")).collect()
    }

    #[test]
    fn new_uses_defaults() {
        let puzzle = Puzzle::new(2, 2, "ABCD", clues(4));
        assert_eq!(puzzle.file_version, "1.3");
        assert!(!puzzle.is_scrambled);
        assert_eq!(puzzle.misc, Misc::default());
        assert_eq!(puzzle.grid_size(), 4);
    }

    #[test]
    fn effective_state_defaults_to_blank() {
        let puzzle = Puzzle::new(3, 1, "A.B", clues(2));
        assert_eq!(puzzle.effective_state(), "-.-");

        let puzzle = puzzle.with_state("X.-");
        assert_eq!(puzzle.effective_state(), "X.-");
    }

    #[test]
    fn builder_sets_fields() {
        let puzzle = Puzzle::new(2, 2, "ABCD", clues(4))
            .with_title("Title")
            .with_author("Author")
            .with_copyright("(c)")
            .with_notepad("notes")
            .with_file_version("1.2c")
            .with_timer(Timer {
                seconds_elapsed: 30,
                is_paused: true,
            })
            .with_markup(vec![SquareMarkup::CIRCLED; 4]);
        assert_eq!(puzzle.title.as_deref(), Some("Title"));
        assert_eq!(puzzle.author.as_deref(), Some("Author"));
        assert_eq!(puzzle.copyright.as_deref(), Some("(c)"));
        assert_eq!(puzzle.notepad.as_deref(), Some("notes"));
        assert_eq!(puzzle.file_version, "1.2c");
        assert_eq!(puzzle.timer.map(|t| t.seconds_elapsed), Some(30));
        assert_eq!(puzzle.markup.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn puzzle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Puzzle>();
    }
}
