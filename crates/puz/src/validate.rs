//! Structural invariants checked before encoding and scrambling.

use crate::encoding::FileVersion;
use crate::error::ValidationError;
use crate::grid::{is_black_square, required_clue_count};
use crate::header::VERSION_LEN;
use crate::puzzle::Puzzle;
use crate::rebus::MAX_REBUS_KEY;

/// Symbols allowed in a solution besides letters, digits and black squares.
const SOLUTION_SYMBOLS: &str = "@#$%&+?";

fn is_solution_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || is_black_square(ch) || SOLUTION_SYMBOLS.contains(ch)
}

fn is_state_char(ch: char) -> bool {
    ch == '-' || is_solution_char(ch)
}

/// Check every puzzle invariant, returning the first violation.
///
/// # Errors
/// Returns the [`ValidationError`] for the first failed check.
pub fn validate(puzzle: &Puzzle) -> Result<(), ValidationError> {
    if FileVersion::parse(&puzzle.file_version).is_none()
        || puzzle.file_version.len() > VERSION_LEN
    {
        return Err(ValidationError::InvalidFileVersion(
            puzzle.file_version.clone(),
        ));
    }

    if puzzle.width == 0 || puzzle.height == 0 {
        return Err(ValidationError::EmptyGrid {
            width: puzzle.width,
            height: puzzle.height,
        });
    }

    let size = puzzle.grid_size();
    let solution: Vec<char> = puzzle.solution.chars().collect();
    if solution.len() != size {
        return Err(ValidationError::SolutionLength {
            expected: size,
            found: solution.len(),
        });
    }
    if let Some((index, &character)) = solution
        .iter()
        .enumerate()
        .find(|(_, ch)| !is_solution_char(**ch))
    {
        return Err(ValidationError::InvalidSolutionCharacter { character, index });
    }

    if let Some(state) = &puzzle.state {
        validate_state(&solution, state)?;
    }

    let expected = required_clue_count(&puzzle.solution, puzzle.width);
    if expected != puzzle.clues.len() {
        return Err(ValidationError::ClueCount {
            expected,
            found: puzzle.clues.len(),
        });
    }
    if puzzle.clues.len() > usize::from(u16::MAX) {
        return Err(ValidationError::TooManyClues {
            found: puzzle.clues.len(),
            max: usize::from(u16::MAX),
        });
    }

    if let Some(markup) = &puzzle.markup {
        if markup.len() != size {
            return Err(ValidationError::MarkupLength {
                expected: size,
                found: markup.len(),
            });
        }
    }

    if let Some(rebus) = &puzzle.rebus {
        if let Some(grid) = &rebus.grid {
            if grid.len() != size {
                return Err(ValidationError::RebusGridLength {
                    expected: size,
                    found: grid.len(),
                });
            }
        }

        let grid_keys = rebus.grid.iter().flatten().flatten().copied();
        let table_keys = rebus.solution.iter().flat_map(|table| table.keys().copied());
        if let Some(key) = grid_keys.chain(table_keys).find(|&key| key >= MAX_REBUS_KEY) {
            return Err(ValidationError::RebusKeyOutOfRange {
                key,
                max: MAX_REBUS_KEY,
            });
        }

        if let Some(grid) = &rebus.grid {
            let missing = grid.iter().flatten().copied().find(|key| {
                rebus
                    .solution
                    .as_ref()
                    .is_none_or(|table| !table.contains_key(key))
            });
            if let Some(key) = missing {
                return Err(ValidationError::MissingRebusKey { key });
            }
        }

        if let Some(table) = &rebus.solution {
            for (&key, value) in table {
                if let Some(character) = value
                    .chars()
                    .find(|&ch| matches!(ch, ':' | ';') || u32::from(ch) > 0xff)
                {
                    return Err(ValidationError::InvalidRebusSubstitution { key, character });
                }
            }
        }

        if let Some(state) = &rebus.state {
            if state.len() != size {
                return Err(ValidationError::RebusStateLength {
                    expected: size,
                    found: state.len(),
                });
            }
        }
    }

    if puzzle.is_scrambled && puzzle.misc.scrambled_checksum.is_none() {
        return Err(ValidationError::MissingScrambledChecksum);
    }

    Ok(())
}

fn validate_state(solution: &[char], state: &str) -> Result<(), ValidationError> {
    let state: Vec<char> = state.chars().collect();
    if state.len() != solution.len() {
        return Err(ValidationError::StateLength {
            expected: solution.len(),
            found: state.len(),
        });
    }
    if let Some(index) = solution
        .iter()
        .zip(&state)
        .position(|(&s, &t)| is_black_square(s) != is_black_square(t))
    {
        return Err(ValidationError::BlackSquareMismatch { index });
    }
    if let Some((index, &character)) = state
        .iter()
        .enumerate()
        .find(|(_, ch)| !is_state_char(**ch))
    {
        return Err(ValidationError::InvalidStateCharacter { character, index });
    }
    Ok(())
}
