//! Grid scanning: black squares, clue starts and numbering.

/// Whether `ch` is a black square (`.` or `:`).
#[must_use]
pub const fn is_black_square(ch: char) -> bool {
    matches!(ch, '.' | ':')
}

/// Clue starts for each cell of a row-major grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClueStart {
    /// An across entry starts here.
    pub across: bool,
    /// A down entry starts here.
    pub down: bool,
}

impl ClueStart {
    /// Number of clues starting here.
    #[must_use]
    pub fn count(self) -> usize {
        usize::from(self.across) + usize::from(self.down)
    }
}

/// Compute the clue starts of every cell.
///
/// A cell starts an across entry when it is white, its left neighbour is black
/// or the edge, and its right neighbour is white. Down entries use the cells
/// above and below.
#[must_use]
pub fn clue_starts(solution: &str, width: u8) -> Vec<ClueStart> {
    let black: Vec<bool> = solution.chars().map(is_black_square).collect();
    let width = usize::from(width);
    let len = black.len();
    if width == 0 {
        return vec![ClueStart::default(); len];
    }
    let is_black = |index: usize| black.get(index).copied().unwrap_or(true);

    (0..len)
        .map(|i| {
            if black[i] {
                return ClueStart::default();
            }
            let col = i % width;
            let across = (col == 0 || is_black(i - 1)) && col + 1 < width && !is_black(i + 1);
            let down = (i < width || is_black(i - width)) && !is_black(i + width);
            ClueStart { across, down }
        })
        .collect()
}

/// Whether cell `index` starts an across entry.
#[must_use]
pub fn needs_across_clue(solution: &str, width: u8, index: usize) -> bool {
    clue_starts(solution, width)
        .get(index)
        .is_some_and(|start| start.across)
}

/// Whether cell `index` starts a down entry.
#[must_use]
pub fn needs_down_clue(solution: &str, width: u8, index: usize) -> bool {
    clue_starts(solution, width)
        .get(index)
        .is_some_and(|start| start.down)
}

/// Number of clues the grid requires.
#[must_use]
pub fn required_clue_count(solution: &str, width: u8) -> usize {
    clue_starts(solution, width)
        .into_iter()
        .map(ClueStart::count)
        .sum()
}

/// Clue number of each cell, `None` where no entry starts.
#[must_use]
pub fn grid_numbering(solution: &str, width: u8) -> Vec<Option<u16>> {
    let mut next = 0u16;
    clue_starts(solution, width)
        .into_iter()
        .map(|start| {
            (start.count() > 0).then(|| {
                next += 1;
                next
            })
        })
        .collect()
}

/// Replace every white cell with `-`.
#[must_use]
pub fn blank_state(solution: &str) -> String {
    solution
        .chars()
        .map(|ch| if is_black_square(ch) { ch } else { '-' })
        .collect()
}

/// Re-read a row-major grid of `rows` by `cols` in column-major order.
///
/// Applying it with `rows` and `cols` swapped restores the original.
#[must_use]
pub fn transpose(text: &str, rows: usize, cols: usize) -> String {
    let cells: Vec<char> = text.chars().collect();
    (0..cols)
        .flat_map(|col| (0..rows).map(move |row| row * cols + col))
        .filter_map(|index| cells.get(index).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_clues() {
        // every cell of the first row starts a down entry, every cell of the
        // first column starts an across entry
        assert_eq!(required_clue_count("ABCD", 2), 4);
        assert_eq!(required_clue_count("ABCDEFGHI", 3), 6);
        assert!(needs_across_clue("ABCD", 2, 0));
        assert!(needs_down_clue("ABCD", 2, 1));
        assert!(!needs_across_clue("ABCD", 2, 1));
        assert!(needs_across_clue("ABCD", 2, 2));
        assert!(!needs_down_clue("ABCD", 2, 3));
    }

    #[test]
    fn black_squares_break_entries() {
        // A B C
        // D . E
        // F G H
        let solution = "ABCD.EFGH";
        let starts = clue_starts(solution, 3);
        assert_eq!(starts[0], ClueStart { across: true, down: true });
        assert_eq!(starts[2], ClueStart { across: false, down: true });
        assert_eq!(starts[4], ClueStart::default());
        // D and E are single cells across
        assert_eq!(starts[3], ClueStart::default());
        assert_eq!(starts[6], ClueStart { across: true, down: false });
        assert_eq!(required_clue_count(solution, 3), 4);
    }

    #[test]
    fn single_letter_entries_need_no_clue() {
        assert_eq!(required_clue_count("A", 1), 0);
        assert_eq!(required_clue_count("A.B", 3), 0);
    }

    #[test]
    fn numbering_follows_index_order() {
        assert_eq!(
            grid_numbering("ABCD.EFGH", 3),
            vec![Some(1), None, Some(2), None, None, None, Some(3), None, None]
        );
        assert_eq!(grid_numbering("ABCD", 2), vec![Some(1), Some(2), Some(3), None]);
    }

    #[test]
    fn blank_state_keeps_black_squares() {
        assert_eq!(blank_state("AB.:CD"), "--.:--");
        assert_eq!(blank_state(""), "");
    }

    #[test]
    fn transpose_is_invertible() {
        assert_eq!(transpose("ABCDEF", 2, 3), "ADBECF");
        assert_eq!(transpose("ADBECF", 3, 2), "ABCDEF");
        assert_eq!(transpose("ABCDEFGHIJKLMNOP", 4, 4), "AEIMBFJNCGKODHLP");
    }
}
