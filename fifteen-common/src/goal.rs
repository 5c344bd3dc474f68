use crate::board::{Board, TOTAL_CELLS, Tile};

use std::fmt;

/// Value the inversion count assigns to the blank; it never forms an
/// inversion as the left-hand tile.
const BLANK_PARITY_VALUE: u8 = 99;

/// The two target configurations. Every board can reach exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    /// `123456789ABCDEF `
    Standard,
    /// `123456789ABCDFE `
    Swapped,
}

impl Goal {
    pub const ALL: [Goal; 2] = [Goal::Standard, Goal::Swapped];

    pub fn index(&self) -> usize {
        match self {
            Goal::Standard => 0,
            Goal::Swapped => 1,
        }
    }

    pub fn board(&self) -> Board {
        let mut cells: [Tile; TOTAL_CELLS] =
            std::array::from_fn(|i| Tile::new(((i + 1) % TOTAL_CELLS) as u8).unwrap_or_default());
        if *self == Goal::Swapped {
            cells.swap(TOTAL_CELLS - 3, TOTAL_CELLS - 2);
        }
        Board::new_unchecked(cells)
    }

    /// Picks the goal `board` can reach.
    ///
    /// The standard goal applies when the parity of the inversion count
    /// matches the parity of the blank's row: even inversions with the blank
    /// on an odd row (counted from the top, zero based), or odd inversions
    /// with the blank on an even row.
    pub fn classify(board: &Board) -> Self {
        let inversions_even = count_inversions(board) % 2 == 0;
        let (space_row, _) = board.space_coordinates();
        if inversions_even == (space_row % 2 == 1) {
            Goal::Standard
        } else {
            Goal::Swapped
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board())
    }
}

/// Pairs `(i, j)`, `i < j`, where the tile at `i` is not the blank and has a
/// higher value than the cell at `j`.
pub fn count_inversions(board: &Board) -> usize {
    let values: Vec<u8> = board
        .cells()
        .iter()
        .map(|t| {
            if t.is_blank() {
                BLANK_PARITY_VALUE
            } else {
                t.id()
            }
        })
        .collect();
    values
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != BLANK_PARITY_VALUE)
        .map(|(i, &val)| values[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}
