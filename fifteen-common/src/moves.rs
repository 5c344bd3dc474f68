use crate::board::Board;

use std::fmt;

/// Direction the blank travels. The neighbouring tile on that side slides
/// into the blank's old cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    Right,
    Down,
    Left,
    Up,
}

/// (row, col) deltas, indexed by `Move as usize`.
const OFFSETS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const LETTERS: [char; 4] = ['R', 'D', 'L', 'U'];

impl Move {
    /// Enumeration order used by every search strategy.
    pub const ALL: [Move; 4] = [Move::Right, Move::Down, Move::Left, Move::Up];

    #[inline]
    pub fn offset(self) -> (isize, isize) {
        OFFSETS[self as usize]
    }

    pub fn opposite(self) -> Self {
        match self {
            Move::Right => Move::Left,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Up => Move::Down,
        }
    }

    pub fn letter(self) -> char {
        LETTERS[self as usize]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Right => "Right",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Up => "Up",
        };
        f.write_str(s)
    }
}

/// Formats a move sequence compactly: runs of the same move collapse into
/// `<count><letter>`, ten groups per line.
pub fn format_moves(moves: &[Move]) -> String {
    let mut list = vec![];
    let mut i = 0;
    while i < moves.len() {
        let mov = moves[i];
        let mut count = 1;
        while i + count < moves.len() && moves[i + count] == mov {
            count += 1;
        }
        if count == 1 {
            list.push(mov.letter().to_string());
        } else {
            list.push(format!("{count}{}", mov.letter()));
        }
        i += count;
    }

    list.chunks(10)
        .map(|chunk| chunk.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replays `moves` from `board`. Returns `None` as soon as one of them is
/// illegal.
pub fn apply_moves(board: &Board, moves: &[Move]) -> Option<Board> {
    moves
        .iter()
        .try_fold(*board, |board, &mov| board.move_space_tile(mov))
}
