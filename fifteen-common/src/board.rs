use crate::{goal::Goal, moves::Move};

use anyhow::{Context, Result, bail};
use rand::{Rng, SeedableRng, rngs::StdRng};
use smallvec::SmallVec;
use std::fmt;

pub const SIZE: usize = 4;
pub const TOTAL_CELLS: usize = SIZE * SIZE;
pub const MAX_TILE: u8 = (TOTAL_CELLS - 1) as u8;

const LABELS: [char; TOTAL_CELLS] = [
    ' ', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// One 4×4 configuration, stored row-major.
///
/// Boards are plain values: every move produces a fresh copy and the source is
/// never touched. Construction guarantees exactly one blank and fifteen
/// distinct tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Tile; TOTAL_CELLS],
    space: u8,
}

impl Board {
    /// Caller guarantees `cells` is a permutation of all sixteen tiles.
    pub(crate) fn new_unchecked(cells: [Tile; TOTAL_CELLS]) -> Self {
        let space = cells.iter().position(|t| t.is_blank()).unwrap_or(0) as u8;
        Self { cells, space }
    }

    pub fn from_cells(cells: [Tile; TOTAL_CELLS]) -> Result<Self> {
        let blanks = cells.iter().filter(|t| t.is_blank()).count();
        match blanks {
            0 => bail!("Board has no blank"),
            1 => {}
            n => bail!("Board has {n} blanks, expected exactly one"),
        }
        let mut seen = [false; TOTAL_CELLS];
        for tile in cells {
            let id = tile.id() as usize;
            if id >= TOTAL_CELLS {
                bail!("Invalid tile id {id}");
            }
            if seen[id] {
                bail!("Duplicate tile '{}'", tile.label());
            }
            seen[id] = true;
        }
        Ok(Self::new_unchecked(cells))
    }

    pub fn from_grid(grid: [[Tile; SIZE]; SIZE]) -> Result<Self> {
        let mut cells = [Tile::BLANK; TOTAL_CELLS];
        for (row, tiles) in grid.iter().enumerate() {
            cells[row * SIZE..(row + 1) * SIZE].copy_from_slice(tiles);
        }
        Self::from_cells(cells)
    }

    /// Parses a 16-label line such as `"123456789ABCDEF "`.
    ///
    /// The blank may be written as a space, `_` or `0`. The input is not
    /// trimmed since a leading or trailing space is usually the blank.
    pub fn parse(content: &str) -> Result<Self> {
        let labels: Vec<char> = content.chars().collect();
        if labels.len() != TOTAL_CELLS {
            bail!(
                "Expected {TOTAL_CELLS} tiles in '{content}', found {}",
                labels.len()
            );
        }
        let mut cells = [Tile::BLANK; TOTAL_CELLS];
        for (cell, &label) in cells.iter_mut().zip(labels.iter()) {
            *cell = Tile::parse(label).with_context(|| format!("Failed to parse '{content}'"))?;
        }
        Self::from_cells(cells).with_context(|| format!("Invalid board '{content}'"))
    }

    /// Random walk of `moves` steps away from the standard goal. The walk never
    /// undoes its previous step, and the same seed always yields the same
    /// board.
    pub fn scrambled(moves: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Goal::Standard.board();
        let mut last_move: Option<Move> = None;
        for _ in 0..moves {
            let candidates: SmallVec<[Move; 4]> = Move::ALL
                .into_iter()
                .filter(|&m| board.is_legal_move(m) && last_move != Some(m.opposite()))
                .collect();
            if candidates.is_empty() {
                break;
            }
            let mov = candidates[rng.random_range(0..candidates.len())];
            if let Some(next) = board.move_space_tile(mov) {
                board = next;
                last_move = Some(mov);
            }
        }
        board
    }

    pub fn cells(&self) -> &[Tile; TOTAL_CELLS] {
        &self.cells
    }

    pub fn to_grid(&self) -> [[Tile; SIZE]; SIZE] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.get(row, col)))
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row * SIZE + col]
    }

    #[inline]
    pub fn space_coordinates(&self) -> (usize, usize) {
        let space = self.space as usize;
        (space / SIZE, space % SIZE)
    }

    fn target(&self, mov: Move) -> Option<usize> {
        let (row, col) = self.space_coordinates();
        let (dr, dc) = mov.offset();
        let row = row.checked_add_signed(dr).filter(|&r| r < SIZE)?;
        let col = col.checked_add_signed(dc).filter(|&c| c < SIZE)?;
        Some(row * SIZE + col)
    }

    pub fn is_legal_move(&self, mov: Move) -> bool {
        self.target(mov).is_some()
    }

    /// Slides the neighbouring tile into the blank. `None` when the blank
    /// would leave the grid.
    pub fn move_space_tile(&self, mov: Move) -> Option<Board> {
        let target = self.target(mov)?;
        let mut cells = self.cells;
        cells.swap(self.space as usize, target);
        Some(Board {
            cells,
            space: target as u8,
        })
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        Move::ALL.into_iter().filter(|&m| self.is_legal_move(m))
    }

    /// Number of cells whose label differs from `goal`, blank included.
    pub fn h1(&self, goal: &Board) -> u32 {
        self.cells
            .iter()
            .zip(goal.cells.iter())
            .filter(|(a, b)| a != b)
            .count() as u32
    }

    /// Sum of Manhattan distances between each label's cell here and in
    /// `goal`, blank included.
    pub fn h2(&self, goal: &Board) -> u32 {
        let positions = self.positions();
        goal.cells
            .iter()
            .enumerate()
            .map(|(idx, tile)| distance(idx, positions[tile.id() as usize]))
            .sum()
    }

    /// Like [`Board::h1`] without the blank. Never overestimates.
    pub fn misplaced_tiles(&self, goal: &Board) -> u32 {
        self.cells
            .iter()
            .zip(goal.cells.iter())
            .filter(|(a, b)| !a.is_blank() && a != b)
            .count() as u32
    }

    /// Like [`Board::h2`] without the blank. Never overestimates.
    pub fn manhattan_distance(&self, goal: &Board) -> u32 {
        let positions = self.positions();
        goal.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| !tile.is_blank())
            .map(|(idx, tile)| distance(idx, positions[tile.id() as usize]))
            .sum()
    }

    /// Cell index of every tile, indexed by tile id.
    fn positions(&self) -> [usize; TOTAL_CELLS] {
        let mut positions = [0; TOTAL_CELLS];
        for (idx, tile) in self.cells.iter().enumerate() {
            positions[tile.id() as usize] = idx;
        }
        positions
    }

    pub fn key(&self) -> BoardKey {
        BoardKey(
            self.cells
                .iter()
                .fold(0u64, |acc, tile| (acc << 4) | tile.id() as u64),
        )
    }

    pub fn pretty_print(&self) -> String {
        let mut output = String::new();
        for (row, tiles) in self.to_grid().iter().enumerate() {
            if row > 0 {
                output.push('\n');
            }
            let line: Vec<String> = tiles
                .iter()
                .map(|t| {
                    if t.is_blank() {
                        "_".to_string()
                    } else {
                        t.label().to_string()
                    }
                })
                .collect();
            output.push_str(&line.join(" "));
        }
        output
    }
}

fn distance(a: usize, b: usize) -> u32 {
    ((a / SIZE).abs_diff(b / SIZE) + (a % SIZE).abs_diff(b % SIZE)) as u32
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells.iter().try_for_each(|t| write!(f, "{}", t.label()))
    }
}

/// Canonical visited-set key: the sixteen tile ids packed into nibbles, first
/// cell in the highest nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey(u64);

impl BoardKey {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in (0..TOTAL_CELLS).rev() {
            let id = ((self.0 >> (idx * 4)) & 0xf) as usize;
            write!(f, "{}", LABELS[id])?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tile(u8);

impl Tile {
    pub const BLANK: Self = Self(0);

    pub fn new(id: u8) -> Option<Self> {
        (id <= MAX_TILE).then_some(Self(id))
    }

    pub fn parse(label: char) -> Result<Self> {
        let label = match label {
            '_' | '0' => ' ',
            c => c.to_ascii_uppercase(),
        };
        let id = LABELS
            .iter()
            .position(|&l| l == label)
            .with_context(|| format!("Invalid tile label '{label}'"))?;
        Ok(Self(id as u8))
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0 == 0
    }

    pub fn label(&self) -> char {
        LABELS[self.0 as usize]
    }
}
