//! Grid state for sliding-tile puzzles.
//!
//! Generic over grid dimension (`DIM`) and total cell count (`CELLS = DIM^2`).
//! The board is a flat row-major array where each position holds the identity
//! of the tile currently sitting there. Identity `CELLS - 1` is the blank, and
//! the solved board is the identity permutation.

use std::fmt;

use crate::error::{PuzzleError, Result};

/// Hashable search key: the raw identity permutation.
pub type BoardKey<const CELLS: usize> = [u8; CELLS];

/// Converts a row-major position to `(row, col)`.
#[inline(always)]
pub const fn position_to_coord<const DIM: usize>(position: usize) -> (usize, usize) {
    (position / DIM, position % DIM)
}

/// Manhattan distance between two positions on a `DIM`-wide grid.
#[inline(always)]
pub const fn manhattan<const DIM: usize>(from: usize, to: usize) -> u32 {
    let (from_row, from_col) = position_to_coord::<DIM>(from);
    let (to_row, to_col) = position_to_coord::<DIM>(to);
    (from_row.abs_diff(to_row) + from_col.abs_diff(to_col)) as u32
}

/// Positions adjacent to a cell, in up, down, left, right order.
///
/// Fixed-size so the solver's expansion loop never allocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    positions: [usize; 4],
    len: u8,
}

impl Neighbors {
    const EMPTY: Self = Self {
        positions: [0; 4],
        len: 0,
    };

    #[inline]
    fn push(&mut self, position: usize) {
        self.positions[self.len as usize] = position;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.positions[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        self.as_slice().contains(&position)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Returns the grid-adjacent positions of `position` (2 in corners, 3 on
/// edges, 4 inside).
pub fn neighbors<const DIM: usize>(position: usize) -> Neighbors {
    let (row, col) = position_to_coord::<DIM>(position);
    let mut out = Neighbors::EMPTY;

    if row > 0 {
        out.push(position - DIM);
    }
    if row + 1 < DIM {
        out.push(position + DIM);
    }
    if col > 0 {
        out.push(position - 1);
    }
    if col + 1 < DIM {
        out.push(position + 1);
    }

    out
}

/// Direction a tile slides when it moves into the blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Direction of a single-cell step from `from` to `to`, if they are adjacent.
    pub fn between<const DIM: usize>(from: usize, to: usize) -> Option<Self> {
        let (from_row, from_col) = position_to_coord::<DIM>(from);
        let (to_row, to_col) = position_to_coord::<DIM>(to);

        match (to_row as isize - from_row as isize, to_col as isize - from_col as isize) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(name)
    }
}

/// A permutation of tile identities over board positions.
///
/// The only ways to obtain a board are [`Board::solved`], the validating
/// [`Board::from_cells`], and [`Board::apply_move`], so every value holds
/// exactly one blank and every identity exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board<const DIM: usize, const CELLS: usize> {
    cells: [u8; CELLS],
    blank: usize,
}

impl<const DIM: usize, const CELLS: usize> Board<DIM, CELLS> {
    const SHAPE: () = assert!(
        DIM >= 2 && DIM * DIM == CELLS && CELLS <= 256,
        "CELLS must equal DIM^2, with 2 <= DIM and CELLS <= 256"
    );

    /// Identity reserved for the blank cell.
    pub const BLANK: u8 = (CELLS - 1) as u8;

    /// The goal board: every position holds its own identity.
    pub fn solved() -> Self {
        let () = Self::SHAPE;
        let mut cells = [0u8; CELLS];
        for (position, cell) in cells.iter_mut().enumerate() {
            *cell = position as u8;
        }
        Self {
            cells,
            blank: CELLS - 1,
        }
    }

    /// Validates that `cells` is a permutation of `0..CELLS` and builds a board.
    pub fn from_cells(cells: [u8; CELLS]) -> Result<Self> {
        let () = Self::SHAPE;
        let mut seen = [false; CELLS];
        let mut blank = None;

        for (position, &identity) in cells.iter().enumerate() {
            let slot = seen.get_mut(identity as usize).ok_or_else(|| {
                PuzzleError::invalid_board(format!(
                    "identity {identity} at position {position} is out of range"
                ))
            })?;
            if *slot {
                return Err(PuzzleError::invalid_board(format!(
                    "identity {identity} appears more than once"
                )));
            }
            *slot = true;
            if identity == Self::BLANK {
                blank = Some(position);
            }
        }

        // a full permutation always contains the blank
        let blank = blank.ok_or_else(|| PuzzleError::invalid_board("blank is missing"))?;
        Ok(Self { cells, blank })
    }

    /// Like [`Board::from_cells`], for callers holding a runtime-sized slice.
    pub fn from_slice(cells: &[u8]) -> Result<Self> {
        let cells: [u8; CELLS] = cells.try_into().map_err(|_| PuzzleError::CellCount {
            expected: CELLS,
            found: cells.len(),
        })?;
        Self::from_cells(cells)
    }

    #[inline]
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    #[inline]
    pub fn key(&self) -> BoardKey<CELLS> {
        self.cells
    }

    /// Position currently holding the blank.
    #[inline]
    pub fn blank_position(&self) -> usize {
        self.blank
    }

    /// Positions whose tile may slide into the blank.
    #[inline]
    pub fn legal_targets(&self) -> Neighbors {
        neighbors::<DIM>(self.blank)
    }

    /// Exchanges the blank with `target`, or returns `None` when `target` is
    /// not adjacent to the blank.
    pub fn apply_move(&self, target: usize) -> Option<Self> {
        if self.legal_targets().contains(target) {
            Some(self.slide(target))
        } else {
            None
        }
    }

    /// Swaps the blank with `target` without checking adjacency.
    ///
    /// Callers must take `target` from [`Board::legal_targets`].
    #[inline]
    pub(crate) fn slide(&self, target: usize) -> Self {
        let mut cells = self.cells;
        cells.swap(self.blank, target);
        Self {
            cells,
            blank: target,
        }
    }

    /// Position of the tile that would slide in `direction`, if any.
    pub fn target_for(&self, direction: Direction) -> Option<usize> {
        // the tile moving up sits below the blank, and so on
        self.legal_targets()
            .iter()
            .find(|&target| Direction::between::<DIM>(target, self.blank) == Some(direction))
    }

    /// Describes the single move leading from `self` to `next`: the identity
    /// of the tile that slid and the direction it travelled.
    pub fn describe_move(&self, next: &Self) -> Option<(u8, Direction)> {
        let target = next.blank;
        if self.apply_move(target)? != *next {
            return None;
        }
        let direction = Direction::between::<DIM>(target, self.blank)?;
        Some((self.cells[target], direction))
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(position, &identity)| identity as usize == position)
    }

    /// Sum of Manhattan distances from each visible tile to its goal position.
    ///
    /// Never overestimates the remaining move count, since every move shifts
    /// exactly one tile by one cell.
    pub fn heuristic(&self) -> u32 {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &identity)| identity != Self::BLANK)
            .map(|(position, &identity)| manhattan::<DIM>(position, identity as usize))
            .sum()
    }

    /// Number of visible tile pairs that appear in the wrong relative order.
    pub fn inversions(&self) -> usize {
        let visible: Vec<u8> = self
            .cells
            .iter()
            .copied()
            .filter(|&identity| identity != Self::BLANK)
            .collect();

        visible
            .iter()
            .enumerate()
            .map(|(i, &identity)| visible[i + 1..].iter().filter(|&&later| later < identity).count())
            .sum()
    }

    /// Parity test for reachability of the solved board.
    ///
    /// On odd-width grids vertical moves shift the inversion count by an even
    /// amount, so the count must be even. On even-width grids each vertical
    /// move flips both the inversion parity and the blank row, so their sum
    /// must match the goal's (`0 + DIM - 1`, which is odd).
    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversions();
        if DIM % 2 == 1 {
            inversions % 2 == 0
        } else {
            let (blank_row, _) = position_to_coord::<DIM>(self.blank);
            (inversions + blank_row) % 2 == 1
        }
    }
}

/// Width of the widest visible identity label.
fn label_width(cells: usize) -> usize {
    cells.saturating_sub(2).max(1).to_string().len()
}

impl<const DIM: usize, const CELLS: usize> fmt::Display for Board<DIM, CELLS> {
    /// One row per line, blank shown as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = label_width(CELLS);
        for row in self.cells.chunks(DIM) {
            for (col, &identity) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                if identity == Self::BLANK {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{:>width$}", identity)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Formats a sequence of boards, naming the move between consecutive states.
pub fn format_path<const DIM: usize, const CELLS: usize>(path: &[Board<DIM, CELLS>]) -> String {
    let mut output = String::new();

    for (step, board) in path.iter().enumerate() {
        if step > 0 {
            output.push('\n');
            match path[step - 1].describe_move(board) {
                Some((identity, direction)) => output.push_str(&format!(
                    "Step {step} (tile {identity} slides {direction}):\n"
                )),
                None => output.push_str(&format!("Step {step}:\n")),
            }
        } else {
            output.push_str("Step 0:\n");
        }
        output.push_str(&board.to_string());
    }

    output
}

/// Parses a comma- or whitespace-separated list of identities.
pub fn parse_cells(input: &str) -> Result<Vec<u8>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u8>().map_err(|_| PuzzleError::Parse {
                input: input.to_string(),
            })
        })
        .collect()
}
