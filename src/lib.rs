//! Sliding-Tile Puzzle Engine
//!
//! Provides the board state machine, random-walk scrambler, optimal A*
//! solver, and timed solution playback for square N-puzzles.

pub mod board;
pub mod config;
pub mod error;
pub mod playback;
pub mod scramble;
pub mod session;
pub mod solver;
pub mod tiles;

use rand::RngCore;

use board::{format_path, Board};
use error::{PuzzleError, Result};
use tiles::{Puzzle, PUZZLE_2X2, PUZZLE_3X3, PUZZLE_4X4};

/// An optimal solution as plain identity slices, start first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveSummary {
    pub states: Vec<Vec<u8>>,
    /// States the search finalized before reaching the goal.
    pub explored: usize,
}

impl SolveSummary {
    /// Number of moves, one less than the number of states.
    pub fn moves(&self) -> usize {
        self.states.len().saturating_sub(1)
    }
}

/// Trait that erases compile-time puzzle parameters for dynamic dispatch.
///
/// The const generics (`DIM`, `CELLS`) are hidden behind the vtable, so
/// callers can pick a board size at runtime. Boards cross this boundary as
/// plain identity slices.
pub trait PuzzleOps {
    fn dim(&self) -> usize;
    fn name(&self) -> &'static str;
    /// Applies `steps` random legal moves to the solved board.
    fn scramble(&self, steps: usize, rng: &mut dyn RngCore) -> Vec<u8>;
    /// Returns every board of an optimal solution, start first.
    fn solve(&self, cells: &[u8]) -> Result<SolveSummary>;
    fn heuristic(&self, cells: &[u8]) -> Result<u32>;
    fn is_solvable(&self, cells: &[u8]) -> Result<bool>;
    fn format_board(&self, cells: &[u8]) -> Result<String>;
    fn format_path(&self, path: &[Vec<u8>]) -> Result<String>;
}

impl<const DIM: usize, const CELLS: usize> PuzzleOps for Puzzle<DIM, CELLS> {
    fn dim(&self) -> usize {
        DIM
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn scramble(&self, steps: usize, rng: &mut dyn RngCore) -> Vec<u8> {
        scramble::scramble(&Board::<DIM, CELLS>::solved(), steps, rng)
            .cells()
            .to_vec()
    }

    fn solve(&self, cells: &[u8]) -> Result<SolveSummary> {
        let start = Board::<DIM, CELLS>::from_slice(cells)?;
        let path = solver::solve(&start)?;
        Ok(SolveSummary {
            explored: path.explored(),
            states: path
                .states()
                .iter()
                .map(|board| board.cells().to_vec())
                .collect(),
        })
    }

    fn heuristic(&self, cells: &[u8]) -> Result<u32> {
        Ok(Board::<DIM, CELLS>::from_slice(cells)?.heuristic())
    }

    fn is_solvable(&self, cells: &[u8]) -> Result<bool> {
        Ok(Board::<DIM, CELLS>::from_slice(cells)?.is_solvable())
    }

    fn format_board(&self, cells: &[u8]) -> Result<String> {
        Ok(Board::<DIM, CELLS>::from_slice(cells)?.to_string())
    }

    fn format_path(&self, path: &[Vec<u8>]) -> Result<String> {
        let boards = path
            .iter()
            .map(|cells| Board::<DIM, CELLS>::from_slice(cells))
            .collect::<Result<Vec<_>>>()?;
        Ok(format_path(&boards))
    }
}

/// Looks up the puzzle definition for a `dim x dim` board.
pub fn puzzle_for_dim(dim: usize) -> Result<&'static dyn PuzzleOps> {
    match dim {
        2 => Ok(&PUZZLE_2X2),
        3 => Ok(&PUZZLE_3X3),
        4 => Ok(&PUZZLE_4X4),
        _ => Err(PuzzleError::UnsupportedSize { dim }),
    }
}

/// Looks up the puzzle definition matching a board of `cells` positions.
pub fn puzzle_for_cells(cells: usize) -> Result<&'static dyn PuzzleOps> {
    let dim = (2..=4)
        .find(|dim| dim * dim == cells)
        .ok_or_else(|| {
            PuzzleError::invalid_board(format!("{cells} cells do not form a 2x2, 3x3, or 4x4 grid"))
        })?;
    puzzle_for_dim(dim)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_puzzle_lookup() {
        assert_eq!(puzzle_for_dim(3).unwrap().name(), "3x3");
        assert_eq!(puzzle_for_cells(16).unwrap().dim(), 4);
        assert_eq!(
            puzzle_for_dim(7).err(),
            Some(PuzzleError::UnsupportedSize { dim: 7 })
        );
        assert!(matches!(
            puzzle_for_cells(10),
            Err(PuzzleError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_dynamic_scramble_and_solve() {
        let puzzle = puzzle_for_dim(3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cells = puzzle.scramble(100, &mut rng);

        assert!(puzzle.is_solvable(&cells).unwrap());
        let summary = puzzle.solve(&cells).unwrap();
        assert_eq!(summary.states.first(), Some(&cells));
        assert_eq!(summary.states.last(), Some(&(0..9).collect::<Vec<u8>>()));
        assert!(summary.moves() as u32 >= puzzle.heuristic(&cells).unwrap());
    }

    #[test]
    fn test_dynamic_boundary_validates_cells() {
        let puzzle = puzzle_for_dim(2).unwrap();
        assert_eq!(
            puzzle.solve(&[0, 1, 2]),
            Err(PuzzleError::CellCount {
                expected: 4,
                found: 3
            })
        );
        assert!(matches!(
            puzzle.format_board(&[0, 0, 1, 3]),
            Err(PuzzleError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_dynamic_format_path() {
        let puzzle = puzzle_for_dim(2).unwrap();
        let summary = puzzle.solve(&[0, 1, 3, 2]).unwrap();
        assert_eq!(summary.moves(), 1);
        assert_eq!(summary.explored, 1);
        assert_eq!(
            puzzle.format_path(&summary.states).unwrap(),
            "Step 0:\n0 1\n. 2\n\nStep 1 (tile 2 slides Left):\n0 1\n2 .\n"
        );
    }
}
