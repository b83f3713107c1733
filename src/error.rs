//! Error type shared by the engine and the command-line front end.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("board has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },

    #[error("slicer produced {found} tiles, expected {expected}")]
    TileCount { expected: usize, found: usize },

    #[error("tile at position {position} has identity {identity}")]
    TileOrder { position: usize, identity: u8 },

    #[error("blank tile {identity} must not carry a bitmap")]
    BlankBitmap { identity: u8 },

    #[error("tile {identity} has no bitmap")]
    MissingBitmap { identity: u8 },

    #[error("no solution found after exploring {explored} states")]
    Unsolvable { explored: usize },

    #[error("unsupported grid size: {dim}")]
    UnsupportedSize { dim: usize },

    #[error("could not parse board `{input}`")]
    Parse { input: String },
}

impl PuzzleError {
    #[must_use]
    pub fn invalid_board(reason: impl Into<String>) -> Self {
        Self::InvalidBoard {
            reason: reason.into(),
        }
    }
}
