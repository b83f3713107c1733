//! Puzzle definitions and tile records.
//!
//! A picture is cut into `DIM * DIM` tiles by a [`TileSlicer`]. Each tile
//! carries a stable identity (its row-major home position) and an opaque
//! bitmap; the last identity is the blank and has no bitmap.

use crate::error::{PuzzleError, Result};

/// Puzzle definition with compile-time parameters.
///
/// - `DIM`: tiles per row and column
/// - `CELLS`: total positions on the board (must equal DIM^2)
pub struct Puzzle<const DIM: usize, const CELLS: usize> {
    /// Human-readable size label, e.g. `3x3`.
    pub name: &'static str,
}

impl<const DIM: usize, const CELLS: usize> Puzzle<DIM, CELLS> {
    /// Creates a new puzzle definition with compile-time validation.
    pub const fn new(name: &'static str) -> Self {
        assert!(DIM * DIM == CELLS, "CELLS must equal DIM^2");
        assert!(DIM >= 2, "DIM must be at least 2");
        assert!(CELLS <= 256, "CELLS must be <= 256 (u8 identities)");
        Self { name }
    }
}

/// 2x2 puzzle constants.
pub const SMALL_DIM: usize = 2;
pub const SMALL_CELLS: usize = 4;

/// 2x2 puzzle definition.
pub const PUZZLE_2X2: Puzzle<SMALL_DIM, SMALL_CELLS> = Puzzle::new("2x2");

/// 3x3 puzzle constants.
pub const CLASSIC_DIM: usize = 3;
pub const CLASSIC_CELLS: usize = 9;

/// 3x3 puzzle definition (the 8-puzzle).
pub const PUZZLE_3X3: Puzzle<CLASSIC_DIM, CLASSIC_CELLS> = Puzzle::new("3x3");

/// 4x4 puzzle constants.
pub const LARGE_DIM: usize = 4;
pub const LARGE_CELLS: usize = 16;

/// 4x4 puzzle definition (the 15-puzzle).
///
/// Plain A* only handles shallow scrambles at this size.
pub const PUZZLE_4X4: Puzzle<LARGE_DIM, LARGE_CELLS> = Puzzle::new("4x4");

/// One slice of the source picture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile<B> {
    pub identity: u8,
    /// Pixel content; `None` only for the blank.
    pub bitmap: Option<B>,
}

/// Produces tile records for a `dim x dim` grid.
///
/// Implementations return exactly `dim * dim` records in row-major order,
/// with identities `0..dim*dim` and no bitmap on the last one.
pub trait TileSlicer {
    type Bitmap;

    fn slice(&self, dim: usize) -> Vec<Tile<Self::Bitmap>>;
}

/// Validated tile bitmaps, indexed by identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSet<B> {
    bitmaps: Vec<Option<B>>,
}

impl<B> TileSet<B> {
    /// Checks slicer output against the record contract for a `DIM`-wide grid.
    pub fn from_records<const DIM: usize, const CELLS: usize>(records: Vec<Tile<B>>) -> Result<Self> {
        if records.len() != CELLS {
            return Err(PuzzleError::TileCount {
                expected: CELLS,
                found: records.len(),
            });
        }

        let blank = (CELLS - 1) as u8;
        let mut bitmaps = Vec::with_capacity(CELLS);

        for (position, tile) in records.into_iter().enumerate() {
            if tile.identity as usize != position {
                return Err(PuzzleError::TileOrder {
                    position,
                    identity: tile.identity,
                });
            }
            match (tile.identity == blank, tile.bitmap.is_some()) {
                (true, true) => return Err(PuzzleError::BlankBitmap { identity: blank }),
                (false, false) => {
                    return Err(PuzzleError::MissingBitmap {
                        identity: tile.identity,
                    })
                }
                _ => {}
            }
            bitmaps.push(tile.bitmap);
        }

        Ok(Self { bitmaps })
    }

    /// Slices with `slicer` and validates the result.
    pub fn slice<const DIM: usize, const CELLS: usize, S>(slicer: &S) -> Result<Self>
    where
        S: TileSlicer<Bitmap = B> + ?Sized,
    {
        Self::from_records::<DIM, CELLS>(slicer.slice(DIM))
    }

    /// Bitmap for `identity`; `None` for the blank.
    #[inline]
    pub fn bitmap(&self, identity: u8) -> Option<&B> {
        self.bitmaps.get(identity as usize)?.as_ref()
    }

    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }
}

/// Labels each tile with a letter (`A`, `B`, ...) in place of pixel content.
///
/// Stands in for an image slicer in terminal front ends and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelSlicer;

impl TileSlicer for LabelSlicer {
    type Bitmap = char;

    fn slice(&self, dim: usize) -> Vec<Tile<char>> {
        let cells = dim * dim;
        (0..cells)
            .map(|identity| Tile {
                identity: identity as u8,
                bitmap: (identity + 1 < cells).then(|| label_for(identity)),
            })
            .collect()
    }
}

/// `A..Z`, then `a..z`, then `?` for anything larger.
fn label_for(identity: usize) -> char {
    match identity {
        0..=25 => char::from(b'A' + identity as u8),
        26..=51 => char::from(b'a' + (identity - 26) as u8),
        _ => '?',
    }
}
