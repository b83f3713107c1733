//! The puzzle session: tiles, current board, and the solving flag.
//!
//! A session is the single writer of its board. User moves, shuffles, and
//! uploads are ignored while a solve is being played back, and async playback
//! holds `&mut Session` until the last board has been emitted.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::PuzzleConfig;
use crate::error::Result;
use crate::playback::{Pacer, Playback};
use crate::scramble::{scramble, MovePicker};
use crate::solver::solve;
use crate::tiles::{TileSet, TileSlicer};

/// One board position as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell<'a, B> {
    pub position: usize,
    pub identity: u8,
    /// Content of the tile at `position`; `None` for the blank.
    pub bitmap: Option<&'a B>,
}

/// Owns the state behind the `upload`, `shuffle`, and `solve` commands.
pub struct Session<const DIM: usize, const CELLS: usize, B, R> {
    tiles: TileSet<B>,
    board: Board<DIM, CELLS>,
    /// Active solve playback; `Some` means the solving flag is set.
    playback: Option<Playback<DIM, CELLS>>,
    picker: R,
    config: PuzzleConfig,
}

impl<const DIM: usize, const CELLS: usize, B, R: MovePicker> Session<DIM, CELLS, B, R> {
    /// Slices a picture into tiles and starts from a freshly scrambled board.
    pub fn new<S>(slicer: &S, config: PuzzleConfig, mut picker: R) -> Result<Self>
    where
        S: TileSlicer<Bitmap = B> + ?Sized,
    {
        let tiles = TileSet::slice::<DIM, CELLS, S>(slicer)?;
        let board = scramble(&Board::solved(), config.scramble_steps, &mut picker);
        info!(dim = DIM, steps = config.scramble_steps, "new puzzle session");

        Ok(Self {
            tiles,
            board,
            playback: None,
            picker,
            config,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board<DIM, CELLS> {
        &self.board
    }

    /// True while a solve is being played back.
    #[inline]
    pub fn is_solving(&self) -> bool {
        self.playback.is_some()
    }

    /// Replaces the tiles with a new picture and rescrambles from solved.
    ///
    /// Returns `Ok(false)` without touching anything while solving.
    pub fn upload<S>(&mut self, slicer: &S) -> Result<bool>
    where
        S: TileSlicer<Bitmap = B> + ?Sized,
    {
        if self.is_solving() {
            warn!("upload ignored while solving");
            return Ok(false);
        }

        self.tiles = TileSet::slice::<DIM, CELLS, S>(slicer)?;
        self.board = scramble(&Board::solved(), self.config.scramble_steps, &mut self.picker);
        info!("uploaded new picture");
        Ok(true)
    }

    /// Scrambles the current board further. Returns `false` while solving.
    pub fn shuffle(&mut self) -> bool {
        if self.is_solving() {
            warn!("shuffle ignored while solving");
            return false;
        }

        self.board = scramble(&self.board, self.config.scramble_steps, &mut self.picker);
        true
    }

    /// Slides the tile at `position` into the blank.
    ///
    /// Illegal positions and moves during playback are ignored and return
    /// `false`.
    pub fn move_to(&mut self, position: usize) -> bool {
        if self.is_solving() {
            debug!(position, "move ignored while solving");
            return false;
        }

        match self.board.apply_move(position) {
            Some(board) => {
                self.board = board;
                true
            }
            None => {
                debug!(position, "illegal move ignored");
                false
            }
        }
    }

    /// Computes an optimal solution for the current board and starts
    /// frame-driven playback of it (see [`Session::tick`]).
    ///
    /// Returns `Ok(false)` if a playback is already running.
    pub fn solve(&mut self) -> Result<bool> {
        if self.is_solving() {
            warn!("solve ignored while solving");
            return Ok(false);
        }

        let path = solve(&self.board)?;
        self.playback = Some(Playback::new(path, self.config.step_delay));
        Ok(true)
    }

    /// Advances frame-driven playback. Returns the new board when one was
    /// emitted; the solving flag clears after the last board.
    pub fn tick(&mut self, now: Instant) -> Option<&Board<DIM, CELLS>> {
        let playback = self.playback.as_mut()?;
        let emitted = playback.tick(now);
        if playback.is_finished() {
            self.playback = None;
        }

        self.board = emitted?;
        Some(&self.board)
    }

    /// Solves the current board and plays the whole path, calling `render`
    /// after each board is installed.
    ///
    /// Returns the number of boards emitted, or `Ok(0)` if a frame-driven
    /// playback is already active.
    pub async fn play<P, F>(&mut self, pacer: &mut P, mut render: F) -> Result<usize>
    where
        P: Pacer,
        F: FnMut(&Self),
    {
        if !self.solve()? {
            return Ok(0);
        }

        let delay = self.config.step_delay;
        let mut emitted = 0;

        while let Some(board) = self.playback.as_mut().and_then(Playback::advance) {
            if emitted > 0 {
                pacer.pause(delay).await;
            }
            self.board = board;
            render(self);
            emitted += 1;
        }

        self.playback = None;
        Ok(emitted)
    }

    /// The board as the renderer lays it out, bitmaps attached by identity.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_, B>> + '_ {
        self.board
            .cells()
            .iter()
            .enumerate()
            .map(|(position, &identity)| Cell {
                position,
                identity,
                bitmap: self.tiles.bitmap(identity),
            })
    }
}
