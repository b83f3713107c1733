//! Timed replay of a solve path.
//!
//! Playback emits every board of a [`SolvePath`] in order, waiting at least
//! the configured delay between two emissions. It cannot be cancelled: once
//! started it runs until the solved board has been emitted.
//!
//! The cursor is driven either one board at a time through
//! [`Playback::advance`] (the async `Session::play` task, which suspends on
//! [`Pacer::pause`] in between) or by [`Playback::tick`] from render loops
//! that poll once per frame.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::Board;
use crate::solver::SolvePath;

/// Suspends the playback task between two emitted states.
pub trait Pacer {
    fn pause(&mut self, delay: Duration) -> impl Future<Output = ()>;
}

/// Blocks the polling thread for the delay.
///
/// Nothing happens until the returned future is polled; the sleep then
/// blocks the executor thread. Suitable when playback is the only task on the
/// thread, e.g. under `pollster::block_on` in a terminal front end.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, delay: Duration) -> impl Future<Output = ()> {
        async move { std::thread::sleep(delay) }
    }
}

/// Cursor over the boards of a solve path.
#[derive(Clone, Debug)]
pub struct Playback<const DIM: usize, const CELLS: usize> {
    states: Vec<Board<DIM, CELLS>>,
    next: usize,
    delay: Duration,
    last_emit: Option<Instant>,
}

impl<const DIM: usize, const CELLS: usize> Playback<DIM, CELLS> {
    pub fn new(path: SolvePath<DIM, CELLS>, delay: Duration) -> Self {
        Self {
            states: path.into_states(),
            next: 0,
            delay,
            last_emit: None,
        }
    }

    /// Boards not yet emitted.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.states.len() - self.next
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.next >= self.states.len()
    }

    /// Emits the next board regardless of timing.
    pub fn advance(&mut self) -> Option<Board<DIM, CELLS>> {
        let board = *self.states.get(self.next)?;
        debug!(step = self.next, remaining = self.remaining() - 1, "playback step");
        self.next += 1;
        Some(board)
    }

    /// Emits the next board if at least `delay` has passed since the previous
    /// emission. The first board is emitted on the first tick.
    ///
    /// Each call emits at most one board, so a late tick never skips ahead.
    pub fn tick(&mut self, now: Instant) -> Option<Board<DIM, CELLS>> {
        if let Some(last) = self.last_emit {
            if now.saturating_duration_since(last) < self.delay {
                return None;
            }
        }

        let board = self.advance()?;
        self.last_emit = Some(now);
        Some(board)
    }
}
