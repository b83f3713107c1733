//! Random-walk scrambling.
//!
//! A scramble applies a fixed number of uniformly chosen legal moves. Legal
//! moves are invertible, so whatever board the walk starts from stays in the
//! same solvability class; starting from the solved board (or any board the
//! walk produced earlier) always yields a solvable board.

use rand::Rng;
use tracing::debug;

use crate::board::Board;

/// Source of move choices for [`scramble`].
///
/// Every [`rand::Rng`] is a picker. Tests can script exact choices.
pub trait MovePicker {
    /// Returns an index in `0..count`. `count` is always at least 2.
    fn pick(&mut self, count: usize) -> usize;
}

impl<R: Rng + ?Sized> MovePicker for R {
    #[inline]
    fn pick(&mut self, count: usize) -> usize {
        self.gen_range(0..count)
    }
}

/// Applies `steps` random legal moves to `initial`.
///
/// Picks outside `0..count` wrap around rather than panic.
pub fn scramble<const DIM: usize, const CELLS: usize, P>(
    initial: &Board<DIM, CELLS>,
    steps: usize,
    picker: &mut P,
) -> Board<DIM, CELLS>
where
    P: MovePicker + ?Sized,
{
    let mut board = *initial;

    for _ in 0..steps {
        let targets = board.legal_targets();
        let choice = picker.pick(targets.len()) % targets.len();
        board = board.slide(targets.as_slice()[choice]);
    }

    debug!(
        steps,
        blank = board.blank_position(),
        heuristic = board.heuristic(),
        "scrambled board"
    );
    board
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// Replays a fixed list of choices, cycling when exhausted.
    struct Scripted {
        choices: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        fn new(choices: &[usize]) -> Self {
            Self {
                choices: choices.to_vec(),
                next: 0,
            }
        }
    }

    impl MovePicker for Scripted {
        fn pick(&mut self, _count: usize) -> usize {
            let choice = self.choices[self.next % self.choices.len()];
            self.next += 1;
            choice
        }
    }

    #[test]
    fn test_scripted_scramble_is_exact() {
        // blank at 8 offers [5, 7]; then at 5 offers [2, 8, 4]
        let board = scramble(&Board::<3, 9>::solved(), 2, &mut Scripted::new(&[0, 0]));
        assert_eq!(board.cells(), &[0, 1, 8, 3, 4, 2, 6, 7, 5]);
        assert_eq!(board.blank_position(), 2);
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let start = Board::<3, 9>::from_cells([8, 0, 1, 3, 4, 2, 6, 7, 5]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(scramble(&start, 0, &mut rng), start);
    }

    #[test]
    fn test_out_of_range_picks_wrap() {
        let wrapped = scramble(&Board::<3, 9>::solved(), 1, &mut Scripted::new(&[3]));
        let direct = scramble(&Board::<3, 9>::solved(), 1, &mut Scripted::new(&[1]));
        assert_eq!(wrapped, direct);
    }

    #[test]
    fn test_seeded_scramble_is_reproducible() {
        let first = scramble(&Board::<3, 9>::solved(), 100, &mut ChaCha8Rng::seed_from_u64(42));
        let second = scramble(&Board::<3, 9>::solved(), 100, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_scrambles_stay_solvable() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut board = Board::<3, 9>::solved();
        for _ in 0..50 {
            // reshuffling an already scrambled board
            board = scramble(&board, 37, &mut rng);
            assert!(board.is_solvable(), "unsolvable scramble {:?}", board.cells());
        }

        let mut board = Board::<4, 16>::solved();
        for _ in 0..50 {
            board = scramble(&board, 100, &mut rng);
            assert!(board.is_solvable(), "unsolvable scramble {:?}", board.cells());
        }
    }
}
