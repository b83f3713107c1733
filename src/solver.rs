//! A* search for optimal sliding-tile solutions.
//!
//! Key points:
//! - States are keyed by their raw identity permutation (`[u8; CELLS]`)
//! - FxHashMap/FxHashSet for best-known costs, predecessor links, and the
//!   finalized set
//! - Manhattan-distance-sum heuristic, admissible and consistent, so the
//!   first time the goal is popped its cost is optimal
//!
//! There is no bound on the number of stored states. That is fine for 2x2 and
//! 3x3 boards (at most 9!/2 reachable states) and for shallow 4x4 scrambles;
//! deeper 4x4 instances need iterative deepening or pattern databases.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::board::{Board, BoardKey, Direction};
use crate::error::{PuzzleError, Result};

/// An optimal sequence of boards from a start state to the solved state.
///
/// Consecutive boards differ by exactly one legal move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolvePath<const DIM: usize, const CELLS: usize> {
    states: Vec<Board<DIM, CELLS>>,
    explored: usize,
}

impl<const DIM: usize, const CELLS: usize> SolvePath<DIM, CELLS> {
    /// All boards, starting state first. Never empty.
    #[inline]
    pub fn states(&self) -> &[Board<DIM, CELLS>] {
        &self.states
    }

    pub fn into_states(self) -> Vec<Board<DIM, CELLS>> {
        self.states
    }

    /// Number of moves, one less than the number of states.
    #[inline]
    pub fn moves(&self) -> usize {
        self.states.len() - 1
    }

    /// Number of states the search finalized before reaching the goal.
    #[inline]
    pub fn explored(&self) -> usize {
        self.explored
    }

    /// The tile moved and its direction, for every step of the path.
    pub fn directions(&self) -> Vec<(u8, Direction)> {
        self.states
            .windows(2)
            .filter_map(|pair| pair[0].describe_move(&pair[1]))
            .collect()
    }
}

/// A frontier entry in the best-first search.
#[derive(Clone, Copy)]
struct FrontierEntry<const DIM: usize, const CELLS: usize> {
    /// `cost + heuristic`, the A* priority.
    estimated_total: u32,
    /// Moves taken from the start to reach `board`.
    cost: u32,
    board: Board<DIM, CELLS>,
}

impl<const DIM: usize, const CELLS: usize> PartialEq for FrontierEntry<DIM, CELLS> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<const DIM: usize, const CELLS: usize> Eq for FrontierEntry<DIM, CELLS> {}

impl<const DIM: usize, const CELLS: usize> Ord for FrontierEntry<DIM, CELLS> {
    /// Reversed on `estimated_total` so `BinaryHeap` pops the cheapest entry;
    /// ties favour the deeper entry, which reaches the goal sooner.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_total
            .cmp(&self.estimated_total)
            .then_with(|| self.cost.cmp(&other.cost))
    }
}

impl<const DIM: usize, const CELLS: usize> PartialOrd for FrontierEntry<DIM, CELLS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a shortest move sequence from `start` to the solved board.
///
/// Returns [`PuzzleError::Unsolvable`] once every reachable state has been
/// finalized without meeting the goal (the start was in the wrong parity
/// class).
pub fn solve<const DIM: usize, const CELLS: usize>(
    start: &Board<DIM, CELLS>,
) -> Result<SolvePath<DIM, CELLS>> {
    let start_key = start.key();
    let goal_key = Board::<DIM, CELLS>::solved().key();

    let mut frontier = BinaryHeap::new();
    let mut best_cost: FxHashMap<BoardKey<CELLS>, u32> = FxHashMap::default();
    let mut came_from: FxHashMap<BoardKey<CELLS>, BoardKey<CELLS>> = FxHashMap::default();
    let mut finalized: FxHashSet<BoardKey<CELLS>> = FxHashSet::default();

    info!(
        dim = DIM,
        heuristic = start.heuristic(),
        "solving board"
    );

    best_cost.insert(start_key, 0);
    frontier.push(FrontierEntry {
        estimated_total: start.heuristic(),
        cost: 0,
        board: *start,
    });

    while let Some(entry) = frontier.pop() {
        let key = entry.board.key();

        if key == goal_key {
            let states = reconstruct_path(&came_from, start_key, goal_key)?;
            let explored = finalized.len();
            info!(moves = states.len() - 1, explored, "found optimal solution");
            return Ok(SolvePath { states, explored });
        }

        // stale entry: a cheaper copy of this state was already expanded
        if !finalized.insert(key) {
            continue;
        }

        let successor_cost = entry.cost + 1;
        for target in entry.board.legal_targets().iter() {
            let successor = entry.board.slide(target);
            let successor_key = successor.key();

            if finalized.contains(&successor_key) {
                continue;
            }
            if best_cost
                .get(&successor_key)
                .is_some_and(|&known| known <= successor_cost)
            {
                continue;
            }

            best_cost.insert(successor_key, successor_cost);
            came_from.insert(successor_key, key);
            frontier.push(FrontierEntry {
                estimated_total: successor_cost + successor.heuristic(),
                cost: successor_cost,
                board: successor,
            });
        }
    }

    let explored = finalized.len();
    debug!(explored, "frontier exhausted");
    Err(PuzzleError::Unsolvable { explored })
}

/// Walks predecessor links back from the goal and returns the boards in
/// chronological order.
fn reconstruct_path<const DIM: usize, const CELLS: usize>(
    came_from: &FxHashMap<BoardKey<CELLS>, BoardKey<CELLS>>,
    start_key: BoardKey<CELLS>,
    goal_key: BoardKey<CELLS>,
) -> Result<Vec<Board<DIM, CELLS>>> {
    let mut keys = vec![goal_key];
    let mut current = goal_key;

    while current != start_key {
        current = *came_from
            .get(&current)
            .ok_or_else(|| PuzzleError::invalid_board("predecessor chain is broken"))?;
        keys.push(current);
    }

    keys.reverse();
    keys.into_iter().map(Board::from_cells).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::scramble::scramble;

    type Board2 = Board<2, 4>;
    type Board3 = Board<3, 9>;

    /// Breadth-first distances from the solved board to every reachable state.
    fn bfs_distances<const DIM: usize, const CELLS: usize>() -> FxHashMap<BoardKey<CELLS>, u32> {
        let solved = Board::<DIM, CELLS>::solved();
        let mut distances = FxHashMap::default();
        let mut queue = VecDeque::from([(solved, 0u32)]);
        distances.insert(solved.key(), 0);

        while let Some((board, distance)) = queue.pop_front() {
            for target in board.legal_targets().iter() {
                let next = board.slide(target);
                if !distances.contains_key(&next.key()) {
                    distances.insert(next.key(), distance + 1);
                    queue.push_back((next, distance + 1));
                }
            }
        }

        distances
    }

    fn assert_valid_path<const DIM: usize, const CELLS: usize>(
        start: &Board<DIM, CELLS>,
        path: &SolvePath<DIM, CELLS>,
    ) {
        let states = path.states();
        assert_eq!(states.first(), Some(start));
        assert!(states.last().is_some_and(Board::is_solved));
        for pair in states.windows(2) {
            assert_eq!(
                pair[0].apply_move(pair[1].blank_position()),
                Some(pair[1]),
                "consecutive states are not one legal move apart"
            );
        }
    }

    #[test]
    fn test_single_move_scenario() {
        let solved = Board3::solved();
        let start = solved.apply_move(7).unwrap();
        assert_eq!(start.cells(), &[0, 1, 2, 3, 4, 5, 6, 8, 7]);
        assert!(!start.is_solved());

        let path = solve(&start).unwrap();
        assert_eq!(path.moves(), 1);
        assert_eq!(path.states().last(), Some(&solved));
        assert_eq!(path.directions(), vec![(7, Direction::Left)]);
        // only the start is expanded before the goal is popped
        assert_eq!(path.explored(), 1);
    }

    #[test]
    fn test_known_fixture_matches_bfs() {
        let start = Board3::from_cells([8, 0, 1, 3, 4, 2, 6, 7, 5]).unwrap();
        let path = solve(&start).unwrap();
        let distances = bfs_distances::<3, 9>();

        assert_eq!(path.moves(), 4);
        assert_eq!(path.moves() as u32, distances[&start.key()]);
        assert_valid_path(&start, &path);
    }

    #[test]
    fn test_already_solved_board() {
        let path = solve(&Board3::solved()).unwrap();
        assert_eq!(path.moves(), 0);
        assert_eq!(path.states(), &[Board3::solved()]);
        assert!(path.directions().is_empty());
        assert_eq!(path.explored(), 0);
    }

    #[test]
    fn test_every_2x2_state_is_solved_optimally() {
        let distances = bfs_distances::<2, 4>();
        // half of 4! permutations are reachable
        assert_eq!(distances.len(), 12);

        for (&key, &distance) in &distances {
            let start = Board2::from_cells(key).unwrap();
            let path = solve(&start).unwrap();
            assert_eq!(path.moves() as u32, distance, "suboptimal path for {key:?}");
            assert_valid_path(&start, &path);
        }
    }

    #[test]
    fn test_heuristic_is_admissible_on_full_3x3_space() {
        let distances = bfs_distances::<3, 9>();
        assert_eq!(distances.len(), 181_440);

        for (&key, &distance) in &distances {
            let board = Board3::from_cells(key).unwrap();
            assert!(board.is_solvable());
            assert!(
                board.heuristic() <= distance,
                "heuristic {} overestimates distance {distance} for {key:?}",
                board.heuristic()
            );
        }
    }

    #[test]
    fn test_3x3_paths_match_bfs_distance() {
        let distances = bfs_distances::<3, 9>();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        for steps in [3, 8, 15, 30, 60, 100] {
            let start = scramble(&Board3::solved(), steps, &mut rng);
            let path = solve(&start).unwrap();
            assert_eq!(
                path.moves() as u32,
                distances[&start.key()],
                "suboptimal path after {steps} scramble steps"
            );
            assert_valid_path(&start, &path);
        }
    }

    #[test]
    fn test_unsolvable_2x2_reports_exhaustion() {
        let start = Board2::from_cells([1, 0, 2, 3]).unwrap();
        assert_eq!(solve(&start), Err(PuzzleError::Unsolvable { explored: 12 }));
    }

    #[test]
    fn test_unsolvable_3x3_terminates() {
        let start = Board3::from_cells([1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(
            solve(&start),
            Err(PuzzleError::Unsolvable { explored: 181_440 })
        );
    }

    #[test]
    fn test_shallow_4x4_scramble() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let start = scramble(&Board::<4, 16>::solved(), 20, &mut rng);
        let path = solve(&start).unwrap();
        assert!(path.moves() <= 20);
        assert!(path.moves() as u32 >= start.heuristic());
        assert_valid_path(&start, &path);
    }
}
