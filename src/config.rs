//! Tuning knobs for scrambling and playback.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Number of random legal moves applied when shuffling.
pub const DEFAULT_SCRAMBLE_STEPS: usize = 100;

/// Pause between two emitted states during solve playback.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(300);

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleConfig {
    /// Random legal moves per shuffle.
    pub scramble_steps: usize,
    /// Minimum delay between playback frames.
    pub step_delay: Duration,
    /// Fixed seed for reproducible shuffles; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            scramble_steps: DEFAULT_SCRAMBLE_STEPS,
            step_delay: DEFAULT_STEP_DELAY,
            seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Builds the random source described by this configuration.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
