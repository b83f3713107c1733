//! Sliding-Tile Puzzle
//!
//! Scrambles an N-puzzle with random legal moves, finds an optimal solution
//! with A* search, and replays it step by step, either in the terminal or in
//! an interactive 3D viewer.

mod visualization;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slider::board::parse_cells;
use slider::config::{PuzzleConfig, DEFAULT_SCRAMBLE_STEPS, DEFAULT_STEP_DELAY};
use slider::error::{PuzzleError, Result};
use slider::playback::SleepPacer;
use slider::scramble::MovePicker;
use slider::session::Session;
use slider::tiles::LabelSlicer;
use slider::{puzzle_for_cells, puzzle_for_dim, SolveSummary};

/// Scrambles and optimally solves sliding-tile puzzles.
#[derive(Parser)]
#[command(name = "slider")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    options: Options,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct Options {
    /// Tiles per row and column (2, 3, or 4).
    #[arg(long, global = true, default_value_t = 3)]
    size: usize,
    /// Random legal moves applied per shuffle.
    #[arg(long, global = true, default_value_t = DEFAULT_SCRAMBLE_STEPS)]
    steps: usize,
    /// Milliseconds between playback steps.
    #[arg(long, global = true, default_value_t = DEFAULT_STEP_DELAY.as_millis() as u64)]
    delay_ms: u64,
    /// Seed for reproducible shuffles.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl Options {
    fn config(&self) -> PuzzleConfig {
        PuzzleConfig {
            scramble_steps: self.steps,
            step_delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print a scrambled board.
    Shuffle,
    /// Print an optimal solution for a board given as comma-separated identities.
    Solve {
        /// Row-major identities; the largest identity is the blank.
        board: String,
    },
    /// Scramble, solve, and replay the solution in the terminal.
    Play,
    /// Open the interactive 3D viewer.
    Display,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.options.config();
    let size = cli.options.size;

    let result = match cli.command {
        Some(Command::Shuffle) => run_shuffle(size, &config),
        Some(Command::Solve { board }) => run_solve(&board),
        Some(Command::Play) => run_play(size, config),
        // default: interactive viewer
        Some(Command::Display) | None => run_display(size, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a scrambled board and its identities for use with `solve`.
fn run_shuffle(size: usize, config: &PuzzleConfig) -> Result<()> {
    let puzzle = puzzle_for_dim(size)?;
    let mut rng = config.rng();
    let cells = puzzle.scramble(config.scramble_steps, &mut rng);

    print!("{}", puzzle.format_board(&cells)?);
    println!("{}", join_cells(&cells));
    Ok(())
}

/// Solves a board given on the command line and prints every step.
fn run_solve(input: &str) -> Result<()> {
    let cells = parse_cells(input)?;
    let puzzle = puzzle_for_cells(cells.len())?;
    let summary = puzzle.solve(&cells)?;

    print!("{}", puzzle.format_path(&summary.states)?);
    println!("\n{}", solve_footer(&summary));
    Ok(())
}

/// Scrambles, then replays the optimal solution with the configured delay.
fn run_play(size: usize, config: PuzzleConfig) -> Result<()> {
    match size {
        2 => play::<2, 4>(config),
        3 => play::<3, 9>(config),
        4 => play::<4, 16>(config),
        dim => Err(PuzzleError::UnsupportedSize { dim }),
    }
}

fn play<const DIM: usize, const CELLS: usize>(config: PuzzleConfig) -> Result<()> {
    let rng = config.rng();
    let mut session = Session::<DIM, CELLS, char, _>::new(&LabelSlicer, config, rng)?;

    let mut step = 0;
    let emitted = pollster::block_on(session.play(&mut SleepPacer, |session| {
        println!("Step {step}:\n{}", render_labels(session));
        step += 1;
    }))?;

    println!("Solved in {} moves", emitted.saturating_sub(1));
    Ok(())
}

fn run_display(size: usize, config: PuzzleConfig) -> Result<()> {
    match size {
        2 => visualization::display::<2, 4>(config),
        3 => visualization::display::<3, 9>(config),
        4 => visualization::display::<4, 16>(config),
        dim => Err(PuzzleError::UnsupportedSize { dim }),
    }
}

/// Renders the board using each tile's label, `.` for the blank.
fn render_labels<const DIM: usize, const CELLS: usize, R: MovePicker>(
    session: &Session<DIM, CELLS, char, R>,
) -> String {
    let mut output = String::with_capacity(CELLS + DIM);
    for cell in session.cells() {
        output.push(cell.bitmap.copied().unwrap_or('.'));
        if (cell.position + 1) % DIM == 0 {
            output.push('\n');
        }
    }
    output
}

fn solve_footer(summary: &SolveSummary) -> String {
    format!(
        "Found optimal solution with {} moves ({} states explored)",
        summary.moves(),
        summary.explored
    )
}

fn join_cells(cells: &[u8]) -> String {
    cells
        .iter()
        .map(|identity| identity.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
