//! Benchmarks for the sliding-tile solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use slider::board::Board;
use slider::scramble::scramble;
use slider::solver::solve;
use slider::tiles::PUZZLE_3X3;
use slider::PuzzleOps;

/// A reproducible 3x3 board roughly twenty moves from solved.
fn scrambled_3x3() -> Board<3, 9> {
    scramble(&Board::solved(), 100, &mut ChaCha8Rng::seed_from_u64(17))
}

/// Benchmark solving a fully scrambled 3x3 board.
fn bench_solve_3x3(c: &mut Criterion) {
    let start = scrambled_3x3();

    c.bench_function("solve_3x3", |b| b.iter(|| solve(black_box(&start))));
}

/// Benchmark solving shallow 4x4 scrambles.
fn bench_solve_4x4_shallow(c: &mut Criterion) {
    let start = scramble(&Board::<4, 16>::solved(), 24, &mut ChaCha8Rng::seed_from_u64(17));

    let mut group = c.benchmark_group("4x4");
    group.sample_size(10);
    group.bench_function("solve_24_steps", |b| b.iter(|| solve(black_box(&start))));
    group.finish();
}

/// Benchmark the default 100-step scramble.
fn bench_scramble(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    c.bench_function("scramble_100", |b| {
        b.iter(|| scramble(black_box(&Board::<3, 9>::solved()), 100, &mut rng))
    });
}

/// Benchmark the Manhattan heuristic.
fn bench_heuristic(c: &mut Criterion) {
    let start = scrambled_3x3();

    c.bench_function("manhattan_heuristic", |b| {
        b.iter(|| black_box(&start).heuristic())
    });
}

/// Benchmark formatting a solution through the dynamic interface.
fn bench_format_path(c: &mut Criterion) {
    let cells = scrambled_3x3().cells().to_vec();
    let path = PUZZLE_3X3.solve(&cells).unwrap().states;

    c.bench_function("format_path", |b| {
        b.iter(|| PUZZLE_3X3.format_path(black_box(&path)))
    });
}

criterion_group!(
    benches,
    bench_solve_3x3,
    bench_solve_4x4_shallow,
    bench_scramble,
    bench_heuristic,
    bench_format_path
);
criterion_main!(benches);
