//! Benchmarks for the corner solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use corner_solver::moves::parse_sequence;
use corner_solver::{CornerHeuristic, IdaStar, Move, PatternDatabase, PuzzleState};

/// Benchmark building a depth-5 pattern database.
fn bench_build_database(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_db");
    group.sample_size(10);
    group.bench_function("build_depth_5", |b| {
        b.iter(|| PatternDatabase::build(black_box(5)))
    });
    group.finish();
}

/// Benchmark applying every move in the catalog to a scrambled state.
fn bench_apply_moves(c: &mut Criterion) {
    let state = PuzzleState::new().apply_sequence(&parse_sequence("R U F' U2 R'").unwrap());

    c.bench_function("apply_all_moves", |b| {
        b.iter(|| {
            for mv in Move::ALL {
                black_box(black_box(&state).apply(mv));
            }
        })
    });
}

/// Benchmark packing the corner key.
fn bench_corner_key(c: &mut Criterion) {
    let state = PuzzleState::new().apply_sequence(&parse_sequence("F R U'").unwrap());

    c.bench_function("corner_key", |b| b.iter(|| black_box(&state).corner_key()));
}

/// Benchmark solving a six-move scramble with a depth-7 table.
fn bench_solve(c: &mut Criterion) {
    let database = PatternDatabase::build(7);
    let heuristic = CornerHeuristic::new(&database).unwrap();
    let solver = IdaStar::new(&heuristic, 15);
    let state = PuzzleState::new().apply_sequence(&parse_sequence("R U F R2 U' F'").unwrap());

    c.bench_function("solve_six_moves", |b| b.iter(|| solver.solve(black_box(&state))));
}

criterion_group!(
    benches,
    bench_build_database,
    bench_apply_moves,
    bench_corner_key,
    bench_solve
);
criterion_main!(benches);
