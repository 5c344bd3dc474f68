use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fifteen_common::{board::Board, goal::Goal};
use fifteen_solver::{Heuristic, SearchConfig, Strategy, solve};
use std::hint::black_box;

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

fn bench_heuristics(c: &mut Criterion) {
    let goal = Goal::Standard.board();
    let board = Board::scrambled(60, 1);
    let mut group = c.benchmark_group("heuristics");
    group.bench_function("h1", |b| b.iter(|| black_box(&board).h1(black_box(&goal))));
    group.bench_function("h2", |b| b.iter(|| black_box(&board).h2(black_box(&goal))));
    group.bench_function("manhattan_distance", |b| {
        b.iter(|| black_box(&board).manhattan_distance(black_box(&goal)))
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Full searches on a fixed scramble
// ---------------------------------------------------------------------------

fn bench_strategies(c: &mut Criterion) {
    let board = Board::scrambled(14, 7);
    let mut group = c.benchmark_group("strategies");
    group.sample_size(10);
    for strategy in [
        Strategy::BreadthFirst,
        Strategy::GreedyBestFirst(Heuristic::H1),
        Strategy::GreedyBestFirst(Heuristic::H2),
        Strategy::AStar(Heuristic::H1),
        Strategy::AStar(Heuristic::H2),
    ] {
        let config = SearchConfig::for_strategy(&strategy);
        group.bench_with_input(BenchmarkId::from_parameter(strategy), &board, |b, &board| {
            b.iter(|| solve(black_box(board), strategy, &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_heuristics, bench_strategies);
criterion_main!(benches);
