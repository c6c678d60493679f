//! Search and evaluation timings on a few fixed positions.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use gomoku::eval::evaluate_board;
use gomoku::search::{generate_candidates, Searcher};
use gomoku::{AIEngine, Board, Difficulty, EngineConfig, Pos, Stone};

fn criterion_configured() -> Criterion {
    Criterion::default().configure_from_args()
}

/// Board after replaying `moves`, colors alternating from Black.
fn position(moves: &[(u8, u8)]) -> Board {
    let mut board = Board::new();
    for &(r, c) in moves {
        let stone = board.side_to_move();
        if board.place(Pos::new(r, c), stone).is_err() {
            break;
        }
    }
    board
}

fn position_samples() -> [Board; 3] {
    let opening = position(&[(7, 7), (7, 8)]);
    let early = position(&[(7, 7), (7, 8), (8, 8), (6, 6), (8, 6), (9, 9)]);
    let middle = position(&[
        (7, 7),
        (7, 8),
        (8, 8),
        (6, 6),
        (8, 6),
        (9, 9),
        (8, 7),
        (8, 5),
        (6, 8),
        (5, 9),
        (9, 7),
        (10, 7),
    ]);
    [opening, early, middle]
}

fn bench_evaluate_board(criterion: &mut Criterion) {
    let samples = position_samples();
    let mut group = criterion.benchmark_group("eval/evaluate_board");
    for (index, board) in samples.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("pos", index), board, |bench, input| {
            bench.iter(|| black_box(evaluate_board(input, Stone::Black)))
        });
    }
    group.finish();
}

fn bench_candidates(criterion: &mut Criterion) {
    let samples = position_samples();
    let mut group = criterion.benchmark_group("search/generate_candidates");
    for (index, board) in samples.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("pos", index), board, |bench, input| {
            bench.iter(|| black_box(generate_candidates(input, input.side_to_move(), 20, 2)))
        });
    }
    group.finish();
}

fn bench_minimax_depth(criterion: &mut Criterion) {
    let samples = position_samples();
    let config = EngineConfig::default();
    let mut group = criterion.benchmark_group("search/minimax");
    group.sample_size(10);
    for depth in [2u8, 3, 4] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &samples[1], |bench, input| {
            bench.iter(|| {
                let mut searcher = Searcher::new(input.side_to_move(), &config);
                black_box(searcher.search(input, depth))
            })
        });
    }
    group.finish();
}

fn bench_select_move(criterion: &mut Criterion) {
    let samples = position_samples();
    let engine = AIEngine::with_difficulty(Difficulty::Medium);
    let mut group = criterion.benchmark_group("engine/select_move");
    group.sample_size(10);
    for (index, board) in samples.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("pos", index), board, |bench, input| {
            bench.iter(|| black_box(engine.select_move(input, input.side_to_move())))
        });
    }
    group.finish();
}

fn main() {
    let mut criterion = criterion_configured();
    bench_evaluate_board(&mut criterion);
    bench_candidates(&mut criterion);
    bench_minimax_depth(&mut criterion);
    bench_select_move(&mut criterion);
    criterion.final_summary();
}
