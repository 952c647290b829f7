use chess_core::{search_move, EvaluationFeatures, Evaluator, MoveGenerator, Position, RepetitionMap, SearchFeatures, ZobristHash};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWIPETE_POSITION: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const ENDGAME_POSITION: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

fn run_search(fen: &str, depth: u8, features: SearchFeatures) {
    let generator = MoveGenerator::new();
    let evaluator = Evaluator::new(EvaluationFeatures::STANDARD);
    let zobrist = ZobristHash::new();
    let mut position = Position::from_fen(fen).unwrap();
    let mut repetition = RepetitionMap::new();

    black_box(search_move(&mut position, &generator, &evaluator, depth, features, &mut repetition, &zobrist));
}

fn benchmark_alpha_beta_vs_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("search/alpha_beta_vs_plain");

    for depth in [2u8, 3] {
        group.bench_with_input(BenchmarkId::new("plain_minimax", depth), &depth, |b, &depth| {
            b.iter(|| run_search(STARTING_POSITION, depth, SearchFeatures::PLAIN))
        });

        group.bench_with_input(BenchmarkId::new("alpha_beta_sort_killer", depth), &depth, |b, &depth| {
            b.iter(|| run_search(STARTING_POSITION, depth, SearchFeatures::ALPHA_BETA_SORT_KILLER))
        });
    }

    group.finish();
}

fn benchmark_search_by_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("search/by_position");

    let positions = [
        ("starting", STARTING_POSITION),
        ("kiwipete", KIWIPETE_POSITION),
        ("endgame", ENDGAME_POSITION),
    ];

    for (name, fen) in positions {
        group.bench_with_input(BenchmarkId::from_parameter(name), fen, |b, fen| {
            b.iter(|| run_search(fen, 3, SearchFeatures::ALPHA_BETA_SORT_KILLER))
        });
    }

    group.finish();
}

fn benchmark_search_by_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search/by_depth");
    group.sample_size(20);

    for depth in [2u8, 3, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| run_search(STARTING_POSITION, depth, SearchFeatures::ALPHA_BETA_SORT_KILLER))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_alpha_beta_vs_plain,
    benchmark_search_by_position,
    benchmark_search_by_depth
);
criterion_main!(benches);
