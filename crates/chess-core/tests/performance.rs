use chess_core::{search_move, EvaluationFeatures, Evaluator, MoveGenerator, Position, RepetitionMap, SearchFeatures, ZobristHash};
use std::time::Instant;

#[test]
fn benchmark_move_generation_throughput() {
    let position = Position::starting_position();
    let generator = MoveGenerator::new();

    let iterations = 1_000;
    let start = Instant::now();
    for _ in 0..iterations {
        let moves = generator.generate_legal_moves(&position);
        assert_eq!(moves.len(), 20);
    }
    let duration = start.elapsed();

    let moves_per_second = iterations as f64 / duration.as_secs_f64();
    println!("move generation: {:.0} calls/sec", moves_per_second);
    assert!(moves_per_second > 1_000.0, "move generation too slow: {moves_per_second:.0}/sec");
}

#[test]
fn benchmark_evaluation_throughput() {
    let position = Position::starting_position();
    let evaluator = Evaluator::new(EvaluationFeatures::STANDARD);

    let iterations = 1_000;
    let start = Instant::now();
    for _ in 0..iterations {
        let score = evaluator.evaluate(&position, chess_core::Color::White);
        assert!(score.abs() < 1000.0, "evaluation seems unreasonable: {score}");
    }
    let duration = start.elapsed();

    let evals_per_second = iterations as f64 / duration.as_secs_f64();
    println!("evaluation: {:.0} calls/sec", evals_per_second);
    assert!(evals_per_second > 1_000.0, "evaluation too slow: {evals_per_second:.0}/sec");
}

#[test]
fn benchmark_search_depth_three() {
    let generator = MoveGenerator::new();
    let evaluator = Evaluator::new(EvaluationFeatures::STANDARD);
    let zobrist = ZobristHash::new();

    let iterations = 5;
    let start = Instant::now();
    for _ in 0..iterations {
        let mut position = Position::starting_position();
        let mut repetition = RepetitionMap::new();
        let result = search_move(
            &mut position,
            &generator,
            &evaluator,
            3,
            SearchFeatures::ALPHA_BETA_SORT_KILLER,
            &mut repetition,
            &zobrist,
        );
        assert!(result.best.is_some());
    }
    let duration = start.elapsed();

    let searches_per_second = iterations as f64 / duration.as_secs_f64();
    println!("depth-3 alpha-beta search: {searches_per_second:.2} searches/sec");
    assert!(searches_per_second > 0.1, "search too slow: {searches_per_second:.2}/sec");
}
