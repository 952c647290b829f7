use chess_engine::{ChessEngine, ChessEngineBuilder, Color, EvaluationFeatures, Result};

fn material_only_engine() -> ChessEngine {
    ChessEngineBuilder::new()
        .with_evaluation_features(EvaluationFeatures {
            material_dynamic_game_phase: false,
            piece_square_tables: false,
            piece_mobility: false,
            pawn_structure: false,
            bishop_pair: false,
            dynamic_pawns: false,
        })
        .build()
        .unwrap()
}

#[test]
fn test_engine_initialization() -> Result<()> {
    let mut engine = ChessEngine::new();
    engine.initialize()?;

    let fen = engine.get_fen();
    assert!(fen.starts_with("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"));

    Ok(())
}

#[test]
fn test_fen_loading_and_evaluation_integration() -> Result<()> {
    let mut engine = material_only_engine();

    let starting_eval = engine.evaluate();
    assert_eq!(starting_eval, 0.0, "starting position is exactly symmetric");

    engine.load_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")?;
    assert_eq!(engine.evaluate(), 9.0, "white queen advantage is exactly its material value");

    engine.load_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1")?;
    assert_eq!(engine.evaluate(), -9.0, "black queen advantage is exactly -9 for White");

    Ok(())
}

#[test]
fn test_multiple_fen_loads() -> Result<()> {
    let mut engine = material_only_engine();

    let positions_and_expected = vec![
        ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", 0.0),
        ("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", 9.0),
        ("3qk3/8/8/8/8/8/8/4K3 w - - 0 1", -9.0),
        ("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", 5.0),
    ];

    for (fen, expected) in positions_and_expected {
        engine.load_fen(fen)?;
        assert_eq!(engine.evaluate(), expected, "FEN '{fen}' should evaluate to exactly {expected}");
    }

    Ok(())
}

#[test]
fn test_engine_from_fen_constructor() -> Result<()> {
    let engine = ChessEngine::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")?;
    assert!(engine.evaluate() > 8.0, "engine created from FEN should see the queen advantage");
    Ok(())
}

#[test]
fn test_tactical_awareness_integration() -> Result<()> {
    let mut engine = material_only_engine();

    engine.load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKB1R w KQkq - 0 1")?; // missing white knight
    let eval_missing_knight = engine.evaluate();

    engine.load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")?;
    let eval_balanced = engine.evaluate();

    assert!(
        eval_missing_knight < eval_balanced,
        "missing piece should worsen evaluation: {eval_missing_knight} vs {eval_balanced}"
    );
    assert_eq!(eval_balanced - eval_missing_knight, 3.0, "missing knight should cost exactly 3.0");

    Ok(())
}

#[test]
fn test_evaluation_sign_convention() -> Result<()> {
    let mut engine = material_only_engine();

    engine.load_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")?;
    let white_eval = engine.evaluate();

    engine.load_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1")?;
    let black_eval = engine.evaluate();

    assert!(white_eval > 0.0);
    assert!(black_eval < 0.0);
    assert_eq!(white_eval, -black_eval);

    Ok(())
}

#[test]
fn test_engine_error_handling() {
    let mut engine = ChessEngine::new();

    let result = engine.load_fen("invalid_fen_string");
    assert!(result.is_err(), "invalid FEN should return an error");

    let result = engine.load_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert!(result.is_err(), "FEN with the wrong rank count should return an error");
}

#[test]
fn test_engine_state_isolation() -> Result<()> {
    let mut engine1 = material_only_engine();
    let mut engine2 = material_only_engine();

    engine1.load_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1")?;
    engine2.load_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1")?;

    let eval1 = engine1.evaluate();
    let eval2 = engine2.evaluate();

    assert!(eval1 > 0.0);
    assert!(eval2 < 0.0);
    assert_eq!(eval1 - eval2, 18.0, "independently-loaded engines should not interfere with each other");

    Ok(())
}

#[test]
fn test_evaluation_after_multiple_loads() -> Result<()> {
    let mut engine = material_only_engine();

    let test_positions = [
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/3QK3 w - - 0 1",
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        "3qk3/8/8/8/8/8/8/4K3 w - - 0 1",
    ];

    let mut evaluations = Vec::new();
    for fen in test_positions {
        engine.load_fen(fen)?;
        evaluations.push(engine.evaluate());
    }

    assert_eq!(evaluations[0], 0.0);
    assert_eq!(evaluations[1], 9.0);
    assert_eq!(evaluations[2], 0.0);
    assert_eq!(evaluations[3], -9.0);
    assert_eq!(evaluations[0], evaluations[2], "re-loading the same position must reproduce the same evaluation");

    Ok(())
}

#[test]
fn test_find_best_move_returns_legal_move() -> Result<()> {
    let mut engine = ChessEngine::new();
    engine.initialize()?;

    let mv = engine.find_best_move()?.expect("opening position has legal moves");
    assert!(engine.is_legal_move(mv));
    Ok(())
}

#[test]
fn test_make_move_emits_events_and_switches_side() -> Result<()> {
    let mut engine = ChessEngine::new();
    engine.initialize()?;

    let mv = "e2-e4".parse().unwrap();
    let result = engine.make_move(mv)?;

    assert!(result.success);
    assert_eq!(engine.get_side_to_move(), Color::Black);
    Ok(())
}
