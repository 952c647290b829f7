use chess_core::{Color, GameState};
use chess_engine::ChessEngineBuilder;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Chess Engine Basic Usage Example");
    println!("=================================\n");

    let mut engine = ChessEngineBuilder::new().with_depth(6).build()?;

    println!("Engine initialized successfully!");
    println!("Starting position: {}", engine.get_fen());

    loop {
        display_game_info(&engine);

        let result = engine.get_game_result();
        if result != GameState::Active {
            println!("\nGame Over! Result: {:?}", result);
            break;
        }

        if engine.get_side_to_move() == Color::White {
            print!("\nEnter your move (e.g., e2-e4): ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            let move_str = input.trim();

            if move_str == "quit" {
                break;
            }

            match engine.make_move_from_uci(move_str) {
                Ok(result) => {
                    if result.success {
                        println!("Move {} played successfully!", move_str);
                    } else {
                        println!("Invalid move: {}", move_str);
                        continue;
                    }
                }
                Err(e) => {
                    println!("Error making move: {}", e);
                    continue;
                }
            }
        } else {
            println!("\nComputer is thinking...");

            match engine.find_best_move() {
                Ok(Some(best_move)) => {
                    println!("Computer plays: {}", best_move);
                    engine.make_move(best_move)?;
                }
                Ok(None) => {
                    println!("No legal moves available");
                    break;
                }
                Err(e) => {
                    println!("Error finding best move: {}", e);
                    break;
                }
            }
        }
    }

    Ok(())
}

fn display_game_info(engine: &chess_engine::ChessEngine) {
    let info = engine.get_game_info();

    println!("\n{}", "=".repeat(50));
    println!("Side to move: {:?}", info.side_to_move);
    println!("Legal moves: {} available", info.legal_moves.len());

    if info.is_check {
        println!("In check!");
    }

    if info.is_checkmate {
        println!("Checkmate!");
    } else if info.is_stalemate {
        println!("Stalemate!");
    } else if info.is_draw {
        println!("Draw!");
    }

    println!("Halfmove clock: {}", info.halfmove_clock);
    println!("Fullmove number: {}", info.fullmove_number);

    let evaluation = engine.evaluate();
    if evaluation > 0.0 {
        println!("Position evaluation: +{:.2} (White advantage)", evaluation);
    } else if evaluation < 0.0 {
        println!("Position evaluation: {:.2} (Black advantage)", evaluation);
    } else {
        println!("Position evaluation: 0.00 (Equal position)");
    }

    println!("FEN: {}", info.fen);
    println!("{}", "=".repeat(50));

    if !info.legal_moves.is_empty() {
        println!(
            "Some legal moves: {}",
            info.legal_moves
                .iter()
                .take(8)
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        if info.legal_moves.len() > 8 {
            println!("... and {} more", info.legal_moves.len() - 8);
        }
    }
}
