use chess_engine::ChessEngineBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Chess engine demo");
    println!("==================");

    let mut engine = ChessEngineBuilder::new().with_depth(4).build()?;

    println!("Engine created.");
    println!("Starting position: {}", engine.get_fen());
    println!("Side to move: {:?}", engine.get_side_to_move());

    let legal_moves = engine.get_legal_moves();
    println!("Legal moves available: {}", legal_moves.len());

    if !legal_moves.is_empty() {
        println!("Searching for the best move...");
        match engine.find_best_move()? {
            Some(best_move) => println!("Best move found: {best_move}"),
            None => println!("No moves available"),
        }
    }

    Ok(())
}
