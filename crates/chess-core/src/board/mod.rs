pub mod bitboard;
pub mod position;
pub mod square;

pub use bitboard::Bitboard;
pub use position::{CastlingRights, GamePhase, GameState, Position, UndoInfo};
pub use square::Square;
