pub mod board;
pub mod error;
pub mod evaluation;
pub mod moves;
pub mod pieces;
pub mod search;
pub mod utils;

pub use board::{Bitboard, CastlingRights, GamePhase, GameState, Position, Square, UndoInfo};
pub use error::{ChessError, Result};
pub use evaluation::{EvaluationFeatures, Evaluator};
pub use moves::{Move, MoveGenerator};
pub use pieces::{Color, Piece, PieceType};
pub use search::{search_move, KillerTable, RepetitionMap, SearchFeatures, SearchResult};
pub use utils::ZobristHash;
