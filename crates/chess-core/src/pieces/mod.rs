pub mod color;
pub mod piece;

pub use color::Color;
pub use piece::{Piece, PieceType};
