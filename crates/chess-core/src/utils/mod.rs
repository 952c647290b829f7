pub mod zobrist;

pub use zobrist::ZobristHash;
