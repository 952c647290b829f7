pub mod generator;
pub mod mv;

pub use generator::MoveGenerator;
pub use mv::Move;
