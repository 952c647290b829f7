pub mod evaluator;
pub mod tables;

pub use evaluator::{EvaluationFeatures, Evaluator};
