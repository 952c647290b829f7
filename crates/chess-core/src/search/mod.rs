pub mod driver;
pub mod ordering;
pub mod repetition;

pub use driver::{search_move, SearchFeatures, SearchResult};
pub use ordering::KillerTable;
pub use repetition::RepetitionMap;
