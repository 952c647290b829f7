use crate::board::Position;
use crate::utils::ZobristHash;
use std::collections::HashMap;

const REPETITION_LOCK_THRESHOLD: u32 = 3;

/// Tracks how many times each position fingerprint has been visited across
/// a chess engine's lifetime, to keep a search from steering into a draw
/// by repetition. Fingerprints are Zobrist hashes over board contents,
/// side to move, castling rights, and en-passant target -- anything that
/// affects legal continuations.
#[derive(Debug, Clone, Default)]
pub struct RepetitionMap {
    counts: HashMap<u64, u32>,
}

impl RepetitionMap {
    pub fn new() -> Self {
        RepetitionMap::default()
    }

    pub fn add_position(&mut self, position: &Position, keys: &ZobristHash) {
        *self.counts.entry(position.zobrist_hash(keys)).or_insert(0) += 1;
    }

    /// True once `position`'s fingerprint has already been recorded at
    /// least three times -- the search must not voluntarily enter it.
    pub fn is_locked(&self, position: &Position, keys: &ZobristHash) -> bool {
        self.counts.get(&position.zobrist_hash(keys)).copied().unwrap_or(0) >= REPETITION_LOCK_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locks_after_three_occurrences() {
        let pos = Position::starting_position();
        let keys = ZobristHash::new();
        let mut map = RepetitionMap::new();
        assert!(!map.is_locked(&pos, &keys));
        map.add_position(&pos, &keys);
        map.add_position(&pos, &keys);
        assert!(!map.is_locked(&pos, &keys));
        map.add_position(&pos, &keys);
        assert!(map.is_locked(&pos, &keys));
    }

    #[test]
    fn test_distinct_positions_tracked_independently() {
        let mut map = RepetitionMap::new();
        let keys = ZobristHash::new();
        let start = Position::starting_position();
        let after_e4 = {
            let mut p = start.clone();
            p.apply_move(crate::moves::Move::normal(crate::Square::E2, crate::Square::E4)).unwrap();
            p
        };
        map.add_position(&start, &keys);
        map.add_position(&start, &keys);
        map.add_position(&start, &keys);
        assert!(map.is_locked(&start, &keys));
        assert!(!map.is_locked(&after_e4, &keys));
    }
}
