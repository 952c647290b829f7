use crate::board::Position;
use crate::evaluation::{EvaluationFeatures, Evaluator};
use crate::moves::Move;
use crate::pieces::{Color, PieceType};
use std::collections::{HashMap, HashSet};

/// Maps search depth to the set of moves that recently caused a beta
/// cut-off at that depth. Scoped to a single `search_move` invocation;
/// child results merge into the parent's table as the recursion unwinds.
#[derive(Debug, Clone, Default)]
pub struct KillerTable {
    by_depth: HashMap<u8, HashSet<Move>>,
}

impl KillerTable {
    pub fn new() -> Self {
        KillerTable::default()
    }

    pub fn record(&mut self, depth: u8, mv: Move) {
        self.by_depth.entry(depth).or_default().insert(mv);
    }

    pub fn contains(&self, depth: u8, mv: &Move) -> bool {
        self.by_depth.get(&depth).is_some_and(|set| set.contains(mv))
    }

    /// Folds every depth's killer set from `other` into `self`.
    pub fn merge(&mut self, other: &KillerTable) {
        for (depth, moves) in &other.by_depth {
            self.by_depth.entry(*depth).or_default().extend(moves.iter().copied());
        }
    }
}

/// Victim rank for the MVV-LVA ordinal: ascending `P < N < B < R < Q`.
fn victim_rank(piece_type: PieceType) -> u8 {
    match piece_type {
        PieceType::Pawn => 0,
        PieceType::Knight => 1,
        PieceType::Bishop => 2,
        PieceType::Rook => 3,
        PieceType::Queen => 4,
        PieceType::King => 5,
    }
}

/// Attacker rank for the MVV-LVA ordinal: ascending `k < q < r < b < n < p`.
fn attacker_rank(piece_type: PieceType) -> u8 {
    match piece_type {
        PieceType::King => 0,
        PieceType::Queen => 1,
        PieceType::Rook => 2,
        PieceType::Bishop => 3,
        PieceType::Knight => 4,
        PieceType::Pawn => 5,
    }
}

/// Position of `(victim, attacker)` in the 30-entry capture-value table,
/// lexicographic on `(victim_rank, attacker_rank)`. Smaller ordinal is a
/// stronger capture.
fn capture_ordinal(victim: PieceType, attacker: PieceType) -> u8 {
    victim_rank(victim) * 6 + attacker_rank(attacker)
}

fn capture_value(position: &Position, mv: &Move) -> Option<u8> {
    if !mv.capture {
        return None;
    }
    let attacker = position.piece_at(mv.from)?.piece_type;
    let victim = if mv.en_passant_capture {
        PieceType::Pawn
    } else {
        position.piece_at(mv.to)?.piece_type
    };
    Some(capture_ordinal(victim, attacker))
}

/// Applies `mv` and scores the resulting position from the mover's
/// opponent's perspective using material only, per rule 4 of the ordering
/// contract.
fn quiet_score(position: &Position, mv: Move, mover: Color) -> f32 {
    let mut after = position.clone();
    if after.apply_move(mv).is_err() {
        return f32::NEG_INFINITY;
    }
    let evaluator = Evaluator::new(EvaluationFeatures {
        material_dynamic_game_phase: false,
        piece_square_tables: false,
        piece_mobility: false,
        pawn_structure: false,
        bishop_pair: false,
        dynamic_pawns: false,
    });
    evaluator.evaluate(&after, mover.opposite())
}

/// Orders `moves` descending by promise: captures before quiet moves,
/// stronger captures first (MVV-LVA), killers at this depth next, and
/// quiet moves last, ranked by a cheap post-move material estimate.
pub fn sort_moves(moves: &mut [Move], position: &Position, depth: u8, killers: &KillerTable, killer_enabled: bool) {
    let mover = position.side_to_move();

    let mut keyed: Vec<(Move, (u8, u8, u8, i32))> = moves
        .iter()
        .map(|&mv| {
            let capture_tier = if mv.capture { 0u8 } else { 1u8 };
            let ordinal = capture_value(position, &mv).unwrap_or(u8::MAX);
            let killer_tier = if killer_enabled && killers.contains(depth, &mv) { 0u8 } else { 1u8 };
            let score = quiet_score(position, mv, mover);
            // Descending score packed into an ascending sort key.
            let inverted_score = (-score * 1000.0) as i32;
            (mv, (capture_tier, ordinal, killer_tier, inverted_score))
        })
        .collect();

    keyed.sort_by_key(|(_, key)| *key);
    for (slot, (mv, _)) in moves.iter_mut().zip(keyed.into_iter()) {
        *slot = mv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn test_capture_ordinal_pawn_group_is_lowest() {
        assert!(capture_ordinal(PieceType::Pawn, PieceType::King) < capture_ordinal(PieceType::Queen, PieceType::King));
    }

    #[test]
    fn test_capture_ordinal_attacker_tiebreak() {
        let king_attacker = capture_ordinal(PieceType::Queen, PieceType::King);
        let pawn_attacker = capture_ordinal(PieceType::Queen, PieceType::Pawn);
        assert!(king_attacker < pawn_attacker);
    }

    #[test]
    fn test_captures_sort_before_quiet_moves() {
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut moves = vec![Move::normal(Square::E1, Square::D1), Move::capture(Square::E4, Square::D5)];
        let killers = KillerTable::new();
        sort_moves(&mut moves, &pos, 0, &killers, false);
        assert!(moves[0].capture);
    }

    #[test]
    fn test_killer_table_merge() {
        let mut parent = KillerTable::new();
        let mut child = KillerTable::new();
        let mv = Move::normal(Square::E2, Square::E4);
        child.record(3, mv);
        parent.merge(&child);
        assert!(parent.contains(3, &mv));
    }
}
