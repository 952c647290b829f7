use crate::board::{GamePhase, Position};
use crate::evaluation::tables;
use crate::moves::MoveGenerator;
use crate::pieces::{Color, Piece, PieceType};
use crate::Square;

/// Score returned for a won/lost terminal position, from the winner's
/// point of view.
const INF: f32 = 999.0;

/// Which evaluation terms are folded into the final score. Mirrors the
/// engine's configurable feature set: every term defaults on except dynamic
/// pawn scoring, which only kicks in once explicitly requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationFeatures {
    pub material_dynamic_game_phase: bool,
    pub piece_square_tables: bool,
    pub piece_mobility: bool,
    pub pawn_structure: bool,
    pub bishop_pair: bool,
    pub dynamic_pawns: bool,
}

impl EvaluationFeatures {
    pub const ALL: EvaluationFeatures = EvaluationFeatures {
        material_dynamic_game_phase: true,
        piece_square_tables: true,
        piece_mobility: true,
        pawn_structure: true,
        bishop_pair: true,
        dynamic_pawns: true,
    };

    pub const STANDARD: EvaluationFeatures = EvaluationFeatures {
        dynamic_pawns: false,
        ..EvaluationFeatures::ALL
    };
}

impl Default for EvaluationFeatures {
    fn default() -> Self {
        EvaluationFeatures::STANDARD
    }
}

/// Static position evaluator: material, phase-dependent material bonuses,
/// piece-square tables, mobility, pawn structure and bishop pairs, folded
/// into a single centipawn-scale score from the engine's own point of view.
pub struct Evaluator {
    generator: MoveGenerator,
    features: EvaluationFeatures,
}

impl Evaluator {
    pub fn new(features: EvaluationFeatures) -> Self {
        Evaluator { generator: MoveGenerator::new(), features }
    }

    /// Score from `perspective`'s point of view: positive means
    /// `perspective` stands better. Checkmate and stalemate/fifty-move draws
    /// are resolved before anything else is computed.
    pub fn evaluate(&self, position: &Position, perspective: Color) -> f32 {
        use crate::board::GameState as TerminalState;
        match self.generator.game_state(position) {
            TerminalState::WhiteWins => return if perspective == Color::White { INF } else { -INF },
            TerminalState::BlackWins => return if perspective == Color::Black { INF } else { -INF },
            TerminalState::Draw => return 0.0,
            TerminalState::Active => {}
        }

        let mut score = [0.0f32; 2];
        let mut pawn_score = [0.0f32; 2];
        let mut square_table_score = [0.0f32; 2];
        let mut piece_count = [[0u32; 6]; 2];
        let mut mobility = [[0u32; 6]; 2];
        let mut king_square = [None; 2];

        for square in Square::ALL {
            let Some(piece) = position.piece_at(square) else { continue };
            let color_idx = piece.color.index();
            let type_idx = piece.piece_type.index();

            piece_count[color_idx][type_idx] += 1;
            score[color_idx] += piece.material_value();
            mobility[color_idx][type_idx] += self.mobility_count(position, square, piece);

            if piece.piece_type == PieceType::Pawn && self.features.pawn_structure {
                pawn_score[color_idx] += self.pawn_structure_score(position, square, piece.color);
            }

            if piece.piece_type == PieceType::King {
                king_square[color_idx] = Some(square);
            } else if self.features.piece_square_tables {
                square_table_score[color_idx] += Self::piece_square_value(piece, square);
            }
        }

        if self.features.piece_square_tables && position.game_phase() != GamePhase::Opening {
            for (color_idx, color) in [Color::White, Color::Black].into_iter().enumerate() {
                if let Some(sq) = king_square[color_idx] {
                    square_table_score[color_idx] += Self::king_square_value(color, sq, position.game_phase());
                }
            }
        }

        if self.features.dynamic_pawns {
            for color_idx in 0..2 {
                let pawns = piece_count[color_idx][PieceType::Pawn.index()];
                let bucket = pawns.min(7) as usize;
                pawn_score[color_idx] += pawns as f32 * tables::MATERIAL_DYNAMIC_PAWNS[bucket];
            }
        }

        if self.features.material_dynamic_game_phase {
            let addition_table = match position.game_phase() {
                GamePhase::Opening => &tables::MATERIAL_ADDITION_OPENING,
                GamePhase::Mid => &tables::MATERIAL_ADDITION_MID_GAME,
                GamePhase::End => &tables::MATERIAL_ADDITION_END_GAME,
            };
            for color_idx in 0..2 {
                for type_idx in 0..6 {
                    score[color_idx] += piece_count[color_idx][type_idx] as f32 * addition_table[type_idx];
                }
            }
        }

        if self.features.bishop_pair {
            for color_idx in 0..2 {
                if piece_count[color_idx][PieceType::Bishop.index()] >= tables::MIN_BISHOP_COUNT_FOR_BONUS {
                    score[color_idx] += tables::BISHOP_PAIR_BONUS;
                }
            }
        }

        if self.features.piece_mobility {
            for color_idx in 0..2 {
                for type_idx in 0..6 {
                    let piece_type = PieceType::from_index(type_idx).unwrap();
                    score[color_idx] += tables::mobility_weight(piece_type) * mobility[color_idx][type_idx] as f32;
                }
            }
        }

        for color_idx in 0..2 {
            score[color_idx] += pawn_score[color_idx] + square_table_score[color_idx];
        }

        let (white, black) = (score[Color::White.index()], score[Color::Black.index()]);
        match perspective {
            Color::White => white - black,
            Color::Black => black - white,
        }
    }

    /// Count of squares `piece` can move or capture to, ignoring whether
    /// the move would leave the mover's own king in check -- mobility is a
    /// cheap positional signal, not a legality check.
    fn mobility_count(&self, position: &Position, square: Square, piece: Piece) -> u32 {
        let occupied = position.all_pieces();
        let own = position.pieces_of_color(piece.color);

        if piece.piece_type == PieceType::Pawn {
            let enemy = position.pieces_of_color(piece.color.opposite());
            let mut count = 0u32;
            let step = piece.color.forward_direction();
            if let Some(forward) = Square::from_file_rank(square.file(), (square.rank() as i8 + step) as u8) {
                if occupied & forward.bitboard() == crate::Bitboard::EMPTY {
                    count += 1;
                }
            }
            count += (self.generator.pawn_attacks(square, piece.color) & enemy).count_bits() as u32;
            return count;
        }

        let attacks = self.generator.attacks_for(position, piece.piece_type, square);
        (attacks & !own).count_bits() as u32
    }

    fn piece_square_value(piece: Piece, square: Square) -> f32 {
        let Some(table) = tables::table_for(piece.piece_type) else { return 0.0 };
        let (x, y) = square.to_xy();
        let index = match piece.color {
            Color::White => (x as usize) + 8 * (y as usize),
            Color::Black => {
                let mirrored = tables::mirror_table(table);
                return mirrored[(x as usize) + 8 * (y as usize)];
            }
        };
        table[index]
    }

    fn king_square_value(color: Color, square: Square, phase: GamePhase) -> f32 {
        let table = if phase == GamePhase::End { &tables::KING_END_GAME_TABLE } else { &tables::KING_MID_GAME_TABLE };
        let (x, y) = square.to_xy();
        match color {
            Color::White => table[(x as usize) + 8 * (y as usize)],
            Color::Black => tables::mirror_table(table)[(x as usize) + 8 * (y as usize)],
        }
    }

    /// Pawn-structure bonuses and penalties for the pawn on `square`, summed
    /// from five independent predicates evaluated against the board as it
    /// stands (no move is made or unmade).
    fn pawn_structure_score(&self, position: &Position, square: Square, color: Color) -> f32 {
        let mut total = 0.0;
        let is_double = self.is_double_pawn(position, square, color);
        let is_connected = self.is_connected_pawn(position, square, color);
        let is_chain = self.is_chain_pawn(position, square, color);

        if is_double {
            total += tables::PAWN_STRUCTURE_DOUBLE_PENALTY;
        }
        if is_connected {
            total += tables::PAWN_STRUCTURE_CONNECTED_BONUS;
        }
        if is_chain {
            total += tables::PAWN_STRUCTURE_CHAIN_BONUS;
        }
        if !is_double && !is_connected && !is_chain {
            total += tables::PAWN_STRUCTURE_ISOLATED_PENALTY;
        }
        if !is_connected && self.is_backwards_pawn(position, square, color) {
            total += tables::PAWN_STRUCTURE_BACKWARDS_PENALTY;
        }
        if self.is_passed_pawn(position, square, color) {
            total += tables::PAWN_STRUCTURE_PASSED_BONUS;
        }
        total
    }

    fn own_pawn_at(&self, position: &Position, file: i16, rank: i16, color: Color) -> bool {
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return false;
        }
        let Some(square) = Square::from_file_rank(file as u8, rank as u8) else { return false };
        matches!(position.piece_at(square), Some(p) if p.piece_type == PieceType::Pawn && p.color == color)
    }

    fn enemy_pawn_at(&self, position: &Position, file: i16, rank: i16, color: Color) -> bool {
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return false;
        }
        let Some(square) = Square::from_file_rank(file as u8, rank as u8) else { return false };
        matches!(position.piece_at(square), Some(p) if p.piece_type == PieceType::Pawn && p.color == color.opposite())
    }

    /// Same-color pawn directly ahead or behind on the same file.
    fn is_double_pawn(&self, position: &Position, square: Square, color: Color) -> bool {
        let (file, rank) = (square.file() as i16, square.rank() as i16);
        self.own_pawn_at(position, file, rank + 1, color) || self.own_pawn_at(position, file, rank - 1, color)
    }

    /// Same-color pawn on an adjacent file, same rank.
    fn is_connected_pawn(&self, position: &Position, square: Square, color: Color) -> bool {
        let (file, rank) = (square.file() as i16, square.rank() as i16);
        self.own_pawn_at(position, file + 1, rank, color) || self.own_pawn_at(position, file - 1, rank, color)
    }

    /// Same-color pawn on any of the four diagonal squares.
    fn is_chain_pawn(&self, position: &Position, square: Square, color: Color) -> bool {
        let (file, rank) = (square.file() as i16, square.rank() as i16);
        [(1, 1), (1, -1), (-1, 1), (-1, -1)]
            .into_iter()
            .any(|(df, dr)| self.own_pawn_at(position, file + df, rank + dr, color))
    }

    /// No enemy pawn can stop this one from reaching the back rank by
    /// advancing: no enemy pawn anywhere on this file, ahead or behind.
    fn is_passed_pawn(&self, position: &Position, square: Square, color: Color) -> bool {
        let file = square.file();
        !(0..8).any(|rank| rank != square.rank() && self.enemy_pawn_at(position, file as i16, rank as i16, color))
    }

    /// No friendly pawn guards this one from the side, and an enemy pawn
    /// already covers the square it would advance into or the squares one
    /// further step diagonally ahead. Direction is taken from the pawn's
    /// own color so the check stays side-symmetric (see DESIGN.md).
    fn is_backwards_pawn(&self, position: &Position, square: Square, color: Color) -> bool {
        let (file, rank) = (square.file() as i16, square.rank() as i16);
        let dir = color.forward_direction() as i16;
        self.enemy_pawn_at(position, file, rank + dir, color)
            || self.enemy_pawn_at(position, file + 1, rank + 2 * dir, color)
            || self.enemy_pawn_at(position, file - 1, rank + 2 * dir, color)
    }
}
