use crate::board::{Bitboard, Square};
use crate::error::{ChessError, Result};
use crate::moves::Move;
use crate::pieces::{Color, Piece, PieceType};
use crate::utils::ZobristHash;
use serde::{Deserialize, Serialize};

/// Material remaining (both sides combined) at or below which the game
/// advances out of the opening, as a fraction of the starting total (78).
const MATERIAL_RATIO_MID_GAME: f32 = 0.85;
/// Material ratio at or below which the game advances into the endgame.
const MATERIAL_RATIO_END_GAME: f32 = 0.50;
const STARTING_MATERIAL_TOTAL: f32 = 78.0;

/// The three phases a game passes through, used by the evaluator to select
/// piece-square tables and material-addition weights. Phase only ever moves
/// forward: once material has thinned out there is no going back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GamePhase {
    Opening,
    Mid,
    End,
}

/// Terminal classification of a position. `Active` means the game continues;
/// the others are reported by whichever caller enumerated legal moves and
/// checked status (see `moves::generator::MoveGenerator::game_state`), since
/// determining them needs full legal move generation that `Position` itself
/// does not perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Active,
    WhiteWins,
    BlackWins,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Packs the four flags into the low nibble, for Zobrist hashing.
    pub fn to_bits(self) -> u8 {
        (self.white_kingside as u8)
            | (self.white_queenside as u8) << 1
            | (self.black_kingside as u8) << 2
            | (self.black_queenside as u8) << 3
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::ALL
    }
}

#[derive(Debug, Clone)]
struct UndoInfoInternal {
    mv: Move,
    moved_piece: Piece,
    captured: Option<(Piece, Square)>,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    game_phase: GamePhase,
    previous_side_to_move: Color,
}

/// Public snapshot of what `apply_move` changed, returned so callers that
/// want to narrate a move (engine event handlers, UCI-style front ends)
/// don't have to re-derive it from the position.
#[derive(Debug, Clone, Copy)]
pub struct UndoInfo {
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
}

/// A chess position: piece placement, side to move, castling rights, en
/// passant target, move clocks, and game phase, plus enough history to
/// unmake the last move. Move application mutates the position in place
/// (push/pop against `history`) rather than cloning, matching how the
/// search driver walks the tree.
#[derive(Debug, Clone)]
pub struct Position {
    board: [Option<Piece>; 64],
    pieces: [Bitboard; 12],
    occupied: [Bitboard; 2],
    all_occupied: Bitboard,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    game_phase: GamePhase,
    history: Vec<UndoInfoInternal>,
}

impl Position {
    pub fn new() -> Self {
        Position {
            board: [None; 64],
            pieces: [Bitboard::EMPTY; 12],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            game_phase: GamePhase::Opening,
            history: Vec::new(),
        }
    }

    pub fn starting_position() -> Self {
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("starting FEN is well-formed")
    }

    // --- board access -----------------------------------------------------

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index() as usize]
    }

    /// Reads the board in the external `(x, y)` convention, `y = 0` at rank
    /// 8, matching how board state is exchanged at the crate boundary.
    pub fn piece_at_xy(&self, x: u8, y: u8) -> Option<Piece> {
        Square::from_xy(x, y).and_then(|sq| self.piece_at(sq))
    }

    pub fn place_piece(&mut self, square: Square, piece: Piece) {
        let bb = square.bitboard();
        self.board[square.index() as usize] = Some(piece);
        self.pieces[piece.index()] |= bb;
        self.occupied[piece.color.index()] |= bb;
        self.all_occupied |= bb;
    }

    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square.index() as usize].take()?;
        let bb = !square.bitboard();
        self.pieces[piece.index()] &= bb;
        self.occupied[piece.color.index()] &= bb;
        self.all_occupied &= bb;
        Some(piece)
    }

    pub fn pieces_of_color(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    pub fn all_pieces(&self) -> Bitboard {
        self.all_occupied
    }

    pub fn piece_bitboard(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.pieces[Piece::new(piece_type, color).index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.piece_bitboard(PieceType::King, color).lsb().and_then(Square::new)
    }

    // --- game state accessors ----------------------------------------------

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn game_phase(&self) -> GamePhase {
        self.game_phase
    }

    /// Total material for one side, summing `PieceType::material_value`
    /// across every piece still on the board (kings contribute 0).
    pub fn material_sum(&self, color: Color) -> f32 {
        PieceType::ALL
            .iter()
            .map(|&pt| self.piece_bitboard(pt, color).count_bits() as f32 * pt.material_value())
            .sum()
    }

    fn material_ratio(&self) -> f32 {
        (self.material_sum(Color::White) + self.material_sum(Color::Black))
            / STARTING_MATERIAL_TOTAL
    }

    /// Advances the game phase by at most one step, never backward.
    fn update_game_phase(&mut self) {
        let ratio = self.material_ratio();
        match self.game_phase {
            GamePhase::Opening if ratio <= MATERIAL_RATIO_MID_GAME => {
                self.game_phase = GamePhase::Mid;
            }
            GamePhase::Mid if ratio <= MATERIAL_RATIO_END_GAME => {
                self.game_phase = GamePhase::End;
            }
            _ => {}
        }
    }

    pub fn zobrist_hash(&self, keys: &ZobristHash) -> u64 {
        let mut hash = 0u64;
        for square in Square::ALL {
            if let Some(piece) = self.piece_at(square) {
                hash ^= keys.hash_piece(piece, square);
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= keys.hash_side();
        }
        hash ^= keys.hash_castling(self.castling_rights.to_bits());
        if let Some(ep) = self.en_passant_target {
            hash ^= keys.hash_en_passant(ep.file());
        }
        hash
    }

    // --- move application ---------------------------------------------------

    /// Applies `mv` in place, returning the moved piece and any piece it
    /// captured. The position pushes its own undo record; call
    /// `undo_last_move` to reverse it.
    pub fn apply_move(&mut self, mv: Move) -> Result<UndoInfo> {
        let moved_piece = self
            .piece_at(mv.from)
            .ok_or_else(|| ChessError::InvalidMove(format!("no piece on {}", mv.from)))?;

        let previous_side_to_move = self.side_to_move;
        let castling_rights = self.castling_rights;
        let en_passant_target = self.en_passant_target;
        let halfmove_clock = self.halfmove_clock;
        let fullmove_number = self.fullmove_number;
        let game_phase = self.game_phase;

        let captured = if mv.en_passant_capture {
            let captured_square = Square::from_file_rank(mv.to.file(), mv.from.rank())
                .ok_or_else(|| ChessError::InvalidMove("bad en passant geometry".to_string()))?;
            self.remove_piece(captured_square).map(|p| (p, captured_square))
        } else if mv.capture {
            self.remove_piece(mv.to).map(|p| (p, mv.to))
        } else {
            None
        };

        self.remove_piece(mv.from);
        let placed = match mv.promotion {
            Some(promoted_type) => Piece::new(promoted_type, moved_piece.color),
            None => moved_piece,
        };
        self.place_piece(mv.to, placed);

        if mv.castling_short || mv.castling_long {
            let (rook_from, rook_to) = Self::castle_rook_squares(moved_piece.color, mv.castling_short);
            if let Some(rook) = self.remove_piece(rook_from) {
                self.place_piece(rook_to, rook);
            }
        }

        self.update_castling_rights(mv, moved_piece, captured.map(|(p, _)| p));

        self.en_passant_target = if moved_piece.piece_type == PieceType::Pawn
            && mv.from.rank().abs_diff(mv.to.rank()) == 2
        {
            let mid_rank = (mv.from.rank() + mv.to.rank()) / 2;
            Square::from_file_rank(mv.from.file(), mid_rank)
        } else {
            None
        };

        self.halfmove_clock = if moved_piece.piece_type == PieceType::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.opposite();
        self.update_game_phase();

        self.history.push(UndoInfoInternal {
            mv,
            moved_piece,
            captured,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
            game_phase,
            previous_side_to_move,
        });

        Ok(UndoInfo {
            moved_piece,
            captured_piece: captured.map(|(p, _)| p),
        })
    }

    pub fn undo_last_move(&mut self) -> Result<()> {
        let undo = self
            .history
            .pop()
            .ok_or_else(|| ChessError::InvalidMove("no move to undo".to_string()))?;

        self.remove_piece(undo.mv.to);
        if undo.mv.castling_short || undo.mv.castling_long {
            let (rook_from, rook_to) = Self::castle_rook_squares(undo.moved_piece.color, undo.mv.castling_short);
            if let Some(rook) = self.remove_piece(rook_to) {
                self.place_piece(rook_from, rook);
            }
        }
        self.place_piece(undo.mv.from, undo.moved_piece);
        if let Some((piece, square)) = undo.captured {
            self.place_piece(square, piece);
        }

        self.castling_rights = undo.castling_rights;
        self.en_passant_target = undo.en_passant_target;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.game_phase = undo.game_phase;
        self.side_to_move = undo.previous_side_to_move;

        Ok(())
    }

    fn castle_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
        match (color, kingside) {
            (Color::White, true) => (Square::H1, Square::F1),
            (Color::White, false) => (Square::A1, Square::D1),
            (Color::Black, true) => (Square::H8, Square::F8),
            (Color::Black, false) => (Square::A8, Square::D8),
        }
    }

    fn update_castling_rights(&mut self, mv: Move, moved_piece: Piece, captured_piece: Option<Piece>) {
        if moved_piece.piece_type == PieceType::King {
            match moved_piece.color {
                Color::White => {
                    self.castling_rights.white_kingside = false;
                    self.castling_rights.white_queenside = false;
                }
                Color::Black => {
                    self.castling_rights.black_kingside = false;
                    self.castling_rights.black_queenside = false;
                }
            }
        }
        let mut clear_if_rook_home = |square: Square| match square {
            Square::A1 => self.castling_rights.white_queenside = false,
            Square::H1 => self.castling_rights.white_kingside = false,
            Square::A8 => self.castling_rights.black_queenside = false,
            Square::H8 => self.castling_rights.black_kingside = false,
            _ => {}
        };
        clear_if_rook_home(mv.from);
        if captured_piece.is_some() {
            clear_if_rook_home(mv.to);
        }
    }

    // --- FEN -----------------------------------------------------------------

    pub fn from_fen(fen: &str) -> Result<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ChessError::ParseError("empty FEN string".to_string()));
        }

        let mut position = Position::new();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::ParseError("FEN must have 8 ranks".to_string()));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file_idx = 0u8;
            for ch in rank_str.chars() {
                if file_idx >= 8 {
                    return Err(ChessError::ParseError("too many files in rank".to_string()));
                }
                if let Some(empty_count) = ch.to_digit(10) {
                    file_idx += empty_count as u8;
                } else {
                    let piece = Piece::from_symbol(ch)
                        .ok_or_else(|| ChessError::ParseError(format!("invalid piece character: {}", ch)))?;
                    let square = Square::from_xy(file_idx, rank_idx as u8)
                        .ok_or_else(|| ChessError::ParseError("square out of range".to_string()))?;
                    position.place_piece(square, piece);
                    file_idx += 1;
                }
            }
            if file_idx != 8 {
                return Err(ChessError::ParseError("rank doesn't have 8 files".to_string()));
            }
        }

        position.side_to_move = match parts.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::ParseError(format!("invalid side to move: {}", other))),
        };

        let mut rights = CastlingRights::NONE;
        if let Some(&castling) = parts.get(2) {
            if castling != "-" {
                for ch in castling.chars() {
                    match ch {
                        'K' => rights.white_kingside = true,
                        'Q' => rights.white_queenside = true,
                        'k' => rights.black_kingside = true,
                        'q' => rights.black_queenside = true,
                        _ => return Err(ChessError::ParseError(format!("invalid castling flag: {}", ch))),
                    }
                }
            }
        }
        position.castling_rights = rights;

        position.en_passant_target = match parts.get(3).copied().unwrap_or("-") {
            "-" => None,
            square_str => Some(square_str.parse()?),
        };

        position.halfmove_clock = parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        position.fullmove_number = parts.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        let ratio = position.material_ratio();
        position.game_phase = if ratio <= MATERIAL_RATIO_END_GAME {
            GamePhase::End
        } else if ratio <= MATERIAL_RATIO_MID_GAME {
            GamePhase::Mid
        } else {
            GamePhase::Opening
        };

        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for y in 0..8u8 {
            let mut empty_run = 0u8;
            for x in 0..8u8 {
                match self.piece_at_xy(x, y) {
                    Some(piece) => {
                        if empty_run > 0 {
                            fen.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        fen.push(piece.symbol());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if y != 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move == Color::White { 'w' } else { 'b' });

        fen.push(' ');
        let r = self.castling_rights;
        if !r.white_kingside && !r.white_queenside && !r.black_kingside && !r.black_queenside {
            fen.push('-');
        } else {
            if r.white_kingside {
                fen.push('K');
            }
            if r.white_queenside {
                fen.push('Q');
            }
            if r.black_kingside {
                fen.push('k');
            }
            if r.black_queenside {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.en_passant_target {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_material() {
        let pos = Position::starting_position();
        assert_eq!(pos.material_sum(Color::White), 39.0);
        assert_eq!(pos.material_sum(Color::Black), 39.0);
        assert_eq!(pos.game_phase(), GamePhase::Opening);
    }

    #[test]
    fn test_fen_round_trip() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn test_apply_and_undo_normal_move() {
        let mut pos = Position::starting_position();
        let mv = Move::normal(Square::E2, Square::E4);
        pos.apply_move(mv).unwrap();
        assert_eq!(pos.piece_at(Square::E4), Some(Piece::white_pawn()));
        assert_eq!(pos.piece_at(Square::E2), None);
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.en_passant_target(), Some(Square::E3));

        pos.undo_last_move().unwrap();
        assert_eq!(pos.piece_at(Square::E2), Some(Piece::white_pawn()));
        assert_eq!(pos.piece_at(Square::E4), None);
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.en_passant_target(), None);
    }

    #[test]
    fn test_en_passant_capture_and_undo() {
        let mut pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        let mv = Move::en_passant(Square::E5, Square::D6);
        pos.apply_move(mv).unwrap();
        assert_eq!(pos.piece_at(Square::D6), Some(Piece::white_pawn()));
        assert_eq!(pos.piece_at(Square::D5), None);

        pos.undo_last_move().unwrap();
        assert_eq!(pos.piece_at(Square::D5), Some(Piece::black_pawn()));
        assert_eq!(pos.piece_at(Square::D6), None);
        assert_eq!(pos.piece_at(Square::E5), Some(Piece::white_pawn()));
    }

    #[test]
    fn test_castling_moves_rook() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = Move::castle_short(Square::E1, Square::G1);
        pos.apply_move(mv).unwrap();
        assert_eq!(pos.piece_at(Square::G1).unwrap().piece_type, PieceType::King);
        assert_eq!(pos.piece_at(Square::F1).unwrap().piece_type, PieceType::Rook);
        assert_eq!(pos.piece_at(Square::H1), None);
        assert!(!pos.castling_rights().white_kingside);
        assert!(!pos.castling_rights().white_queenside);

        pos.undo_last_move().unwrap();
        assert_eq!(pos.piece_at(Square::E1).unwrap().piece_type, PieceType::King);
        assert_eq!(pos.piece_at(Square::H1).unwrap().piece_type, PieceType::Rook);
        assert!(pos.castling_rights().white_kingside);
    }

    #[test]
    fn test_promotion() {
        let mut pos = Position::from_fen("8/4P3/8/8/8/8/8/4k2K w - - 0 1").unwrap();
        let mv = Move::promotion(Square::E7, Square::E8, PieceType::Queen, false);
        pos.apply_move(mv).unwrap();
        assert_eq!(pos.piece_at(Square::E8), Some(Piece::new(PieceType::Queen, Color::White)));

        pos.undo_last_move().unwrap();
        assert_eq!(pos.piece_at(Square::E7), Some(Piece::white_pawn()));
        assert_eq!(pos.piece_at(Square::E8), None);
    }

    #[test]
    fn test_halfmove_clock_resets_on_capture() {
        let mut pos = Position::starting_position();
        pos.apply_move(Move::normal(Square::E2, Square::E4)).unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        pos.apply_move(Move::normal(Square::B8, Square::C6)).unwrap();
        assert_eq!(pos.halfmove_clock(), 1);
    }

    #[test]
    fn test_game_phase_is_monotonic() {
        let mut pos = Position::starting_position();
        assert_eq!(pos.game_phase(), GamePhase::Opening);
        // Strip both sides down to bare kings: material ratio hits 0, phase
        // must land on End and never regress even if pieces were restored.
        for color in [Color::White, Color::Black] {
            for pt in PieceType::ALL {
                if pt == PieceType::King {
                    continue;
                }
                let bb = pos.piece_bitboard(pt, color);
                for sq in bb.squares() {
                    pos.remove_piece(Square::new(sq as u8).unwrap());
                }
            }
        }
        pos.update_game_phase();
        assert_eq!(pos.game_phase(), GamePhase::End);
    }
}
