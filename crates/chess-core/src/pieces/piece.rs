use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Knight => 1,
            PieceType::Bishop => 2,
            PieceType::Rook => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<PieceType> {
        match index {
            0 => Some(PieceType::Pawn),
            1 => Some(PieceType::Knight),
            2 => Some(PieceType::Bishop),
            3 => Some(PieceType::Rook),
            4 => Some(PieceType::Queen),
            5 => Some(PieceType::King),
            _ => None,
        }
    }

    /// Base material value, `{P:1, N:3, B:3, R:5, Q:9, K:0}`.
    pub const fn material_value(self) -> f32 {
        match self {
            PieceType::Pawn => 1.00,
            PieceType::Knight => 3.00,
            PieceType::Bishop => 3.00,
            PieceType::Rook => 5.00,
            PieceType::Queen => 9.00,
            PieceType::King => 0.00,
        }
    }

    /// Number of pieces of this type each side starts the game with.
    pub const fn starting_count(self) -> u16 {
        match self {
            PieceType::Pawn => 8,
            PieceType::Knight => 2,
            PieceType::Bishop => 2,
            PieceType::Rook => 2,
            PieceType::Queen => 1,
            PieceType::King => 1,
        }
    }

    pub const fn is_sliding(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Queen)
    }

    pub const fn is_orthogonal(self) -> bool {
        matches!(self, PieceType::Rook | PieceType::Queen)
    }

    pub const fn symbol(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for PieceType {
    type Err = crate::ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().chars().next() {
            Some('P') => Ok(PieceType::Pawn),
            Some('N') => Ok(PieceType::Knight),
            Some('B') => Ok(PieceType::Bishop),
            Some('R') => Ok(PieceType::Rook),
            Some('Q') => Ok(PieceType::Queen),
            Some('K') => Ok(PieceType::King),
            _ => Err(crate::ChessError::ParseError(format!(
                "Invalid piece type: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    #[inline]
    pub const fn white_pawn() -> Self {
        Piece::new(PieceType::Pawn, Color::White)
    }

    #[inline]
    pub const fn white_king() -> Self {
        Piece::new(PieceType::King, Color::White)
    }

    #[inline]
    pub const fn black_pawn() -> Self {
        Piece::new(PieceType::Pawn, Color::Black)
    }

    #[inline]
    pub const fn black_king() -> Self {
        Piece::new(PieceType::King, Color::Black)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.piece_type.index() + self.color.index() * 6
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Piece> {
        if index >= 12 {
            return None;
        }
        let color_index = index / 6;
        let piece_index = index % 6;

        match (
            Color::from_index(color_index),
            PieceType::from_index(piece_index),
        ) {
            (Some(color), Some(piece_type)) => Some(Piece::new(piece_type, color)),
            _ => None,
        }
    }

    /// Board-cache encoding: uppercase for White, lowercase for Black.
    pub const fn symbol(self) -> char {
        let base_symbol = self.piece_type.symbol();
        match self.color {
            Color::White => base_symbol,
            Color::Black => match base_symbol {
                'P' => 'p',
                'N' => 'n',
                'B' => 'b',
                'R' => 'r',
                'Q' => 'q',
                'K' => 'k',
                _ => base_symbol,
            },
        }
    }

    pub fn from_symbol(ch: char) -> Option<Piece> {
        let (piece_type, color) = match ch {
            'P' => (PieceType::Pawn, Color::White),
            'N' => (PieceType::Knight, Color::White),
            'B' => (PieceType::Bishop, Color::White),
            'R' => (PieceType::Rook, Color::White),
            'Q' => (PieceType::Queen, Color::White),
            'K' => (PieceType::King, Color::White),
            'p' => (PieceType::Pawn, Color::Black),
            'n' => (PieceType::Knight, Color::Black),
            'b' => (PieceType::Bishop, Color::Black),
            'r' => (PieceType::Rook, Color::Black),
            'q' => (PieceType::Queen, Color::Black),
            'k' => (PieceType::King, Color::Black),
            _ => return None,
        };
        Some(Piece::new(piece_type, color))
    }

    #[inline]
    pub const fn material_value(self) -> f32 {
        self.piece_type.material_value()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Piece {
    type Err = crate::ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(crate::ChessError::ParseError(format!("Invalid piece: {}", s)));
        }
        let ch = s.chars().next().unwrap();
        Piece::from_symbol(ch).ok_or_else(|| crate::ChessError::ParseError(format!("Invalid piece: {}", s)))
    }
}
