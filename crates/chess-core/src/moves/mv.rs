use crate::{PieceType, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A move as a flat, tagged record rather than a type hierarchy: every
/// variant (capture, en passant, castle, promotion) is just a combination of
/// fields on the same struct, discriminated by inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub en_passant_capture: bool,
    pub castling_short: bool,
    pub castling_long: bool,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            capture: false,
            en_passant_capture: false,
            castling_short: false,
            castling_long: false,
            promotion: None,
        }
    }

    pub const fn normal(from: Square, to: Square) -> Self {
        Move::new(from, to)
    }

    pub const fn capture(from: Square, to: Square) -> Self {
        let mut mv = Move::new(from, to);
        mv.capture = true;
        mv
    }

    pub const fn en_passant(from: Square, to: Square) -> Self {
        let mut mv = Move::new(from, to);
        mv.capture = true;
        mv.en_passant_capture = true;
        mv
    }

    pub const fn castle_short(from: Square, to: Square) -> Self {
        let mut mv = Move::new(from, to);
        mv.castling_short = true;
        mv
    }

    pub const fn castle_long(from: Square, to: Square) -> Self {
        let mut mv = Move::new(from, to);
        mv.castling_long = true;
        mv
    }

    pub const fn promotion(from: Square, to: Square, piece: PieceType, capture: bool) -> Self {
        let mut mv = Move::new(from, to);
        mv.capture = capture;
        mv.promotion = Some(piece);
        mv
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.capture
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.castling_short || self.castling_long
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.en_passant_capture
    }

    /// `(start_x, start_y)` in the external board convention (`y=0` = rank 8).
    pub const fn start_xy(self) -> (u8, u8) {
        self.from.to_xy()
    }

    /// `(target_x, target_y)` in the external board convention.
    pub const fn target_xy(self) -> (u8, u8) {
        self.to.to_xy()
    }

    /// The zero-coordinate move that a sentinel-based design would use for
    /// "no move"; kept only so callers migrating off that convention have
    /// something to compare against, never returned by the search driver
    /// (which returns `Option<Move>` instead, see `search::driver`).
    pub fn is_zero_sentinel(self) -> bool {
        self.from == Square::A8 && self.to == Square::A8
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.capture { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.symbol())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Move {
    type Err = crate::ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() < 5 {
            return Err(crate::ChessError::ParseError(format!("Invalid move string: {}", s)));
        }
        let from: Square = s[0..2].parse()?;
        let sep = bytes[2] as char;
        let capture = match sep {
            '-' => false,
            'x' => true,
            _ => {
                return Err(crate::ChessError::ParseError(format!(
                    "Invalid move separator in: {}",
                    s
                )))
            }
        };
        let to: Square = s[3..5].parse()?;

        let promotion = if s.len() == 6 {
            match s.as_bytes()[5].to_ascii_uppercase() {
                b'Q' => Some(PieceType::Queen),
                b'R' => Some(PieceType::Rook),
                b'B' => Some(PieceType::Bishop),
                b'N' => Some(PieceType::Knight),
                _ => {
                    return Err(crate::ChessError::ParseError(format!(
                        "Invalid promotion piece in: {}",
                        s
                    )))
                }
            }
        } else if s.len() > 6 {
            return Err(crate::ChessError::ParseError(format!("Invalid move string: {}", s)));
        } else {
            None
        };

        let mut mv = Move::new(from, to);
        mv.capture = capture;
        mv.promotion = promotion;
        Ok(mv)
    }
}
