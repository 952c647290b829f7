use crate::{Color, GameState, Move, Piece, Square};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    MoveMade {
        mv: Move,
        san: String,
        fen: String,
    },
    PieceCaptured {
        piece: Piece,
        square: Square,
    },
    Check {
        color: Color,
    },
    Checkmate {
        winner: Color,
    },
    Stalemate,
    Draw {
        reason: DrawReason,
    },
    Promotion {
        piece: Piece,
        square: Square,
    },
    Castle {
        color: Color,
        side: CastleSide,
    },
    EnPassant {
        captured_square: Square,
    },
    GameEnded {
        result: GameState,
    },
}

/// Classification attached to a `Draw` event. The core kernel's own
/// `GameState::Draw` does not distinguish these -- it folds the fifty-move
/// rule, stalemate, and (via the repetition tracker) threefold repetition
/// into one variant -- so `ChessEngine::make_move` reconstructs the reason
/// from the fifty-move clock, the repetition map, and legal-move count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

pub trait EventHandler: Send + Sync {
    fn handle_event(&mut self, event: &GameEvent);
}

pub struct DefaultEventHandler {
    events: Vec<GameEvent>,
}

impl DefaultEventHandler {
    pub fn new() -> Self {
        DefaultEventHandler {
            events: Vec::new(),
        }
    }

    pub fn get_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl EventHandler for DefaultEventHandler {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

impl Default for DefaultEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn handle_event(&mut self, event: &GameEvent) {
        println!("Chess Event: {:?}", event);
    }
}