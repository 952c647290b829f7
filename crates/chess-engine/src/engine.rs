use crate::{event::DefaultEventHandler, EngineError, EventHandler, GameEvent, GameInfo, MoveResult, Result};
use chess_core::{
    search_move, Color, EvaluationFeatures, Evaluator, GameState, Move, MoveGenerator, Piece,
    Position, RepetitionMap, SearchFeatures, Square, ZobristHash,
};
use std::sync::{Arc, Mutex};

/// The knobs the core search-and-evaluation kernel actually exposes: search
/// depth and which evaluator/search features are turned on. Deliberately
/// has no transposition-table, thread-count, or time-limit fields -- those
/// back features this kernel doesn't implement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub depth: u8,
    pub evaluation_features: EvaluationFeatures,
    pub search_features: SearchFeatures,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: 4,
            evaluation_features: EvaluationFeatures::STANDARD,
            search_features: SearchFeatures::ALPHA_BETA_SORT_KILLER,
        }
    }
}

/// A playable game session wrapping the core kernel: holds the position,
/// the repetition/hashing state a search needs across moves, and emits
/// `GameEvent`s as moves land.
pub struct ChessEngine {
    position: Position,
    config: EngineConfig,
    generator: MoveGenerator,
    evaluator: Evaluator,
    repetition: RepetitionMap,
    zobrist: ZobristHash,
    event_handler: Arc<Mutex<dyn EventHandler>>,
    initialized: bool,
}

impl ChessEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        ChessEngine {
            position: Position::starting_position(),
            evaluator: Evaluator::new(config.evaluation_features),
            config,
            generator: MoveGenerator::new(),
            repetition: RepetitionMap::new(),
            zobrist: ZobristHash::new(),
            event_handler: Arc::new(Mutex::new(DefaultEventHandler::new())),
            initialized: false,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        let position = Position::from_fen(fen)?;
        let config = EngineConfig::default();
        Ok(ChessEngine {
            position,
            evaluator: Evaluator::new(config.evaluation_features),
            config,
            generator: MoveGenerator::new(),
            repetition: RepetitionMap::new(),
            zobrist: ZobristHash::new(),
            event_handler: Arc::new(Mutex::new(DefaultEventHandler::new())),
            initialized: false,
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Err(EngineError::InvalidState("Engine already initialized".to_string()));
        }
        self.emit_event(GameEvent::GameStarted);
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_event_handler(&mut self, handler: Arc<Mutex<dyn EventHandler>>) {
        self.event_handler = handler;
    }

    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) -> Result<()> {
        if self.initialized {
            return Err(EngineError::InvalidState("Cannot change config after initialization".to_string()));
        }
        self.evaluator = Evaluator::new(config.evaluation_features);
        self.config = config;
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.position = Position::starting_position();
        self.repetition = RepetitionMap::new();
        self.emit_event(GameEvent::GameStarted);
        Ok(())
    }

    pub fn load_fen(&mut self, fen: &str) -> Result<()> {
        self.position = Position::from_fen(fen)?;
        self.repetition = RepetitionMap::new();
        Ok(())
    }

    pub fn get_fen(&self) -> String {
        self.position.to_fen()
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn make_move(&mut self, mv: Move) -> Result<MoveResult> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }

        let mut events = Vec::new();
        if !self.is_legal_move(mv) {
            return Ok(MoveResult { success: false, game_result: None, events });
        }

        let mover = self.position.side_to_move();
        let captured_piece = self.position.piece_at(mv.to);

        self.position.apply_move(mv)?;
        self.repetition.add_position(&self.position, &self.zobrist);

        events.push(GameEvent::MoveMade { mv, san: self.move_to_san(mv), fen: self.get_fen() });

        if let Some(piece) = captured_piece {
            events.push(GameEvent::PieceCaptured { piece, square: mv.to });
        }
        if let Some(promoted_type) = mv.promotion {
            events.push(GameEvent::Promotion { piece: Piece::new(promoted_type, mover), square: mv.to });
        }
        if mv.is_castle() {
            let side = if mv.to.file() > mv.from.file() {
                crate::event::CastleSide::Kingside
            } else {
                crate::event::CastleSide::Queenside
            };
            events.push(GameEvent::Castle { color: mover, side });
        }
        if mv.is_en_passant() {
            let captured_rank = (mv.to.rank() as i8 - mover.forward_direction()) as u8;
            let captured_square = Square::from_file_rank(mv.to.file(), captured_rank).unwrap();
            events.push(GameEvent::EnPassant { captured_square });
        }

        let opponent = self.position.side_to_move();
        if self.generator.is_in_check(&self.position, opponent) {
            events.push(GameEvent::Check { color: opponent });
        }

        let mut final_result = None;
        match self.generator.game_state(&self.position) {
            GameState::WhiteWins => {
                events.push(GameEvent::Checkmate { winner: Color::White });
                events.push(GameEvent::GameEnded { result: GameState::WhiteWins });
                final_result = Some(GameState::WhiteWins);
            }
            GameState::BlackWins => {
                events.push(GameEvent::Checkmate { winner: Color::Black });
                events.push(GameEvent::GameEnded { result: GameState::BlackWins });
                final_result = Some(GameState::BlackWins);
            }
            GameState::Draw => {
                let reason = if self.position.halfmove_clock() >= 100 {
                    crate::event::DrawReason::FiftyMoveRule
                } else if self.repetition.is_locked(&self.position, &self.zobrist) {
                    crate::event::DrawReason::ThreefoldRepetition
                } else {
                    crate::event::DrawReason::Stalemate
                };
                if reason == crate::event::DrawReason::Stalemate {
                    events.push(GameEvent::Stalemate);
                }
                events.push(GameEvent::Draw { reason });
                events.push(GameEvent::GameEnded { result: GameState::Draw });
                final_result = Some(GameState::Draw);
            }
            GameState::Active => {}
        }

        for event in &events {
            self.emit_event(event.clone());
        }

        Ok(MoveResult { success: true, game_result: final_result, events })
    }

    pub fn make_move_from_uci(&mut self, uci: &str) -> Result<MoveResult> {
        let mv: Move = uci.parse()?;
        self.make_move(mv)
    }

    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.generator.generate_legal_moves(&self.position).contains(&mv)
    }

    pub fn get_legal_moves(&self) -> Vec<Move> {
        self.generator.generate_legal_moves(&self.position)
    }

    pub fn get_game_info(&self) -> GameInfo {
        let legal_moves = self.get_legal_moves();
        let side_to_move = self.get_side_to_move();
        let state = self.generator.game_state(&self.position);
        GameInfo {
            fen: self.get_fen(),
            side_to_move,
            is_check: self.generator.is_in_check(&self.position, side_to_move),
            is_checkmate: matches!(state, GameState::WhiteWins | GameState::BlackWins),
            is_stalemate: state == GameState::Draw && legal_moves.is_empty(),
            is_draw: state == GameState::Draw,
            halfmove_clock: self.position.halfmove_clock(),
            fullmove_number: self.position.fullmove_number(),
            legal_moves,
        }
    }

    /// Static evaluation of the current position from White's perspective.
    pub fn evaluate(&self) -> f32 {
        self.evaluator.evaluate(&self.position, Color::White)
    }

    /// Runs the configured search and returns the move it picked, without
    /// playing it. Callers that want the move played call `make_move` with
    /// the result.
    pub fn find_best_move(&mut self) -> Result<Option<Move>> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        let result = search_move(
            &mut self.position,
            &self.generator,
            &self.evaluator,
            self.config.depth,
            self.config.search_features,
            &mut self.repetition,
            &self.zobrist,
        );
        Ok(result.best)
    }

    pub fn get_game_result(&self) -> GameState {
        self.generator.game_state(&self.position)
    }

    pub fn is_game_over(&self) -> bool {
        self.get_game_result() != GameState::Active
    }

    fn move_to_san(&self, mv: Move) -> String {
        format!("{}", mv)
    }

    fn emit_event(&self, event: GameEvent) {
        if let Ok(mut handler) = self.event_handler.try_lock() {
            handler.handle_event(&event);
        }
    }
}

impl Default for ChessEngine {
    fn default() -> Self {
        Self::new()
    }
}
