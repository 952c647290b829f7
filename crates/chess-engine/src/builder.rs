use crate::{ChessEngine, EngineConfig, EngineError, EvaluationFeatures, EventHandler, Result, SearchFeatures};
use std::sync::{Arc, Mutex};

/// Builds a `ChessEngine` exposing exactly the knobs the core kernel has:
/// search depth, evaluator feature flags, and search feature flags
/// (`ALPHA_BETA`/`SORT`/`KILLER`). No transposition-table, thread-count, or
/// time-limit knobs -- the kernel doesn't implement those (see spec's
/// non-goals).
pub struct ChessEngineBuilder {
    config: EngineConfig,
    fen: Option<String>,
    event_handler: Option<Arc<Mutex<dyn EventHandler>>>,
    auto_initialize: bool,
}

impl ChessEngineBuilder {
    pub fn new() -> Self {
        ChessEngineBuilder {
            config: EngineConfig::default(),
            fen: None,
            event_handler: None,
            auto_initialize: true,
        }
    }

    pub fn with_depth(mut self, mut depth: u8) -> Self {
        if depth == 0 {
            depth = 1;
        }
        self.config.depth = depth.min(20);
        self
    }

    pub fn with_evaluation_features(mut self, features: EvaluationFeatures) -> Self {
        self.config.evaluation_features = features;
        self
    }

    pub fn with_search_features(mut self, features: SearchFeatures) -> Self {
        self.config.search_features = features;
        self
    }

    pub fn from_fen(mut self, fen: &str) -> Self {
        self.fen = Some(fen.to_string());
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<Mutex<dyn EventHandler>>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn auto_initialize(mut self, enable: bool) -> Self {
        self.auto_initialize = enable;
        self
    }

    pub fn build(self) -> Result<ChessEngine> {
        let mut engine = if let Some(fen) = &self.fen {
            let mut engine = ChessEngine::from_fen(fen)?;
            engine.set_config(self.config)?;
            engine
        } else {
            ChessEngine::with_config(self.config)
        };

        if let Some(handler) = self.event_handler {
            engine.set_event_handler(handler);
        }

        if self.auto_initialize {
            engine.initialize()?;
        }

        Ok(engine)
    }

    /// Like `build`, but rejects configurations with no search technique
    /// enabled at a depth where plain minimax would be impractically slow.
    pub fn build_and_validate(self) -> Result<ChessEngine> {
        let depth = self.config.depth;
        let alpha_beta = self.config.search_features.alpha_beta;
        let engine = self.build()?;

        if depth > 8 && !alpha_beta {
            return Err(EngineError::ConfigurationError(
                "Plain minimax beyond depth 8 is impractically slow; enable alpha-beta".to_string(),
            ));
        }

        Ok(engine)
    }
}

impl Default for ChessEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event::DefaultEventHandler, Color};

    #[test]
    fn test_builder_default() {
        let engine = ChessEngineBuilder::new().build().unwrap();
        assert!(engine.is_initialized());
        assert_eq!(engine.get_side_to_move(), Color::White);
    }

    #[test]
    fn test_builder_with_depth() {
        let engine = ChessEngineBuilder::new().with_depth(10).build().unwrap();
        assert_eq!(engine.get_config().depth, 10);
    }

    #[test]
    fn test_builder_from_fen() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let engine = ChessEngineBuilder::new().from_fen(fen).build().unwrap();
        assert_eq!(engine.get_side_to_move(), Color::Black);
    }

    #[test]
    fn test_builder_with_evaluation_features() {
        let engine = ChessEngineBuilder::new()
            .with_evaluation_features(EvaluationFeatures::ALL)
            .build()
            .unwrap();
        assert_eq!(engine.get_config().evaluation_features, EvaluationFeatures::ALL);
    }

    #[test]
    fn test_builder_with_search_features() {
        let engine = ChessEngineBuilder::new()
            .with_search_features(SearchFeatures::PLAIN)
            .build()
            .unwrap();
        assert_eq!(engine.get_config().search_features, SearchFeatures::PLAIN);
    }

    #[test]
    fn test_builder_no_auto_initialize() {
        let engine = ChessEngineBuilder::new()
            .auto_initialize(false)
            .build()
            .unwrap();
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_builder_with_event_handler() {
        let handler = Arc::new(Mutex::new(DefaultEventHandler::new()));
        let engine = ChessEngineBuilder::new()
            .with_event_handler(handler)
            .build()
            .unwrap();
        assert!(engine.is_initialized());
    }

    #[test]
    fn test_builder_validation_rejects_deep_plain_minimax() {
        let result = ChessEngineBuilder::new()
            .with_depth(10)
            .with_search_features(SearchFeatures::PLAIN)
            .build_and_validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_valid_configuration() {
        let engine = ChessEngineBuilder::new()
            .with_depth(8)
            .with_search_features(SearchFeatures::ALPHA_BETA_SORT_KILLER)
            .build_and_validate()
            .unwrap();

        assert_eq!(engine.get_config().depth, 8);
        assert!(engine.get_config().search_features.alpha_beta);
    }
}
