use crate::players::{MoveRequest, Player};
use anyhow::Result;
use covua_core::engine::config::EngineConfig;
use covua_core::engine::search::AlphaBetaEngine;
use covua_core::engine::{MoveKind, Searcher};
use covua_core::logic::game::GameState;
use log::info;
use std::sync::Arc;

pub struct AiPlayer {
    engine: AlphaBetaEngine,
    /// Announce moves and evaluations on stdout (interactive play only;
    /// in slave mode stdout belongs to the move protocol).
    verbose: bool,
}

impl AiPlayer {
    #[must_use]
    pub fn new(config: EngineConfig, seed: Option<u64>, verbose: bool) -> Self {
        let config = Arc::new(config);
        let engine = match seed {
            Some(seed) => AlphaBetaEngine::with_seed(config, seed),
            None => AlphaBetaEngine::new(config),
        };
        Self { engine, verbose }
    }
}

impl Player for AiPlayer {
    fn pick_move(&mut self, game: &mut GameState) -> Result<Option<MoveRequest>> {
        let Some((mv, report)) = self.engine.choose_move(&mut game.board, game.turn) else {
            return Ok(None);
        };
        if self.verbose {
            println!("Engine plays {mv} (evaluation {})", report.score);
        }
        info!(
            "engine plays {mv} (evaluation {}, {} nodes)",
            report.score, report.nodes
        );
        let promotion = match mv.kind {
            MoveKind::Promote(kind) => Some(kind),
            _ => None,
        };
        Ok(Some((usize::from(mv.from), usize::from(mv.to), promotion)))
    }
}
