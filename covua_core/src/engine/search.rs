use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, Move, SearchReport, Searcher};
use crate::logic::board::{Board, Color};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::is_in_check;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

/// Fixed-depth adversarial search: negamax with alpha-beta pruning and a
/// bounded capture-only extension past the horizon. The board is shared
/// and mutated in place; every apply is paired with an undo before the
/// frame returns, so the mutation history always mirrors the call stack.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    generator: MoveGenerator,
    rng: StdRng,
    nodes: u32,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with reproducible tie-breaks. Searches from the same seed on
    /// the same position pick the same move.
    pub fn with_seed(config: Arc<EngineConfig>, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Arc<EngineConfig>, rng: StdRng) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
            rng,
            nodes: 0,
        }
    }

    /// Whether playing `mv` sends the child call into the capture-only
    /// extension.
    fn tactical(&self, mv: &Move) -> bool {
        mv.is_capture() && self.config.quiescence_depth > 0
    }

    /// Score of the position from `turn`'s perspective, searched to
    /// `depth` within the (alpha, beta) window. `quiescent` marks a branch
    /// already inside the capture-only extension; its depth keeps counting
    /// down below zero until the extension bound cuts it off.
    pub(crate) fn alpha_beta(
        &mut self,
        board: &mut Board,
        turn: Color,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        quiescent: bool,
    ) -> i32 {
        debug_assert!(alpha <= beta);
        self.nodes += 1;

        if depth <= 0 && !quiescent {
            let score = self.evaluator.evaluate(board);
            return match turn {
                Color::White => score,
                Color::Black => -score,
            };
        }
        if quiescent && depth <= -i32::from(self.config.quiescence_depth) {
            // Extension bound reached; the exchange is left unresolved.
            return 0;
        }
        let captures_only = quiescent && depth <= 0;

        // First assume we are losing.
        let mut best = -self.config.win_score;

        let (regulars, maintenance) = self.generator.generate(board, turn);
        for mv in &maintenance {
            board.apply_move(mv);
        }

        let mut no_reply = true;
        for mv in &regulars {
            if alpha > beta {
                // Remaining siblings cannot influence the outcome.
                break;
            }
            if captures_only && !mv.is_capture() {
                continue;
            }

            board.apply_move(mv);
            if !is_in_check(board, turn) {
                no_reply = false;
                let score = if board.draw_clock == 0 {
                    // Forced draw, no point searching past it.
                    0
                } else {
                    -self.alpha_beta(
                        board,
                        turn.opposite(),
                        depth - 1,
                        -beta,
                        -alpha,
                        self.tactical(mv),
                    )
                };
                if score > best {
                    best = score;
                    if score > alpha {
                        alpha = score;
                    }
                }
            }
            board.undo_move(mv);
        }

        for mv in maintenance.iter().rev() {
            board.undo_move(mv);
        }

        // No legal reply at an inner node scores as neutral; the root
        // driver is the one that turns this situation into "no move".
        if no_reply {
            0
        } else {
            best
        }
    }
}

impl Searcher for AlphaBetaEngine {
    /// Root driver: picks a move for `turn` that no sibling beats at the
    /// configured depth, choosing uniformly among score-ties. `None` means
    /// the side to move has no viable move (mated or unable to move).
    fn choose_move(&mut self, board: &mut Board, turn: Color) -> Option<(Move, SearchReport)> {
        self.nodes = 0;
        let depth = i32::from(self.config.search_depth);

        let mut best = -self.config.val_king;
        let mut candidates: Vec<Move> = Vec::new();

        let (regulars, maintenance) = self.generator.generate(board, turn);
        for mv in &maintenance {
            board.apply_move(mv);
        }

        for mv in &regulars {
            board.apply_move(mv);
            if !is_in_check(board, turn) {
                let score = -self.alpha_beta(
                    board,
                    turn.opposite(),
                    depth - 1,
                    -self.config.win_score,
                    -best,
                    self.tactical(mv),
                );
                if score > best {
                    best = score;
                    candidates.clear();
                    candidates.push(*mv);
                } else if score == best {
                    candidates.push(*mv);
                }
            }
            board.undo_move(mv);
        }

        for mv in maintenance.iter().rev() {
            board.undo_move(mv);
        }

        if best < -self.config.win_score {
            debug!("no viable move for {turn:?}");
            return None;
        }

        let mv = candidates.choose(&mut self.rng).copied()?;
        debug!(
            "picked {mv} at score {best} from {} tied candidates, {} nodes",
            candidates.len(),
            self.nodes
        );
        Some((
            mv,
            SearchReport {
                score: best,
                nodes: self.nodes,
            },
        ))
    }
}
