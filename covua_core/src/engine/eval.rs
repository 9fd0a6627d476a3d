use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color, PieceKind};
use std::sync::Arc;

/// Material count only: every occupied square adds its piece value for
/// White and subtracts it for Black. No mobility, structure or tempo.
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.config.val_pawn,
            PieceKind::Knight => self.config.val_knight,
            PieceKind::Bishop => self.config.val_bishop,
            PieceKind::Rook => self.config.val_rook,
            PieceKind::Queen => self.config.val_queen,
            PieceKind::King => self.config.val_king,
        }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let mut sum = 0;
        for piece in board.grid.iter().flatten() {
            let value = self.piece_value(piece.kind);
            sum += match piece.color {
                Color::White => value,
                Color::Black => -value,
            };
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> MaterialEvaluator {
        MaterialEvaluator::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_start_position_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluator().evaluate(&board), 0);
    }

    #[test]
    fn test_missing_piece_shows_in_balance() {
        let mut board = Board::new();
        // Remove Black's queen.
        board.set_piece(Board::square_index(7, 3), None);
        let config = EngineConfig::default();
        assert_eq!(evaluator().evaluate(&board), config.val_queen);
    }

    #[test]
    fn test_color_swap_negates_score() {
        let (board, _) =
            Board::from_fen("4k3/8/8/8/8/8/8/RN2K3 w - - 0 1").unwrap();
        let (mirror, _) =
            Board::from_fen("rn2k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let eval = evaluator();
        assert_eq!(eval.evaluate(&board), -eval.evaluate(&mirror));
    }
}
