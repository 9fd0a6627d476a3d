use crate::engine::{Move, MoveKind};
use crate::logic::board::{Board, Color, FenError, PieceKind};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{is_in_check, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Checkmate(Color), // Winner
    Stalemate,
    /// Fifty-move countdown exhausted.
    Draw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    /// Passing-flag clearings committed alongside the move; undone in
    /// LIFO order when the move is taken back.
    pub maintenance: Vec<Move>,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub last_move: Option<Move>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Color::White,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, turn) = Board::from_fen(fen)?;
        let mut game = Self {
            board,
            turn,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        };
        game.update_status();
        Ok(game)
    }

    /// Resolves a (from, to, promotion) request against the legal move set
    /// and commits it. Returns the canonical move that was played.
    pub fn make_move(
        &mut self,
        from: usize,
        to: usize,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        let piece = self.board.grid[from].ok_or(MoveError::NoPieceAtSource)?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourTurn);
        }

        let generator = MoveGenerator::new();
        let (regulars, maintenance) = generator.generate(&self.board, self.turn);
        let mv = regulars
            .iter()
            .find(|m| {
                m.from as usize == from
                    && m.to as usize == to
                    && match m.kind {
                        MoveKind::Promote(kind) => promotion == Some(kind),
                        _ => promotion.is_none(),
                    }
            })
            .copied()
            .ok_or(MoveError::IllegalMove)?;

        // Maintenance first, then the move itself, same order the search
        // uses. Both are rolled back if the move turns out to self-check.
        let maintenance: Vec<Move> = maintenance.into_iter().collect();
        for m in &maintenance {
            self.board.apply_move(m);
        }
        self.board.apply_move(&mv);

        if is_in_check(&self.board, self.turn) {
            self.board.undo_move(&mv);
            for m in maintenance.iter().rev() {
                self.board.undo_move(m);
            }
            return Err(MoveError::SelfCheck);
        }

        self.history.push(MoveRecord {
            mv,
            maintenance,
            color: self.turn,
        });
        self.last_move = Some(mv);
        self.turn = self.turn.opposite();
        self.update_status();

        Ok(mv)
    }

    pub fn undo_move(&mut self) -> bool {
        if let Some(record) = self.history.pop() {
            self.board.undo_move(&record.mv);
            for m in record.maintenance.iter().rev() {
                self.board.undo_move(m);
            }
            self.turn = record.color;
            self.last_move = self.history.last().map(|r| r.mv);
            self.status = GameStatus::Playing;
            true
        } else {
            false
        }
    }

    fn update_status(&mut self) {
        if self.board.draw_clock == 0 {
            self.status = GameStatus::Draw;
            return;
        }
        let generator = MoveGenerator::new();
        if !generator.has_legal_moves(&self.board, self.turn) {
            self.status = if is_in_check(&self.board, self.turn) {
                GameStatus::Checkmate(self.turn.opposite())
            } else {
                GameStatus::Stalemate
            };
        }
    }
}
