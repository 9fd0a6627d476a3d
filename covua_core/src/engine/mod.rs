use crate::logic::board::{Board, Color, Piece, PieceKind};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveKind {
    #[default]
    Quiet,
    /// Pawn two-square advance; marks the pawn as en-passant capturable.
    DoubleStep,
    /// Capture of a passing pawn; the victim is not on the target square.
    EnPassant,
    CastleShort,
    CastleLong,
    Promote(PieceKind),
    /// Maintenance action: strips a stale passing flag before a side's
    /// regular moves are considered. Applied and undone around every
    /// move iteration, never chosen by a player.
    ClearPassing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Move {
    pub from: u8,
    pub to: u8,
    pub kind: MoveKind,
    /// Captured piece with its flags, if any. Filled at generation time so
    /// the tactical extension can classify a move before applying it.
    pub capture: Option<Piece>,
    /// True when the moving piece had not moved before; undo restores the
    /// flag from this.
    pub first_move: bool,
    /// Draw-clock value at generation time; undo restores it.
    pub clock: u8,
}

impl Move {
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

impl std::fmt::Display for Move {
    /// Coordinate notation: `e2e4`, promotions as `e7e8q`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            Board::square_name(self.from as usize),
            Board::square_name(self.to as usize)
        )?;
        if let MoveKind::Promote(kind) = self.kind {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchReport {
    /// Best score found at the root, from the mover's perspective.
    pub score: i32,
    pub nodes: u32,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    fn choose_move(&mut self, board: &mut Board, turn: Color) -> Option<(Move, SearchReport)>;
}
