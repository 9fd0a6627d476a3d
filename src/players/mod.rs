use anyhow::Result;
use covua_core::engine::Move;
use covua_core::logic::board::PieceKind;
use covua_core::logic::game::GameState;

pub mod ai;
pub mod human;
pub mod remote;

/// A requested move as entered or received: squares plus promotion piece.
/// The game loop resolves it against the legal move set before committing.
pub type MoveRequest = (usize, usize, Option<PieceKind>);

pub trait Player {
    /// Called once with the starting position, before the first move.
    fn prepare(&mut self, _game: &GameState) -> Result<()> {
        Ok(())
    }

    /// The side's next move, or `None` when the player has nothing to
    /// play (mated, resigned, or the remote peer went away).
    fn pick_move(&mut self, game: &mut GameState) -> Result<Option<MoveRequest>>;

    /// Shows the opponent's committed move to this player.
    fn observe_move(&mut self, _game: &GameState, _mv: &Move) -> Result<()> {
        Ok(())
    }
}
