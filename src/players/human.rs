use crate::players::{MoveRequest, Player};
use anyhow::{bail, Result};
use covua_core::engine::Move;
use covua_core::logic::board::{Board, Color};
use covua_core::logic::game::GameState;
use std::io::{self, Write as _};

/// Reads moves from stdin. Interactive by default; in silent mode it is
/// the stdio feed of a master process and never prompts.
pub struct HumanPlayer {
    silent: bool,
}

impl HumanPlayer {
    #[must_use]
    pub const fn new(silent: bool) -> Self {
        Self { silent }
    }
}

impl Player for HumanPlayer {
    fn prepare(&mut self, _game: &GameState) -> Result<()> {
        if !self.silent {
            println!("Enter moves in coordinate form, e.g. e2e4 or e7e8q; 'quit' resigns.");
        }
        Ok(())
    }

    fn pick_move(&mut self, game: &mut GameState) -> Result<Option<MoveRequest>> {
        let mut line = String::new();
        loop {
            if !self.silent {
                let side = if game.turn == Color::White {
                    "White"
                } else {
                    "Black"
                };
                print!("{side} to move> ");
                io::stdout().flush()?;
            }

            line.clear();
            if io::stdin().read_line(&mut line)? == 0 {
                // EOF: the feed (or the user) is gone.
                return Ok(None);
            }
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if text == "quit" || text == "resign" {
                return Ok(None);
            }

            match Board::parse_move_text(text) {
                Some(request) => return Ok(Some(request)),
                None if self.silent => bail!("unreadable move from master: '{text}'"),
                None => println!("Could not read '{text}'; use e2e4 or e7e8q."),
            }
        }
    }

    fn observe_move(&mut self, _game: &GameState, mv: &Move) -> Result<()> {
        if !self.silent {
            println!("Opponent played {mv}");
        }
        Ok(())
    }
}
