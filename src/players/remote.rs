use crate::players::{MoveRequest, Player};
use anyhow::{bail, Context, Result};
use covua_core::engine::Move;
use covua_core::logic::board::Board;
use covua_core::logic::game::GameState;
use log::debug;
use std::io::{BufRead, BufReader, Write as _};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A competitor run as a child process, exchanging coordinate-notation
/// move lines over its stdio. The command is taken verbatim, so the
/// competitor chooses its own flags (typically `covua --mode slave ...`).
pub struct RemotePlayer {
    command: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl RemotePlayer {
    pub fn new(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .with_context(|| format!("empty competitor command '{command}'"))?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start competitor '{command}'"))?;

        let stdin = child
            .stdin
            .take()
            .with_context(|| format!("no stdin pipe for '{command}'"))?;
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .with_context(|| format!("no stdout pipe for '{command}'"))?;

        Ok(Self {
            command: command.to_string(),
            child,
            stdin,
            stdout,
        })
    }
}

impl Player for RemotePlayer {
    fn pick_move(&mut self, _game: &mut GameState) -> Result<Option<MoveRequest>> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            // Competitor closed its stdout; it has nothing left to play.
            debug!("competitor '{}' ended its move stream", self.command);
            return Ok(None);
        }
        let text = line.trim();
        match Board::parse_move_text(text) {
            Some(request) => Ok(Some(request)),
            None => bail!("unreadable move from '{}': '{text}'", self.command),
        }
    }

    fn observe_move(&mut self, _game: &GameState, mv: &Move) -> Result<()> {
        writeln!(self.stdin, "{mv}")
            .with_context(|| format!("failed to send move to '{}'", self.command))?;
        self.stdin.flush()?;
        Ok(())
    }
}

impl Drop for RemotePlayer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
