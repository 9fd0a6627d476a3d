use clap::{Parser, ValueEnum};
use covua_core::logic::board::Color;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Interactive play against the engine.
    Human,
    /// Exchange moves over stdin/stdout, driven by a master process.
    Slave,
    /// Referee two competitor processes against each other.
    Master,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AiColor {
    White,
    Black,
}

#[derive(Debug, Parser)]
#[command(name = "covua", about = "Console chess against a fixed-depth adversarial search")]
pub struct Config {
    #[arg(long, value_enum, default_value_t = Mode::Human)]
    pub mode: Mode,

    /// Side the built-in engine plays (human and slave modes).
    #[arg(long, value_enum, default_value_t = AiColor::Black)]
    pub ai_color: AiColor,

    /// Search depth in plies; overrides the engine config file.
    #[arg(long)]
    pub depth: Option<u8>,

    /// Start position in FEN; standard start if omitted.
    #[arg(long)]
    pub fen: Option<String>,

    /// Engine tuning file (JSON scale factors and search parameters).
    #[arg(long)]
    pub engine_config: Option<PathBuf>,

    /// Tie-break seed; fixing it makes a whole run reproducible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Competitor command, twice (white first) in master mode.
    #[arg(long = "competitor")]
    pub competitors: Vec<String>,
}

impl Config {
    #[must_use]
    pub const fn ai_side(&self) -> Color {
        match self.ai_color {
            AiColor::White => Color::White,
            AiColor::Black => Color::Black,
        }
    }
}
