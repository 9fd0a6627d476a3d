mod config;
mod display;
mod players;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use config::{Config, Mode};
use covua_core::engine::config::EngineConfig;
use covua_core::logic::board::{Board, Color};
use covua_core::logic::game::{GameState, GameStatus};
use players::ai::AiPlayer;
use players::human::HumanPlayer;
use players::remote::RemotePlayer;
use players::Player;

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    let engine_config = load_engine_config(&config)?;

    let mut game = match &config.fen {
        Some(fen) => GameState::from_fen(fen).map_err(|e| anyhow!("invalid FEN: {e}"))?,
        None => GameState::new(),
    };

    let (mut white, mut black) = build_players(&config, engine_config)?;
    white.prepare(&game)?;
    black.prepare(&game)?;

    if config.mode == Mode::Human {
        display::print_board(&game.board);
    }

    loop {
        let request = match game.turn {
            Color::White => white.pick_move(&mut game)?,
            Color::Black => black.pick_move(&mut game)?,
        };
        let Some((from, to, promotion)) = request else {
            if config.mode != Mode::Slave {
                println!("{} has no move to play.", side_name(game.turn));
            }
            break;
        };

        let mover = game.turn;
        let mv = match game.make_move(from, to, promotion) {
            Ok(mv) => mv,
            Err(err) => {
                println!(
                    "Invalid move {}{}: {err}",
                    Board::square_name(from),
                    Board::square_name(to)
                );
                return Ok(());
            }
        };

        if config.mode == Mode::Slave && mover == config.ai_side() {
            // Our half of the stdio protocol; the master reads this line.
            println!("{mv}");
        }

        // Show the committed move to the side now on turn.
        match game.turn {
            Color::White => white.observe_move(&game, &mv)?,
            Color::Black => black.observe_move(&game, &mv)?,
        }

        if config.mode == Mode::Human {
            display::print_board(&game.board);
            println!("{}", game.board.to_fen_string(game.turn));
        }

        if game.status == GameStatus::Playing {
            continue;
        }
        if config.mode != Mode::Slave {
            match game.status {
                GameStatus::Checkmate(winner) => {
                    println!("Checkmate: {} wins.", side_name(winner));
                }
                GameStatus::Stalemate => println!("Stalemate: draw."),
                GameStatus::Draw => println!("Fifty-move rule: draw."),
                GameStatus::Playing => {}
            }
        }
        break;
    }

    Ok(())
}

const fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn load_engine_config(config: &Config) -> Result<EngineConfig> {
    let mut engine_config = match &config.engine_config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read engine config {}", path.display()))?;
            EngineConfig::load_from_json(&text)
                .with_context(|| format!("cannot parse engine config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(depth) = config.depth {
        engine_config.search_depth = depth;
    }
    Ok(engine_config)
}

fn build_players(
    config: &Config,
    engine_config: EngineConfig,
) -> Result<(Box<dyn Player>, Box<dyn Player>)> {
    match config.mode {
        Mode::Master => {
            let [white_cmd, black_cmd] = config.competitors.as_slice() else {
                bail!("master mode needs exactly two --competitor commands");
            };
            let white: Box<dyn Player> = Box::new(RemotePlayer::new(white_cmd)?);
            let black: Box<dyn Player> = Box::new(RemotePlayer::new(black_cmd)?);
            Ok((white, black))
        }
        mode => {
            let silent = mode == Mode::Slave;
            let ai: Box<dyn Player> = Box::new(AiPlayer::new(engine_config, config.seed, !silent));
            let human: Box<dyn Player> = Box::new(HumanPlayer::new(silent));
            Ok(match config.ai_side() {
                Color::White => (ai, human),
                Color::Black => (human, ai),
            })
        }
    }
}
