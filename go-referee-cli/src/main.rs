//! Command-line driver for the Go referee.
//!
//! - `referee selfplay` - two random players fight it out
//! - `referee new <session>` - start a game, optionally against the computer
//! - `referee play <session> <row> <col>` - play a move in a saved game
//! - `referee show <session>` - print a saved game and its score
//! - `referee undo <session>` / `referee redo <session>` - step through turns

mod ai;
mod driver;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use go_referee::{Game, Move, Session, Stone};

use crate::ai::RandomPlayer;

/// Referee for the game of Go
#[derive(Parser)]
#[command(name = "referee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a random game against itself
    Selfplay {
        /// Board size: 9, 13 or 19
        #[arg(long, env = "GO_REFEREE_SIZE", default_value_t = 9)]
        size: u8,
        /// Seed for the random players
        #[arg(long, env = "GO_REFEREE_SEED")]
        seed: Option<u64>,
        /// Stop after this many turns even if nobody passed
        #[arg(long, default_value_t = 1000)]
        max_turns: usize,
        /// Write the finished session to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Start a new session file
    New {
        path: PathBuf,
        /// Board size: 9, 13 or 19
        #[arg(long, env = "GO_REFEREE_SIZE", default_value_t = 9)]
        size: u8,
        /// Let the computer play this color
        #[arg(long, value_enum)]
        ai: Option<Side>,
        #[arg(long, env = "GO_REFEREE_SEED")]
        seed: Option<u64>,
    },
    /// Play a move for the side to move in a saved session
    Play {
        path: PathBuf,
        #[arg(required_unless_present = "pass", requires = "col")]
        row: Option<u8>,
        #[arg(requires = "row")]
        col: Option<u8>,
        #[arg(long, conflicts_with_all = ["row", "col"])]
        pass: bool,
        /// Have the computer answer even if the session has no AI color
        #[arg(long)]
        ai_reply: bool,
        #[arg(long, env = "GO_REFEREE_SEED")]
        seed: Option<u64>,
    },
    /// Print a saved session's board, stage and score
    Show { path: PathBuf },
    /// Undo turns in a saved session and write it back
    Undo {
        path: PathBuf,
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
    /// Redo turns previously undone in a saved session
    Redo {
        path: PathBuf,
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Stone {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Stone::Black,
            Side::White => Stone::White,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "go_referee=info,referee=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Selfplay {
            size,
            seed,
            max_turns,
            save,
        } => {
            let mut game = Game::new(size)?;
            let mut player = RandomPlayer::new(seed);
            let played = ai::self_play(&mut game, &mut player, max_turns);
            tracing::info!(played, finished = game.is_terminal(), "self-play done");
            report(&game);

            if let Some(path) = save {
                store(&path, &Session::new(game, None))?;
                println!("Saved to {}", path.display());
            }
        }
        Commands::New {
            path,
            size,
            ai,
            seed,
        } => {
            let mut session = Session::new(Game::new(size)?, ai.map(Stone::from));
            driver::ai_turn(&mut session, &mut RandomPlayer::new(seed))?;
            store(&path, &session)?;
            tracing::info!(size, ai_color = ?session.ai_color, "session created");
            report(&session.game);
        }
        Commands::Play {
            path,
            row,
            col,
            pass,
            ai_reply,
            seed,
        } => {
            let mv = match (pass, row, col) {
                (true, _, _) => Move::Pass,
                (false, Some(row), Some(col)) => Move::Place((row, col)),
                _ => bail!("give a row and a column, or --pass"),
            };
            let mut session = load(&path)?;
            let mut player = RandomPlayer::new(seed);
            let reply = driver::play_turn(&mut session, mv, ai_reply, &mut player)
                .with_context(|| format!("{} cannot play {mv}", session.game.current_player()))?;
            store(&path, &session)?;
            if let Some(reply) = reply {
                println!("Computer: {reply}");
            }
            report(&session.game);
        }
        Commands::Show { path } => {
            let session = load(&path)?;
            report(&session.game);
        }
        Commands::Undo { path, steps } => {
            let mut session = load(&path)?;
            for _ in 0..steps {
                session.game.undo()?;
            }
            store(&path, &session)?;
            tracing::info!(steps, cursor = session.game.cursor(), "turns taken back");
            report(&session.game);
        }
        Commands::Redo { path, steps } => {
            let mut session = load(&path)?;
            for _ in 0..steps {
                session.game.redo()?;
            }
            store(&path, &session)?;
            tracing::info!(steps, cursor = session.game.cursor(), "turns replayed");
            report(&session.game);
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Session> {
    Session::load(path).with_context(|| format!("loading session from {}", path.display()))
}

fn store(path: &Path, session: &Session) -> anyhow::Result<()> {
    session
        .save(path)
        .with_context(|| format!("saving session to {}", path.display()))
}

fn report(game: &Game) {
    let score = game.score();
    println!("{}", game.board());
    println!("Stage: {}", game.stage());
    println!("Turns: {}", game.cursor());
    if let Some(turn) = game.last_turn() {
        println!("Last turn: {turn}");
    }
    if let Some((row, col)) = game.last_move_point() {
        println!("Last stone: row {row}, col {col}");
    }
    println!(
        "Black: {} stones + {} territory + {} captures = {}",
        score.black.stones,
        score.black.territory,
        score.black.captures,
        score.black.total()
    );
    println!(
        "White: {} stones + {} territory + {} captures = {}",
        score.white.stones,
        score.white.territory,
        score.white.captures,
        score.white.total()
    );
    println!("Result: {}", score.result());
}
