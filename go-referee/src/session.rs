//! Session persistence.
//!
//! A session is stored as the sequence of turns rather than board grids, and
//! restored by replaying those turns from an empty board. Replay reproduces
//! the board, ko marker and capture tallies exactly. The whole line is kept,
//! including turns that were undone, so that `redo` still works after a
//! reload.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::BoardSize;
use crate::error::SessionError;
use crate::game::{Captures, Game};
use crate::stone::Stone;
use crate::turn::Move;

pub const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub row: u8,
    pub col: u8,
}

impl From<Point> for PointRecord {
    fn from((row, col): Point) -> Self {
        PointRecord { row, col }
    }
}

/// One played turn. `point` is `None` for a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub stone: Stone,
    pub point: Option<PointRecord>,
    pub captured: u32,
}

impl TurnRecord {
    pub fn to_move(&self) -> Move {
        match self.point {
            Some(PointRecord { row, col }) => Move::Place((row, col)),
            None => Move::Pass,
        }
    }
}

/// A game plus the color the computer plays, if any.
#[derive(Debug, Clone)]
pub struct Session {
    pub game: Game,
    pub ai_color: Option<Stone>,
}

impl Session {
    pub fn new(game: Game, ai_color: Option<Stone>) -> Self {
        Session { game, ai_color }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = SessionRecord::from_session(self).to_json()?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path)?;
        SessionRecord::from_json(&json)?.into_session()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub version: u32,
    pub board_size: u8,
    pub turns: Vec<TurnRecord>,
    /// Number of `turns` leading to the current position. Missing means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    /// Capture tallies at the cursor.
    pub captures: Captures,
    #[serde(default)]
    pub ai_color: Option<Stone>,
}

impl SessionRecord {
    /// Record every turn of the game's line, including a redo future, and
    /// where the cursor sits in it.
    pub fn from_game(game: &Game) -> Self {
        let turns = game
            .timeline()
            .iter()
            .filter_map(|s| {
                s.turn.map(|t| TurnRecord {
                    stone: t.stone,
                    point: t.mv.point().map(PointRecord::from),
                    captured: s.captured.len() as u32,
                })
            })
            .collect();

        SessionRecord {
            version: SESSION_VERSION,
            board_size: game.size().lines(),
            turns,
            cursor: Some(game.cursor()),
            captures: game.captures(),
            ai_color: None,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        SessionRecord {
            ai_color: session.ai_color,
            ..SessionRecord::from_game(&session.game)
        }
    }

    /// Rebuild the game by replaying every turn from an empty board, then
    /// stepping back to the recorded cursor.
    pub fn into_game(&self) -> Result<Game, SessionError> {
        if self.version != SESSION_VERSION {
            return Err(SessionError::UnsupportedVersion(self.version));
        }
        let size = BoardSize::try_from(self.board_size).map_err(SessionError::Config)?;
        let cursor = self.cursor.unwrap_or(self.turns.len());
        if cursor > self.turns.len() {
            return Err(SessionError::CursorOutOfRange {
                cursor,
                turns: self.turns.len(),
            });
        }
        let mut game = Game::with_size(size);

        for (index, turn) in self.turns.iter().enumerate() {
            if turn.stone != game.current_player() {
                return Err(SessionError::OutOfTurn { index });
            }
            let snapshot = game
                .play(turn.to_move())
                .map_err(|source| SessionError::IllegalMove { index, source })?;
            let found = snapshot.captured.len() as u32;
            if found != turn.captured {
                return Err(SessionError::CaptureMismatch {
                    index,
                    expected: turn.captured,
                    found,
                });
            }
        }

        while game.cursor() > cursor {
            game.undo().map_err(SessionError::Config)?;
        }

        if game.captures() != self.captures {
            return Err(SessionError::TallyMismatch);
        }

        tracing::debug!(
            size = %size,
            turns = self.turns.len(),
            cursor,
            "session restored"
        );
        Ok(game)
    }

    pub fn into_session(&self) -> Result<Session, SessionError> {
        Ok(Session::new(self.into_game()?, self.ai_color))
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}
