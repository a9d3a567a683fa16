pub mod board;
pub mod error;
pub mod game;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod stone;
pub mod turn;

/// A board coordinate as `(row, col)`, both zero-based.
pub type Point = (u8, u8);

pub use board::{Board, BoardSize, Group};
pub use error::{GoError, SessionError};
pub use game::{Captures, Game, Snapshot, Stage};
pub use rules::{MoveOutcome, apply_move, legal_moves};
pub use scoring::{Breakdown, Score, Territory, score};
pub use session::{Session, SessionRecord};
pub use stone::Stone;
pub use turn::{Move, Turn};
