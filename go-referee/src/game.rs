use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::{Board, BoardSize};
use crate::error::GoError;
use crate::rules;
use crate::scoring::{self, Score};
use crate::stone::Stone;
use crate::turn::{Move, Turn};

/// Captures indexed by the color that made them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Unstarted,
    BlackToPlay,
    WhiteToPlay,
    Finished,
}

impl Stage {
    pub fn is_play(&self) -> bool {
        !matches!(self, Stage::Finished)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Unstarted => write!(f, "unstarted"),
            Stage::BlackToPlay => write!(f, "black_to_play"),
            Stage::WhiteToPlay => write!(f, "white_to_play"),
            Stage::Finished => write!(f, "finished"),
        }
    }
}

/// The position after a turn, or the initial position when `turn` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub turn: Option<Turn>,
    pub board: Board,
    pub to_play: Stone,
    pub captures: Captures,
    pub ko: Option<Board>,
    /// Stones removed by `turn`.
    pub captured: Vec<Point>,
}

/// A game in progress: an append-only line of snapshots and a cursor into it.
///
/// Undo and redo only move the cursor. Playing a move while the cursor is
/// behind the end discards the snapshots after it.
#[derive(Debug, Clone)]
pub struct Game {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl Game {
    pub fn new(size: u8) -> Result<Self, GoError> {
        Ok(Self::with_size(BoardSize::try_from(size)?))
    }

    pub fn with_size(size: BoardSize) -> Self {
        let initial = Snapshot {
            turn: None,
            board: Board::new(size),
            to_play: Stone::Black,
            captures: Captures::new(),
            ko: None,
            captured: Vec::new(),
        };
        Game {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    // -- Accessors --

    fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    pub fn board(&self) -> &Board {
        &self.current().board
    }

    pub fn size(&self) -> BoardSize {
        self.board().board_size()
    }

    pub fn current_player(&self) -> Stone {
        self.current().to_play
    }

    pub fn captures(&self) -> Captures {
        self.current().captures
    }

    pub fn ko(&self) -> Option<&Board> {
        self.current().ko.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshots from the initial position up to and including the cursor.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots[..=self.cursor]
    }

    /// Every snapshot, including any that `redo` can step forward into.
    pub fn timeline(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Turns played to reach the current position.
    pub fn turns(&self) -> Vec<Turn> {
        self.snapshots().iter().filter_map(|s| s.turn).collect()
    }

    pub fn last_turn(&self) -> Option<Turn> {
        self.current().turn
    }

    pub fn last_move_point(&self) -> Option<Point> {
        self.last_turn().and_then(|t| t.mv.point())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// True when the two most recent turns were both passes.
    pub fn is_terminal(&self) -> bool {
        let passed = |s: &Snapshot| s.turn.is_some_and(|t| t.is_pass());
        matches!(self.snapshots(), [.., a, b] if passed(a) && passed(b))
    }

    pub fn stage(&self) -> Stage {
        if self.is_terminal() {
            Stage::Finished
        } else if self.cursor == 0 {
            Stage::Unstarted
        } else {
            match self.current_player() {
                Stone::Black => Stage::BlackToPlay,
                Stone::White => Stage::WhiteToPlay,
            }
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        rules::legal_moves(self.board(), self.current_player(), self.ko())
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        !self.is_terminal() && rules::is_legal(self.board(), mv, self.current_player(), self.ko())
    }

    /// Score of the current position with the current capture tallies.
    pub fn score(&self) -> Score {
        let captures = self.captures();
        scoring::score(self.board(), captures.black, captures.white)
    }

    // -- Game actions --

    /// Play `mv` for the current player. On error nothing changes.
    pub fn play(&mut self, mv: Move) -> Result<&Snapshot, GoError> {
        if self.is_terminal() {
            return Err(GoError::GameOver);
        }

        let stone = self.current_player();
        let outcome = rules::apply_move(self.board(), mv, stone, self.ko()).inspect_err(|e| {
            tracing::debug!(%stone, %mv, error = %e, "move rejected");
        })?;

        let mut captures = self.captures();
        captures.add(stone, outcome.captured_count());

        let snapshot = Snapshot {
            turn: Some(Turn { stone, mv }),
            board: outcome.board,
            to_play: stone.opp(),
            captures,
            ko: outcome.ko,
            captured: outcome.captured,
        };

        let discarded = self.snapshots.len() - self.cursor - 1;
        if discarded > 0 {
            tracing::debug!(discarded, "new move truncates redo history");
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor += 1;

        tracing::debug!(%stone, %mv, captured = self.current().captured.len(), "move played");
        Ok(self.current())
    }

    pub fn place(&mut self, point: Point) -> Result<&Snapshot, GoError> {
        self.play(Move::Place(point))
    }

    pub fn pass(&mut self) -> Result<&Snapshot, GoError> {
        self.play(Move::Pass)
    }

    pub fn undo(&mut self) -> Result<(), GoError> {
        if !self.can_undo() {
            return Err(GoError::NoHistory);
        }
        self.cursor -= 1;
        tracing::debug!(cursor = self.cursor, "undo");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), GoError> {
        if !self.can_redo() {
            return Err(GoError::NoHistory);
        }
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, "redo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(game: &mut Game, points: &[Point]) {
        for &p in points {
            game.place(p).unwrap();
        }
    }

    /// Black surrounds (1, 1) from three sides, White stands on it with one
    /// liberty, and Black's next stone at (1, 2) takes it.
    fn ko_game() -> Game {
        let mut game = Game::new(9).unwrap();
        play_all(
            &mut game,
            &[
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 3),
                (2, 1),
                (2, 2),
                (8, 8),
                (1, 1),
                (1, 2),
            ],
        );
        game
    }

    // -- Initialization --

    #[test]
    fn starts_empty_with_black() {
        let game = Game::new(9).unwrap();
        assert!(game.board().is_empty());
        assert_eq!(game.current_player(), Stone::Black);
        assert_eq!(game.captures(), Captures::new());
        assert!(game.ko().is_none());
        assert_eq!(game.stage(), Stage::Unstarted);
    }

    #[test]
    fn rejects_unsupported_size() {
        assert!(matches!(Game::new(10), Err(GoError::UnsupportedSize(10))));
        assert_eq!(Game::new(19).unwrap().size(), BoardSize::Nineteen);
    }

    // -- Turn management --

    #[test]
    fn alternates_turns() {
        let mut game = Game::new(9).unwrap();
        game.place((0, 0)).unwrap();
        assert_eq!(game.current_player(), Stone::White);
        assert_eq!(game.stage(), Stage::WhiteToPlay);

        game.pass().unwrap();
        assert_eq!(game.current_player(), Stone::Black);
        assert_eq!(game.stage(), Stage::BlackToPlay);
    }

    #[test]
    fn records_turns_with_colors() {
        let mut game = Game::new(9).unwrap();
        game.place((3, 3)).unwrap();
        game.pass().unwrap();
        assert_eq!(
            game.turns(),
            vec![Turn::place(Stone::Black, (3, 3)), Turn::pass(Stone::White)]
        );
        assert_eq!(game.last_move_point(), None);
    }

    #[test]
    fn rejected_move_leaves_state_unchanged() {
        let mut game = Game::new(9).unwrap();
        game.place((0, 0)).unwrap();
        let board = game.board().clone();

        assert_eq!(game.place((0, 0)).unwrap_err(), GoError::Overwrite);
        assert_eq!(game.place((9, 9)).unwrap_err(), GoError::NotOnBoard);
        assert_eq!(game.board(), &board);
        assert_eq!(game.current_player(), Stone::White);
        assert_eq!(game.cursor(), 1);
    }

    // -- Captures tracking --

    #[test]
    fn tracks_captures() {
        let mut game = Game::new(9).unwrap();
        play_all(&mut game, &[(0, 1), (0, 0), (1, 0)]);

        assert_eq!(game.captures().black, 1);
        assert_eq!(game.captures().white, 0);
        assert_eq!(game.captures().get(Stone::Black), 1);
        assert_eq!(game.current().captured, vec![(0, 0)]);
        assert_eq!(game.board().stone_at((0, 0)), Ok(None));
    }

    #[test]
    fn rejects_suicide() {
        let mut game = Game::new(9).unwrap();
        play_all(&mut game, &[(0, 1), (8, 8), (1, 0)]);
        assert_eq!(game.place((0, 0)).unwrap_err(), GoError::Suicide);
        assert_eq!(game.current_player(), Stone::White);
    }

    // -- Ko --

    #[test]
    fn ko_forbids_immediate_recapture() {
        let mut game = ko_game();
        assert_eq!(game.captures().black, 1);
        assert!(game.ko().is_some());

        assert_eq!(game.place((1, 1)).unwrap_err(), GoError::KoViolation);
        assert!(!game.is_legal(Move::Place((1, 1))));
        assert!(!game.legal_moves().contains(&Move::Place((1, 1))));
    }

    #[test]
    fn move_elsewhere_clears_ko() {
        let mut game = ko_game();
        game.place((8, 0)).unwrap();
        assert!(game.ko().is_none());
        game.place((7, 7)).unwrap();
        game.place((1, 1)).unwrap();
        assert_eq!(game.captures().white, 1);
        assert_eq!(game.board().stone_at((1, 2)), Ok(None));
    }

    #[test]
    fn pass_clears_ko() {
        let mut game = ko_game();
        game.pass().unwrap();
        assert!(game.ko().is_none());
        game.place((7, 7)).unwrap();
        assert!(game.place((1, 1)).is_ok());
    }

    // -- Undo / redo --

    #[test]
    fn undo_restores_previous_board() {
        let mut game = Game::new(9).unwrap();
        game.place((2, 2)).unwrap();
        let before = game.board().clone();
        game.place((3, 3)).unwrap();
        let after = game.board().clone();

        game.undo().unwrap();
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), Stone::White);

        game.redo().unwrap();
        assert_eq!(game.board(), &after);
        assert_eq!(game.current_player(), Stone::Black);
    }

    #[test]
    fn undo_restores_captures_and_ko() {
        let mut game = ko_game();
        let ko = game.ko().cloned();
        game.place((8, 0)).unwrap();
        game.undo().unwrap();
        assert_eq!(game.ko(), ko.as_ref());

        game.undo().unwrap();
        assert_eq!(game.captures().black, 0);
        assert_eq!(game.board().stone_at((1, 1)), Ok(Some(Stone::White)));
        assert!(game.ko().is_none());
    }

    #[test]
    fn undo_at_start_fails() {
        let mut game = Game::new(9).unwrap();
        assert_eq!(game.undo(), Err(GoError::NoHistory));
        game.place((0, 0)).unwrap();
        game.undo().unwrap();
        assert_eq!(game.undo(), Err(GoError::NoHistory));
    }

    #[test]
    fn redo_without_undo_fails() {
        let mut game = Game::new(9).unwrap();
        assert_eq!(game.redo(), Err(GoError::NoHistory));
        game.place((0, 0)).unwrap();
        assert_eq!(game.redo(), Err(GoError::NoHistory));
    }

    #[test]
    fn new_move_discards_redo_branch() {
        let mut game = Game::new(9).unwrap();
        play_all(&mut game, &[(0, 0), (1, 1)]);
        game.undo().unwrap();
        assert!(game.can_redo());

        game.place((2, 2)).unwrap();
        assert!(!game.can_redo());
        assert_eq!(game.redo(), Err(GoError::NoHistory));
        assert_eq!(game.board().stone_at((1, 1)), Ok(None));
        assert_eq!(game.turns().len(), 2);
    }

    // -- Terminal detection --

    #[test]
    fn two_passes_end_the_game() {
        let mut game = Game::new(9).unwrap();
        game.place((0, 0)).unwrap();
        game.pass().unwrap();
        assert!(!game.is_terminal());
        game.pass().unwrap();
        assert!(game.is_terminal());
        assert_eq!(game.stage(), Stage::Finished);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn move_between_passes_resets_count() {
        let mut game = Game::new(9).unwrap();
        game.pass().unwrap();
        game.place((4, 4)).unwrap();
        game.pass().unwrap();
        assert!(!game.is_terminal());
        assert!(game.stage().is_play());
    }

    #[test]
    fn two_passes_from_start_end_the_game() {
        let mut game = Game::new(13).unwrap();
        game.pass().unwrap();
        game.pass().unwrap();
        assert!(game.is_terminal());
    }

    #[test]
    fn no_moves_after_game_over() {
        let mut game = Game::new(9).unwrap();
        game.pass().unwrap();
        game.pass().unwrap();
        assert_eq!(game.place((0, 0)).unwrap_err(), GoError::GameOver);
        assert_eq!(game.pass().unwrap_err(), GoError::GameOver);

        game.undo().unwrap();
        assert!(!game.is_terminal());
        assert!(game.place((0, 0)).is_ok());
    }

    // -- Scoring --

    #[test]
    fn scores_current_position() {
        let mut game = Game::new(9).unwrap();
        game.place((4, 4)).unwrap();
        let score = game.score();
        assert_eq!(score.black.territory, 80);
        assert_eq!(score.black.stones, 1);
        assert_eq!(score.winner, Some(Stone::Black));
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Unstarted.to_string(), "unstarted");
        assert_eq!(Stage::BlackToPlay.to_string(), "black_to_play");
        assert_eq!(Stage::WhiteToPlay.to_string(), "white_to_play");
        assert_eq!(Stage::Finished.to_string(), "finished");
    }
}
