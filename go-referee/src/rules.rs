//! Move legality and capture resolution.
//!
//! Everything here is a pure function of its inputs: a board, a move, the
//! color making it and the current ko marker go in, a new board comes out.

use crate::Point;
use crate::board::Board;
use crate::error::GoError;
use crate::stone::Stone;
use crate::turn::Move;

/// The effect of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// Opponent stones removed by the move, in row-major order.
    pub captured: Vec<Point>,
    /// Position the opponent may not recreate on their next move.
    pub ko: Option<Board>,
}

impl MoveOutcome {
    pub fn captured_count(&self) -> u32 {
        self.captured.len() as u32
    }
}

/// Validate and apply `mv` for `stone`.
///
/// Opponent captures are resolved before the suicide check, so a placement
/// with no liberties of its own is legal when it takes at least one stone.
pub fn apply_move(
    board: &Board,
    mv: Move,
    stone: Stone,
    ko: Option<&Board>,
) -> Result<MoveOutcome, GoError> {
    let point = match mv {
        Move::Pass => {
            return Ok(MoveOutcome {
                board: board.clone(),
                captured: Vec::new(),
                ko: None,
            });
        }
        Move::Place(point) => point,
    };

    if board.stone_at(point)?.is_some() {
        return Err(GoError::Overwrite);
    }

    let placed = board.with_stone(point, Some(stone))?;

    let captured = dead_neighbor_stones(&placed, point, stone);
    let after = placed.without_stones(&captured);

    if captured.is_empty() && after.group_at(point).liberties.is_empty() {
        return Err(GoError::Suicide);
    }

    let single_capture = captured.len() == 1;
    if single_capture && ko == Some(&after) {
        return Err(GoError::KoViolation);
    }

    Ok(MoveOutcome {
        board: after,
        captured,
        ko: single_capture.then(|| board.clone()),
    })
}

/// Every placement `apply_move` accepts for `stone`, row-major, followed by a pass.
pub fn legal_moves(board: &Board, stone: Stone, ko: Option<&Board>) -> Vec<Move> {
    let mut moves: Vec<Move> = board
        .points()
        .filter(|&p| board.get(p).is_none())
        .map(Move::Place)
        .filter(|&mv| apply_move(board, mv, stone, ko).is_ok())
        .collect();
    moves.push(Move::Pass);
    moves
}

pub fn is_legal(board: &Board, mv: Move, stone: Stone, ko: Option<&Board>) -> bool {
    apply_move(board, mv, stone, ko).is_ok()
}

/// Stones of opponent chains adjacent to `point` that have no liberties left.
fn dead_neighbor_stones(board: &Board, point: Point, stone: Stone) -> Vec<Point> {
    let opponent = stone.opp();
    let mut visited = vec![false; board.cell_count()];
    let mut dead = Vec::new();

    for n in board.neighbors(point) {
        if board.get(n) != Some(opponent) || visited[board.idx(n)] {
            continue;
        }
        let group = board.group_at(n);
        for &p in &group.stones {
            visited[board.idx(p)] = true;
        }
        if group.liberties.is_empty() {
            dead.extend(group.stones);
        }
    }

    dead.sort_unstable();
    dead
}
