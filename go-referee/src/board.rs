use std::fmt;

use arrayvec::ArrayVec;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::Point;
use crate::error::GoError;
use crate::stone::Stone;

/// Supported board dimensions. Boards are always square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum BoardSize {
    Nine = 9,
    Thirteen = 13,
    Nineteen = 19,
}

impl BoardSize {
    pub fn lines(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = GoError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            9 => Ok(BoardSize::Nine),
            13 => Ok(BoardSize::Thirteen),
            19 => Ok(BoardSize::Nineteen),
            _ => Err(GoError::UnsupportedSize(n)),
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.lines();
        write!(f, "{n}x{n}")
    }
}

/// A connected chain of same-colored stones together with its liberties.
/// Both lists are sorted in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub stones: Vec<Point>,
    pub liberties: Vec<Point>,
}

impl Group {
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }
}

/// Immutable snapshot of stone positions, stored row-major.
///
/// Every mutation returns a new `Board`; equality is structural, which is
/// what the ko check compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Option<Stone>>,
}

impl Board {
    pub fn new(size: BoardSize) -> Self {
        let n = size.lines() as usize;
        Board {
            size,
            cells: vec![None; n * n],
        }
    }

    /// Empty board with `size` lines; only 9, 13 and 19 are accepted.
    pub fn empty(size: u8) -> Result<Self, GoError> {
        Ok(Board::new(BoardSize::try_from(size)?))
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size.lines()
    }

    pub fn board_size(&self) -> BoardSize {
        self.size
    }

    pub fn on_board(&self, (row, col): Point) -> bool {
        row < self.size() && col < self.size()
    }

    pub fn stone_at(&self, point: Point) -> Result<Option<Stone>, GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }
        Ok(self.cells[self.idx(point)])
    }

    /// Off-board points read as empty.
    pub(crate) fn get(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            self.cells[self.idx(point)]
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn stone_count(&self, stone: Stone) -> u32 {
        self.cells.iter().filter(|&&c| c == Some(stone)).count() as u32
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let n = self.size();
        (0..n).flat_map(move |row| (0..n).map(move |col| (row, col)))
    }

    // -- Grid edits (no Go rules applied) --

    pub fn with_stone(&self, point: Point, stone: Option<Stone>) -> Result<Board, GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }
        let mut board = self.clone();
        let i = board.idx(point);
        board.cells[i] = stone;
        Ok(board)
    }

    /// Clear every listed point. Off-board points are ignored.
    pub fn without_stones(&self, points: &[Point]) -> Board {
        let mut board = self.clone();
        for &p in points {
            if board.on_board(p) {
                let i = board.idx(p);
                board.cells[i] = None;
            }
        }
        board
    }

    // -- Graph queries --

    /// The 4-connected neighbors of an on-board point.
    pub fn neighbors(&self, (row, col): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if !self.on_board((row, col)) {
            return result;
        }
        if row > 0 {
            result.push((row - 1, col));
        }
        if row + 1 < self.size() {
            result.push((row + 1, col));
        }
        if col > 0 {
            result.push((row, col - 1));
        }
        if col + 1 < self.size() {
            result.push((row, col + 1));
        }
        result
    }

    /// Flood-fill the chain containing `point` and collect its liberties.
    /// Empty and off-board points yield an empty group.
    pub fn group_at(&self, point: Point) -> Group {
        let Some(stone) = self.get(point) else {
            return Group::default();
        };

        let mut visited = vec![false; self.cells.len()];
        let mut seen_liberty = vec![false; self.cells.len()];
        let mut group = Group::default();
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let vi = self.idx(p);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            group.stones.push(p);
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                match self.cells[ni] {
                    None if !seen_liberty[ni] => {
                        seen_liberty[ni] = true;
                        group.liberties.push(n);
                    }
                    Some(s) if s == stone && !visited[ni] => stack.push(n),
                    _ => {}
                }
            }
        }

        group.stones.sort_unstable();
        group.liberties.sort_unstable();
        group
    }

    /// Maximal connected region of empty points containing `point`, plus
    /// whether Black and White stones border it, in that order.
    pub(crate) fn empty_region(
        &self,
        point: Point,
        visited: &mut [bool],
    ) -> (Vec<Point>, [bool; 2]) {
        let mut region = Vec::new();
        let mut borders = [false; 2];
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let vi = self.idx(p);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            region.push(p);
            for n in self.neighbors(p) {
                match self.get(n) {
                    Some(Stone::Black) => borders[0] = true,
                    Some(Stone::White) => borders[1] = true,
                    None if !visited[self.idx(n)] => stack.push(n),
                    None => {}
                }
            }
        }

        (region, borders)
    }

    #[inline]
    pub(crate) fn idx(&self, (row, col): Point) -> usize {
        row as usize * self.size() as usize + col as usize
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        for row in 0..n {
            let line: String = (0..n)
                .map(|col| self.get((row, col)).map_or('.', Stone::letter))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
