use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Point;
use crate::stone::Stone;

/// A proposed action: place a stone at `(row, col)` or pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Place(Point),
    Pass,
}

impl Move {
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Place(p) => Some(*p),
            Move::Pass => None,
        }
    }
}

impl From<Point> for Move {
    fn from(point: Point) -> Self {
        Move::Place(point)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place((row, col)) => write!(f, "({row}, {col})"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// A move together with the color that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub stone: Stone,
    pub mv: Move,
}

impl Turn {
    pub fn place(stone: Stone, point: Point) -> Self {
        Turn {
            stone,
            mv: Move::Place(point),
        }
    }

    pub fn pass(stone: Stone) -> Self {
        Turn {
            stone,
            mv: Move::Pass,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.mv.is_pass()
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stone.letter(), self.mv)
    }
}
