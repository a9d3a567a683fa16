use serde::Serialize;

use crate::board::Board;
use crate::stone::Stone;

/// Empty points split by owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Territory {
    pub black: u32,
    pub white: u32,
    pub neutral: u32,
}

/// Per-color score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Breakdown {
    pub stones: u32,
    pub territory: u32,
    pub captures: u32,
}

impl Breakdown {
    pub fn total(&self) -> u32 {
        self.stones + self.territory + self.captures
    }
}

/// Full score for both players. `winner` is `None` on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: Breakdown,
    pub white: Breakdown,
    pub winner: Option<Stone>,
}

impl Score {
    pub fn get(&self, stone: Stone) -> &Breakdown {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    /// "B+{diff}", "W+{diff}" or "Draw".
    pub fn result(&self) -> String {
        let black = self.black.total();
        let white = self.white.total();
        match self.winner {
            Some(Stone::Black) => format!("B+{}", black - white),
            Some(Stone::White) => format!("W+{}", white - black),
            None => "Draw".to_string(),
        }
    }
}

/// Flood-fill every empty region and credit it to the single color that
/// borders it. Regions touching both colors, or no stones at all, are neutral.
///
/// No dead-stone detection: every stone on the board counts as alive.
pub fn evaluate_territory(board: &Board) -> Territory {
    let mut visited = vec![false; board.cell_count()];
    let mut territory = Territory::default();

    for point in board.points() {
        if board.get(point).is_some() || visited[board.idx(point)] {
            continue;
        }
        let (region, borders) = board.empty_region(point, &mut visited);
        let size = region.len() as u32;
        match borders {
            [true, false] => territory.black += size,
            [false, true] => territory.white += size,
            _ => territory.neutral += size,
        }
    }

    territory
}

/// Area-style score: stones on the board + territory + captures.
pub fn score(board: &Board, captures_black: u32, captures_white: u32) -> Score {
    let territory = evaluate_territory(board);

    let black = Breakdown {
        stones: board.stone_count(Stone::Black),
        territory: territory.black,
        captures: captures_black,
    };
    let white = Breakdown {
        stones: board.stone_count(Stone::White),
        territory: territory.white,
        captures: captures_white,
    };

    let winner = match black.total().cmp(&white.total()) {
        std::cmp::Ordering::Greater => Some(Stone::Black),
        std::cmp::Ordering::Less => Some(Stone::White),
        std::cmp::Ordering::Equal => None,
    };

    Score {
        black,
        white,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a 9x9 board from an ASCII layout. 'B' = Black, 'W' = White,
    /// anything else = Empty. Missing rows and columns are empty.
    fn board_from_layout(layout: &[&str]) -> Board {
        let mut board = Board::empty(9).unwrap();
        for (row, line) in layout.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                board = board
                    .with_stone((row as u8, col as u8), Stone::from_letter(c))
                    .unwrap();
            }
        }
        board
    }

    #[test]
    fn empty_board_is_a_draw() {
        let board = Board::empty(9).unwrap();
        let score = score(&board, 0, 0);
        assert_eq!(score.black.territory, 0);
        assert_eq!(score.white.territory, 0);
        assert_eq!(score.winner, None);
        assert_eq!(score.result(), "Draw");
        assert_eq!(evaluate_territory(&board).neutral, 81);
    }

    #[test]
    fn single_color_owns_everything() {
        let board = board_from_layout(&["", "", "", "", "....W"]);
        let territory = evaluate_territory(&board);
        assert_eq!(territory.white, 80);
        assert_eq!(territory.black, 0);
        assert_eq!(territory.neutral, 0);
    }

    #[test]
    fn split_board() {
        // Column 3 black, column 4 white.
        let rows: Vec<String> = (0..9).map(|_| "...BW....".to_string()).collect();
        let layout: Vec<&str> = rows.iter().map(String::as_str).collect();
        let board = board_from_layout(&layout);

        let score = score(&board, 2, 5);
        assert_eq!(
            score.black,
            Breakdown {
                stones: 9,
                territory: 27,
                captures: 2
            }
        );
        assert_eq!(
            score.white,
            Breakdown {
                stones: 9,
                territory: 36,
                captures: 5
            }
        );
        assert_eq!(score.winner, Some(Stone::White));
        assert_eq!(score.result(), "W+12");
        assert_eq!(score.get(Stone::Black).total(), 38);
    }

    #[test]
    fn region_touching_both_colors_is_neutral() {
        let board = board_from_layout(&["B.W"]);
        let territory = evaluate_territory(&board);
        assert_eq!(territory.black, 0);
        assert_eq!(territory.white, 0);
        assert_eq!(territory.neutral, 79);
    }

    #[test]
    fn enclosed_corner_counts_for_owner() {
        let board = board_from_layout(&["..B", "..B", "BB.", "", "", "", "", "", "WWWWWWWWW"]);
        let territory = evaluate_territory(&board);
        assert_eq!(territory.black, 4);
        assert_eq!(territory.neutral, 81 - 9 - 4 - 4);
        assert_eq!(territory.white, 0);
    }

    #[test]
    fn captures_break_ties() {
        let board = board_from_layout(&["B.W"]);
        let score = score(&board, 0, 1);
        assert_eq!(score.winner, Some(Stone::White));
        assert_eq!(score.result(), "W+1");
    }

    #[test]
    fn score_json_shape() {
        let board = board_from_layout(&["B"]);
        let json = serde_json::to_value(score(&board, 0, 0)).unwrap();
        assert_eq!(json["black"]["stones"], 1);
        assert_eq!(json["black"]["territory"], 80);
        assert_eq!(json["winner"], 1);
    }
}
