use go_referee::{Game, Move, Stone};

/// Opponent that picks uniformly among the legal placements.
///
/// Placements filling one of its own single-point eyes are skipped, so
/// random games settle and end with two passes instead of self-destructing.
pub struct RandomPlayer {
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        RandomPlayer { rng }
    }

    pub fn choose(&mut self, game: &Game) -> Move {
        let stone = game.current_player();
        let candidates: Vec<Move> = game
            .legal_moves()
            .into_iter()
            .filter(|mv| match mv {
                Move::Place(p) => !fills_own_eye(game, *p, stone),
                Move::Pass => false,
            })
            .collect();

        if candidates.is_empty() {
            Move::Pass
        } else {
            candidates[self.rng.usize(..candidates.len())]
        }
    }
}

fn fills_own_eye(game: &Game, point: (u8, u8), stone: Stone) -> bool {
    let board = game.board();
    board
        .neighbors(point)
        .iter()
        .all(|&n| board.stone_at(n) == Ok(Some(stone)))
}

/// Let `player` play both colors until the game ends or `max_turns` turns
/// have been played. Returns the number of turns played.
pub fn self_play(game: &mut Game, player: &mut RandomPlayer, max_turns: usize) -> usize {
    let mut played = 0;
    while played < max_turns && !game.is_terminal() {
        let mv = player.choose(game);
        match game.play(mv) {
            Ok(snapshot) => {
                if let Some(turn) = snapshot.turn {
                    tracing::trace!(%turn, captured = snapshot.captured.len(), "self-play turn");
                }
            }
            Err(e) => {
                tracing::warn!(%mv, error = %e, "random player chose an illegal move");
                break;
            }
        }
        played += 1;
    }
    played
}
