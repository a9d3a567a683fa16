use go_referee::{GoError, Move, Session};

use crate::ai::RandomPlayer;

/// Let the computer move if it owns the side to play and the game is still
/// open. Returns the move it made.
pub fn ai_turn(
    session: &mut Session,
    player: &mut RandomPlayer,
) -> Result<Option<Move>, GoError> {
    let game = &session.game;
    if session.ai_color != Some(game.current_player()) || !game.stage().is_play() {
        return Ok(None);
    }
    reply(session, player).map(Some)
}

/// Play `mv` for the side to move, then let the computer answer when
/// `ai_reply` is set or the session assigns it the next color.
///
/// A rejected move leaves the session untouched and no reply is made.
pub fn play_turn(
    session: &mut Session,
    mv: Move,
    ai_reply: bool,
    player: &mut RandomPlayer,
) -> Result<Option<Move>, GoError> {
    session.game.play(mv)?;
    if ai_reply && session.game.stage().is_play() {
        return reply(session, player).map(Some);
    }
    ai_turn(session, player)
}

fn reply(session: &mut Session, player: &mut RandomPlayer) -> Result<Move, GoError> {
    let mv = player.choose(&session.game);
    let stone = session.game.current_player();
    session.game.play(mv)?;
    tracing::info!(%stone, %mv, "computer played");
    Ok(mv)
}
