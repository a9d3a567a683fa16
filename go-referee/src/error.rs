use std::fmt;

/// A rejected engine operation. State is never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    UnsupportedSize(u8),
    NotOnBoard,
    Overwrite,
    Suicide,
    KoViolation,
    NoHistory,
    GameOver,
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::UnsupportedSize(n) => {
                write!(f, "unsupported board size {n} (expected 9, 13 or 19)")
            }
            GoError::NotOnBoard => write!(f, "not on board"),
            GoError::Overwrite => write!(f, "overwrite"),
            GoError::Suicide => write!(f, "suicide"),
            GoError::KoViolation => write!(f, "ko violation"),
            GoError::NoHistory => write!(f, "no history"),
            GoError::GameOver => write!(f, "game over"),
        }
    }
}

impl std::error::Error for GoError {}

/// Failure to save or restore a session record.
#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Json(serde_json::Error),
    UnsupportedVersion(u32),
    Config(GoError),
    OutOfTurn { index: usize },
    IllegalMove { index: usize, source: GoError },
    CaptureMismatch { index: usize, expected: u32, found: u32 },
    TallyMismatch,
    CursorOutOfRange { cursor: usize, turns: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "session io error: {e}"),
            SessionError::Json(e) => write!(f, "malformed session record: {e}"),
            SessionError::UnsupportedVersion(v) => write!(f, "unsupported session version {v}"),
            SessionError::Config(e) => write!(f, "invalid session config: {e}"),
            SessionError::OutOfTurn { index } => write!(f, "turn {index} played out of turn"),
            SessionError::IllegalMove { index, source } => {
                write!(f, "turn {index} is illegal: {source}")
            }
            SessionError::CaptureMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "turn {index} recorded {expected} captures but replay captured {found}"
            ),
            SessionError::TallyMismatch => {
                write!(f, "capture tallies do not match the replayed game")
            }
            SessionError::CursorOutOfRange { cursor, turns } => {
                write!(f, "cursor {cursor} is past the last of {turns} turns")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(e) => Some(e),
            SessionError::Json(e) => Some(e),
            SessionError::Config(e) => Some(e),
            SessionError::IllegalMove { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Json(e)
    }
}
