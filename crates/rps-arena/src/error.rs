use super::*;

/// Caller-visible rejections, one variant per named precondition.
///
/// Every failure is a synchronous, all-or-nothing rejection of the
/// specific call: nothing mutates on the error path. Retry policy, if
/// any, belongs to the caller.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ArenaError {
    /// The address already has a profile.
    AlreadyRegistered,
    /// The address has no profile.
    NotRegistered,
    /// The caller is not idle, so it cannot enter the lobby.
    AlreadyInLobby,
    /// The caller has no game awaiting moves.
    NoActiveGame,
    /// The caller's move slot is already filled.
    AlreadyMoved,
    /// The caller has never been in a game.
    NoGameFound,
    /// The reward ledger rejected the credit; resolution was aborted.
    FundsUnavailable,
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRegistered => write!(f, "player already exists"),
            Self::NotRegistered => write!(f, "player does not exist"),
            Self::AlreadyInLobby => write!(f, "player already in lobby"),
            Self::NoActiveGame => write!(f, "no active game"),
            Self::AlreadyMoved => write!(f, "move already submitted"),
            Self::NoGameFound => write!(f, "no game found"),
            Self::FundsUnavailable => write!(f, "reward pool has insufficient funds"),
        }
    }
}

impl std::error::Error for ArenaError {}

impl From<LedgerError> for ArenaError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::FundsUnavailable => Self::FundsUnavailable,
        }
    }
}
