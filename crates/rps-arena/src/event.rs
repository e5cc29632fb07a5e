use rps_core::Address;
use rps_core::GameId;
use rps_core::N;
use rps_core::PlayerId;

/// Notifications published by the engine after each committed operation.
///
/// Decoupled from any transport: subscribers receive these over channels
/// and render them however they like (see [`crate::Protocol`] for the
/// wire form). Failed operations publish nothing.
#[derive(Debug, Clone)]
pub enum Event {
    /// A profile was created.
    PlayerCreated {
        id: PlayerId,
        username: String,
        address: Address,
    },
    /// A player occupied the empty lobby slot.
    EnterLobby { address: Address },
    /// The lobby paired two players into a fresh game.
    GameStarted {
        game: GameId,
        player_1: Address,
        player_2: Address,
    },
    /// A concealed throw was recorded.
    GamePlayed { game: GameId, player: Address },
    /// A game resolved with a winner.
    GameResult {
        game: GameId,
        winner: Address,
        loser: Address,
    },
    /// A game resolved as a draw.
    GameDrawn {
        game: GameId,
        players: [Address; N],
    },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::PlayerCreated { id, username, .. } => {
                write!(f, "player #{} created ({})", id, username)
            }
            Event::EnterLobby { address } => write!(f, "{} waits in the lobby", address),
            Event::GameStarted {
                game,
                player_1,
                player_2,
            } => write!(f, "game #{}: {} vs {}", game, player_1, player_2),
            Event::GamePlayed { game, player } => {
                write!(f, "game #{}: {} threw", game, player)
            }
            Event::GameResult { game, winner, .. } => {
                write!(f, "game #{}: {} wins", game, winner)
            }
            Event::GameDrawn { game, .. } => write!(f, "game #{}: drawn", game),
        }
    }
}
