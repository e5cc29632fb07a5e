use super::*;
use rps_core::Address;
use rps_core::GameId;
use rps_core::PlayerId;
use rps_core::Tokens;
use rps_gameplay::Game;
use rps_gameplay::Move;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;

/// One request to the single-writer arena task.
///
/// Each variant carries the caller's oneshot reply channel. Constructed
/// only by [`crate::ArenaHandle`]; the arena task answers every command
/// before dequeuing the next.
pub enum Command {
    Register {
        address: Address,
        username: String,
        reply: oneshot::Sender<Result<PlayerId, ArenaError>>,
    },
    Player {
        address: Address,
        reply: oneshot::Sender<Result<Profile, ArenaError>>,
    },
    PlayerCount {
        reply: oneshot::Sender<usize>,
    },
    Search {
        address: Address,
        reply: oneshot::Sender<Result<Search, ArenaError>>,
    },
    Play {
        address: Address,
        throw: Move,
        reply: oneshot::Sender<Result<Game, ArenaError>>,
    },
    Game {
        address: Address,
        reply: oneshot::Sender<Result<Game, ArenaError>>,
    },
    History {
        address: Address,
        reply: oneshot::Sender<Result<Vec<GameId>, ArenaError>>,
    },
    Pool {
        reply: oneshot::Sender<Tokens>,
    },
    Sync {
        reply: oneshot::Sender<Tokens>,
    },
    Subscribe {
        reply: oneshot::Sender<UnboundedReceiver<Event>>,
    },
}
