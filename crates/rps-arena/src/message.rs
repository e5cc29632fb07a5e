use super::*;
use rps_core::GameId;
use rps_core::PlayerId;
use rps_gameplay::Game;
use rps_gameplay::Phase;
use serde::Serialize;

/// Messages published to clients by whatever transport fronts the arena.
///
/// Addresses render as strings at this boundary; concealed throws render
/// as the masked placeholder. The engine itself never sees these.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A profile was created.
    PlayerCreated {
        id: PlayerId,
        username: String,
        address: String,
    },
    /// A player occupied the lobby slot.
    EnterLobby { address: String },
    /// Two players were paired into a game.
    GameStarted {
        game: GameId,
        player_1: String,
        player_2: String,
        state: String,
    },
    /// A concealed throw was recorded.
    GamePlayed { game: GameId, player: String },
    /// A game resolved with a winner.
    GameResult {
        game: GameId,
        winner: String,
        loser: String,
    },
    /// A game resolved as a draw.
    GameDrawn { game: GameId, players: Vec<String> },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

/// Wire rendering of a game as one reader is allowed to see it.
///
/// Built from an already-redacted [`Game`], so an unsubmitted or
/// still-concealed side always reads `****`.
#[derive(Clone, Debug, Serialize)]
pub struct GameMessage {
    pub id: GameId,
    pub player_1: String,
    pub player_2: String,
    pub player_1_move: String,
    pub player_2_move: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser: Option<String>,
    pub drawn: bool,
}

impl From<&Game> for GameMessage {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id(),
            player_1: game.player_1().to_string(),
            player_2: game.player_2().to_string(),
            player_1_move: game.slot(0).to_string(),
            player_2_move: game.slot(1).to_string(),
            state: game.phase().to_string(),
            winner: game
                .verdict()
                .and_then(|v| v.winner())
                .map(|a| a.to_string()),
            loser: game
                .verdict()
                .and_then(|v| v.loser())
                .map(|a| a.to_string()),
            drawn: game.phase() == Phase::Resolved
                && game.verdict().is_some_and(|v| v.is_drawn()),
        }
    }
}

/// Wire rendering of a player profile.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerMessage {
    pub id: PlayerId,
    pub username: String,
    pub address: String,
    pub won: u32,
    pub lost: u32,
    pub drawn: u32,
    pub state: String,
}

impl From<&Profile> for PlayerMessage {
    fn from(player: &Profile) -> Self {
        Self {
            id: player.id(),
            username: player.username().to_string(),
            address: player.address().to_string(),
            won: player.won(),
            lost: player.lost(),
            drawn: player.drawn(),
            state: player.status().to_string(),
        }
    }
}

/// Wire rendering of a player's game history.
#[derive(Clone, Debug, Serialize)]
pub struct HistoryMessage {
    pub count: usize,
    pub games: Vec<GameId>,
}

impl From<&[GameId]> for HistoryMessage {
    fn from(games: &[GameId]) -> Self {
        Self {
            count: games.len(),
            games: games.to_vec(),
        }
    }
}
