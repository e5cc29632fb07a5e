use super::*;
use rps_gameplay::Move;

/// Errors that can occur during protocol operations.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    InvalidMove(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMove(s) => write!(f, "invalid move: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Handles Event to ServerMessage conversion and move parsing.
/// Centralizes the boundary between internal events and wire format.
pub struct Protocol;

impl Protocol {
    /// Converts an internal Event to a wire ServerMessage.
    pub fn encode(event: &Event) -> ServerMessage {
        match event {
            Event::PlayerCreated {
                id,
                username,
                address,
            } => ServerMessage::PlayerCreated {
                id: *id,
                username: username.clone(),
                address: address.to_string(),
            },
            Event::EnterLobby { address } => ServerMessage::EnterLobby {
                address: address.to_string(),
            },
            Event::GameStarted {
                game,
                player_1,
                player_2,
            } => ServerMessage::GameStarted {
                game: *game,
                player_1: player_1.to_string(),
                player_2: player_2.to_string(),
                state: Status::Playing.to_string(),
            },
            Event::GamePlayed { game, player } => ServerMessage::GamePlayed {
                game: *game,
                player: player.to_string(),
            },
            Event::GameResult {
                game,
                winner,
                loser,
            } => ServerMessage::GameResult {
                game: *game,
                winner: winner.to_string(),
                loser: loser.to_string(),
            },
            Event::GameDrawn { game, players } => ServerMessage::GameDrawn {
                game: *game,
                players: players.iter().map(|p| p.to_string()).collect(),
            },
        }
    }
    /// Parses a client move string into a Move.
    pub fn decode(s: &str) -> Result<Move, ProtocolError> {
        Move::try_from(s).map_err(|_| ProtocolError::InvalidMove(s.to_string()))
    }
}
