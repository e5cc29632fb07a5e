use super::*;
use rps_core::Address;
use rps_core::PlayerId;
use std::collections::HashMap;

/// Lifecycle state of a registered player.
///
/// Exactly one state at a time; transitions happen only through lobby
/// and table operations, never directly.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Status {
    /// Free to search for a game.
    Idle,
    /// Occupying the lobby slot.
    Searching,
    /// Matched, throw not yet submitted.
    Playing,
    /// Throw submitted, opponent pending.
    Played,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Searching => write!(f, "searching"),
            Status::Playing => write!(f, "playing"),
            Status::Played => write!(f, "played"),
        }
    }
}

/// A registered player's identity, record, and current state.
#[derive(Debug, Clone)]
pub struct Profile {
    id: PlayerId,
    address: Address,
    username: String,
    won: u32,
    lost: u32,
    drawn: u32,
    status: Status,
}

impl Profile {
    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn address(&self) -> Address {
        self.address
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn won(&self) -> u32 {
        self.won
    }
    pub fn lost(&self) -> u32 {
        self.lost
    }
    pub fn drawn(&self) -> u32 {
        self.drawn
    }
    pub fn status(&self) -> Status {
        self.status
    }
}

/// Owns player identity, profiles, counters, and state.
///
/// Ids are sequential from 1 in registration order. Profiles are never
/// deleted; counters only ever grow, and only through resolution.
#[derive(Debug, Default)]
pub struct Registry {
    players: HashMap<Address, Profile>,
    registered: PlayerId,
}

impl Registry {
    /// Creates a profile for a new address. Ids start at 1.
    pub fn register(&mut self, address: Address, username: &str) -> Result<PlayerId, ArenaError> {
        if self.players.contains_key(&address) {
            return Err(ArenaError::AlreadyRegistered);
        }
        self.registered += 1;
        self.players.insert(
            address,
            Profile {
                id: self.registered,
                address,
                username: username.to_string(),
                won: 0,
                lost: 0,
                drawn: 0,
                status: Status::Idle,
            },
        );
        Ok(self.registered)
    }
    /// Pure read of a profile.
    pub fn get(&self, address: Address) -> Result<&Profile, ArenaError> {
        self.players.get(&address).ok_or(ArenaError::NotRegistered)
    }
    /// Number of registered players. Monotonic non-decreasing.
    pub fn count(&self) -> usize {
        self.players.len()
    }
    pub fn contains(&self, address: Address) -> bool {
        self.players.contains_key(&address)
    }

    pub(crate) fn set_status(&mut self, address: Address, status: Status) {
        self.profile(address).status = status;
    }
    pub(crate) fn record_win(&mut self, address: Address) {
        self.profile(address).won += 1;
    }
    pub(crate) fn record_loss(&mut self, address: Address) {
        self.profile(address).lost += 1;
    }
    pub(crate) fn record_draw(&mut self, address: Address) {
        self.profile(address).drawn += 1;
    }
    fn profile(&mut self, address: Address) -> &mut Profile {
        self.players
            .get_mut(&address)
            .expect("mutators take validated addresses")
    }
}
