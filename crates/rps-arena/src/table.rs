use rps_core::Address;
use rps_core::GameId;
use rps_core::Tokens;
use rps_core::N;
use rps_gameplay::Game;
use std::collections::HashMap;

/// Owns active and historical game records and the per-player indices
/// over them.
///
/// Games live in an append-only arena keyed by sequential id; "current
/// game" lookups go through an explicit active index rather than any
/// most-recent-first scan. Resolved games stay in the arena forever.
#[derive(Debug, Default)]
pub struct GameTable {
    games: Vec<Game>,
    active: HashMap<Address, GameId>,
    history: HashMap<Address, Vec<GameId>>,
    pool: Tokens,
}

impl GameTable {
    /// Opens a game for a freshly paired ordered pair of players,
    /// indexing it as active for both and appending to both histories.
    pub(crate) fn open(&mut self, player_1: Address, player_2: Address) -> GameId {
        let id = self.games.len() as GameId + 1;
        self.games.push(Game::open(id, player_1, player_2));
        for address in [player_1, player_2] {
            self.active.insert(address, id);
            self.history.entry(address).or_default().push(id);
        }
        id
    }
    /// The game record at an id.
    pub fn game(&self, id: GameId) -> Option<&Game> {
        (id as usize)
            .checked_sub(1)
            .and_then(|slot| self.games.get(slot))
    }
    pub(crate) fn game_mut(&mut self, id: GameId) -> Option<&mut Game> {
        (id as usize)
            .checked_sub(1)
            .and_then(|slot| self.games.get_mut(slot))
    }
    /// The player's game awaiting moves, if any.
    pub fn active_of(&self, address: Address) -> Option<GameId> {
        self.active.get(&address).copied()
    }
    /// The player's most recent game, current or resolved.
    pub fn latest_of(&self, address: Address) -> Option<GameId> {
        self.history_of(address).last().copied()
    }
    /// Append-only game ids in creation order.
    pub fn history_of(&self, address: Address) -> &[GameId] {
        self.history.get(&address).map(Vec::as_slice).unwrap_or(&[])
    }
    /// Total games ever opened.
    pub fn count(&self) -> usize {
        self.games.len()
    }
    /// Drops the active index entries once a game resolves.
    pub(crate) fn retire(&mut self, players: &[Address; N]) {
        for address in players {
            self.active.remove(address);
        }
    }

    /// Local mirror of the ledger collaborator's pool balance.
    pub fn pool(&self) -> Tokens {
        self.pool
    }
    pub(crate) fn debit_pool(&mut self, amount: Tokens) {
        self.pool = self.pool.saturating_sub(amount);
    }
    pub(crate) fn set_pool(&mut self, balance: Tokens) {
        self.pool = balance;
    }
}
