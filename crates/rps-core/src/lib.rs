//! Core type aliases, identity types, and constants for the rps arena.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the arena workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Reward amounts and pool balances in ledger tokens.
pub type Tokens = u64;
/// Sequential player identifier, assigned at registration starting at 1.
pub type PlayerId = u64;
/// Sequential game identifier, assigned when a pair is matched.
pub type GameId = u64;
/// Seat index within a game (0 = the player who entered the lobby first).
pub type Seat = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and simulation.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;

/// A caller's unique identity key.
///
/// Minted by whatever session layer fronts the engine, never by the engine
/// itself. The engine only requires uniqueness and cheap equality.
pub struct Address {
    inner: uuid::Uuid,
}

impl Address {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

impl From<Address> for uuid::Uuid {
    fn from(address: Address) -> Self {
        address.inner()
    }
}
impl From<uuid::Uuid> for Address {
    fn from(inner: uuid::Uuid) -> Self {
        Self { inner }
    }
}

impl Default for Address {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
        }
    }
}

impl Arbitrary for Address {
    fn random() -> Self {
        Self::default()
    }
}

impl Copy for Address {}
impl Clone for Address {
    fn clone(&self) -> Self {
        *self
    }
}

impl Eq for Address {}
impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Address {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Address").field(&self.inner).finish()
    }
}
impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of players in a contest.
pub const N: usize = 2;
/// Default reward credited to the winner of a decided game.
pub const DEFAULT_REWARD: Tokens = 10;
