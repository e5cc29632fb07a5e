//! Rock-paper-scissors rules: moves, concealment, and resolution.
//!
//! This module implements the mechanics of a single contest, independent of
//! matchmaking, identity, and reward accounting.
//!
//! ## State Representation
//!
//! - [`Game`] — One contest: an ordered player pair, two move slots, a phase
//! - [`Slot`] — A move slot as visible to readers: concealed or played
//! - [`Phase`] — Contest lifecycle: awaiting moves, or resolved
//!
//! ## Resolution
//!
//! - [`Move`] — A player's throw under the cyclic dominance relation
//! - [`Outcome`] — Result of comparing two throws
//! - [`Verdict`] — Final attribution: winner/loser addresses, or a draw
mod game;
mod moves;
mod slot;

pub use game::*;
pub use moves::*;
pub use slot::*;
