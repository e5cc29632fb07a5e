use super::*;
use rps_core::Address;
use rps_core::GameId;
use rps_core::N;
use rps_core::Seat;

/// Contest lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// At least one slot is still concealed.
    AwaitingMoves,
    /// Both throws are in and the verdict is final.
    Resolved,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingMoves => write!(f, "awaiting_moves"),
            Phase::Resolved => write!(f, "resolved"),
        }
    }
}

/// Final attribution of a resolved contest.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Verdict {
    Decided { winner: Address, loser: Address },
    Drawn,
}

impl Verdict {
    pub fn is_drawn(&self) -> bool {
        matches!(self, Verdict::Drawn)
    }
    pub fn winner(&self) -> Option<Address> {
        match self {
            Verdict::Decided { winner, .. } => Some(*winner),
            Verdict::Drawn => None,
        }
    }
    pub fn loser(&self) -> Option<Address> {
        match self {
            Verdict::Decided { loser, .. } => Some(*loser),
            Verdict::Drawn => None,
        }
    }
}

/// One contest between an ordered pair of players.
///
/// Seat 0 belongs to whoever occupied the lobby first. Both slots start
/// concealed; the second recorded throw resolves the game in place.
/// Resolved games are immutable history.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    id: GameId,
    players: [Address; N],
    slots: [Slot; N],
    phase: Phase,
    verdict: Option<Verdict>,
}

impl Game {
    /// Opens a fresh contest between two distinct players.
    pub fn open(id: GameId, player_1: Address, player_2: Address) -> Self {
        assert!(player_1 != player_2, "a player cannot face themselves");
        Self {
            id,
            players: [player_1, player_2],
            slots: [Slot::Concealed; N],
            phase: Phase::AwaitingMoves,
            verdict: None,
        }
    }
    pub fn id(&self) -> GameId {
        self.id
    }
    pub fn players(&self) -> &[Address; N] {
        &self.players
    }
    /// The player who entered the lobby first.
    pub fn player_1(&self) -> Address {
        self.players[0]
    }
    /// The player whose search completed the match.
    pub fn player_2(&self) -> Address {
        self.players[1]
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }
    pub fn is_awaiting(&self) -> bool {
        self.phase == Phase::AwaitingMoves
    }
    /// The seat this address occupies, if any.
    pub fn seat_of(&self, address: Address) -> Option<Seat> {
        self.players.iter().position(|p| *p == address)
    }
    /// The slot at a seat, as stored.
    pub fn slot(&self, seat: Seat) -> &Slot {
        &self.slots[seat]
    }
    /// The opposing seat.
    pub fn opponent(&self, seat: Seat) -> Seat {
        (seat + 1) % N
    }

    /// The verdict that recording this throw would produce, without
    /// recording it. `None` while the opponent has yet to move.
    ///
    /// Lets the caller settle external accounting before committing the
    /// move, keeping a failed settlement free of side effects.
    pub fn preview(&self, seat: Seat, throw: Move) -> Option<Verdict> {
        let other = self.slots[self.opponent(seat)].reveal()?;
        Some(self.attribute(seat, throw, other))
    }

    /// Records a throw in the given seat. Resolves the game and returns
    /// the verdict when this is the second throw.
    ///
    /// Callers must have checked the slot is empty and the game awaiting.
    pub fn submit(&mut self, seat: Seat, throw: Move) -> Option<Verdict> {
        assert!(self.is_awaiting(), "throw submitted to a resolved game");
        assert!(!self.slots[seat].is_played(), "seat has already thrown");
        let settled = self.preview(seat, throw);
        self.slots[seat] = Slot::from(throw);
        if let Some(verdict) = settled {
            self.phase = Phase::Resolved;
            self.verdict = Some(verdict);
        }
        settled
    }

    /// The game as one reader is allowed to see it: their own slot as
    /// stored, the opponent's concealed until resolution.
    pub fn redacted(&self, reader: Address) -> Game {
        let mut view = self.clone();
        if self.is_awaiting() {
            for seat in 0..N {
                if self.players[seat] != reader {
                    view.slots[seat] = Slot::Concealed;
                }
            }
        }
        view
    }

    fn attribute(&self, seat: Seat, throw: Move, other: Move) -> Verdict {
        match throw.duel(&other) {
            Outcome::Draw => Verdict::Drawn,
            Outcome::First => Verdict::Decided {
                winner: self.players[seat],
                loser: self.players[self.opponent(seat)],
            },
            Outcome::Second => Verdict::Decided {
                winner: self.players[self.opponent(seat)],
                loser: self.players[seat],
            },
        }
    }
}
