use rps_core::Address;

/// The single waiting-player slot.
///
/// Empty or occupied by exactly one address; mutated only by the search
/// flow. Pairing order matters downstream: the occupant always becomes
/// seat 0 of the opened game.
#[derive(Debug, Default)]
pub struct Lobby {
    waiting: Option<Address>,
}

impl Lobby {
    /// The waiting player, if any.
    pub fn occupant(&self) -> Option<Address> {
        self.waiting
    }
    pub fn is_empty(&self) -> bool {
        self.waiting.is_none()
    }
    /// Fills the empty slot.
    pub(crate) fn occupy(&mut self, address: Address) {
        assert!(self.waiting.is_none(), "lobby slot already occupied");
        self.waiting = Some(address);
    }
    /// Clears and returns the occupant for pairing.
    pub(crate) fn take(&mut self) -> Option<Address> {
        self.waiting.take()
    }
}
