use super::*;

/// Placeholder shown to readers for a move they may not see yet.
pub const MASKED: &str = "****";

/// A move slot as visible to readers.
///
/// Concealment is a property of the data model, not a rendering trick:
/// a reader handed a `Concealed` slot cannot recover the real throw.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Slot {
    Concealed,
    Played(Move),
}

impl Slot {
    /// True once a throw has been recorded in this slot.
    pub fn is_played(&self) -> bool {
        matches!(self, Slot::Played(_))
    }
    /// The recorded throw, if visible.
    pub fn reveal(&self) -> Option<Move> {
        match self {
            Slot::Played(m) => Some(*m),
            Slot::Concealed => None,
        }
    }
}

impl From<Move> for Slot {
    fn from(m: Move) -> Self {
        Slot::Played(m)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Concealed => write!(f, "{}", MASKED),
            Slot::Played(m) => write!(f, "{}", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concealed_renders_masked() {
        assert_eq!(Slot::Concealed.to_string(), "****");
    }
    #[test]
    fn played_renders_the_throw() {
        assert_eq!(Slot::from(Move::Rock).to_string(), "rock");
    }
    #[test]
    fn concealed_reveals_nothing() {
        assert_eq!(Slot::Concealed.reveal(), None);
        assert_eq!(Slot::from(Move::Paper).reveal(), Some(Move::Paper));
    }
}
