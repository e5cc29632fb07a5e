use rps_core::Arbitrary;

/// A player's throw.
///
/// Dominance is cyclic: Rock beats Scissors, Scissors beats Paper,
/// Paper beats Rock. Equal throws draw.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// True if this throw beats the other under the cyclic relation.
    pub fn beats(&self, other: &Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }
    /// Compares two throws from the first player's perspective.
    pub fn duel(&self, other: &Move) -> Outcome {
        if self == other {
            Outcome::Draw
        } else if self.beats(other) {
            Outcome::First
        } else {
            Outcome::Second
        }
    }
}

impl Arbitrary for Move {
    fn random() -> Self {
        match rand::random_range(0..3) {
            0 => Move::Rock,
            1 => Move::Paper,
            _ => Move::Scissors,
        }
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            other => Err(anyhow::anyhow!("invalid move: {}", other)),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissors => write!(f, "scissors"),
        }
    }
}

/// Result of comparing two throws, attributed by submission order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    /// The first throw wins.
    First,
    /// The second throw wins.
    Second,
    /// Equal throws.
    Draw,
}
