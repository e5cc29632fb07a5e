use rps_core::DEFAULT_REWARD;
use rps_core::Tokens;

/// Configuration for reward accounting.
///
/// The reward amount is a deployment parameter supplied alongside the
/// ledger collaborator, never hardcoded at resolution sites.
#[derive(Debug, Clone, Copy)]
pub struct ArenaConfig {
    /// Tokens credited to the winner of each decided game.
    pub reward: Tokens,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            reward: DEFAULT_REWARD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_reward() {
        assert_eq!(ArenaConfig::default().reward, DEFAULT_REWARD);
    }
}
