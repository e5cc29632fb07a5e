use rps_core::Address;
use rps_core::Tokens;
use std::collections::HashMap;

/// Errors surfaced by the reward ledger collaborator.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LedgerError {
    /// The pool cannot cover the requested credit.
    FundsUnavailable,
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FundsUnavailable => write!(f, "insufficient funds"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// The external balance-holding collaborator credited on decided games.
///
/// The engine computes credit deltas and mirrors the pool balance; the
/// ledger custodies the actual funds. Credits are possibly-failing
/// external calls: the engine settles them before mutating any state,
/// so a rejection aborts resolution with no side effects.
///
/// The async design allows implementations backed by anything from an
/// in-memory pool to a remote custody service.
#[async_trait::async_trait]
pub trait Ledger: Send {
    /// Transfer `amount` from the pool to `address`.
    async fn credit(&mut self, address: Address, amount: Tokens) -> Result<(), LedgerError>;
    /// The pool balance currently held by the collaborator.
    async fn balance(&self) -> Tokens;
}

/// In-memory reward ledger for tests and simulation.
///
/// Models the funded token pool the engine draws rewards from, plus the
/// balances already credited out. Funding arrives out-of-band via
/// [`Bankroll::fund`]; the engine resynchronizes its mirror afterwards.
#[derive(Debug, Default)]
pub struct Bankroll {
    pool: Tokens,
    credited: HashMap<Address, Tokens>,
}

impl Bankroll {
    pub fn with_pool(pool: Tokens) -> Self {
        Self {
            pool,
            credited: HashMap::new(),
        }
    }
    /// Receives an out-of-band funding transfer.
    pub fn fund(&mut self, amount: Tokens) {
        self.pool += amount;
    }
    pub fn pool(&self) -> Tokens {
        self.pool
    }
    /// Tokens credited out to one address across all resolutions.
    pub fn credited(&self, address: Address) -> Tokens {
        self.credited.get(&address).copied().unwrap_or(0)
    }
    /// Tokens credited out in total.
    pub fn distributed(&self) -> Tokens {
        self.credited.values().sum()
    }
}

#[async_trait::async_trait]
impl Ledger for Bankroll {
    async fn credit(&mut self, address: Address, amount: Tokens) -> Result<(), LedgerError> {
        if self.pool < amount {
            return Err(LedgerError::FundsUnavailable);
        }
        self.pool -= amount;
        *self.credited.entry(address).or_insert(0) += amount;
        Ok(())
    }
    async fn balance(&self) -> Tokens {
        self.pool
    }
}
