use super::*;
use rps_core::Address;
use rps_core::GameId;
use rps_core::PlayerId;
use rps_core::Tokens;
use rps_core::N;
use rps_gameplay::Game;
use rps_gameplay::Move;
use rps_gameplay::Verdict;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Outcome of a search call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Search {
    /// The caller occupied the empty lobby slot.
    Queued,
    /// The caller was paired with the waiting player.
    Matched(GameId),
}

/// Functional core for the arena.
///
/// Owns registry, lobby slot, game table, and the ledger collaborator as
/// a single aggregate, so every invariant spanning them (unique address,
/// one lobby occupant, one active game per player) is enforced in one
/// place. Operations are all-or-nothing: on any error path nothing has
/// mutated and nothing is published. Driven by [`crate::Arena`], which
/// serializes access; the core itself is free of channels and tasks
/// except for subscriber fan-out.
pub struct Engine<L: Ledger> {
    config: ArenaConfig,
    registry: Registry,
    lobby: Lobby,
    table: GameTable,
    ledger: L,
    subscribers: Vec<UnboundedSender<Event>>,
}

impl<L: Ledger> Engine<L> {
    pub fn new(config: ArenaConfig, ledger: L) -> Self {
        Self {
            config,
            registry: Registry::default(),
            lobby: Lobby::default(),
            table: GameTable::default(),
            ledger,
            subscribers: Vec::new(),
        }
    }

    /// Registers a notification channel. Closed receivers are pruned on
    /// the next broadcast.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Event> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Creates a profile for the caller's address.
    pub fn register(&mut self, address: Address, username: &str) -> Result<PlayerId, ArenaError> {
        let id = self.registry.register(address, username)?;
        log::info!("[engine] registered {} as player #{}", username, id);
        self.broadcast(Event::PlayerCreated {
            id,
            username: username.to_string(),
            address,
        });
        Ok(id)
    }

    /// Pure read of the caller's profile.
    pub fn player(&self, address: Address) -> Result<&Profile, ArenaError> {
        self.registry.get(address)
    }

    pub fn player_count(&self) -> usize {
        self.registry.count()
    }

    /// Queues the caller in the lobby, or pairs them with the waiting
    /// player and opens a game. The waiting player always becomes seat 0.
    pub fn search(&mut self, address: Address) -> Result<Search, ArenaError> {
        if self.registry.get(address)?.status() != Status::Idle {
            return Err(ArenaError::AlreadyInLobby);
        }
        match self.lobby.take() {
            None => {
                self.lobby.occupy(address);
                self.registry.set_status(address, Status::Searching);
                log::debug!("[engine] {} waits in the lobby", address);
                self.broadcast(Event::EnterLobby { address });
                Ok(Search::Queued)
            }
            Some(waiting) => {
                self.registry.set_status(waiting, Status::Playing);
                self.registry.set_status(address, Status::Playing);
                let game = self.table.open(waiting, address);
                log::info!("[engine] game #{}: {} vs {}", game, waiting, address);
                self.broadcast(Event::GameStarted {
                    game,
                    player_1: waiting,
                    player_2: address,
                });
                Ok(Search::Matched(game))
            }
        }
    }

    /// Records the caller's concealed throw; the second throw of a game
    /// resolves it synchronously within the same call.
    ///
    /// The ledger credit for a decided game is settled before any state
    /// mutation, so a rejected credit aborts the whole call: the throw
    /// stays unrecorded, counters and states untouched, the game still
    /// awaiting moves for a later retry.
    pub async fn play(&mut self, address: Address, throw: Move) -> Result<Game, ArenaError> {
        self.registry.get(address)?;
        let id = self
            .table
            .active_of(address)
            .ok_or(ArenaError::NoActiveGame)?;
        let (seat, players, settlement) = {
            let game = self.table.game(id).expect("active index points at a game");
            let seat = game.seat_of(address).expect("active game seats its players");
            if game.slot(seat).is_played() {
                return Err(ArenaError::AlreadyMoved);
            }
            (seat, *game.players(), game.preview(seat, throw))
        };
        if let Some(Verdict::Decided { winner, .. }) = settlement {
            self.ledger.credit(winner, self.config.reward).await?;
            self.table.debit_pool(self.config.reward);
        }
        let verdict = self
            .table
            .game_mut(id)
            .expect("active index points at a game")
            .submit(seat, throw);
        self.registry.set_status(address, Status::Played);
        log::debug!("[engine] game #{}: {} threw", id, address);
        self.broadcast(Event::GamePlayed {
            game: id,
            player: address,
        });
        match verdict {
            Some(Verdict::Decided { winner, loser }) => {
                self.registry.record_win(winner);
                self.registry.record_loss(loser);
                self.conclude(&players);
                log::info!("[engine] game #{}: {} beats {}", id, winner, loser);
                self.broadcast(Event::GameResult {
                    game: id,
                    winner,
                    loser,
                });
            }
            Some(Verdict::Drawn) => {
                for player in players {
                    self.registry.record_draw(player);
                }
                self.conclude(&players);
                log::info!("[engine] game #{}: drawn", id);
                self.broadcast(Event::GameDrawn { game: id, players });
            }
            None => {}
        }
        Ok(self.view(id, address))
    }

    /// The caller's current game if awaiting moves, else their last
    /// resolved one, redacted to what they are allowed to see.
    pub fn game(&self, address: Address) -> Result<Game, ArenaError> {
        let id = self
            .table
            .latest_of(address)
            .ok_or(ArenaError::NoGameFound)?;
        Ok(self.view(id, address))
    }

    /// Append-only game ids for the caller, in creation order.
    pub fn history(&self, address: Address) -> Result<Vec<GameId>, ArenaError> {
        self.registry.get(address)?;
        Ok(self.table.history_of(address).to_vec())
    }

    /// Local mirror of the collaborator's pool balance.
    pub fn pool(&self) -> Tokens {
        self.table.pool()
    }

    /// Resynchronizes the pool mirror with the collaborator, e.g. after
    /// an out-of-band funding transfer.
    pub async fn sync(&mut self) -> Tokens {
        let balance = self.ledger.balance().await;
        self.table.set_pool(balance);
        log::debug!("[engine] pool synced to {}", balance);
        balance
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    fn conclude(&mut self, players: &[Address; N]) {
        for player in players {
            self.registry.set_status(*player, Status::Idle);
        }
        self.table.retire(players);
    }

    fn view(&self, id: GameId, reader: Address) -> Game {
        self.table
            .game(id)
            .expect("indices point at live games")
            .redacted(reader)
    }

    fn broadcast(&mut self, event: Event) {
        self.subscribers.retain(|subscriber| {
            subscriber
                .send(event.clone())
                .inspect_err(|_| log::warn!("[engine] dropping dead subscriber"))
                .is_ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_core::Arbitrary;
    use rps_core::DEFAULT_REWARD;
    use rps_gameplay::Phase;

    const FUNDING: Tokens = 1_000;

    async fn engine() -> Engine<Bankroll> {
        let mut engine = Engine::new(ArenaConfig::default(), Bankroll::with_pool(FUNDING));
        engine.sync().await;
        engine
    }
    /// Registers two players and pairs them into a game.
    async fn matched(engine: &mut Engine<Bankroll>) -> (Address, Address, GameId) {
        let (a, b) = (Address::random(), Address::random());
        engine.register(a, "alice").unwrap();
        engine.register(b, "bob").unwrap();
        assert_eq!(engine.search(a).unwrap(), Search::Queued);
        match engine.search(b).unwrap() {
            Search::Matched(game) => (a, b, game),
            Search::Queued => panic!("second search must pair"),
        }
    }

    #[tokio::test]
    async fn duplicate_registration_leaves_count_untouched() {
        let mut engine = engine().await;
        let address = Address::random();
        engine.register(address, "danistone").unwrap();
        assert_eq!(
            engine.register(address, "danistone"),
            Err(ArenaError::AlreadyRegistered)
        );
        assert_eq!(engine.player_count(), 1);
    }
    #[tokio::test]
    async fn count_tracks_successful_registrations() {
        let mut engine = engine().await;
        assert_eq!(engine.player_count(), 0);
        for n in 1..=3 {
            engine.register(Address::random(), "player").unwrap();
            assert_eq!(engine.player_count(), n);
        }
    }
    #[tokio::test]
    async fn fresh_player_is_idle_and_zeroed() {
        let mut engine = engine().await;
        let address = Address::random();
        let id = engine.register(address, "danistone").unwrap();
        let player = engine.player(address).unwrap();
        assert_eq!(id, 1);
        assert_eq!(player.status(), Status::Idle);
        assert_eq!((player.won(), player.lost(), player.drawn()), (0, 0, 0));
    }
    #[tokio::test]
    async fn unregistered_search_never_occupies_the_slot() {
        let mut engine = engine().await;
        assert_eq!(
            engine.search(Address::random()),
            Err(ArenaError::NotRegistered)
        );
        let address = Address::random();
        engine.register(address, "first").unwrap();
        assert_eq!(engine.search(address).unwrap(), Search::Queued);
    }
    #[tokio::test]
    async fn searching_twice_is_rejected() {
        let mut engine = engine().await;
        let address = Address::random();
        engine.register(address, "danistone").unwrap();
        engine.search(address).unwrap();
        assert_eq!(
            engine.player(address).unwrap().status(),
            Status::Searching
        );
        assert_eq!(engine.search(address), Err(ArenaError::AlreadyInLobby));
        assert_eq!(
            engine.player(address).unwrap().status(),
            Status::Searching
        );
    }
    #[tokio::test]
    async fn pairing_reports_the_waiting_player_first() {
        let mut engine = engine().await;
        let mut events = engine.subscribe();
        let (a, b, _) = matched(&mut engine).await;
        assert_eq!(engine.player(a).unwrap().status(), Status::Playing);
        assert_eq!(engine.player(b).unwrap().status(), Status::Playing);
        let game = engine.game(a).unwrap();
        assert_eq!(game.player_1(), a);
        assert_eq!(game.player_2(), b);
        let started = std::iter::from_fn(|| events.try_recv().ok())
            .find(|e| matches!(e, Event::GameStarted { .. }))
            .expect("pairing publishes a start event");
        match started {
            Event::GameStarted {
                player_1, player_2, ..
            } => {
                assert_eq!(player_1, a);
                assert_eq!(player_2, b);
            }
            _ => unreachable!(),
        }
    }
    #[tokio::test]
    async fn playing_players_cannot_reenter_the_lobby() {
        let mut engine = engine().await;
        let (a, b, _) = matched(&mut engine).await;
        assert_eq!(engine.search(a), Err(ArenaError::AlreadyInLobby));
        engine.play(b, Move::Rock).await.unwrap();
        assert_eq!(engine.search(b), Err(ArenaError::AlreadyInLobby));
    }
    #[tokio::test]
    async fn first_throw_stays_concealed_from_the_opponent() {
        let mut engine = engine().await;
        let (a, b, _) = matched(&mut engine).await;
        engine.play(a, Move::Rock).await.unwrap();
        assert_eq!(engine.player(a).unwrap().status(), Status::Played);
        let mine = engine.game(a).unwrap();
        let theirs = engine.game(b).unwrap();
        assert_eq!(mine.slot(0).reveal(), Some(Move::Rock));
        assert_eq!(theirs.slot(0).reveal(), None);
        assert_eq!(theirs.slot(0).to_string(), "****");
    }
    #[tokio::test]
    async fn paper_beats_rock_and_settles_the_reward() {
        let mut engine = engine().await;
        let (a, b, _) = matched(&mut engine).await;
        engine.play(a, Move::Rock).await.unwrap();
        let game = engine.play(b, Move::Paper).await.unwrap();
        assert_eq!(game.phase(), Phase::Resolved);
        assert_eq!(game.verdict().unwrap().winner(), Some(b));
        let winner = engine.player(b).unwrap();
        let loser = engine.player(a).unwrap();
        assert_eq!((winner.won(), winner.lost()), (1, 0));
        assert_eq!((loser.won(), loser.lost()), (0, 1));
        assert_eq!(winner.status(), Status::Idle);
        assert_eq!(loser.status(), Status::Idle);
        assert_eq!(engine.pool(), FUNDING - DEFAULT_REWARD);
        assert_eq!(engine.ledger().credited(b), DEFAULT_REWARD);
    }
    #[tokio::test]
    async fn equal_throws_draw_without_any_debit() {
        let mut engine = engine().await;
        let (a, b, _) = matched(&mut engine).await;
        engine.play(a, Move::Rock).await.unwrap();
        let game = engine.play(b, Move::Rock).await.unwrap();
        assert!(game.verdict().unwrap().is_drawn());
        assert_eq!(engine.player(a).unwrap().drawn(), 1);
        assert_eq!(engine.player(b).unwrap().drawn(), 1);
        assert_eq!(engine.player(a).unwrap().status(), Status::Idle);
        assert_eq!(engine.pool(), FUNDING);
        assert_eq!(engine.ledger().distributed(), 0);
    }
    #[tokio::test]
    async fn double_throw_is_rejected() {
        let mut engine = engine().await;
        let (a, _, _) = matched(&mut engine).await;
        engine.play(a, Move::Rock).await.unwrap();
        assert_eq!(
            engine.play(a, Move::Paper).await,
            Err(ArenaError::AlreadyMoved)
        );
    }
    #[tokio::test]
    async fn resolved_games_accept_no_further_throws() {
        let mut engine = engine().await;
        let (a, b, _) = matched(&mut engine).await;
        engine.play(a, Move::Scissors).await.unwrap();
        engine.play(b, Move::Paper).await.unwrap();
        assert_eq!(
            engine.play(a, Move::Rock).await,
            Err(ArenaError::NoActiveGame)
        );
        assert_eq!(
            engine.play(b, Move::Rock).await,
            Err(ArenaError::NoActiveGame)
        );
    }
    #[tokio::test]
    async fn reads_fail_cleanly_before_any_game() {
        let mut engine = engine().await;
        let address = Address::random();
        assert_eq!(
            engine.play(address, Move::Rock).await,
            Err(ArenaError::NotRegistered)
        );
        engine.register(address, "danistone").unwrap();
        assert_eq!(
            engine.play(address, Move::Rock).await,
            Err(ArenaError::NoActiveGame)
        );
        assert_eq!(engine.game(address), Err(ArenaError::NoGameFound));
        assert!(engine.history(address).unwrap().is_empty());
        assert_eq!(
            engine.history(Address::random()),
            Err(ArenaError::NotRegistered)
        );
    }
    #[tokio::test]
    async fn history_grows_once_per_game_either_outcome() {
        let mut engine = engine().await;
        let (a, b, first) = matched(&mut engine).await;
        engine.play(a, Move::Rock).await.unwrap();
        engine.play(b, Move::Rock).await.unwrap();
        engine.search(b).unwrap();
        engine.search(a).unwrap();
        let second = engine.game(a).unwrap().id();
        engine.play(a, Move::Paper).await.unwrap();
        engine.play(b, Move::Scissors).await.unwrap();
        assert_eq!(engine.history(a).unwrap(), vec![first, second]);
        assert_eq!(engine.history(b).unwrap(), vec![first, second]);
        // second game paired with b waiting, so b is seat 0 this time
        assert_eq!(engine.game(b).unwrap().player_1(), b);
    }
    #[tokio::test]
    async fn pool_and_credits_conserve_the_funding() {
        let mut engine = engine().await;
        for _ in 0..4 {
            let (a, b, _) = matched(&mut engine).await;
            engine.play(a, Move::Rock).await.unwrap();
            engine.play(b, Move::Paper).await.unwrap();
        }
        let bankroll = engine.ledger();
        assert_eq!(bankroll.pool() + bankroll.distributed(), FUNDING);
        assert_eq!(engine.pool(), bankroll.pool());
    }
    #[tokio::test]
    async fn rejected_credit_aborts_resolution_for_retry() {
        let mut engine = Engine::new(ArenaConfig::default(), Bankroll::default());
        engine.sync().await;
        let (a, b, id) = matched(&mut engine).await;
        engine.play(a, Move::Rock).await.unwrap();
        assert_eq!(
            engine.play(b, Move::Paper).await,
            Err(ArenaError::FundsUnavailable)
        );
        // nothing moved: the game still awaits b, states and counters hold
        let game = engine.game(b).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingMoves);
        assert!(!game.slot(1).is_played());
        assert_eq!(engine.player(a).unwrap().status(), Status::Played);
        assert_eq!(engine.player(b).unwrap().status(), Status::Playing);
        assert_eq!(engine.player(b).unwrap().won(), 0);
        assert_eq!(engine.player(a).unwrap().lost(), 0);
        // fund the collaborator out-of-band, resync, retry the same call
        engine.ledger_mut().fund(FUNDING);
        engine.sync().await;
        let game = engine.play(b, Move::Paper).await.unwrap();
        assert_eq!(game.id(), id);
        assert_eq!(game.verdict().unwrap().winner(), Some(b));
        assert_eq!(engine.pool(), FUNDING - DEFAULT_REWARD);
    }
    #[tokio::test]
    async fn draws_resolve_even_with_an_empty_pool() {
        let mut engine = Engine::new(ArenaConfig::default(), Bankroll::default());
        let (a, b, _) = matched(&mut engine).await;
        engine.play(a, Move::Scissors).await.unwrap();
        let game = engine.play(b, Move::Scissors).await.unwrap();
        assert!(game.verdict().unwrap().is_drawn());
    }
}
