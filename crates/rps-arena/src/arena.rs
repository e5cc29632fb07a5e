use super::*;
use rps_core::Address;
use rps_core::GameId;
use rps_core::PlayerId;
use rps_core::Tokens;
use rps_gameplay::Game;
use rps_gameplay::Move;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// Single-writer runtime for the engine.
///
/// One task owns the whole aggregate and processes one command to
/// completion before dequeuing the next, so concurrent callers racing
/// to join the lobby, throw on the same game, or trigger payout observe
/// one serial order. No command waits on another player: every request
/// is answered immediately from current state.
pub struct Arena<L: Ledger> {
    engine: Engine<L>,
    inbox: UnboundedReceiver<Command>,
}

impl<L: Ledger + 'static> Arena<L> {
    /// Spawns the engine task and returns a cloneable handle to it.
    /// The task runs until every handle is dropped.
    pub fn spawn(config: ArenaConfig, ledger: L) -> ArenaHandle {
        let (tx, rx) = unbounded_channel();
        let arena = Self {
            engine: Engine::new(config, ledger),
            inbox: rx,
        };
        tokio::spawn(arena.run());
        ArenaHandle { tx }
    }
    async fn run(mut self) {
        log::debug!("[arena] accepting requests");
        while let Some(command) = self.inbox.recv().await {
            self.handle(command).await;
        }
        log::debug!("[arena] all handles dropped, shutting down");
    }
    async fn handle(&mut self, command: Command) {
        match command {
            Command::Register {
                address,
                username,
                reply,
            } => {
                let _ = reply.send(self.engine.register(address, &username));
            }
            Command::Player { address, reply } => {
                let _ = reply.send(self.engine.player(address).cloned());
            }
            Command::PlayerCount { reply } => {
                let _ = reply.send(self.engine.player_count());
            }
            Command::Search { address, reply } => {
                let _ = reply.send(self.engine.search(address));
            }
            Command::Play {
                address,
                throw,
                reply,
            } => {
                let _ = reply.send(self.engine.play(address, throw).await);
            }
            Command::Game { address, reply } => {
                let _ = reply.send(self.engine.game(address));
            }
            Command::History { address, reply } => {
                let _ = reply.send(self.engine.history(address));
            }
            Command::Pool { reply } => {
                let _ = reply.send(self.engine.pool());
            }
            Command::Sync { reply } => {
                let _ = reply.send(self.engine.sync().await);
            }
            Command::Subscribe { reply } => {
                let _ = reply.send(self.engine.subscribe());
            }
        }
    }
}

/// Cloneable client for a running [`Arena`].
///
/// Every method enqueues one command and awaits its reply; requests
/// from all clones are serialized by the arena task in arrival order.
#[derive(Clone)]
pub struct ArenaHandle {
    tx: UnboundedSender<Command>,
}

impl ArenaHandle {
    pub async fn register(&self, address: Address, username: &str) -> Result<PlayerId, ArenaError> {
        let username = username.to_string();
        self.request(|reply| Command::Register {
            address,
            username,
            reply,
        })
        .await
    }
    pub async fn player(&self, address: Address) -> Result<Profile, ArenaError> {
        self.request(|reply| Command::Player { address, reply }).await
    }
    pub async fn player_count(&self) -> usize {
        self.request(|reply| Command::PlayerCount { reply }).await
    }
    pub async fn search(&self, address: Address) -> Result<Search, ArenaError> {
        self.request(|reply| Command::Search { address, reply }).await
    }
    pub async fn play(&self, address: Address, throw: Move) -> Result<Game, ArenaError> {
        self.request(|reply| Command::Play {
            address,
            throw,
            reply,
        })
        .await
    }
    pub async fn game(&self, address: Address) -> Result<Game, ArenaError> {
        self.request(|reply| Command::Game { address, reply }).await
    }
    pub async fn history(&self, address: Address) -> Result<Vec<GameId>, ArenaError> {
        self.request(|reply| Command::History { address, reply }).await
    }
    pub async fn pool(&self) -> Tokens {
        self.request(|reply| Command::Pool { reply }).await
    }
    pub async fn sync(&self) -> Tokens {
        self.request(|reply| Command::Sync { reply }).await
    }
    pub async fn subscribe(&self) -> UnboundedReceiver<Event> {
        self.request(|reply| Command::Subscribe { reply }).await
    }
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> T {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(command(tx))
            .unwrap_or_else(|_| panic!("arena task outlives its handles"));
        rx.await.expect("arena task replies to every command")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_core::Arbitrary;
    use rps_core::DEFAULT_REWARD;
    use rps_gameplay::Phase;

    fn arena(pool: Tokens) -> ArenaHandle {
        Arena::spawn(ArenaConfig::default(), Bankroll::with_pool(pool))
    }

    #[tokio::test]
    async fn full_match_through_the_handle() {
        let handle = arena(100);
        handle.sync().await;
        let (a, b) = (Address::random(), Address::random());
        handle.register(a, "alice").await.unwrap();
        handle.register(b, "bob").await.unwrap();
        assert_eq!(handle.player_count().await, 2);
        assert_eq!(handle.search(a).await.unwrap(), Search::Queued);
        assert!(matches!(
            handle.search(b).await.unwrap(),
            Search::Matched(_)
        ));
        handle.play(a, Move::Rock).await.unwrap();
        let game = handle.play(b, Move::Paper).await.unwrap();
        assert_eq!(game.phase(), Phase::Resolved);
        assert_eq!(game.verdict().unwrap().winner(), Some(b));
        assert_eq!(handle.pool().await, 100 - DEFAULT_REWARD);
        assert_eq!(handle.history(a).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn racing_throws_on_one_game_serialize() {
        let handle = arena(100);
        handle.sync().await;
        let (a, b) = (Address::random(), Address::random());
        handle.register(a, "alice").await.unwrap();
        handle.register(b, "bob").await.unwrap();
        handle.search(a).await.unwrap();
        handle.search(b).await.unwrap();
        let first = tokio::spawn({
            let handle = handle.clone();
            async move { handle.play(a, Move::Scissors).await }
        });
        let second = tokio::spawn({
            let handle = handle.clone();
            async move { handle.play(b, Move::Paper).await }
        });
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();
        let game = handle.game(a).await.unwrap();
        assert_eq!(game.phase(), Phase::Resolved);
        assert_eq!(game.verdict().unwrap().winner(), Some(a));
        let winner = handle.player(a).await.unwrap();
        let loser = handle.player(b).await.unwrap();
        assert_eq!((winner.won(), loser.lost()), (1, 1));
        assert_eq!(winner.status(), Status::Idle);
    }

    #[tokio::test]
    async fn racing_searches_pair_exactly_once() {
        let handle = arena(0);
        let (a, b) = (Address::random(), Address::random());
        handle.register(a, "alice").await.unwrap();
        handle.register(b, "bob").await.unwrap();
        let left = tokio::spawn({
            let handle = handle.clone();
            async move { handle.search(a).await.unwrap() }
        });
        let right = tokio::spawn({
            let handle = handle.clone();
            async move { handle.search(b).await.unwrap() }
        });
        let outcomes = [left.await.unwrap(), right.await.unwrap()];
        assert_eq!(
            outcomes.iter().filter(|o| **o == Search::Queued).count(),
            1
        );
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o, Search::Matched(_)))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn subscribers_observe_the_match_in_order() {
        let handle = arena(100);
        let mut events = handle.subscribe().await;
        let (a, b) = (Address::random(), Address::random());
        handle.register(a, "alice").await.unwrap();
        handle.register(b, "bob").await.unwrap();
        handle.search(a).await.unwrap();
        handle.search(b).await.unwrap();
        handle.play(a, Move::Rock).await.unwrap();
        handle.play(b, Move::Rock).await.unwrap();
        let mut kinds = Vec::new();
        while let Ok(event) = events.try_recv() {
            kinds.push(std::mem::discriminant(&event));
        }
        let expected = [
            std::mem::discriminant(&Event::PlayerCreated {
                id: 1,
                username: String::new(),
                address: a,
            }),
            std::mem::discriminant(&Event::PlayerCreated {
                id: 2,
                username: String::new(),
                address: b,
            }),
            std::mem::discriminant(&Event::EnterLobby { address: a }),
            std::mem::discriminant(&Event::GameStarted {
                game: 1,
                player_1: a,
                player_2: b,
            }),
            std::mem::discriminant(&Event::GamePlayed { game: 1, player: a }),
            std::mem::discriminant(&Event::GamePlayed { game: 1, player: b }),
            std::mem::discriminant(&Event::GameDrawn {
                game: 1,
                players: [a, b],
            }),
        ];
        assert_eq!(kinds, expected);
    }
}
