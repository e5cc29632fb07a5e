//! Simulation Binary
//!
//! Drives a batch of random contests through a live arena: registers a
//! field of bot players, pairs them through the lobby, races their
//! throws from concurrent tasks, and prints the final standings.
//!
//! Options: --players, --rounds, --reward, --fund

use clap::Parser;
use rand::seq::IndexedRandom;
use rps_arena::*;
use rps_core::*;
use rps_gameplay::Move;

#[derive(Parser)]
struct Args {
    /// Number of bot players to register.
    #[arg(long, default_value_t = 8)]
    players: usize,
    /// Number of contests to run.
    #[arg(long, default_value_t = 32)]
    rounds: usize,
    /// Reward credited to each winner.
    #[arg(long, default_value_t = DEFAULT_REWARD)]
    reward: Tokens,
    /// Tokens funded into the reward pool.
    #[arg(long, default_value_t = 1_000)]
    fund: Tokens,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut bankroll = Bankroll::default();
    bankroll.fund(args.fund);
    let handle = Arena::spawn(ArenaConfig { reward: args.reward }, bankroll);
    let funded = handle.sync().await;
    log::info!("[simulate] pool funded with {}", funded);

    let mut events = handle.subscribe().await;
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{}", Protocol::encode(&event).to_json());
        }
    });

    let mut field = Vec::new();
    for n in 0..args.players.max(2) {
        let address = Address::default();
        handle.register(address, &format!("bot-{}", n)).await?;
        field.push(address);
    }

    for _ in 0..args.rounds {
        let ref mut rng = rand::rng();
        let pair = field
            .choose_multiple(rng, 2)
            .copied()
            .collect::<Vec<Address>>();
        let (a, b) = (pair[0], pair[1]);
        handle.search(a).await?;
        handle.search(b).await?;
        let throws = [a, b].map(|player| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.play(player, Move::random()).await })
        });
        for throw in throws {
            throw.await??;
        }
    }

    println!("{:-<48}", "");
    for address in &field {
        let player = handle.player(*address).await?;
        println!(
            "{:<12} {:>3}W {:>3}L {:>3}D",
            player.username(),
            player.won(),
            player.lost(),
            player.drawn(),
        );
    }
    println!("pool remaining: {}", handle.pool().await);
    Ok(())
}
