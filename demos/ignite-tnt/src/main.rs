//! Runs one "Ignite The TNT" round against an in-memory arena.
//!
//! Three players join. One lights a TNT block two seconds in, one falls
//! into the void, and the third idles until the deadline. The round runs
//! on the async runner, so the script and the ticker interleave the way
//! a real server's event threads would.
//!
//! Set `ARENA_CONFIG` to a JSON file to use a different platform layout.
//! `RUST_LOG=debug` shows the ticker and gate decisions.

use std::time::Duration;

use minerware::prelude::*;
use tracing::info;

const DEFAULT_ARENA: &str = r#"{
    "origin": { "x": 0, "y": 64, "z": 0 },
    "zones": [
        { "candidates": [ { "x": 0, "y": 1, "z": 0 }, { "x": 1, "y": 1, "z": 0 } ] },
        { "candidates": [ { "x": 8, "y": 1, "z": 0 }, { "x": 9, "y": 1, "z": 0 } ] },
        { "candidates": [ { "x": 0, "y": 1, "z": 8 }, { "x": 0, "y": 1, "z": 9 } ] },
        { "candidates": [ { "x": 8, "y": 1, "z": 8 }, { "x": 9, "y": 1, "z": 9 } ] }
    ]
}"#;

const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);
const CAROL: PlayerId = PlayerId(3);

fn load_config() -> Result<RoundConfig, Box<dyn std::error::Error>> {
    match std::env::var("ARENA_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            info!(%path, "loading arena config");
            Ok(RoundConfig::from_json(&json)?)
        }
        Err(_) => Ok(RoundConfig::from_json(DEFAULT_ARENA)?),
    }
}

fn arena(config: &RoundConfig) -> InMemoryHost {
    let mut host = InMemoryHost::new(WorldId(1)).with_players([ALICE, BOB, CAROL]);
    for zone in &config.zones {
        for cell in zone.candidates.iter().filter_map(|c| config.resolve(*c)) {
            host.fill(cell, Block::Solid(1));
        }
    }
    host
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    minerware::init_tracing();

    let config = load_config()?;
    let host = arena(&config);
    let before = host.snapshot();

    let round = RoundController::new(IgniteTnt, host, config)
        .with_clock(TokioClock::new())
        .with_selection(RandomPick::seeded(2024));
    info!(
        round = round.name(),
        difficulty = ?round.difficulty(),
        duration_s = round.duration().as_secs(),
        "starting demo round"
    );
    let (handle, task) = spawn_round(round, TickConfig::default(), 64).map_err(MinerwareError::from)?;

    tokio::time::sleep(Duration::from_secs(2)).await;
    let verdict = handle
        .send_event(HostEvent::Interact {
            player: ALICE,
            item: Some(Item::FlintAndSteel),
            location: Location::new(0, 65, 0),
            block: Block::Tnt,
        })
        .await?;
    info!(player = %ALICE, ?verdict, "ignited");

    // Nobody may dig out of the arena.
    let verdict = handle
        .send_event(HostEvent::BlockBreak {
            player: CAROL,
            location: Location::new(0, 64, 0),
        })
        .await?;
    info!(player = %CAROL, ?verdict, "tried to break a block");

    tokio::time::sleep(Duration::from_secs(3)).await;
    let verdict = handle
        .send_event(HostEvent::Damage {
            entity: Entity::Player(BOB),
            cause: DamageCause::Void,
        })
        .await?;
    info!(player = %BOB, ?verdict, "fell into the void");

    let board = handle.scoreboard().await?;
    info!(total = board.total_qualifying_actions, "mid-round scoreboard");

    let finished = task.await?;
    let summary = finished.summary.map_err(MinerwareError::from)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let restored = finished.host.snapshot() == before;
    info!(
        restored,
        caged = finished.host.caged().len(),
        "arena after round"
    );
    Ok(())
}
