//! End-to-end tests through the `minerware` meta-crate.

use std::time::Duration;

use minerware::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

const ARENA_JSON: &str = r#"{
    "origin": { "x": 100, "y": 70, "z": 100 },
    "zones": [
        { "candidates": [ { "x": 0, "y": 0, "z": 0 } ] },
        { "candidates": [ { "x": 4, "y": 0, "z": 4 } ] }
    ],
    "duration_secs": 5.0
}"#;

fn ignite(player: PlayerId) -> HostEvent {
    HostEvent::Interact {
        player,
        item: Some(Item::FlintAndSteel),
        location: Location::new(100, 70, 100),
        block: Block::Tnt,
    }
}

fn run_sync(players: &[PlayerId]) -> Result<(RoundSummary, InMemoryHost), MinerwareError> {
    let clock = ManualClock::new();
    let host = InMemoryHost::new(WorldId(3)).with_players(players.iter().copied());
    let mut round = RoundController::new(IgniteTnt, host, RoundConfig::from_json(ARENA_JSON)?)
        .with_clock(clock.clone());

    round.start()?;
    round.on_event(&ignite(players[0]));
    clock.advance(Duration::from_secs(5));
    round.tick()?;
    let summary = round.end()?;
    Ok((summary, round.into_host()))
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_config_override_shortens_round() {
    let (summary, host) = run_sync(&[PlayerId(1), PlayerId(2)]).unwrap();
    assert_eq!(summary.winners().collect::<Vec<_>>(), vec![PlayerId(1)]);
    assert_eq!(summary.losers().collect::<Vec<_>>(), vec![PlayerId(2)]);
    assert!(host.snapshot().is_empty());
    assert_eq!(host.expired_signals(), 1);
}

#[test]
fn test_lifecycle_error_converts_with_question_mark() {
    fn end_twice() -> Result<(), MinerwareError> {
        let host = InMemoryHost::new(WorldId(1)).with_players([PlayerId(1)]);
        let mut round = RoundController::new(IgniteTnt, host, RoundConfig::default());
        round.start()?;
        round.end()?;
        round.end()?;
        Ok(())
    }

    let err = end_twice().unwrap_err();
    assert!(matches!(err, MinerwareError::Round(RoundError::AlreadyEnded)));
}

#[test]
fn test_bad_config_is_rejected() {
    let err: MinerwareError = RoundConfig::from_json(r#"{ "duration_secs": -1 }"#)
        .unwrap_err()
        .into();
    assert!(matches!(err, MinerwareError::Round(RoundError::InvalidConfig(_))));
}

#[test]
fn test_summary_serializes_for_the_host() {
    let (summary, _) = run_sync(&[PlayerId(7)]).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_qualifying_actions"], 1);
    assert_eq!(json["participants"][0]["player"], 7);
}

#[tokio::test(start_paused = true)]
async fn test_runner_through_prelude() {
    let host = InMemoryHost::new(WorldId(3)).with_players([PlayerId(1), PlayerId(2)]);
    let round = RoundController::new(IgniteTnt, host, RoundConfig::from_json(ARENA_JSON).unwrap())
        .with_clock(TokioClock::new())
        .with_selection(FirstCandidate);
    let (handle, task) = spawn_round(round, TickConfig::with_rate(20), 16).unwrap();

    handle.send_event(ignite(PlayerId(2))).await.unwrap();
    let finished = task.await.unwrap();
    let summary = finished.summary.unwrap();

    assert_eq!(summary.winners().collect::<Vec<_>>(), vec![PlayerId(2)]);
    assert_eq!(summary.losers().collect::<Vec<_>>(), vec![PlayerId(1)]);
    assert!(finished.host.snapshot().is_empty());
}
