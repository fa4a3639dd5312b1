//! Round controller: drives one round through `start → tick → end`.
//!
//! The controller is the only piece the arena's session manager talks
//! to. It owns the host services for the round's lifetime, the score and
//! outcome state, the mutation log and the event subscription, and it
//! guarantees that whatever `start` changed in the world is put back by
//! `end`.
//!
//! All calls are synchronous and expect to be serialized by the caller
//! (one logical thread per round). See `minerware-runner` for a queue
//! that does this for multi-threaded hosts.

use std::time::Duration;

use minerware_host::{Clock, Host, MonotonicClock, Subscription};
use minerware_types::{
    Difficulty, HostEvent, Outcome, ParticipantResult, PlayerId, Progress, RoundSummary,
    Verdict,
};

use crate::{
    EnvironmentMutationLog, InteractionGate, OutcomeResolver, RandomPick, RoundConfig,
    RoundError, RoundRule, RoundState, ScoreTracker, SelectionPolicy,
};

/// What a `tick` observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The round is still running.
    Running { remaining: Duration },
    /// The deadline passed. Stragglers are now losers and the host has
    /// been told; it should call [`RoundController::end`].
    Expired,
}

/// Runs a single round of rule `R` against host `H`.
pub struct RoundController<R: RoundRule, H: Host> {
    rule: R,
    host: H,
    config: RoundConfig,
    clock: Box<dyn Clock>,
    selection: Box<dyn SelectionPolicy>,
    state: RoundState,
    started_at: Option<Duration>,
    scores: ScoreTracker,
    outcomes: OutcomeResolver,
    gate: Option<InteractionGate>,
    /// Taken by `end`, which makes a second revert impossible.
    mutations: Option<EnvironmentMutationLog>,
    subscription: Option<Subscription>,
}

impl<R: RoundRule, H: Host> RoundController<R, H> {
    /// Creates a round in `NotStarted`, using wall-clock time and random
    /// zone selection.
    pub fn new(rule: R, host: H, config: RoundConfig) -> Self {
        Self {
            rule,
            host,
            config,
            clock: Box::new(MonotonicClock::new()),
            selection: Box::new(RandomPick::new()),
            state: RoundState::NotStarted,
            started_at: None,
            scores: ScoreTracker::default(),
            outcomes: OutcomeResolver::default(),
            gate: None,
            mutations: None,
            subscription: None,
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the zone selection policy.
    pub fn with_selection(mut self, selection: impl SelectionPolicy + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Activates the round.
    ///
    /// Snapshots the roster, hands out the rule's loadout, applies one
    /// setup edit per zone and subscribes to host events. A zone whose
    /// edit the host rejects is skipped.
    ///
    /// # Errors
    /// [`RoundError::AlreadyStarted`] unless the round is `NotStarted`.
    pub fn start(&mut self) -> Result<(), RoundError> {
        if !self.state.can_transition_to(RoundState::Active) {
            return Err(RoundError::AlreadyStarted);
        }
        self.started_at = Some(self.clock.now());
        self.state = RoundState::Active;

        let roster = self.host.players();
        self.scores = ScoreTracker::new(&roster);
        self.outcomes = OutcomeResolver::new(&roster);

        let loadout = self.rule.loadout();
        for player in self.scores.players() {
            self.host.reset_inventory(player);
            self.host.give_loadout(player, &loadout);
        }

        let mut log = EnvironmentMutationLog::new();
        let setup = self.rule.setup_block();
        for (zone, candidates) in self.config.zones.iter().enumerate() {
            let Some(offset) = self.selection.select(zone, &candidates.candidates) else {
                tracing::warn!(zone, "no candidate selected, zone skipped");
                continue;
            };
            let Some(location) = self.config.resolve(offset) else {
                tracing::warn!(zone, %offset, "candidate out of range from origin, zone skipped");
                continue;
            };
            if let Err(e) = log.apply(&mut self.host, location, setup) {
                tracing::warn!(zone, %location, error = %e, "setup edit rejected, zone skipped");
            }
        }
        let edits = log.len();
        self.mutations = Some(log);

        self.gate = Some(InteractionGate::for_rule(&self.rule, self.host.world()));
        self.subscription = Some(self.host.subscribe(&self.rule.event_kinds()));

        tracing::info!(
            round = self.rule.name(),
            players = self.scores.len(),
            edits,
            duration = ?self.duration(),
            "round started"
        );
        Ok(())
    }

    /// Periodic update.
    ///
    /// Past the deadline every `Undetermined` participant becomes a
    /// `Loser` and the host is signalled. Before it, each participant gets
    /// a progress notification.
    ///
    /// # Errors
    /// [`RoundError::NotActive`] unless the round is `Active`.
    pub fn tick(&mut self) -> Result<TickStatus, RoundError> {
        if !self.state.is_active() {
            return Err(RoundError::NotActive);
        }

        let remaining = self.remaining();
        if remaining.is_zero() {
            let losers = self.outcomes.resolve_remaining(Outcome::Loser);
            tracing::info!(
                round = self.rule.name(),
                new_losers = losers.len(),
                "round deadline reached"
            );
            self.host.round_expired();
            return Ok(TickStatus::Expired);
        }

        let progress = Progress {
            remaining,
            fraction: remaining.as_secs_f64() / self.duration().as_secs_f64(),
        };
        for player in self.scores.players() {
            self.host.progress(player, progress);
        }
        Ok(TickStatus::Running { remaining })
    }

    /// Finishes the round.
    ///
    /// Releases the event subscription, reverts every environment edit
    /// (continuing past individual failures) and reports the summary to
    /// the host. Stragglers are resolved to `Loser` only when the deadline
    /// has passed; a forced early end leaves them `Undetermined`.
    ///
    /// # Errors
    /// - [`RoundError::NotActive`] if the round never started
    /// - [`RoundError::AlreadyEnded`] on a second call
    pub fn end(&mut self) -> Result<RoundSummary, RoundError> {
        match self.state {
            RoundState::NotStarted => return Err(RoundError::NotActive),
            RoundState::Ended => return Err(RoundError::AlreadyEnded),
            RoundState::Active => {}
        }

        if self.remaining().is_zero() {
            self.outcomes.resolve_remaining(Outcome::Loser);
        }
        self.state = RoundState::Ended;

        if let Some(subscription) = self.subscription.take() {
            self.host.unsubscribe(subscription);
        }
        self.gate = None;

        let report = match self.mutations.take() {
            Some(log) => log.revert_all(&mut self.host),
            None => Default::default(),
        };
        if !report.is_complete() {
            tracing::warn!(
                round = self.rule.name(),
                failed = report.failed.len(),
                reverted = report.reverted.len(),
                "environment only partially reverted"
            );
        }

        let summary = RoundSummary {
            failed_reverts: report.failed_locations(),
            ..self.scoreboard()
        };
        self.host.round_summary(&summary);

        tracing::info!(
            round = self.rule.name(),
            total = summary.total_qualifying_actions,
            winners = summary.winners().count(),
            "round ended"
        );
        Ok(summary)
    }

    /// Routes a host event through the interaction gate.
    ///
    /// Outside the active window the round is not listening and the event
    /// passes untouched. Past the deadline, stragglers are resolved to
    /// `Loser` first and participant actions are vetoed without scoring,
    /// even if no tick has observed the deadline yet.
    pub fn on_event(&mut self, event: &HostEvent) -> Verdict {
        if !self.state.is_active() {
            return Verdict::Proceed;
        }
        if self.remaining().is_zero() {
            let late = self.outcomes.resolve_remaining(Outcome::Loser);
            if !late.is_empty() {
                tracing::info!(
                    round = self.rule.name(),
                    new_losers = late.len(),
                    "deadline passed before tick, stragglers resolved"
                );
            }
            if let Some(player) = event.player().filter(|p| self.scores.contains(*p)) {
                tracing::debug!(%player, kind = ?event.kind(), "event after deadline vetoed");
                return Verdict::Cancel;
            }
        }
        match &self.gate {
            Some(gate) => gate.on_event(event, &mut self.scores, &mut self.outcomes, &mut self.host),
            None => Verdict::Proceed,
        }
    }

    /// A participant left the session mid-round. Their score stays on the
    /// board but they can no longer act. Returns `false` if they were not
    /// in play.
    pub fn remove_participant(&mut self, player: PlayerId) -> bool {
        let removed = self.scores.retire(player);
        if removed {
            tracing::info!(%player, "participant left the round");
        }
        removed
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// # Errors
    /// [`RoundError::UnknownParticipant`] for players outside the roster.
    pub fn score(&self, player: PlayerId) -> Result<u32, RoundError> {
        self.scores
            .score(player)
            .ok_or(RoundError::UnknownParticipant(player))
    }

    /// Scores highest first; ties keep roster order.
    pub fn ranked_scores(&self) -> Vec<(PlayerId, u32)> {
        self.scores.ranked()
    }

    pub fn total_qualifying_actions(&self) -> u32 {
        self.scores.total()
    }

    /// # Errors
    /// [`RoundError::UnknownParticipant`] for players outside the roster.
    pub fn outcome(&self, player: PlayerId) -> Result<Outcome, RoundError> {
        self.outcomes
            .outcome(player)
            .ok_or(RoundError::UnknownParticipant(player))
    }

    /// Current totals and outcomes, in roster order.
    pub fn scoreboard(&self) -> RoundSummary {
        let participants = self
            .scores
            .players()
            .map(|player| ParticipantResult {
                player,
                outcome: self.outcomes.outcome(player).unwrap_or_default(),
                score: self.scores.score(player).unwrap_or(0),
            })
            .collect();
        RoundSummary {
            total_qualifying_actions: self.scores.total(),
            participants,
            failed_reverts: Vec::new(),
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Time left before the deadline. The full duration before `start`.
    pub fn remaining(&self) -> Duration {
        match self.started_at {
            Some(started) => {
                let elapsed = self.clock.now().saturating_sub(started);
                self.duration().saturating_sub(elapsed)
            }
            None => self.duration(),
        }
    }

    // -----------------------------------------------------------------------
    // Metadata
    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        self.rule.name()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.rule.difficulty()
    }

    /// Effective duration: the config override, else the rule's.
    pub fn duration(&self) -> Duration {
        self.config.duration().unwrap_or_else(|| self.rule.duration())
    }

    pub fn reward_points(&self) -> u32 {
        self.rule.reward_points()
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Gives the host services back once the round is discarded.
    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use minerware_host::{InMemoryHost, ManualClock};
    use minerware_types::{Block, Entity, Item, Location, WorldId};

    use super::*;
    use crate::{FirstCandidate, IgniteTnt, Zone};

    const A: PlayerId = PlayerId(1);
    const B: PlayerId = PlayerId(2);

    fn config() -> RoundConfig {
        RoundConfig {
            origin: Location::new(100, 64, 100),
            zones: vec![
                Zone::new([Location::new(0, 1, 0), Location::new(1, 1, 0)]),
                Zone::new([Location::new(10, 1, 10)]),
            ],
            duration_secs: None,
        }
    }

    fn round() -> (RoundController<IgniteTnt, InMemoryHost>, ManualClock) {
        let clock = ManualClock::new();
        let host = InMemoryHost::new(WorldId(1)).with_players([A, B]);
        let round = RoundController::new(IgniteTnt, host, config())
            .with_clock(clock.clone())
            .with_selection(FirstCandidate);
        (round, clock)
    }

    fn ignite(player: PlayerId) -> HostEvent {
        HostEvent::Interact {
            player,
            item: Some(Item::FlintAndSteel),
            location: Location::new(100, 65, 100),
            block: Block::Tnt,
        }
    }

    #[test]
    fn test_start_applies_setup_and_loadout() {
        let (mut round, _) = round();
        round.start().unwrap();

        assert_eq!(round.state(), RoundState::Active);
        let host = round.host();
        assert_eq!(host.block(Location::new(100, 65, 100)), Block::Tnt);
        assert_eq!(host.block(Location::new(110, 65, 110)), Block::Tnt);
        assert_eq!(host.block(Location::new(101, 65, 100)), Block::Air);
        assert_eq!(host.inventory_resets(), &[A, B]);
        assert_eq!(host.loadout(A), Some(&IgniteTnt.loadout()));
        assert_eq!(host.active_subscriptions(), 1);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let (mut round, _) = round();
        round.start().unwrap();
        assert_eq!(round.start(), Err(RoundError::AlreadyStarted));
        round.end().unwrap();
        assert_eq!(round.start(), Err(RoundError::AlreadyStarted));
    }

    #[test]
    fn test_tick_and_end_before_start_fail() {
        let (mut round, _) = round();
        assert_eq!(round.tick(), Err(RoundError::NotActive));
        assert_eq!(round.end(), Err(RoundError::NotActive));
        assert_eq!(round.state(), RoundState::NotStarted);
    }

    #[test]
    fn test_tick_reports_progress_to_every_participant() {
        let (mut round, clock) = round();
        round.start().unwrap();
        clock.advance(Duration::from_secs(5));

        let status = round.tick().unwrap();
        assert_eq!(
            status,
            TickStatus::Running {
                remaining: Duration::from_secs(10)
            }
        );
        let log = round.host().progress_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].0, A);
        assert_eq!(log[1].0, B);
        assert_eq!(log[0].1.whole_seconds(), 10);
        assert!((log[0].1.fraction - 10.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_deadline_turns_stragglers_into_losers() {
        let (mut round, clock) = round();
        round.start().unwrap();
        round.on_event(&ignite(A));

        clock.advance(Duration::from_secs(15));
        assert_eq!(round.tick(), Ok(TickStatus::Expired));
        assert_eq!(round.outcome(A), Ok(Outcome::Winner));
        assert_eq!(round.outcome(B), Ok(Outcome::Loser));
        assert_eq!(round.host().expired_signals(), 1);
    }

    #[test]
    fn test_ignition_after_deadline_does_not_score() {
        let (mut round, clock) = round();
        round.start().unwrap();
        round.on_event(&ignite(A));

        // No tick between the deadline and the late event.
        clock.advance(Duration::from_secs(16));
        assert_eq!(round.on_event(&ignite(B)), Verdict::Cancel);
        assert_eq!(round.outcome(B), Ok(Outcome::Loser));
        assert_eq!(round.score(B), Ok(0));
        assert_eq!(round.total_qualifying_actions(), 1);

        let summary = round.end().unwrap();
        assert_eq!(summary.total_qualifying_actions, 1);
        assert_eq!(summary.losers().collect::<Vec<_>>(), vec![B]);
    }

    #[test]
    fn test_primed_tnt_after_deadline_still_spares_blocks() {
        let (mut round, clock) = round();
        round.start().unwrap();
        clock.advance(Duration::from_secs(20));

        let verdict = round.on_event(&HostEvent::ExplosionPrime {
            world: WorldId(1),
            entity: Entity::PrimedTnt(9),
        });
        assert_eq!(verdict, Verdict::ProceedWithoutBlockDamage);
    }

    #[test]
    fn test_end_reverts_and_reports() {
        let (mut round, _) = round();
        round.host_mut().fill(Location::new(100, 65, 100), Block::Solid(2));
        let before = round.host().snapshot();

        round.start().unwrap();
        round.on_event(&ignite(A));
        let summary = round.end().unwrap();

        assert_eq!(round.state(), RoundState::Ended);
        assert_eq!(round.host().snapshot(), before);
        assert_eq!(round.host().active_subscriptions(), 0);
        assert_eq!(summary.total_qualifying_actions, 1);
        assert_eq!(summary.winners().collect::<Vec<_>>(), vec![A]);
        // Early end: B was never resolved.
        assert_eq!(summary.get(B).map(|r| r.outcome), Some(Outcome::Undetermined));
        assert_eq!(round.host().summaries(), &[summary]);
    }

    #[test]
    fn test_end_twice_fails_without_second_revert() {
        let (mut round, _) = round();
        round.start().unwrap();
        round.end().unwrap();

        // Something else writes the cell after the round released it.
        round.host_mut().fill(Location::new(100, 65, 100), Block::Solid(7));
        assert_eq!(round.end(), Err(RoundError::AlreadyEnded));
        assert_eq!(round.host().block(Location::new(100, 65, 100)), Block::Solid(7));
        assert_eq!(round.host().summaries().len(), 1);
    }

    #[test]
    fn test_events_after_end_are_ignored() {
        let (mut round, _) = round();
        round.start().unwrap();
        round.end().unwrap();
        assert_eq!(round.on_event(&ignite(A)), Verdict::Proceed);
        assert_eq!(round.total_qualifying_actions(), 0);
    }

    #[test]
    fn test_rejected_setup_edit_skips_zone() {
        let (mut round, _) = round();
        round.host_mut().occupy(Location::new(110, 65, 110));
        round.start().unwrap();
        assert_eq!(round.host().block(Location::new(100, 65, 100)), Block::Tnt);
        assert_eq!(round.host().block(Location::new(110, 65, 110)), Block::Air);
    }

    #[test]
    fn test_candidate_out_of_range_skips_zone() {
        let clock = ManualClock::new();
        let host = InMemoryHost::new(WorldId(1)).with_players([A]);
        let config = RoundConfig {
            origin: Location::new(i32::MAX, 64, 0),
            zones: vec![
                Zone::new([Location::new(1, 1, 0)]),
                Zone::new([Location::new(-1, 1, 0)]),
            ],
            duration_secs: None,
        };
        let mut round = RoundController::new(IgniteTnt, host, config)
            .with_clock(clock)
            .with_selection(FirstCandidate);

        round.start().unwrap();
        let snapshot = round.host().snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            round.host().block(Location::new(i32::MAX - 1, 65, 0)),
            Block::Tnt
        );
        round.end().unwrap();
        assert!(round.host().snapshot().is_empty());
    }

    #[test]
    fn test_partial_revert_is_reported() {
        let (mut round, _) = round();
        round.start().unwrap();
        round.host_mut().occupy(Location::new(110, 65, 110));

        let summary = round.end().unwrap();
        assert_eq!(summary.failed_reverts, vec![Location::new(110, 65, 110)]);
        assert_eq!(round.host().block(Location::new(100, 65, 100)), Block::Air);
    }

    #[test]
    fn test_queries() {
        let (mut round, _) = round();
        round.start().unwrap();
        round.on_event(&ignite(B));
        round.on_event(&ignite(B));

        assert_eq!(round.score(B), Ok(2));
        assert_eq!(round.score(A), Ok(0));
        assert_eq!(
            round.score(PlayerId(42)),
            Err(RoundError::UnknownParticipant(PlayerId(42)))
        );
        assert_eq!(round.ranked_scores(), vec![(B, 2), (A, 0)]);
        assert_eq!(round.total_qualifying_actions(), 2);
    }

    #[test]
    fn test_metadata_and_duration_override() {
        let (round, _) = round();
        assert_eq!(round.name(), "Ignite The TNT");
        assert_eq!(round.difficulty(), Difficulty::Normal);
        assert_eq!(round.duration(), Duration::from_secs(15));
        assert_eq!(round.reward_points(), crate::DEFAULT_REWARD_POINTS);

        let host = InMemoryHost::new(WorldId(1));
        let config = RoundConfig {
            duration_secs: Some(3.0),
            ..RoundConfig::default()
        };
        let short = RoundController::new(IgniteTnt, host, config);
        assert_eq!(short.duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_removed_participant_stops_scoring() {
        let (mut round, _) = round();
        round.start().unwrap();
        round.on_event(&ignite(A));
        assert!(round.remove_participant(A));
        assert!(!round.remove_participant(A));

        round.on_event(&ignite(A));
        assert_eq!(round.score(A), Ok(1));
        assert_eq!(round.total_qualifying_actions(), 1);
    }
}
