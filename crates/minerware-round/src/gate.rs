//! Interaction gate: turns raw host events into scoring decisions.
//!
//! For each forwarded event the gate decides two things: whether it is a
//! qualifying action (and who gets credit), and whether the host should
//! still apply the underlying effect. Participants may not reshape the
//! arena, may not use the round's tool on anything but its target, and
//! never take damage while the round runs.

use minerware_host::Roster;
use minerware_types::{
    Block, DamageCause, Entity, HostEvent, Item, Outcome, PlayerId, Verdict, WorldId,
};

use crate::{OutcomeResolver, RoundError, RoundRule, ScoreTracker};

/// Stateless filter configured from a [`RoundRule`] and the arena world.
///
/// All per-player state lives in the [`ScoreTracker`] and
/// [`OutcomeResolver`] passed to [`on_event`](Self::on_event), so the
/// result for a given event order never depends on delivery timing.
#[derive(Debug, Clone)]
pub struct InteractionGate {
    world: WorldId,
    tool: Item,
    target: Block,
}

impl InteractionGate {
    pub fn new(world: WorldId, tool: Item, target: Block) -> Self {
        Self {
            world,
            tool,
            target,
        }
    }

    pub fn for_rule(rule: &impl RoundRule, world: WorldId) -> Self {
        Self::new(world, rule.sanctioned_tool(), rule.sanctioned_target())
    }

    /// Classifies one host event.
    ///
    /// Anomalies (unknown players, already-resolved outcomes) are absorbed
    /// here so one late event cannot abort the round.
    pub fn on_event(
        &self,
        event: &HostEvent,
        scores: &mut ScoreTracker,
        outcomes: &mut OutcomeResolver,
        roster: &mut impl Roster,
    ) -> Verdict {
        match *event {
            HostEvent::ExplosionPrime { world, entity } => self.on_explosion(world, entity),

            HostEvent::BlockBreak { player, location }
            | HostEvent::BlockPlace {
                player, location, ..
            } => {
                if !scores.contains(player) {
                    return Verdict::Proceed;
                }
                tracing::debug!(%player, %location, "arena modification vetoed");
                Verdict::Cancel
            }

            HostEvent::Interact {
                player,
                item,
                block,
                ..
            } => {
                if !scores.contains(player) || item != Some(self.tool) {
                    return Verdict::Proceed;
                }
                self.on_tool_use(player, block, scores, outcomes)
            }

            HostEvent::Damage {
                entity: Entity::Player(player),
                cause,
            } => {
                if !scores.contains(player) {
                    return Verdict::Proceed;
                }
                if cause == DamageCause::Void {
                    on_void(player, scores, outcomes, roster);
                }
                Verdict::Cancel
            }

            HostEvent::Damage { .. } => Verdict::Proceed,
        }
    }

    fn on_explosion(&self, world: WorldId, entity: Entity) -> Verdict {
        if world == self.world && matches!(entity, Entity::PrimedTnt(_)) {
            Verdict::ProceedWithoutBlockDamage
        } else {
            Verdict::Proceed
        }
    }

    fn on_tool_use(
        &self,
        player: PlayerId,
        block: Block,
        scores: &mut ScoreTracker,
        outcomes: &mut OutcomeResolver,
    ) -> Verdict {
        if !scores.is_active(player) {
            tracing::debug!(%player, "tool use by player out of play ignored");
            return Verdict::Cancel;
        }
        if block != self.target {
            tracing::debug!(%player, %block, "tool used on non-target block, vetoed");
            return Verdict::Cancel;
        }

        scores.increment(player);
        match outcomes.assign_winner(player) {
            Ok(()) => tracing::info!(%player, "first qualifying action, player wins"),
            Err(RoundError::AlreadyResolved(_)) => {}
            Err(e) => tracing::warn!(%player, error = %e, "could not assign winner"),
        }
        tracing::debug!(
            %player,
            score = scores.score(player).unwrap_or(0),
            total = scores.total(),
            "qualifying action counted"
        );
        Verdict::Proceed
    }
}

/// A participant fell out of the world. Winners are safe; anyone else
/// loses, leaves play and goes to the cage.
fn on_void(
    player: PlayerId,
    scores: &mut ScoreTracker,
    outcomes: &mut OutcomeResolver,
    roster: &mut impl Roster,
) {
    if outcomes.outcome(player) == Some(Outcome::Winner) {
        return;
    }
    match outcomes.assign_loser(player) {
        Ok(()) => tracing::info!(%player, "player fell out of bounds, eliminated"),
        Err(RoundError::AlreadyResolved(_)) => {}
        Err(e) => tracing::warn!(%player, error = %e, "could not assign loser"),
    }
    if scores.retire(player) {
        roster.send_to_losers_cage(player);
    }
}
