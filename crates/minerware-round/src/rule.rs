//! The `RoundRule` trait, the extension point for new microgames.
//!
//! A rule describes one microgame: what it is called, how long it runs,
//! what the arena gets at start, what players are handed, and which tool
//! on which block counts as a point. The [`RoundController`] does the
//! rest.
//!
//! [`RoundController`]: crate::RoundController

use std::time::Duration;

use minerware_types::{Block, Difficulty, EventKind, Item, Loadout};

/// Points a rule awards for completing it unless it says otherwise.
pub const DEFAULT_REWARD_POINTS: u32 = 1;

/// The trait each microgame implements.
pub trait RoundRule {
    /// Display name shown to players.
    fn name(&self) -> &str;

    fn difficulty(&self) -> Difficulty;

    /// Nominal length of the round.
    fn duration(&self) -> Duration;

    /// Points awarded to winners. Default: [`DEFAULT_REWARD_POINTS`].
    fn reward_points(&self) -> u32 {
        DEFAULT_REWARD_POINTS
    }

    /// Block written at the selected cell of every zone at round start.
    fn setup_block(&self) -> Block;

    /// What each participant is handed at round start.
    fn loadout(&self) -> Loadout;

    /// The item whose use on [`sanctioned_target`](Self::sanctioned_target)
    /// scores a point.
    fn sanctioned_tool(&self) -> Item;

    fn sanctioned_target(&self) -> Block;

    /// Host events the round subscribes to. Default: all of them.
    fn event_kinds(&self) -> Vec<EventKind> {
        vec![
            EventKind::BlockBreak,
            EventKind::BlockPlace,
            EventKind::Interact,
            EventKind::Damage,
            EventKind::ExplosionPrime,
        ]
    }
}
