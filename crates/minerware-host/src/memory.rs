//! A self-contained host that keeps the world and roster in memory.
//!
//! Used by the test suites and the demo, and usable as-is by embedders
//! that simulate rounds without a real game server. Every notification
//! is recorded so callers can inspect what the round reported.

use std::collections::{HashMap, HashSet};

use minerware_types::{
    Block, EventKind, Loadout, Location, PlayerId, Progress, RoundSummary, WorldId,
};

use crate::{Environment, EventSource, HostError, Notifier, Roster, Subscription};

/// In-memory implementation of every host service.
///
/// Unset cells read as [`Block::Air`].
#[derive(Debug, Default)]
pub struct InMemoryHost {
    world: WorldId,
    blocks: HashMap<Location, Block>,
    /// Cells that reject writes with [`HostError::Occupied`].
    occupied: HashSet<Location>,
    players: Vec<PlayerId>,
    loadouts: HashMap<PlayerId, Loadout>,
    inventory_resets: Vec<PlayerId>,
    caged: Vec<PlayerId>,
    subscriptions: HashMap<u64, Vec<EventKind>>,
    next_subscription: u64,
    progress: Vec<(PlayerId, Progress)>,
    expired_signals: u32,
    summaries: Vec<RoundSummary>,
}

impl InMemoryHost {
    pub fn new(world: WorldId) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    /// Adds players to the roster, in order.
    pub fn with_players(mut self, players: impl IntoIterator<Item = PlayerId>) -> Self {
        self.players.extend(players);
        self
    }

    /// Writes a cell directly, bypassing the round.
    pub fn fill(&mut self, location: Location, block: Block) {
        self.blocks.insert(location, block);
    }

    /// Makes writes to `location` fail until [`release`](Self::release).
    pub fn occupy(&mut self, location: Location) {
        self.occupied.insert(location);
    }

    pub fn release(&mut self, location: Location) {
        self.occupied.remove(&location);
    }

    /// Drops a player from the roster (they left the session).
    pub fn disconnect(&mut self, player: PlayerId) {
        self.players.retain(|p| *p != player);
    }

    /// Reads a cell without going through the `Environment` trait.
    pub fn block(&self, location: Location) -> Block {
        self.blocks.get(&location).copied().unwrap_or(Block::Air)
    }

    /// Every non-air cell.
    pub fn snapshot(&self) -> HashMap<Location, Block> {
        self.blocks
            .iter()
            .filter(|(_, b)| **b != Block::Air)
            .map(|(l, b)| (*l, *b))
            .collect()
    }

    pub fn loadout(&self, player: PlayerId) -> Option<&Loadout> {
        self.loadouts.get(&player)
    }

    pub fn inventory_resets(&self) -> &[PlayerId] {
        &self.inventory_resets
    }

    pub fn caged(&self) -> &[PlayerId] {
        &self.caged
    }

    /// Number of subscriptions not yet released.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn progress_log(&self) -> &[(PlayerId, Progress)] {
        &self.progress
    }

    pub fn expired_signals(&self) -> u32 {
        self.expired_signals
    }

    pub fn summaries(&self) -> &[RoundSummary] {
        &self.summaries
    }
}

impl Environment for InMemoryHost {
    fn world(&self) -> WorldId {
        self.world
    }

    fn block_at(&self, location: Location) -> Result<Block, HostError> {
        Ok(self.block(location))
    }

    fn set_block(&mut self, location: Location, block: Block) -> Result<(), HostError> {
        if self.occupied.contains(&location) {
            return Err(HostError::Occupied(location));
        }
        tracing::trace!(%location, %block, "cell written");
        if block == Block::Air {
            self.blocks.remove(&location);
        } else {
            self.blocks.insert(location, block);
        }
        Ok(())
    }
}

impl Roster for InMemoryHost {
    fn players(&self) -> Vec<PlayerId> {
        self.players.clone()
    }

    fn reset_inventory(&mut self, player: PlayerId) {
        self.loadouts.remove(&player);
        self.inventory_resets.push(player);
    }

    fn give_loadout(&mut self, player: PlayerId, loadout: &Loadout) {
        self.loadouts.insert(player, loadout.clone());
    }

    fn send_to_losers_cage(&mut self, player: PlayerId) {
        self.caged.push(player);
    }
}

impl Notifier for InMemoryHost {
    fn progress(&mut self, player: PlayerId, progress: Progress) {
        self.progress.push((player, progress));
    }

    fn round_expired(&mut self) {
        self.expired_signals += 1;
    }

    fn round_summary(&mut self, summary: &RoundSummary) {
        self.summaries.push(summary.clone());
    }
}

impl EventSource for InMemoryHost {
    fn subscribe(&mut self, kinds: &[EventKind]) -> Subscription {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.subscriptions.insert(id, kinds.to_vec());
        Subscription::new(id, kinds.to_vec())
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscriptions.remove(&subscription.id());
    }
}
