//! Capabilities a round needs from the game server hosting it.
//!
//! Each trait covers one concern. [`Host`] bundles them so the round
//! controller can take a single type parameter; it is implemented
//! automatically for anything that implements all four.

use minerware_types::{
    Block, EventKind, Loadout, Location, PlayerId, Progress, RoundSummary, WorldId,
};

use crate::HostError;

/// Read/write access to the shared world.
pub trait Environment {
    /// The arena world this environment belongs to.
    fn world(&self) -> WorldId;

    /// Current value of the cell at `location`.
    fn block_at(&self, location: Location) -> Result<Block, HostError>;

    /// Overwrites the cell at `location`. Must not trigger block updates
    /// (neighbouring cells stay untouched).
    fn set_block(&mut self, location: Location, block: Block) -> Result<(), HostError>;
}

/// The arena's roster and per-player controls.
pub trait Roster {
    /// Active participants, in join order.
    fn players(&self) -> Vec<PlayerId>;

    /// Empties every inventory the player has (main, armour, cursor,
    /// off-hand).
    fn reset_inventory(&mut self, player: PlayerId);

    /// Sets the player's game mode and hands out the loadout items.
    fn give_loadout(&mut self, player: PlayerId, loadout: &Loadout);

    /// Moves an eliminated player to the losers' holding area.
    fn send_to_losers_cage(&mut self, player: PlayerId);
}

/// Advisory notifications from the round. None of these require an
/// acknowledgement.
pub trait Notifier {
    /// Time-left telemetry for one participant.
    fn progress(&mut self, player: PlayerId, progress: Progress);

    /// The round's deadline passed; the host should call `end` soon.
    fn round_expired(&mut self);

    /// Final structured report, emitted once by `end`.
    fn round_summary(&mut self, summary: &RoundSummary);
}

/// A live registration for host events.
///
/// Neither `Clone` nor `Copy`. The round holds the only handle and gives
/// it back through [`EventSource::unsubscribe`], which consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
    kinds: Vec<EventKind>,
}

impl Subscription {
    /// Hosts create handles when a round subscribes.
    pub fn new(id: u64, kinds: Vec<EventKind>) -> Self {
        Self { id, kinds }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The event kinds this subscription receives.
    pub fn kinds(&self) -> &[EventKind] {
        &self.kinds
    }
}

/// Scoped event registration.
pub trait EventSource {
    /// Starts forwarding events of the given kinds to the round.
    fn subscribe(&mut self, kinds: &[EventKind]) -> Subscription;

    /// Stops forwarding events for the subscription.
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Everything a round controller talks to.
pub trait Host: Environment + Roster + Notifier + EventSource {}

impl<T: Environment + Roster + Notifier + EventSource> Host for T {}
