//! Core value types shared by every Minerware crate.
//!
//! These are the nouns of a round: who is playing ([`PlayerId`]), where
//! things are ([`Location`], [`WorldId`]), what a cell of the world holds
//! ([`Block`]), what a player carries ([`Item`], [`Loadout`]) and how a
//! player's round ends ([`Outcome`]).

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A stable identifier for a player, assigned by the host.
///
/// Newtype over `u64` so a `PlayerId` can never be confused with a
/// [`WorldId`] or an entity id. `#[serde(transparent)]` keeps the JSON
/// form a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Identifies one world (dimension) on the host.
///
/// Explosions and other world-scoped events carry the world they happen
/// in; a round only reacts to events in its own arena world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub u64);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// An integer cell coordinate in the host world.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Shifts this location by `offset`, as when a zone candidate stored
    /// relative to the arena origin is resolved at round start.
    ///
    /// `None` if any axis overflows `i32`.
    pub fn checked_offset(self, offset: Location) -> Option<Location> {
        Some(Location::new(
            self.x.checked_add(offset.x)?,
            self.y.checked_add(offset.y)?,
            self.z.checked_add(offset.z)?,
        ))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Block / Item
// ---------------------------------------------------------------------------

/// The value stored in one world cell.
///
/// Only the blocks the engine has to recognise get their own variant;
/// everything else is an opaque host material id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Air,
    Tnt,
    Solid(u16),
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Air => write!(f, "air"),
            Self::Tnt => write!(f, "tnt"),
            Self::Solid(id) => write!(f, "solid:{id}"),
        }
    }
}

/// An item a player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    FlintAndSteel,
    Other(u16),
}

/// Host game mode a participant is put in for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Survival,
    Adventure,
    Spectator,
}

/// What every participant is handed when the round starts.
///
/// The host clears the player's inventories first, then places each
/// `(slot, item)` pair and selects `held_slot`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub game_mode: GameMode,
    pub items: Vec<(u8, Item)>,
    pub held_slot: u8,
}

impl Loadout {
    /// A loadout holding a single item in slot 0, selected.
    pub fn single(game_mode: GameMode, item: Item) -> Self {
        Self {
            game_mode,
            items: vec![(0, item)],
            held_slot: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome / Difficulty
// ---------------------------------------------------------------------------

/// A participant's classification for the round.
///
/// Starts `Undetermined`; moves to `Winner` or `Loser` at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Undetermined,
    Winner,
    Loser,
}

impl Outcome {
    /// `true` once the outcome is `Winner` or `Loser`.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Undetermined)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undetermined => write!(f, "Undetermined"),
            Self::Winner => write!(f, "Winner"),
            Self::Loser => write!(f, "Loser"),
        }
    }
}

/// How hard a round is, shown to players before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Normal => write!(f, "Normal"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Advisory time-left telemetry sent to each participant on every tick.
///
/// Hosts typically render `whole_seconds()` as the experience level and
/// `fraction` as the experience bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Time left in the round.
    pub remaining: Duration,
    /// `remaining / duration`, in `0.0..=1.0`.
    pub fraction: f64,
}

impl Progress {
    /// Remaining time truncated to whole seconds.
    pub fn whole_seconds(&self) -> u64 {
        self.remaining.as_secs()
    }
}
