//! Shared vocabulary for Minerware rounds.
//!
//! This crate defines the values that cross the boundary between a
//! round and the game server hosting it:
//!
//! - **Identity and geometry** ([`PlayerId`], [`WorldId`], [`Location`])
//! - **World and inventory contents** ([`Block`], [`Item`], [`Loadout`])
//! - **Host events** ([`HostEvent`], [`EventKind`]) and the round's
//!   answer to them ([`Verdict`])
//! - **Results** ([`Outcome`], [`Difficulty`], [`Progress`],
//!   [`RoundSummary`])
//!
//! ```text
//! Host server (events, world) → Types (this crate) → Round core
//! ```

mod event;
mod summary;
mod types;

pub use event::{DamageCause, Entity, EventKind, HostEvent, Verdict};
pub use summary::{ParticipantResult, RoundSummary};
pub use types::{
    Block, Difficulty, GameMode, Item, Loadout, Location, Outcome, PlayerId,
    Progress, WorldId,
};
