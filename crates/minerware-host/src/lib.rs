//! Host services consumed by Minerware rounds.
//!
//! A round never touches the game server directly. Everything it needs
//! is expressed as a trait here:
//!
//! - [`Environment`]: read and write world cells
//! - [`Roster`]: who is playing, loadouts, the losers' cage
//! - [`EventSource`]: scoped event registration via [`Subscription`]
//! - [`Notifier`]: progress telemetry and the final [`RoundSummary`]
//! - [`Clock`]: monotonic time for deadlines
//!
//! [`InMemoryHost`] implements all of them without a server.
//!
//! [`RoundSummary`]: minerware_types::RoundSummary

mod clock;
mod error;
mod memory;
mod services;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::HostError;
pub use memory::InMemoryHost;
pub use services::{Environment, EventSource, Host, Notifier, Roster, Subscription};
