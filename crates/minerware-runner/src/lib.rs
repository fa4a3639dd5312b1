//! Async runner for Minerware rounds.
//!
//! Hosts that deliver events from several threads cannot call a
//! [`RoundController`](minerware_round::RoundController) directly. This
//! crate wraps one round in a Tokio task that owns it exclusively:
//!
//! - [`spawn_round`] starts the round and the task
//! - [`RoundHandle`] queues events and queries; replies come back in order
//! - [`Ticker`] drives the round's deadline check at a fixed rate
//!
//! Give the controller a [`TokioClock`] so its deadline follows the same
//! time base as the ticker.

mod actor;
mod error;
mod ticker;

pub use actor::{DEFAULT_CHANNEL_SIZE, RoundFinished, RoundHandle, spawn_round};
pub use error::RunnerError;
pub use ticker::{TickConfig, Ticker, TokioClock};
