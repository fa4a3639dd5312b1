//! Fixed-rate tick source for round actors.
//!
//! Rounds only need a coarse periodic call to check their deadline and
//! push progress telemetry, so overruns are handled the simple way:
//! missed ticks are skipped and the cadence resumes from now.

use std::time::Duration;

use minerware_host::Clock;
use rand::Rng;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

/// Configuration for a round's ticker.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Ticks per second. Clamped to `1..=MAX_TICK_RATE_HZ`.
    pub tick_rate_hz: u32,
    /// Random delay (0–max µs) before the first tick so rounds started
    /// in the same instant do not tick in lockstep.
    pub initial_jitter_us: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            // Game servers typically run at 20 TPS.
            tick_rate_hz: 20,
            initial_jitter_us: 2_000,
        }
    }
}

impl TickConfig {
    pub const MAX_TICK_RATE_HZ: u32 = 128;

    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values. A timed round always needs ticks, so
    /// a rate of 0 becomes 1.
    pub fn validated(mut self) -> Self {
        if self.tick_rate_hz == 0 {
            warn!("tick_rate_hz of 0 cannot drive a deadline, using 1");
            self.tick_rate_hz = 1;
        }
        if self.tick_rate_hz > Self::MAX_TICK_RATE_HZ {
            warn!(
                rate = self.tick_rate_hz,
                max = Self::MAX_TICK_RATE_HZ,
                "tick_rate_hz exceeds maximum, clamping"
            );
            self.tick_rate_hz = Self::MAX_TICK_RATE_HZ;
        }
        self
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }
}

/// Periodic tick future for use inside a `tokio::select!` loop.
pub struct Ticker {
    interval: Interval,
    count: u64,
}

impl Ticker {
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        let period = config.tick_duration();
        let jitter = if config.initial_jitter_us > 0 {
            Duration::from_micros(rand::rng().random_range(0..config.initial_jitter_us))
        } else {
            Duration::ZERO
        };

        let mut interval = time::interval_at(Instant::now() + period + jitter, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!(
            rate_hz = config.tick_rate_hz,
            jitter = ?jitter,
            "ticker created"
        );

        Self { interval, count: 0 }
    }

    /// Waits for the next tick and returns its sequence number (from 1).
    pub async fn tick(&mut self) -> u64 {
        self.interval.tick().await;
        self.count += 1;
        self.count
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// A [`Clock`] that follows Tokio's time, including paused test time.
///
/// Give this to rounds driven by the actor so deadlines and ticks share
/// one time base.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        Instant::now().saturating_duration_since(self.origin)
    }
}
