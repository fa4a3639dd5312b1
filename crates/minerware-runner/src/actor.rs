//! Round actor: a Tokio task that owns one running round.
//!
//! The round core is single-threaded and lock-free; hosts that dispatch
//! events from many threads send them here instead. The actor drains its
//! command queue in arrival order, interleaved with ticks, so every call
//! into the round is serialized.

use minerware_host::Host;
use minerware_round::{RoundController, RoundError, RoundRule, TickStatus};
use minerware_types::{HostEvent, PlayerId, RoundSummary, Verdict};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::{RunnerError, TickConfig, Ticker};

/// Default command queue size per round.
pub const DEFAULT_CHANNEL_SIZE: usize = 256;

/// Commands sent to a round actor.
///
/// The `oneshot::Sender` in each variant is the reply channel.
pub(crate) enum RoundCommand {
    Event {
        event: HostEvent,
        reply: oneshot::Sender<Verdict>,
    },
    Leave {
        player: PlayerId,
        reply: oneshot::Sender<bool>,
    },
    Score {
        player: PlayerId,
        reply: oneshot::Sender<Result<u32, RoundError>>,
    },
    Scoreboard {
        reply: oneshot::Sender<RoundSummary>,
    },
    End {
        reply: oneshot::Sender<Result<RoundSummary, RoundError>>,
    },
}

/// What the actor hands back when it stops.
#[derive(Debug)]
pub struct RoundFinished<H> {
    /// Result of the round's `end`.
    pub summary: Result<RoundSummary, RoundError>,
    /// The host services, returned to the session manager.
    pub host: H,
}

/// Handle to a running round actor. Cheap to clone.
#[derive(Clone)]
pub struct RoundHandle {
    sender: mpsc::Sender<RoundCommand>,
}

impl RoundHandle {
    /// Forwards a host event and waits for the round's verdict.
    pub async fn send_event(&self, event: HostEvent) -> Result<Verdict, RunnerError> {
        self.request(|reply| RoundCommand::Event { event, reply }).await
    }

    /// Tells the round a participant left the session.
    pub async fn leave(&self, player: PlayerId) -> Result<bool, RunnerError> {
        self.request(|reply| RoundCommand::Leave { player, reply }).await
    }

    pub async fn score(&self, player: PlayerId) -> Result<u32, RunnerError> {
        Ok(self
            .request(|reply| RoundCommand::Score { player, reply })
            .await??)
    }

    /// Current scores and outcomes.
    pub async fn scoreboard(&self) -> Result<RoundSummary, RunnerError> {
        self.request(|reply| RoundCommand::Scoreboard { reply }).await
    }

    /// Forces the round to end now. The actor stops afterwards.
    pub async fn end(&self) -> Result<RoundSummary, RunnerError> {
        Ok(self.request(|reply| RoundCommand::End { reply }).await??)
    }

    /// `true` once the actor has stopped.
    pub fn is_finished(&self) -> bool {
        self.sender.is_closed()
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> RoundCommand,
    ) -> Result<T, RunnerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| RunnerError::Stopped)?;
        reply_rx.await.map_err(|_| RunnerError::Stopped)
    }
}

struct RoundActor<R: RoundRule, H: Host> {
    round: RoundController<R, H>,
    receiver: mpsc::Receiver<RoundCommand>,
    ticker: Ticker,
}

impl<R, H> RoundActor<R, H>
where
    R: RoundRule + Send + 'static,
    H: Host + Send + 'static,
{
    async fn run(mut self) -> RoundFinished<H> {
        tracing::info!(round = self.round.name(), "round actor started");

        // `biased` drains queued commands before a due tick, so a tick
        // never overtakes events delivered ahead of it. Events queued past
        // the deadline are still handled first; `on_event` re-checks the
        // deadline itself and vetoes them without scoring.
        let summary = loop {
            tokio::select! {
                biased;

                cmd = self.receiver.recv() => match cmd {
                    Some(RoundCommand::End { reply }) => {
                        let result = self.round.end();
                        let _ = reply.send(result.clone());
                        break result;
                    }
                    Some(cmd) => self.handle(cmd),
                    None => {
                        tracing::warn!(
                            round = self.round.name(),
                            "all handles dropped, ending round"
                        );
                        break self.round.end();
                    }
                },

                _ = self.ticker.tick() => match self.round.tick() {
                    Ok(TickStatus::Running { .. }) => {}
                    Ok(TickStatus::Expired) => break self.round.end(),
                    Err(e) => {
                        tracing::error!(error = %e, "tick on inactive round");
                        break Err(e);
                    }
                },
            }
        };

        tracing::info!(
            round = self.round.name(),
            ticks = self.ticker.count(),
            "round actor stopped"
        );
        RoundFinished {
            summary,
            host: self.round.into_host(),
        }
    }

    fn handle(&mut self, cmd: RoundCommand) {
        match cmd {
            RoundCommand::Event { event, reply } => {
                let _ = reply.send(self.round.on_event(&event));
            }
            RoundCommand::Leave { player, reply } => {
                let _ = reply.send(self.round.remove_participant(player));
            }
            RoundCommand::Score { player, reply } => {
                let _ = reply.send(self.round.score(player));
            }
            RoundCommand::Scoreboard { reply } => {
                let _ = reply.send(self.round.scoreboard());
            }
            // Handled by the run loop.
            RoundCommand::End { reply } => {
                let _ = reply.send(Err(RoundError::NotActive));
            }
        }
    }
}

/// Starts `round` and runs it on its own task.
///
/// The round is started before this returns, so lifecycle errors surface
/// here. The task ends the round when its deadline passes, when
/// [`RoundHandle::end`] is called, or when every handle is dropped, and
/// yields the summary together with the host.
pub fn spawn_round<R, H>(
    mut round: RoundController<R, H>,
    tick: TickConfig,
    channel_size: usize,
) -> Result<(RoundHandle, JoinHandle<RoundFinished<H>>), RoundError>
where
    R: RoundRule + Send + 'static,
    H: Host + Send + 'static,
{
    round.start()?;
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoundActor {
        round,
        receiver: rx,
        ticker: Ticker::new(tick),
    };
    let task = tokio::spawn(actor.run());

    Ok((RoundHandle { sender: tx }, task))
}
