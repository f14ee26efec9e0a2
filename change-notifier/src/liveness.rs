//! Ties the notifier's lifetime to its parent process.
//!
//! The monitor polls for reparenting to init, which happens once the launching
//! process has exited. Termination signals stop the run loop immediately.
//! Both paths only cancel the shared token; the run loop observes it between
//! batches.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{Result, WatcherError};

/// Pid of the process orphans are reparented to.
#[cfg(unix)]
const INIT_PID: u32 = 1;

/// Shortest check interval; a zero period would make the ticker panic.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Whether the original parent has exited.
#[cfg(unix)]
pub fn reparented_to_init() -> bool {
    std::os::unix::process::parent_id() == INIT_PID
}

/// Reparenting cannot be observed here; only signals end the run.
#[cfg(not(unix))]
pub fn reparented_to_init() -> bool {
    false
}

/// Periodic parent liveness check.
pub struct LivenessMonitor<P = fn() -> bool> {
    interval: Duration,
    parent_exited: P,
}

impl LivenessMonitor {
    /// Monitor checking for reparenting to init every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            parent_exited: reparented_to_init,
        }
    }
}

impl<P> LivenessMonitor<P>
where
    P: Fn() -> bool + Send + 'static,
{
    /// Monitor using a custom parent check.
    pub fn with_probe(interval: Duration, parent_exited: P) -> Self {
        Self {
            interval,
            parent_exited,
        }
    }

    /// Tick until the parent exits or `cancel` fires. Cancels on parent exit.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancel.cancelled() => return,
                _ = ticker.tick() => {
                    if (self.parent_exited)() {
                        info!("Parent process exited, stopping");
                        cancel.cancel();
                        return;
                    }
                }
            }
        }
    }

    /// Run the monitor as a task on the current runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}

/// Install termination handlers that cancel `cancel` when a signal arrives.
///
/// SIGTERM and SIGINT both count as termination requests.
#[cfg(unix)]
pub fn spawn_signal_listener(cancel: CancellationToken) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate()).map_err(WatcherError::SignalInstall)?;
    let mut interrupt = signal(SignalKind::interrupt()).map_err(WatcherError::SignalInstall)?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => return,
            _ = terminate.recv() => info!("Received SIGTERM, stopping"),
            _ = interrupt.recv() => info!("Received SIGINT, stopping"),
        }
        cancel.cancel();
    }))
}

/// Install a Ctrl-C handler that cancels `cancel`.
#[cfg(not(unix))]
pub fn spawn_signal_listener(cancel: CancellationToken) -> Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => return,
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => info!("Received Ctrl-C, stopping"),
                Err(e) => {
                    tracing::warn!("Ctrl-C handler failed: {e}");
                    return;
                }
            },
        }
        cancel.cancel();
    }))
}
