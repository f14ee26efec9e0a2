//! Platform change event sources.
//!
//! A source subscribes to a set of directories and yields coalesced batches of
//! changed paths until it is shut down. Batches are closed one latency window
//! after their first event, the way FSEvents delivers them.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::error::{Result, WatcherError};
use crate::event::{EventBatch, FileEventKind, RawEvent};
use crate::lists::WatchList;

/// Capacity of the channel between the platform thread and the run loop.
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// A subscription yielding coalesced change batches.
#[async_trait]
pub trait ChangeEventSource: Send {
    /// Wait for the next batch. `None` once the source has no more events.
    async fn next_batch(&mut self) -> Option<EventBatch>;

    /// Tear down the subscription.
    fn shutdown(&mut self) {}
}

/// Coalesces raw events arriving on a channel into batches.
#[derive(Debug)]
pub struct ChannelSource {
    event_rx: mpsc::Receiver<RawEvent>,
    latency: Duration,
}

impl ChannelSource {
    /// Create a source and the sender feeding it.
    pub fn new(latency: Duration) -> (mpsc::Sender<RawEvent>, Self) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (event_tx, Self { event_rx, latency })
    }
}

#[async_trait]
impl ChangeEventSource for ChannelSource {
    async fn next_batch(&mut self) -> Option<EventBatch> {
        let first = self.event_rx.recv().await?;
        let deadline = Instant::now() + self.latency;
        let mut events = vec![first];

        loop {
            tokio::select! {
                received = self.event_rx.recv() => match received {
                    Some(event) => events.push(event),
                    None => break,
                },
                () = sleep_until(deadline) => break,
            }
        }

        Some(EventBatch::new(events))
    }

    fn shutdown(&mut self) {
        self.event_rx.close();
    }
}

/// Change source backed by the platform's recommended `notify` watcher.
pub struct NotifySource {
    /// Internal notify watcher. Dropping it ends the subscription.
    watcher: Option<RecommendedWatcher>,

    /// Directories subscribed to.
    watched: Vec<PathBuf>,

    /// Batching over the forwarded events.
    inner: ChannelSource,
}

impl NotifySource {
    /// Subscribe to every directory in the watch list, recursively.
    ///
    /// A directory that cannot be watched is logged and skipped. Fails only
    /// when the watcher cannot be created or no directory could be watched.
    pub fn subscribe(watch_list: &WatchList, latency: Duration) -> Result<Self> {
        let (event_tx, inner) = ChannelSource::new(latency);
        let mut next_id: u64 = 0;

        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if matches!(event.kind, EventKind::Access(_)) {
                        return;
                    }
                    let kind = FileEventKind::from(event.kind);
                    for path in event.paths {
                        next_id += 1;
                        // The receiver only goes away during shutdown.
                        if event_tx
                            .blocking_send(RawEvent::new(next_id, kind, path))
                            .is_err()
                        {
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("Watch error: {e}");
                }
            })
            .map_err(|source| WatcherError::SubscriptionStart { path: None, source })?;

        let mut watched = Vec::with_capacity(watch_list.len());
        let mut first_failure = None;
        for dir in watch_list.dirs() {
            match watcher.watch(dir, RecursiveMode::Recursive) {
                Ok(()) => {
                    debug!("Started watching: {}", dir.display());
                    watched.push(dir.clone());
                }
                Err(e) => {
                    warn!("Failed to watch {}: {e}", dir.display());
                    if first_failure.is_none() {
                        first_failure = Some((dir.clone(), e));
                    }
                }
            }
        }

        if watched.is_empty() {
            if let Some((path, source)) = first_failure {
                return Err(WatcherError::SubscriptionStart {
                    path: Some(path),
                    source,
                });
            }
        }

        info!("Watching {} of {} directories", watched.len(), watch_list.len());
        Ok(Self {
            watcher: Some(watcher),
            watched,
            inner,
        })
    }
}

#[async_trait]
impl ChangeEventSource for NotifySource {
    async fn next_batch(&mut self) -> Option<EventBatch> {
        self.inner.next_batch().await
    }

    fn shutdown(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            for path in &self.watched {
                if let Err(e) = watcher.unwatch(path) {
                    debug!("Failed to unwatch {}: {e}", path.display());
                }
            }
        }
        self.inner.shutdown();
        info!("Change subscription stopped");
    }
}
