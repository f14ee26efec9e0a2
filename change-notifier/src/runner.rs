//! The notifier run loop.
//!
//! One task consumes change batches while the liveness monitor and the signal
//! listener run beside it on the same single threaded runtime. They share a
//! cancellation token. A stop request is honored between batches, never in the
//! middle of publishing one.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::aggregator::EventAggregator;
use crate::config::WatcherConfig;
use crate::error::{Result, WatcherError};
use crate::exclude::ExcludeFilter;
use crate::lists::WatchList;
use crate::liveness::{LivenessMonitor, spawn_signal_listener};
use crate::source::{ChangeEventSource, NotifySource};
use crate::writer::NotificationWriter;

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The watch list was empty.
    NothingToWatch,

    /// A stop was requested and the loop exited.
    Stopped,
}

/// Load the lists, subscribe, and process batches until `cancel` fires.
pub async fn run(config: &WatcherConfig, cancel: CancellationToken) -> Result<RunOutcome> {
    let watch_list = WatchList::load(&config.watch_list, config.max_watch_paths)?;
    if watch_list.is_empty() {
        info!("No paths to watch");
        return Ok(RunOutcome::NothingToWatch);
    }

    let filter = ExcludeFilter::load(&config.exclude_list, config.max_exclude_paths)?;
    debug!("Loaded {} exclude prefixes", filter.len());
    let mut aggregator =
        EventAggregator::new(filter, NotificationWriter::new(&config.notification_dir));

    let mut source = NotifySource::subscribe(&watch_list, config.latency)?;
    let signals = spawn_signal_listener(cancel.clone())?;
    let liveness = LivenessMonitor::new(config.liveness_interval).spawn(cancel.clone());
    info!("Change notifier running");

    let result = run_loop(&mut source, &mut aggregator, &cancel).await;

    cancel.cancel();
    source.shutdown();
    for task in [signals, liveness] {
        if let Err(e) = task.await {
            warn!("Background task failed: {e}");
        }
    }

    result?;
    info!("Stopped after {} notifications", aggregator.sequence());
    Ok(RunOutcome::Stopped)
}

/// Feed batches from `source` through `aggregator` until cancelled.
///
/// A source that runs dry while not cancelled is an error.
pub async fn run_loop<S>(
    source: &mut S,
    aggregator: &mut EventAggregator,
    cancel: &CancellationToken,
) -> Result<()>
where
    S: ChangeEventSource + ?Sized,
{
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(()),
            batch = source.next_batch() => {
                let Some(batch) = batch else {
                    return Err(WatcherError::SourceClosed);
                };
                debug!("Received batch of {} events", batch.len());
                aggregator.handle(&batch)?;
            }
        }
    }
}
