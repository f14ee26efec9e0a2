//! Turns platform batches into notification files.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::Result;
use crate::event::EventBatch;
use crate::exclude::ExcludeFilter;
use crate::writer::NotificationWriter;

/// Filters each batch and publishes the survivors.
///
/// Produces at most one notification file per batch. A batch filtered down to
/// nothing publishes no file and leaves the sequence number untouched.
#[derive(Debug)]
pub struct EventAggregator {
    filter: ExcludeFilter,
    writer: NotificationWriter,
}

impl EventAggregator {
    /// Create an aggregator.
    pub fn new(filter: ExcludeFilter, writer: NotificationWriter) -> Self {
        Self { filter, writer }
    }

    /// Process one batch, returning the published file if any path survived.
    pub fn handle(&mut self, batch: &EventBatch) -> Result<Option<PathBuf>> {
        let survivors: Vec<&Path> = batch
            .paths()
            .filter(|path| match self.filter.matching_prefix(path) {
                Some(prefix) => {
                    trace!("{} excluded by {prefix}", path.display());
                    false
                }
                None => true,
            })
            .collect();

        if survivors.is_empty() {
            debug!("Batch of {} events fully excluded", batch.len());
            return Ok(None);
        }

        self.writer.publish(&survivors).map(Some)
    }

    /// Sequence number of the last published file.
    pub fn sequence(&self) -> u64 {
        self.writer.sequence()
    }
}
