//! Change events delivered by the platform.

use std::path::{Path, PathBuf};

/// One changed path reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// Platform assigned event id, increasing within one subscription.
    pub id: u64,

    /// The kind of change.
    pub kind: FileEventKind,

    /// Path to the affected file or directory.
    pub path: PathBuf,
}

impl RawEvent {
    /// Create a new raw event.
    pub fn new(id: u64, kind: FileEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            kind,
            path: path.into(),
        }
    }

    /// The changed path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Kind of change. Not used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    /// File was created.
    Created,

    /// File was modified.
    Modified,

    /// File was deleted.
    Deleted,

    /// File was renamed (old path).
    RenamedFrom,

    /// File was renamed (new path).
    RenamedTo,

    /// File metadata changed.
    MetadataChanged,

    /// Unknown event type.
    Unknown,
}

impl From<notify::EventKind> for FileEventKind {
    fn from(kind: notify::EventKind) -> Self {
        match kind {
            notify::EventKind::Create(_) => Self::Created,
            notify::EventKind::Modify(modify_kind) => match modify_kind {
                notify::event::ModifyKind::Name(rename) => match rename {
                    notify::event::RenameMode::From => Self::RenamedFrom,
                    notify::event::RenameMode::To => Self::RenamedTo,
                    _ => Self::Modified,
                },
                notify::event::ModifyKind::Metadata(_) => Self::MetadataChanged,
                _ => Self::Modified,
            },
            notify::EventKind::Remove(_) => Self::Deleted,
            _ => Self::Unknown,
        }
    }
}

/// Events the platform delivered together after one latency window.
///
/// Order is delivery order. The same path may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBatch {
    /// Events in this batch.
    pub events: Vec<RawEvent>,
}

impl EventBatch {
    /// Create a batch from events.
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events }
    }

    /// Build a batch of `Unknown` events from bare paths, numbered from 1.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let events = paths
            .into_iter()
            .zip(1..)
            .map(|(path, id)| RawEvent::new(id, FileEventKind::Unknown, path))
            .collect();
        Self::new(events)
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Iterate the changed paths in delivery order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.events.iter().map(RawEvent::path)
    }
}
