//! Configuration for a notifier run.

use std::path::PathBuf;
use std::time::Duration;

/// Default upper bound on watched directories.
pub const DEFAULT_MAX_WATCH_PATHS: usize = 1024;

/// Default upper bound on exclude prefixes.
pub const DEFAULT_MAX_EXCLUDE_PATHS: usize = 128;

/// Default window over which the platform coalesces changes into one batch.
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(3);

/// Default interval between parent liveness checks.
pub const DEFAULT_LIVENESS_INTERVAL: Duration = Duration::from_secs(3);

/// Name of the temporary file notifications are staged in.
pub const TEMP_FILE_NAME: &str = "temp";

/// Name of the file fatal diagnostics are written to.
pub const ERROR_FILE_NAME: &str = "error.txt";

/// Settings for one notifier run. Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    /// File listing the directories to watch.
    pub watch_list: PathBuf,

    /// File listing the excluded path prefixes.
    pub exclude_list: PathBuf,

    /// Directory notification files are published into.
    pub notification_dir: PathBuf,

    /// Coalescing window for change batches.
    pub latency: Duration,

    /// How often to check whether the parent process has gone away.
    pub liveness_interval: Duration,

    /// Maximum number of watch list entries.
    pub max_watch_paths: usize,

    /// Maximum number of exclude list entries.
    pub max_exclude_paths: usize,
}

impl WatcherConfig {
    /// Create a config with the default limits and timings.
    pub fn new(
        watch_list: impl Into<PathBuf>,
        exclude_list: impl Into<PathBuf>,
        notification_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            watch_list: watch_list.into(),
            exclude_list: exclude_list.into(),
            notification_dir: notification_dir.into(),
            latency: DEFAULT_LATENCY,
            liveness_interval: DEFAULT_LIVENESS_INTERVAL,
            max_watch_paths: DEFAULT_MAX_WATCH_PATHS,
            max_exclude_paths: DEFAULT_MAX_EXCLUDE_PATHS,
        }
    }

    /// Set the batch latency window.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set the liveness check interval.
    pub fn with_liveness_interval(mut self, interval: Duration) -> Self {
        self.liveness_interval = interval;
        self
    }

    /// Set the watch list capacity.
    pub fn with_max_watch_paths(mut self, max: usize) -> Self {
        self.max_watch_paths = max;
        self
    }

    /// Set the exclude list capacity.
    pub fn with_max_exclude_paths(mut self, max: usize) -> Self {
        self.max_exclude_paths = max;
        self
    }

    /// Path of the staging file inside the notification directory.
    pub fn temp_path(&self) -> PathBuf {
        self.notification_dir.join(TEMP_FILE_NAME)
    }

    /// Path of the error file inside the notification directory.
    pub fn error_path(&self) -> PathBuf {
        self.notification_dir.join(ERROR_FILE_NAME)
    }
}
