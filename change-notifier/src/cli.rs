//! Command line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{
    DEFAULT_LATENCY, DEFAULT_LIVENESS_INTERVAL, DEFAULT_MAX_EXCLUDE_PATHS,
    DEFAULT_MAX_WATCH_PATHS, WatcherConfig,
};

/// Watch directories and publish batched change notifications.
#[derive(Debug, Parser)]
#[command(name = "change-notifier", version, about)]
pub struct Cli {
    /// Pid of the launching process. Accepted for compatibility with other
    /// platforms' watchers; liveness is checked directly.
    pub parent_pid: String,

    /// File listing directories to watch, one per line.
    pub watch_list: PathBuf,

    /// File listing excluded path prefixes, one per line.
    pub exclude_list: PathBuf,

    /// Directory to publish notification files into.
    pub notification_dir: PathBuf,

    /// Coalescing window for change batches, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_LATENCY.as_millis() as u64)]
    pub latency_ms: u64,

    /// Interval between parent liveness checks, in milliseconds. Must be non-zero.
    #[arg(
        long,
        default_value_t = DEFAULT_LIVENESS_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub liveness_interval_ms: u64,

    /// Maximum number of watched directories.
    #[arg(long, default_value_t = DEFAULT_MAX_WATCH_PATHS)]
    pub max_watch_paths: usize,

    /// Maximum number of exclude prefixes.
    #[arg(long, default_value_t = DEFAULT_MAX_EXCLUDE_PATHS)]
    pub max_exclude_paths: usize,
}

impl Cli {
    /// Build the run configuration.
    pub fn into_config(self) -> WatcherConfig {
        WatcherConfig::new(self.watch_list, self.exclude_list, self.notification_dir)
            .with_latency(Duration::from_millis(self.latency_ms))
            .with_liveness_interval(Duration::from_millis(self.liveness_interval_ms))
            .with_max_watch_paths(self.max_watch_paths)
            .with_max_exclude_paths(self.max_exclude_paths)
    }
}
