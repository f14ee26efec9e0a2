//! Error types for the change notifier.
//!
//! Every variant is fatal. Each failure site has its own process exit status so
//! that a supervisor can tell causes apart without reading the error file.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, WatcherError>;

/// Exit status used when the error file itself cannot be opened.
pub const ERROR_FILE_OPEN_STATUS: i32 = -2;

/// Exit status used when the command line has the wrong shape.
pub const USAGE_STATUS: i32 = 1;

/// Errors that terminate the notifier.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// The temporary notification file could not be created.
    #[error("Failed to open {}: {source}", .path.display())]
    TempFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a path into the temporary notification file failed.
    #[error("write failed {}: {source}", .path.display())]
    NotificationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Publishing the temporary file under its sequence name failed.
    #[error("rename failed {} {}: {source}", .from.display(), .to.display())]
    Publish {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The watch list could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    WatchListOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The watch list holds more directories than allowed.
    #[error("Too many paths: limit is {max}")]
    TooManyWatchPaths { max: usize },

    /// The watch list could not be read.
    #[error("Error reading {}: {source}", .path.display())]
    WatchListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The exclude list could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    ExcludeListOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The exclude list holds more prefixes than allowed.
    #[error("Too many exclude paths: limit is {max}")]
    TooManyExcludePaths { max: usize },

    /// The exclude list could not be read.
    #[error("Error reading {}: {source}", .path.display())]
    ExcludeListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform change subscription could not be started. `path` is set
    /// when no listed directory could be watched and names the first failure.
    #[error("subscription start failed{}: {source}", watch_target(.path))]
    SubscriptionStart {
        path: Option<PathBuf>,
        #[source]
        source: notify::Error,
    },

    /// The platform change stream ended while the notifier was running.
    #[error("change event stream closed unexpectedly")]
    SourceClosed,

    /// A termination signal handler could not be installed.
    #[error("failed to install signal handler: {0}")]
    SignalInstall(#[source] std::io::Error),
}

impl WatcherError {
    /// The process exit status for this failure site.
    pub fn exit_status(&self) -> i32 {
        match self {
            Self::TempFileOpen { .. } => -1,
            Self::NotificationWrite { .. } => -3,
            Self::Publish { .. } => -4,
            Self::WatchListOpen { .. } => -5,
            Self::TooManyWatchPaths { .. } => -6,
            Self::WatchListRead { .. } => -7,
            Self::ExcludeListOpen { .. } => -9,
            Self::TooManyExcludePaths { .. } => -10,
            Self::ExcludeListRead { .. } => -11,
            Self::SubscriptionStart { .. } => -12,
            Self::SourceClosed => -13,
            Self::SignalInstall(_) => -14,
        }
    }
}

fn watch_target(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" for {}", path.display()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;

    fn io_err() -> io::Error {
        io::Error::from(io::ErrorKind::PermissionDenied)
    }

    #[test]
    fn test_exit_statuses_are_distinct() {
        let errors = [
            WatcherError::TempFileOpen {
                path: "/n/temp".into(),
                source: io_err(),
            },
            WatcherError::NotificationWrite {
                path: "/n/temp".into(),
                source: io_err(),
            },
            WatcherError::Publish {
                from: "/n/temp".into(),
                to: "/n/00000001.txt".into(),
                source: io_err(),
            },
            WatcherError::WatchListOpen {
                path: "/w".into(),
                source: io_err(),
            },
            WatcherError::TooManyWatchPaths { max: 1024 },
            WatcherError::WatchListRead {
                path: "/w".into(),
                source: io_err(),
            },
            WatcherError::ExcludeListOpen {
                path: "/x".into(),
                source: io_err(),
            },
            WatcherError::TooManyExcludePaths { max: 128 },
            WatcherError::ExcludeListRead {
                path: "/x".into(),
                source: io_err(),
            },
            WatcherError::SubscriptionStart {
                path: None,
                source: notify::Error::generic("boom"),
            },
            WatcherError::SourceClosed,
            WatcherError::SignalInstall(io_err()),
        ];

        let mut seen: HashSet<i32> = HashSet::new();
        for err in &errors {
            let status = err.exit_status();
            assert!(status < 0, "{err} should map to a negative status");
            assert_ne!(status, ERROR_FILE_OPEN_STATUS);
            assert!(seen.insert(status), "duplicate status {status} for {err}");
        }
    }

    #[test]
    fn test_message_names_path_and_os_error() {
        let err = WatcherError::TempFileOpen {
            path: "/notify/temp".into(),
            source: io_err(),
        };
        let message = err.to_string();
        assert!(message.starts_with("Failed to open /notify/temp: "));
        assert!(message.contains(&io_err().to_string()));
    }

    #[test]
    fn test_subscription_message_names_directory() {
        let err = WatcherError::SubscriptionStart {
            path: Some("/data/gone".into()),
            source: notify::Error::generic("boom"),
        };
        assert_eq!(err.to_string(), "subscription start failed for /data/gone: boom");

        let err = WatcherError::SubscriptionStart {
            path: None,
            source: notify::Error::generic("boom"),
        };
        assert_eq!(err.to_string(), "subscription start failed: boom");
    }
}
