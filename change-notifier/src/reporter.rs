//! Fatal error reporting through the notification directory.
//!
//! The error file is the only diagnostic channel the consumer reads. It holds
//! exactly one line, the most recent fatal error, and is overwritten each time.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::config::ERROR_FILE_NAME;
use crate::error::{ERROR_FILE_OPEN_STATUS, WatcherError};

/// Writes fatal errors to `error.txt` and terminates the process.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    path: PathBuf,
}

impl ErrorReporter {
    /// Reporter for a notification directory.
    pub fn new(notification_dir: impl AsRef<Path>) -> Self {
        Self {
            path: notification_dir.as_ref().join(ERROR_FILE_NAME),
        }
    }

    /// Path of the error file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the error file with one line.
    ///
    /// Only a failure to open the file is returned. A failed write still
    /// leaves the exit status to tell the story.
    pub fn record(&self, message: &str) -> std::io::Result<()> {
        let mut file = File::create(&self.path)?;
        if let Err(e) = writeln!(file, "{message}") {
            warn!("Failed to write {}: {e}", self.path.display());
        }
        Ok(())
    }

    /// Record `err` and exit with its status.
    ///
    /// If the error file cannot be opened the process exits with
    /// [`ERROR_FILE_OPEN_STATUS`] without writing anything.
    pub fn fail(&self, err: &WatcherError) -> ! {
        error!("{err}");
        let status = match self.record(&err.to_string()) {
            Ok(()) => err.exit_status(),
            Err(_) => ERROR_FILE_OPEN_STATUS,
        };
        std::process::exit(status)
    }
}
