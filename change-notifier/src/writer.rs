//! Atomic publication of notification files.
//!
//! A batch is written to a fixed staging file and then renamed to
//! `<sequence>.txt`. The rename happens inside one directory, so a consumer
//! scanning that directory only ever sees complete files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::TEMP_FILE_NAME;
use crate::error::{Result, WatcherError};

/// Writes batches of surviving paths as sequentially numbered files.
#[derive(Debug)]
pub struct NotificationWriter {
    /// Directory the consumer scans.
    dir: PathBuf,

    /// Staging file inside `dir`.
    temp_path: PathBuf,

    /// Sequence number of the last published file. Zero before the first.
    sequence: u64,
}

impl NotificationWriter {
    /// Create a writer publishing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let temp_path = dir.join(TEMP_FILE_NAME);
        Self {
            dir,
            temp_path,
            sequence: 0,
        }
    }

    /// Sequence number of the last published file.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Path of the staging file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Final name for a sequence number.
    pub fn notification_path(&self, sequence: u64) -> PathBuf {
        self.dir.join(format!("{sequence:08}.txt"))
    }

    /// Publish one notification file holding `paths`, one per line.
    ///
    /// Returns the published path. Callers only pass non-empty batches.
    pub fn publish<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<PathBuf> {
        self.stage(paths)?;

        self.sequence += 1;
        let target = self.notification_path(self.sequence);
        std::fs::rename(&self.temp_path, &target).map_err(|source| WatcherError::Publish {
            from: self.temp_path.clone(),
            to: target.clone(),
            source,
        })?;

        debug!("Published {} paths to {}", paths.len(), target.display());
        Ok(target)
    }

    /// Write the batch into the staging file and close it.
    fn stage<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        let file = File::create(&self.temp_path).map_err(|source| WatcherError::TempFileOpen {
            path: self.temp_path.clone(),
            source,
        })?;

        let write_err = |source: std::io::Error| WatcherError::NotificationWrite {
            path: self.temp_path.clone(),
            source,
        };

        let mut out = BufWriter::new(file);
        for path in paths {
            out.write_all(path.as_ref().as_os_str().as_encoded_bytes())
                .map_err(write_err)?;
            out.write_all(b"\n").map_err(write_err)?;
        }
        out.flush().map_err(write_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_notification_names_are_zero_padded() {
        let writer = NotificationWriter::new("/n");
        assert_eq!(writer.notification_path(1), Path::new("/n/00000001.txt"));
        assert_eq!(
            writer.notification_path(12345678),
            Path::new("/n/12345678.txt")
        );
    }

    #[test]
    fn test_publish_writes_one_path_per_line() {
        let dir = TempDir::new().unwrap();
        let mut writer = NotificationWriter::new(dir.path());

        let published = writer.publish(&["/data/a.txt", "/data/b c.txt"]).unwrap();

        assert_eq!(published, dir.path().join("00000001.txt"));
        assert_eq!(
            fs::read_to_string(&published).unwrap(),
            "/data/a.txt\n/data/b c.txt\n"
        );
        assert!(!writer.temp_path().exists());
        assert_eq!(writer.sequence(), 1);
    }

    #[test]
    fn test_successive_publishes_increase_sequence() {
        let dir = TempDir::new().unwrap();
        let mut writer = NotificationWriter::new(dir.path());

        let first = writer.publish(&["/x"]).unwrap();
        let second = writer.publish(&["/y"]).unwrap();

        assert_eq!(first.file_name().unwrap(), "00000001.txt");
        assert_eq!(second.file_name().unwrap(), "00000002.txt");
        assert_eq!(fs::read_to_string(second).unwrap(), "/y\n");
    }

    #[test]
    fn test_staged_file_is_not_visible_under_final_name() {
        let dir = TempDir::new().unwrap();
        let writer = NotificationWriter::new(dir.path());

        // Crash between staging and rename.
        writer.stage(&["/data/a.txt"]).unwrap();

        assert!(writer.temp_path().exists());
        assert!(!writer.notification_path(1).exists());
        assert_eq!(writer.sequence(), 0);
    }

    #[test]
    fn test_missing_directory_fails_temp_open() {
        let dir = TempDir::new().unwrap();
        let mut writer = NotificationWriter::new(dir.path().join("gone"));

        let err = writer.publish(&["/a"]).unwrap_err();
        assert!(matches!(err, WatcherError::TempFileOpen { .. }));
        assert_eq!(err.exit_status(), -1);
        assert!(err.to_string().contains("gone/temp"));
    }

    #[test]
    fn test_rename_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut writer = NotificationWriter::new(dir.path());
        // A non-empty directory in the way makes the rename fail.
        let blocker = writer.notification_path(1);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let err = writer.publish(&["/a"]).unwrap_err();
        assert!(matches!(err, WatcherError::Publish { .. }));
        assert_eq!(err.exit_status(), -4);
    }
}
