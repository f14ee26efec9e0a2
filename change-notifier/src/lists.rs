//! Loading of the newline-delimited watch and exclude lists.
//!
//! Both lists share one format: one entry per line, the trailing newline is
//! stripped and lines shorter than two bytes (newline included) are skipped.
//! There is no quoting or comment syntax.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, WatcherError};

/// Which list file is being loaded. Selects the error reported on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Watch,
    Exclude,
}

impl ListKind {
    fn open_error(self, path: &Path, source: std::io::Error) -> WatcherError {
        let path = path.to_path_buf();
        match self {
            Self::Watch => WatcherError::WatchListOpen { path, source },
            Self::Exclude => WatcherError::ExcludeListOpen { path, source },
        }
    }

    fn read_error(self, path: &Path, source: std::io::Error) -> WatcherError {
        let path = path.to_path_buf();
        match self {
            Self::Watch => WatcherError::WatchListRead { path, source },
            Self::Exclude => WatcherError::ExcludeListRead { path, source },
        }
    }

    fn overflow(self, max: usize) -> WatcherError {
        match self {
            Self::Watch => WatcherError::TooManyWatchPaths { max },
            Self::Exclude => WatcherError::TooManyExcludePaths { max },
        }
    }
}

/// Split list file contents into entries.
///
/// A line counts with its newline, so an unterminated one byte final line is
/// as blank as an empty one.
pub(crate) fn parse_entries(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .split_inclusive('\n')
        .filter(|line| line.len() >= 2)
        .map(|line| line.strip_suffix('\n').unwrap_or(line))
}

/// Read a list file, enforcing its capacity.
pub(crate) fn read_entries(path: &Path, max: usize, kind: ListKind) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|e| kind.open_error(path, e))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| kind.read_error(path, e))?;

    let mut entries = Vec::new();
    for entry in parse_entries(&contents) {
        if entries.len() >= max {
            return Err(kind.overflow(max));
        }
        entries.push(entry.to_string());
    }

    debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Directories to subscribe to, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchList {
    dirs: Vec<PathBuf>,
}

impl WatchList {
    /// Build a watch list from already loaded directories.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Load the watch list file, failing if it holds more than `max` entries.
    pub fn load(path: &Path, max: usize) -> Result<Self> {
        let dirs = read_entries(path, max, ListKind::Watch)?
            .into_iter()
            .map(PathBuf::from)
            .collect();
        Ok(Self { dirs })
    }

    /// Whether there is nothing to watch.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Number of directories.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// The directories, in file order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_list(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("watch.txt");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let entries: Vec<_> = parse_entries("/a\n\n/b\n\n\n/c\n").collect();
        assert_eq!(entries, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_parse_keeps_unterminated_last_line() {
        let entries: Vec<_> = parse_entries("/a\n/b").collect();
        assert_eq!(entries, vec!["/a", "/b"]);
    }

    #[test]
    fn test_parse_skips_single_byte_unterminated_line() {
        let entries: Vec<_> = parse_entries("/a\n/").collect();
        assert_eq!(entries, vec!["/a"]);
    }

    #[test]
    fn test_parse_keeps_whitespace_literally() {
        let entries: Vec<_> = parse_entries("/a b \n \n").collect();
        assert_eq!(entries, vec!["/a b ", " "]);
    }

    #[test]
    fn test_load_watch_list_in_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, "/data\n\n/home/user\n/srv\n");

        let list = WatchList::load(&path, 1024).unwrap();
        assert_eq!(
            list.dirs(),
            &[
                PathBuf::from("/data"),
                PathBuf::from("/home/user"),
                PathBuf::from("/srv"),
            ]
        );
    }

    #[test]
    fn test_load_empty_watch_list() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, "\n\n");

        let list = WatchList::load(&path, 1024).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_watch_list_at_capacity() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, "/a\n/b\n/c\n");

        let list = WatchList::load(&path, 3).unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_load_watch_list_over_capacity() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, "/a\n/b\n\n/c\n/d\n");

        let err = WatchList::load(&path, 3).unwrap_err();
        assert!(matches!(err, WatcherError::TooManyWatchPaths { max: 3 }));
        assert_eq!(err.exit_status(), -6);
    }

    #[test]
    fn test_load_missing_watch_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");

        let err = WatchList::load(&path, 1024).unwrap_err();
        assert!(matches!(err, WatcherError::WatchListOpen { .. }));
        assert_eq!(err.exit_status(), -5);
    }

    #[test]
    fn test_load_unreadable_watch_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch.txt");
        fs::write(&path, [0x2f, 0xff, 0xfe, b'\n']).unwrap();

        let err = WatchList::load(&path, 1024).unwrap_err();
        assert!(matches!(err, WatcherError::WatchListRead { .. }));
        assert_eq!(err.exit_status(), -7);
    }

    #[test]
    fn test_exclude_kind_maps_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_list(&dir, "/a\n/b\n");

        let err = read_entries(&path, 1, ListKind::Exclude).unwrap_err();
        assert!(matches!(err, WatcherError::TooManyExcludePaths { max: 1 }));

        let err = read_entries(&dir.path().join("nope"), 1, ListKind::Exclude).unwrap_err();
        assert!(matches!(err, WatcherError::ExcludeListOpen { .. }));
    }
}
