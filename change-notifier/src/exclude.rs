//! Prefix based exclusion of changed paths.

use std::path::Path;

use crate::error::Result;
use crate::lists::{ListKind, read_entries};

/// Drops changes under administratively excluded paths.
///
/// Matching is a literal string prefix test, not a path component test: the
/// entry `/a/b` excludes `/a/bc` as well as `/a/b/c`. Consumers depend on this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeFilter {
    prefixes: Vec<String>,
}

impl ExcludeFilter {
    /// Build a filter from prefixes.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Load the exclude list file, failing if it holds more than `max` entries.
    pub fn load(path: &Path, max: usize) -> Result<Self> {
        let prefixes = read_entries(path, max, ListKind::Exclude)?;
        Ok(Self { prefixes })
    }

    /// Check if a changed path falls under any excluded prefix.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let bytes = path.as_os_str().as_encoded_bytes();
        self.prefixes
            .iter()
            .any(|prefix| bytes.starts_with(prefix.as_bytes()))
    }

    /// The prefix that excludes `path`, if any.
    pub fn matching_prefix(&self, path: &Path) -> Option<&str> {
        let bytes = path.as_os_str().as_encoded_bytes();
        self.prefixes
            .iter()
            .find(|prefix| bytes.starts_with(prefix.as_bytes()))
            .map(String::as_str)
    }

    /// Number of prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the filter excludes nothing.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
