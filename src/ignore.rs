//! File and directory ignore handling for Stencil templates.
//! Entries are relative paths; a path is ignored when it equals an entry or
//! lies underneath one. Matching is done on whole path components.

use log::debug;
use std::path::{Component, Path, PathBuf};

/// Set of relative paths excluded from a tree render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    entries: Vec<PathBuf>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. `./` prefixes and trailing separators are dropped;
    /// entries that normalize to nothing are skipped.
    pub fn add<P: AsRef<Path>>(&mut self, entry: P) {
        let normalized = normalize(entry.as_ref());
        if normalized.as_os_str().is_empty() {
            debug!("Skipping empty ignore entry '{}'", entry.as_ref().display());
            return;
        }
        if !self.entries.contains(&normalized) {
            self.entries.push(normalized);
        }
    }

    /// Returns true if `relative` equals or descends from any entry.
    pub fn is_ignored<P: AsRef<Path>>(&self, relative: P) -> bool {
        let relative = normalize(relative.as_ref());
        self.entries.iter().any(|entry| relative.starts_with(entry))
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: AsRef<Path>> FromIterator<P> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut list = IgnoreList::new();
        list.extend(iter);
        list
    }
}

impl<P: AsRef<Path>> Extend<P> for IgnoreList {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for entry in iter {
            self.add(entry);
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
