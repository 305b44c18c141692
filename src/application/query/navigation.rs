// SPDX-License-Identifier: MPL-2.0
//! Media navigation: the file collection and the current-file cursor.
//!
//! [`MediaNavigator`] owns the sorted listing of one directory and an index
//! into it. Every operation either leaves a valid `(collection, cursor)`
//! pair behind or fails without touching it. After the collection changes
//! (refresh, delete, re-sort) the cursor is reconciled: it follows the same
//! file if that file is still listed, otherwise it keeps its numeric
//! position clamped to the new length.

use crate::directory_scanner;
use crate::domain::media::{Dimensions, MediaEntry, MediaKind, SortKey};
use crate::error::{Error, Result};
use crate::media::FormatRegistry;
use crate::sorting;
use std::fs;
use std::path::{Path, PathBuf};

/// Navigation state information for UI rendering.
///
/// A snapshot of everything the controls need, without access to the list.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInfo {
    /// Whether there is a next media to navigate to.
    pub has_next: bool,
    /// Whether there is a previous media to navigate to.
    pub has_previous: bool,
    /// Whether the current media is the first in the list.
    pub at_first: bool,
    /// Whether the current media is the last in the list.
    pub at_last: bool,
    /// Current position in the list (0-indexed), if set.
    pub current_index: Option<usize>,
    /// Total number of media items in the list.
    pub total_count: usize,
}

/// How an [`MediaNavigator::open`] call settled the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The requested file, or the first file of the directory, is current.
    Selected,
    /// The directory holds no supported media.
    Empty,
    /// The requested file is not in its directory listing; the first file
    /// (if any) is current instead.
    RequestedMissing(PathBuf),
}

/// Manages navigation through the media files of one directory.
#[derive(Debug, Clone)]
pub struct MediaNavigator {
    registry: FormatRegistry,
    sort_key: SortKey,
    directory: Option<PathBuf>,
    entries: Vec<MediaEntry>,
    /// `None` exactly when `entries` is empty.
    cursor: Option<usize>,
}

impl MediaNavigator {
    /// Creates an empty navigator.
    #[must_use]
    pub fn new(registry: FormatRegistry, sort_key: SortKey) -> Self {
        Self {
            registry,
            sort_key,
            directory: None,
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Opens a directory, or a file within its parent directory.
    ///
    /// A directory selects its first file. A file selects itself; if it is
    /// not part of the listing (unsupported extension, vanished) the first
    /// file is selected and [`OpenOutcome::RequestedMissing`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryUnreadable`] if the directory cannot be
    /// listed. The previous collection and cursor are kept in that case.
    pub fn open(&mut self, path: &Path) -> Result<OpenOutcome> {
        let (directory, requested) = if path.is_dir() {
            (path.to_path_buf(), None)
        } else {
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (parent, Some(path))
        };

        let mut entries = directory_scanner::list(&directory, &self.registry)?;
        sorting::sort(&mut entries, self.sort_key);

        let first = (!entries.is_empty()).then_some(0);
        let (cursor, outcome) = match requested {
            None => (first, Self::settled(first)),
            Some(file) => {
                let found = canonical_in(&directory, file)
                    .and_then(|canonical| entries.iter().position(|e| e.path() == canonical));
                match found {
                    Some(index) => (Some(index), OpenOutcome::Selected),
                    None => (first, OpenOutcome::RequestedMissing(file.to_path_buf())),
                }
            }
        };

        tracing::info!(
            directory = %directory.display(),
            count = entries.len(),
            sort = %self.sort_key,
            "opened directory"
        );

        self.directory = Some(fs::canonicalize(&directory).unwrap_or(directory));
        self.entries = entries;
        self.cursor = cursor;
        Ok(outcome)
    }

    /// Re-lists the current directory and reconciles the cursor.
    ///
    /// Does nothing if no directory has been opened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryUnreadable`] if the directory can no longer
    /// be listed; the previous collection and cursor are kept.
    pub fn refresh(&mut self) -> Result<()> {
        let Some(directory) = self.directory.clone() else {
            return Ok(());
        };

        let mut entries = directory_scanner::list(&directory, &self.registry)?;
        sorting::sort(&mut entries, self.sort_key);

        let previous = self.current().map(|entry| entry.path().to_path_buf());
        let old_index = self.cursor;
        self.entries = entries;
        self.reconcile(previous.as_deref(), old_index);

        tracing::info!(
            directory = %directory.display(),
            count = self.entries.len(),
            "refreshed directory"
        );
        Ok(())
    }

    /// Moves to the next file. Returns false at the end or when empty.
    pub fn next(&mut self) -> bool {
        match self.cursor {
            Some(index) if index + 1 < self.entries.len() => self.move_to(index + 1),
            _ => false,
        }
    }

    /// Moves to the previous file. Returns false at the start or when empty.
    pub fn previous(&mut self) -> bool {
        match self.cursor {
            Some(index) if index > 0 => self.move_to(index - 1),
            _ => false,
        }
    }

    /// Jumps to the first file. Returns false if already there or empty.
    pub fn first(&mut self) -> bool {
        match self.cursor {
            Some(index) if index != 0 => self.move_to(0),
            _ => false,
        }
    }

    /// Jumps to the last file. Returns false if already there or empty.
    pub fn last(&mut self) -> bool {
        let last = self.entries.len().saturating_sub(1);
        match self.cursor {
            Some(index) if index != last => self.move_to(last),
            _ => false,
        }
    }

    /// Moves to `index`. Returns false if out of range or already current.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() || self.cursor == Some(index) {
            return false;
        }
        self.move_to(index)
    }

    /// Removes the current file from disk and from the collection.
    ///
    /// The cursor keeps its index, which now names the following file, or
    /// clamps to the new last file. Returns the removed path, or `None` when
    /// the collection is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeleteFailed`] if the filesystem refuses; the file
    /// stays in the collection.
    pub fn delete_current(&mut self) -> Result<Option<PathBuf>> {
        let Some(index) = self.cursor else {
            return Ok(None);
        };
        let path = self.entries[index].path().to_path_buf();

        fs::remove_file(&path).map_err(|err| Error::DeleteFailed {
            path: path.clone(),
            reason: err.to_string(),
        })?;

        self.entries.remove(index);
        self.cursor = if self.entries.is_empty() {
            None
        } else {
            Some(index.min(self.entries.len() - 1))
        };

        tracing::info!(path = %path.display(), remaining = self.entries.len(), "deleted file");
        Ok(Some(path))
    }

    /// Re-sorts the collection, keeping the same file current.
    pub fn sort_by(&mut self, key: SortKey) {
        let previous = self.current().map(|entry| entry.path().to_path_buf());
        let old_index = self.cursor;

        self.sort_key = key;
        sorting::sort(&mut self.entries, key);
        self.reconcile(previous.as_deref(), old_index);

        tracing::debug!(sort = %key, index = ?self.cursor, "re-sorted collection");
    }

    /// Records what loading `path` revealed about it.
    ///
    /// Returns false if `path` is no longer in the collection.
    pub fn record_loaded(&mut self, path: &Path, kind: MediaKind, dimensions: Dimensions) -> bool {
        match self.entries.iter_mut().find(|entry| entry.path() == path) {
            Some(entry) => {
                entry.confirm(kind, dimensions);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&MediaEntry> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical path of the listed directory, once one has been opened.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Checks if there is a file after the current one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        matches!(self.cursor, Some(index) if index + 1 < self.entries.len())
    }

    /// Checks if there is a file before the current one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        matches!(self.cursor, Some(index) if index > 0)
    }

    /// Returns navigation state information for UI rendering.
    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        NavigationInfo {
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            at_first: self.cursor == Some(0),
            at_last: self.cursor.is_some() && !self.has_next(),
            current_index: self.cursor,
            total_count: self.entries.len(),
        }
    }

    fn move_to(&mut self, index: usize) -> bool {
        self.cursor = Some(index);
        tracing::debug!(index, "cursor moved");
        true
    }

    fn settled(cursor: Option<usize>) -> OpenOutcome {
        if cursor.is_some() {
            OpenOutcome::Selected
        } else {
            OpenOutcome::Empty
        }
    }

    /// Points the cursor at `previous` if it is still listed, else at
    /// `old_index` clamped into range.
    fn reconcile(&mut self, previous: Option<&Path>, old_index: Option<usize>) {
        if self.entries.is_empty() {
            self.cursor = None;
            return;
        }

        let by_identity =
            previous.and_then(|path| self.entries.iter().position(|e| e.path() == path));
        let last = self.entries.len() - 1;

        self.cursor = Some(by_identity.unwrap_or_else(|| old_index.unwrap_or(0).min(last)));
    }
}

/// The path `file` would have in a listing of `directory`.
fn canonical_in(directory: &Path, file: &Path) -> Option<PathBuf> {
    let name = file.file_name()?;
    fs::canonicalize(directory).ok().map(|dir| dir.join(name))
}
