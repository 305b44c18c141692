// SPDX-License-Identifier: MPL-2.0
//! Directory scanner for finding supported media files.
//!
//! Scans the immediate children of one directory, keeps the files the
//! [`FormatRegistry`] recognizes, and returns them in enumeration order. The
//! caller is expected to sort the result right away.

use crate::domain::media::MediaEntry;
use crate::error::{Error, Result};
use crate::media::FormatRegistry;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Lists the supported media files directly inside `directory`.
///
/// Paths are canonicalized so they compare equal regardless of how the
/// directory was named on the command line. Subdirectories are not visited.
/// Entries that vanish between enumeration and inspection are skipped.
///
/// # Errors
///
/// Returns [`Error::DirectoryUnreadable`] if the directory does not exist,
/// is not readable, or fails mid-enumeration.
pub fn list(directory: &Path, registry: &FormatRegistry) -> Result<Vec<MediaEntry>> {
    let directory = fs::canonicalize(directory)
        .map_err(|err| Error::directory_unreadable(directory, &err))?;
    let read_dir =
        fs::read_dir(&directory).map_err(|err| Error::directory_unreadable(&directory, &err))?;

    let mut entries = Vec::new();

    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|err| Error::directory_unreadable(&directory, &err))?;
        let path = dir_entry.path();

        let Some(kind) = registry.classify(&path) else {
            continue;
        };

        // Follows symlinks, so a link to a picture counts as a picture.
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        // `directory` is canonical, so the entry path is too. The link itself
        // is kept so entries never point outside the directory.
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        entries.push(MediaEntry::new(
            directory.join(dir_entry.file_name()),
            kind,
            modified,
        ));
    }

    tracing::debug!(
        directory = %directory.display(),
        count = entries.len(),
        "listed directory"
    );

    Ok(entries)
}
