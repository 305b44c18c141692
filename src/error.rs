// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Every variant is recoverable: the viewer reports it in place of the normal
//! caption and keeps the previous collection and cursor.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The directory could not be enumerated (missing, permissions, vanished).
    #[error("Cannot read directory {}: {reason}", path.display())]
    DirectoryUnreadable { path: PathBuf, reason: String },

    /// A requested file is absent from its directory listing.
    #[error("{} is not a supported file in its directory", path.display())]
    FileNotFound { path: PathBuf },

    /// The decoder rejected the file.
    #[error("Cannot load {}: {reason}", path.display())]
    MediaLoadFailed { path: PathBuf, reason: String },

    /// The filesystem refused to remove the file.
    #[error("Cannot delete {}: {reason}", path.display())]
    DeleteFailed { path: PathBuf, reason: String },

    /// The external resolution probe failed or printed something unparsable.
    #[error("Resolution probe failed: {0}")]
    ProbeFailed(String),

    /// Invalid command line or environment value.
    #[error("Config Error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn directory_unreadable(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Error::DirectoryUnreadable {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::DirectoryUnreadable { .. } => "directory-unreadable",
            Error::FileNotFound { .. } => "file-not-found",
            Error::MediaLoadFailed { .. } => "media-load-failed",
            Error::DeleteFailed { .. } => "delete-failed",
            Error::ProbeFailed(_) => "probe-failed",
            Error::Config(_) => "config",
        }
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_directory_error() {
        let err = Error::DirectoryUnreadable {
            path: PathBuf::from("/nowhere"),
            reason: "not found".into(),
        };
        assert_eq!(format!("{}", err), "Cannot read directory /nowhere: not found");
    }

    #[test]
    fn directory_unreadable_keeps_io_reason() {
        let io_error = std::io::Error::other("boom");
        let err = Error::directory_unreadable("/tmp/x", &io_error);
        match err {
            Error::DirectoryUnreadable { reason, .. } => assert!(reason.contains("boom")),
            _ => panic!("expected DirectoryUnreadable variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn kinds_are_distinct() {
        let errors = [
            Error::DirectoryUnreadable {
                path: PathBuf::new(),
                reason: String::new(),
            },
            Error::FileNotFound {
                path: PathBuf::new(),
            },
            Error::MediaLoadFailed {
                path: PathBuf::new(),
                reason: String::new(),
            },
            Error::DeleteFailed {
                path: PathBuf::new(),
                reason: String::new(),
            },
            Error::ProbeFailed(String::new()),
            Error::Config(String::new()),
        ];
        let mut kinds: Vec<_> = errors.iter().map(Error::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }
}
