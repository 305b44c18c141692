// SPDX-License-Identifier: MPL-2.0
//! Sort keys for the file collection.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the file collection.
///
/// Selected for the session only; changing it re-sorts the current listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Lexicographic by file name.
    Name,
    /// Oldest first, ties broken by file name.
    #[default]
    ModifiedTime,
    /// Extension first, then file name.
    TypeThenName,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::ModifiedTime, SortKey::TypeThenName];

    /// Menu label of this key.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::ModifiedTime => "Modified",
            SortKey::TypeThenName => "Type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "modified" | "mtime" | "modified-time" => Ok(SortKey::ModifiedTime),
            "type" | "type-then-name" => Ok(SortKey::TypeThenName),
            other => Err(Error::Config(format!("unknown sort key: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_round_trips_through_labels() {
        for key in SortKey::ALL {
            assert_eq!(key.label().parse::<SortKey>(), Ok(key));
        }
        assert_eq!("  TYPE ".parse::<SortKey>(), Ok(SortKey::TypeThenName));
        assert!("size".parse::<SortKey>().is_err());
    }

    #[test]
    fn labels_are_menu_strings() {
        let labels: Vec<String> = SortKey::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["Name", "Modified", "Type"]);
    }
}
