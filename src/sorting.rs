// SPDX-License-Identifier: MPL-2.0
//! Ordering of the file collection.
//!
//! Every key is a total order: after the primary key, entries fall back to
//! file name and finally to the full path, so sorting never depends on the
//! order the filesystem returned.

use crate::domain::media::{MediaEntry, SortKey};
use std::cmp::Ordering;

/// Sorts `entries` in place by `key`.
pub fn sort(entries: &mut [MediaEntry], key: SortKey) {
    entries.sort_by(|a, b| compare(a, b, key));
}

/// Compares two entries under `key`.
#[must_use]
pub fn compare(a: &MediaEntry, b: &MediaEntry, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Name => Ordering::Equal,
        SortKey::ModifiedTime => a.modified().cmp(&b.modified()),
        SortKey::TypeThenName => a.extension().cmp(&b.extension()),
    };

    primary
        .then_with(|| a.file_name().cmp(&b.file_name()))
        .then_with(|| a.path().cmp(b.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaKind;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn entry(name: &str, secs: u64) -> MediaEntry {
        MediaEntry::new(
            PathBuf::from("/pics").join(name),
            MediaKind::Static,
            SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
        )
    }

    fn names(entries: &[MediaEntry]) -> Vec<String> {
        entries.iter().map(MediaEntry::file_name).collect()
    }

    fn sample() -> Vec<MediaEntry> {
        vec![
            entry("c.png", 1),
            entry("a.mp4", 3),
            entry("b.gif", 2),
            entry("d.gif", 2),
        ]
    }

    #[test]
    fn name_sorts_lexicographically() {
        let mut entries = sample();
        sort(&mut entries, SortKey::Name);
        assert_eq!(names(&entries), ["a.mp4", "b.gif", "c.png", "d.gif"]);
    }

    #[test]
    fn modified_time_sorts_oldest_first_with_name_tie_break() {
        let mut entries = vec![
            entry("d.gif", 2),
            entry("a.mp4", 3),
            entry("b.gif", 2),
            entry("c.png", 1),
        ];
        sort(&mut entries, SortKey::ModifiedTime);
        assert_eq!(names(&entries), ["c.png", "b.gif", "d.gif", "a.mp4"]);
    }

    #[test]
    fn type_then_name_groups_extensions() {
        let mut entries = sample();
        sort(&mut entries, SortKey::TypeThenName);
        assert_eq!(names(&entries), ["b.gif", "d.gif", "a.mp4", "c.png"]);
    }

    #[test]
    fn extension_comparison_ignores_case() {
        let mut entries = vec![entry("z.PNG", 0), entry("a.jpg", 0), entry("b.png", 0)];
        sort(&mut entries, SortKey::TypeThenName);
        assert_eq!(names(&entries), ["a.jpg", "b.png", "z.PNG"]);
    }

    #[test]
    fn sorting_twice_is_a_no_op() {
        let mut once = sample();
        sort(&mut once, SortKey::Name);
        let mut twice = once.clone();
        sort(&mut twice, SortKey::Name);
        assert_eq!(once, twice);
    }

    #[test]
    fn switching_keys_and_back_restores_order() {
        let mut entries = sample();
        sort(&mut entries, SortKey::ModifiedTime);
        let by_time = entries.clone();

        sort(&mut entries, SortKey::Name);
        sort(&mut entries, SortKey::ModifiedTime);

        assert_eq!(entries, by_time);
    }

    #[test]
    fn empty_and_single_collections_are_fine() {
        let mut empty: Vec<MediaEntry> = Vec::new();
        sort(&mut empty, SortKey::TypeThenName);
        assert!(empty.is_empty());

        let mut single = vec![entry("only.png", 5)];
        sort(&mut single, SortKey::ModifiedTime);
        assert_eq!(names(&single), ["only.png"]);
    }
}
