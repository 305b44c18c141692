// SPDX-License-Identifier: MPL-2.0
//! Format registry: which extensions the viewer opens, and as what.
//!
//! The registry is an immutable value built once at startup and passed to
//! the lister and the media session. It holds three disjoint extension sets:
//!
//! - **static**: formats the image decoder reads as a single frame
//! - **animated-capable**: formats that *may* hold several frames (GIF, WebP)
//! - **video**: the configured container allowlist
//!
//! Classification is by extension only, so listing a directory never opens a
//! file. An animated-capable file is reported as [`MediaKind::Animated`]
//! here; the media session downgrades it to [`MediaKind::Static`] when the
//! decoder finds a single frame.

use crate::config::ANIMATED_CAPABLE_EXTENSIONS;
use crate::domain::media::MediaKind;
use image_rs::ImageFormat;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatRegistry {
    static_extensions: BTreeSet<String>,
    animated_extensions: BTreeSet<String>,
    video_extensions: BTreeSet<String>,
}

impl FormatRegistry {
    /// Builds a registry from explicit extension lists.
    ///
    /// Extensions are lower-cased and stripped of leading dots. Overlaps are
    /// resolved so the sets stay disjoint: animated-capable beats static, and
    /// both image sets beat video.
    pub fn new<S, A, V>(static_exts: S, animated_exts: A, video_exts: V) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let animated_extensions = normalize(animated_exts);
        let static_extensions: BTreeSet<String> = normalize(static_exts)
            .difference(&animated_extensions)
            .cloned()
            .collect();
        let video_extensions = normalize(video_exts)
            .into_iter()
            .filter(|ext| {
                !static_extensions.contains(ext) && !animated_extensions.contains(ext)
            })
            .collect();

        Self {
            static_extensions,
            animated_extensions,
            video_extensions,
        }
    }

    /// Builds a registry from the decoders compiled into the `image` crate
    /// plus the given video allowlist.
    pub fn from_host<V>(video_exts: V) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let host: Vec<&'static str> = ImageFormat::all()
            .filter(|format| format.reading_enabled())
            .flat_map(|format| format.extensions_str().iter().copied())
            .collect();

        let animated: Vec<&str> = host
            .iter()
            .copied()
            .filter(|ext| ANIMATED_CAPABLE_EXTENSIONS.contains(ext))
            .collect();

        Self::new(host, animated, video_exts)
    }

    /// Classifies `path` by extension, case-insensitively.
    ///
    /// Returns `None` for unsupported or missing extensions.
    #[must_use]
    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_lowercase();

        if self.animated_extensions.contains(&ext) {
            Some(MediaKind::Animated)
        } else if self.static_extensions.contains(&ext) {
            Some(MediaKind::Static)
        } else if self.video_extensions.contains(&ext) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_supported(&self, path: &Path) -> bool {
        self.classify(path).is_some()
    }

    /// All supported extensions, sorted, for use as a file-dialog filter.
    #[must_use]
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self
            .static_extensions
            .iter()
            .chain(&self.animated_extensions)
            .chain(&self.video_extensions)
            .map(String::as_str)
            .collect();
        all.sort_unstable();
        all
    }

    #[must_use]
    pub fn video_extensions(&self) -> impl Iterator<Item = &str> {
        self.video_extensions.iter().map(String::as_str)
    }
}

fn normalize<I>(exts: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    exts.into_iter()
        .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VIDEO_EXTENSIONS;

    fn host_registry() -> FormatRegistry {
        FormatRegistry::from_host(DEFAULT_VIDEO_EXTENSIONS)
    }

    #[test]
    fn classifies_the_three_kinds() {
        let registry = host_registry();
        assert_eq!(registry.classify(Path::new("a.png")), Some(MediaKind::Static));
        assert_eq!(registry.classify(Path::new("b.gif")), Some(MediaKind::Animated));
        assert_eq!(registry.classify(Path::new("c.mp4")), Some(MediaKind::Video));
    }

    #[test]
    fn classification_ignores_case() {
        let registry = host_registry();
        assert_eq!(registry.classify(Path::new("PHOTO.JPG")), Some(MediaKind::Static));
        assert_eq!(registry.classify(Path::new("clip.Mp4")), Some(MediaKind::Video));
        assert_eq!(registry.classify(Path::new("anim.WebP")), Some(MediaKind::Animated));
    }

    #[test]
    fn unsupported_and_extensionless_paths_are_rejected() {
        let registry = host_registry();
        assert_eq!(registry.classify(Path::new("notes.txt")), None);
        assert_eq!(registry.classify(Path::new("README")), None);
        assert_eq!(registry.classify(Path::new(".png")), None);
        assert!(!registry.is_supported(Path::new("archive.zip")));
    }

    #[test]
    fn sets_are_disjoint() {
        let registry = FormatRegistry::new(["png", "gif"], ["gif"], ["gif", "png", "mp4"]);
        assert_eq!(registry.classify(Path::new("x.gif")), Some(MediaKind::Animated));
        assert_eq!(registry.classify(Path::new("x.png")), Some(MediaKind::Static));
        assert_eq!(registry.video_extensions().collect::<Vec<_>>(), ["mp4"]);
    }

    #[test]
    fn extensions_are_normalized() {
        let registry = FormatRegistry::new([".PNG"], Vec::<&str>::new(), [" MKV "]);
        assert_eq!(registry.supported_extensions(), ["mkv", "png"]);
    }

    #[test]
    fn dialog_filter_is_sorted_and_unique() {
        let registry = host_registry();
        let exts = registry.supported_extensions();
        let mut sorted = exts.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(exts, sorted);
        assert!(exts.contains(&"jpeg"));
        assert!(exts.contains(&"webm"));
    }

    #[test]
    fn empty_registry_supports_nothing() {
        let registry = FormatRegistry::default();
        assert!(registry.supported_extensions().is_empty());
        assert_eq!(registry.classify(Path::new("a.png")), None);
    }
}
