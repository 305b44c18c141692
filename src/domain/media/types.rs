// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Classification of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Single still frame (PNG, JPEG, single-frame GIF, ...).
    Static,
    /// Multi-frame image played in a loop (GIF, animated WebP).
    Animated,
    /// Video stream in a container (MP4, ...).
    Video,
}

impl MediaKind {
    /// Returns true for kinds that need a playback loop.
    #[must_use]
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Animated | Self::Video)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One file of the current collection.
///
/// The kind starts out as the extension-based guess from the format
/// registry. Loading the file may refine it (a single-frame GIF becomes
/// [`MediaKind::Static`]) and fills in the native dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    path: PathBuf,
    kind: MediaKind,
    modified: SystemTime,
    dimensions: Option<Dimensions>,
}

impl MediaEntry {
    #[must_use]
    pub fn new(path: PathBuf, kind: MediaKind, modified: SystemTime) -> Self {
        Self {
            path,
            kind,
            modified,
            dimensions: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Last-modified timestamp captured at listing time.
    #[must_use]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Native dimensions, once the file has been loaded.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// File name as lossy UTF-8, empty if the path has none.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Lower-cased extension, empty if the path has none.
    #[must_use]
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Records what loading the file revealed.
    pub fn confirm(&mut self, kind: MediaKind, dimensions: Dimensions) {
        self.kind = kind;
        self.dimensions = Some(dimensions);
    }
}

/// Raw image data without presentation dependencies.
///
/// This is the domain representation of an image, containing only the
/// pure pixel data. The Iced front-end converts it to an image handle.
///
/// # Example
///
/// ```
/// use iced_peek::domain::media::RawImage;
/// use std::sync::Arc;
///
/// let pixels = vec![255u8; 100 * 100 * 4]; // 100x100 RGBA
/// let image = RawImage::new(100, 100, Arc::new(pixels));
///
/// assert_eq!(image.width(), 100);
/// assert_eq!(image.height(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct RawImage {
    width: u32,
    height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    rgba_bytes: Arc<Vec<u8>>,
}

impl RawImage {
    /// Creates a new `RawImage` from dimensions and RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_bytes: Arc<Vec<u8>>) -> Self {
        let expected_len = (width as usize) * (height as usize) * 4;
        assert_eq!(
            rgba_bytes.len(),
            expected_len,
            "RGBA data length mismatch: expected {expected_len}, got {}",
            rgba_bytes.len()
        );

        Self {
            width,
            height,
            rgba_bytes,
        }
    }

    /// Creates a new `RawImage` from dimensions and owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        Self::new(width, height, Arc::new(rgba_bytes))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Returns the shared reference to the RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes_arc(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.rgba_bytes)
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl Eq for RawImage {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporal_kinds() {
        assert!(!MediaKind::Static.is_temporal());
        assert!(MediaKind::Animated.is_temporal());
        assert!(MediaKind::Video.is_temporal());
    }

    #[test]
    fn dimensions_display_as_w_x_h() {
        assert_eq!(Dimensions::new(1920, 1080).to_string(), "1920x1080");
    }

    #[test]
    fn dimensions_with_a_zero_side_are_empty() {
        assert!(Dimensions::new(1920, 0).is_empty());
        assert!(Dimensions::new(0, 10).is_empty());
        assert!(!Dimensions::new(1, 1).is_empty());
    }

    #[test]
    fn entry_name_and_extension() {
        let entry = MediaEntry::new(
            PathBuf::from("/photos/Holiday.JPG"),
            MediaKind::Static,
            SystemTime::UNIX_EPOCH,
        );
        assert_eq!(entry.file_name(), "Holiday.JPG");
        assert_eq!(entry.extension(), "jpg");
        assert_eq!(entry.dimensions(), None);
    }

    #[test]
    fn confirm_refines_kind_and_size() {
        let mut entry = MediaEntry::new(
            PathBuf::from("/photos/still.gif"),
            MediaKind::Animated,
            SystemTime::UNIX_EPOCH,
        );
        entry.confirm(MediaKind::Static, Dimensions::new(4, 3));
        assert_eq!(entry.kind(), MediaKind::Static);
        assert_eq!(entry.dimensions(), Some(Dimensions::new(4, 3)));
    }

    #[test]
    fn test_raw_image_creation() {
        let pixels = vec![0u8; 10 * 10 * 4];
        let image = RawImage::from_rgba(10, 10, pixels);

        assert_eq!(image.width(), 10);
        assert_eq!(image.height(), 10);
        assert_eq!(image.rgba_bytes().len(), 400);
    }

    #[test]
    #[should_panic(expected = "RGBA data length mismatch")]
    fn test_raw_image_invalid_size() {
        let pixels = vec![0u8; 100]; // Wrong size
        let _ = RawImage::from_rgba(10, 10, pixels);
    }

    #[test]
    fn test_raw_image_equality() {
        let image1 = RawImage::from_rgba(10, 10, vec![0u8; 400]);
        let image2 = RawImage::from_rgba(10, 10, vec![0u8; 400]);
        let image3 = RawImage::from_rgba(10, 10, vec![1u8; 400]);

        assert_eq!(image1, image2);
        assert_ne!(image1, image3);
    }
}
