// SPDX-License-Identifier: MPL-2.0
//! Still-image and frame-sequence decoding ports.
//!
//! The media session only needs "decode this path, give me dimensions and
//! frames". How the pixels are produced is up to the adapter.

use crate::domain::media::{Dimensions, RawImage};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// MediaError
// =============================================================================

/// Errors that can occur while decoding an image or an animation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaError {
    /// The file format is not supported.
    #[error("Unsupported media format")]
    UnsupportedFormat,

    /// The image dimensions are invalid (zero).
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// The width that was detected.
        width: u32,
        /// The height that was detected.
        height: u32,
    },

    /// The media data is corrupted or cannot be decoded.
    #[error("Corrupted media data: {0}")]
    CorruptedData(String),

    /// The file could not be read.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for MediaError {
    fn from(err: std::io::Error) -> Self {
        MediaError::IoError(err.to_string())
    }
}

// =============================================================================
// Still Images
// =============================================================================

/// Port for decoding a single frame.
pub trait StillDecoder: Send {
    /// Decodes `path` into RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] if the file cannot be read or decoded.
    fn decode(&self, path: &Path) -> Result<RawImage, MediaError>;
}

// =============================================================================
// Frame Sequences
// =============================================================================

/// An opened multi-frame image with a current-frame cursor.
///
/// Frame indices run from `0` to `frame_count() - 1`. The source never wraps
/// on its own; looping is the caller's job.
pub trait FrameSequence: Send {
    fn frame_count(&self) -> usize;

    /// Size of the logical screen every frame is drawn on.
    fn frame_rect(&self) -> Dimensions;

    fn current_frame(&self) -> usize;

    /// Moves to the next frame. Stays put on the final frame.
    fn advance_frame(&mut self);

    /// Moves to frame `index`. Returns false (and does nothing) when
    /// `index` is out of range.
    fn jump_to_frame(&mut self, index: usize) -> bool;

    /// Pixels of the current frame.
    fn frame(&self) -> &RawImage;

    /// How long the current frame stays on screen. Never zero.
    fn frame_delay(&self) -> Duration;
}

/// Port for opening animated-capable files.
pub trait SequenceDecoder: Send {
    /// Opens `path` and positions the sequence on frame 0.
    ///
    /// A file with a single frame still opens successfully; the caller
    /// checks [`FrameSequence::frame_count`] to decide how to show it.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] if the file cannot be read or has no frames.
    fn open(&self, path: &Path) -> Result<Box<dyn FrameSequence>, MediaError>;
}
