// SPDX-License-Identifier: MPL-2.0
//! Video playback and resolution probing ports.
//!
//! # Design Notes
//!
//! - The player is **stateful**: it owns the decoder and a position
//! - Frames are pulled with [`VideoPlayer::poll_frame`] on each tick; the
//!   player never calls back into the session
//! - Native looping is not assumed: the session rewinds explicitly
//! - Dropping a player must release every resource it holds

use crate::domain::media::{Dimensions, RawImage};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// VideoError
// =============================================================================

/// Errors raised by video adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VideoError {
    /// The probe program could not be started.
    #[error("Cannot start {program}: {reason}")]
    SpawnFailed { program: String, reason: String },

    /// The probe program ran but reported failure.
    #[error("{program} exited with an error: {stderr}")]
    ProcessFailed { program: String, stderr: String },

    /// Probe output could not be parsed.
    #[error("Unparsable probe output: {0:?}")]
    InvalidOutput(String),

    /// The stream could not be decoded or controlled.
    #[error("Video decoding failed: {0}")]
    DecodingFailed(String),
}

// =============================================================================
// Ports
// =============================================================================

/// Out-of-process query for a video's native resolution.
pub trait ResolutionProbe: Send {
    /// Returns the width and height of the first video stream of `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if the probe cannot run or its output is
    /// not a `width,height` pair.
    fn probe(&self, path: &Path) -> Result<Dimensions, VideoError>;
}

/// A loaded video stream.
///
/// # Lifecycle
///
/// 1. [`VideoBackend::load`] returns a stopped player at position 0
/// 2. `play()` starts decoding
/// 3. `poll_frame()` on every tick hands out the newest frame
/// 4. `set_position()` seeks (used to rewind near the end)
/// 5. `stop()` or drop ends decoding
pub trait VideoPlayer: Send {
    /// Starts or resumes decoding from the current position.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if decoding cannot start.
    fn play(&mut self) -> Result<(), VideoError>;

    /// Stops decoding. Idempotent.
    fn stop(&mut self);

    /// Jumps to `position`, keeping the play/stop state.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if decoding cannot restart at `position`.
    fn set_position(&mut self, position: Duration) -> Result<(), VideoError>;

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Stream length, if known.
    fn duration(&self) -> Option<Duration>;

    /// Returns the newest frame decoded since the last call, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] once the decoder has failed. A stream that
    /// ends before delivering a single frame counts as failed, so a broken
    /// file is never mistaken for one that just finished.
    fn poll_frame(&mut self) -> Result<Option<RawImage>, VideoError>;

    /// True once the decoder has delivered its last frame.
    fn at_end(&self) -> bool;
}

/// Port for opening video files.
pub trait VideoBackend: Send {
    /// Prepares `path` for playback with frames of `native` size.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if the file cannot be opened.
    fn load(&self, path: &Path, native: Dimensions) -> Result<Box<dyn VideoPlayer>, VideoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the traits are object-safe
    fn _assert_object_safe(_: &dyn ResolutionProbe, _: &dyn VideoBackend, _: &dyn VideoPlayer) {}

    #[test]
    fn errors_name_the_program() {
        let err = VideoError::SpawnFailed {
            program: "ffprobe".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot start ffprobe: No such file or directory"
        );
    }

    #[test]
    fn invalid_output_is_quoted() {
        let err = VideoError::InvalidOutput("N/A".into());
        assert_eq!(err.to_string(), "Unparsable probe output: \"N/A\"");
    }
}
