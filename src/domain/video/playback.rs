// SPDX-License-Identifier: MPL-2.0
//! Playback state machine.
//!
//! Animations and videos share two states. Loading a new entry moves the
//! session from `Stopped` to `Playing`; teardown moves it back. End of media
//! does not stop playback: the tick handler rewinds to the start instead.

use std::time::Duration;

/// Represents the current playback state of an animation or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing is playing (static image, error, or torn down).
    #[default]
    Stopped,
    /// A loop driver is running.
    Playing,
}

impl PlaybackState {
    /// Returns true if the media is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if playback is stopped.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Returns true when a frame index is the last one of the sequence.
#[must_use]
pub fn is_final_frame(frame: usize, frame_count: usize) -> bool {
    frame_count > 0 && frame + 1 >= frame_count
}

/// Returns true when a video position is close enough to the end to rewind.
///
/// Timers fire late or early by a few milliseconds, so the end is treated as
/// a window of width `tolerance` rather than an exact instant.
#[must_use]
pub fn is_near_end(position: Duration, duration: Duration, tolerance: Duration) -> bool {
    if duration.is_zero() {
        return false;
    }
    position + tolerance >= duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stopped() {
        assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
    }

    #[test]
    fn test_state_checks() {
        assert!(PlaybackState::Playing.is_playing());
        assert!(!PlaybackState::Stopped.is_playing());
        assert!(PlaybackState::Stopped.is_stopped());
    }

    #[test]
    fn final_frame_detection() {
        assert!(!is_final_frame(0, 3));
        assert!(!is_final_frame(1, 3));
        assert!(is_final_frame(2, 3));
        assert!(is_final_frame(0, 1));
        assert!(!is_final_frame(0, 0));
    }

    #[test]
    fn near_end_uses_tolerance_window() {
        let duration = Duration::from_secs(10);
        let tolerance = Duration::from_millis(150);
        assert!(!is_near_end(Duration::from_millis(9_800), duration, tolerance));
        assert!(is_near_end(Duration::from_millis(9_850), duration, tolerance));
        assert!(is_near_end(Duration::from_secs(11), duration, tolerance));
    }

    #[test]
    fn unknown_duration_never_ends() {
        assert!(!is_near_end(
            Duration::from_secs(5),
            Duration::ZERO,
            Duration::from_millis(150)
        ));
    }
}
