// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Formats**: Video extension allowlist
//! - **External tools**: Resolution probe program
//! - **Playback**: Tick interval and loop tolerance
//! - **Window**: Default and minimum window size, caption metrics

// ==========================================================================
// Format Defaults
// ==========================================================================

/// Video container extensions handed to the video decoder.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "mkv", "webm", "avi"];

/// Image extensions that may hold more than one frame.
pub const ANIMATED_CAPABLE_EXTENSIONS: &[&str] = &["gif", "webp"];

// ==========================================================================
// External Tool Defaults
// ==========================================================================

/// Program used to read a video's native resolution.
pub const DEFAULT_PROBE_PROGRAM: &str = "ffprobe";

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Interval between playback ticks (in milliseconds, ~30 fps).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 33;

/// Minimum tick interval (in milliseconds).
pub const MIN_TICK_INTERVAL_MS: u64 = 5;

/// Width of the end-of-stream window in which a video rewinds (in milliseconds).
pub const DEFAULT_LOOP_TOLERANCE_MS: u64 = 150;

/// Delay used for animation frames that declare none (in milliseconds).
pub const DEFAULT_FRAME_DELAY_MS: u64 = 100;

// ==========================================================================
// Window Defaults
// ==========================================================================

pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

/// Vertical space taken by the menu bar, controls and labels (in pixels).
pub const CHROME_HEIGHT: u32 = 130;

/// Estimated average width of one caption character (in pixels).
pub const CAPTION_CHAR_WIDTH: f32 = 7.5;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_TICK_INTERVAL_MS >= MIN_TICK_INTERVAL_MS);
    assert!(DEFAULT_LOOP_TOLERANCE_MS > DEFAULT_TICK_INTERVAL_MS);
    assert!(DEFAULT_FRAME_DELAY_MS > 0);
    assert!(WINDOW_DEFAULT_WIDTH >= MIN_WINDOW_WIDTH);
    assert!(WINDOW_DEFAULT_HEIGHT >= MIN_WINDOW_HEIGHT);
    assert!(MIN_WINDOW_HEIGHT > CHROME_HEIGHT);
    assert!(!DEFAULT_VIDEO_EXTENSIONS.is_empty());
};
