// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`image_rs`]: Still images and GIF/WebP frame sequences via the `image` crate
//! - [`ffmpeg`]: Resolution probing via `ffprobe`, video playback via the `FFmpeg` libraries

pub mod ffmpeg;
pub mod image_rs;

use crate::application::session::Decoders;
use crate::config::Config;

// Re-export main types for convenience
pub use ffmpeg::{FfmpegBackend, FfmpegPlayer, FfprobeProbe};
pub use image_rs::{ImageDecoder, ImageSequenceDecoder};

/// Builds the production decoder set for `config`.
#[must_use]
pub fn decoders(config: &Config) -> Decoders {
    Decoders {
        still: Box::new(ImageDecoder),
        sequence: Box::new(ImageSequenceDecoder),
        video: Box::new(FfmpegBackend),
        probe: Box::new(FfprobeProbe::new(config.probe_program.clone())),
    }
}
