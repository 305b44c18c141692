// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` adapters.
//!
//! - [`FfprobeProbe`]: implements [`ResolutionProbe`] by running the
//!   `ffprobe` executable as a child process
//! - [`FfmpegBackend`]: implements [`VideoBackend`] on the linked FFmpeg
//!   libraries, yielding [`FfmpegPlayer`]
//!
//! [`ResolutionProbe`]: crate::application::port::ResolutionProbe
//! [`VideoBackend`]: crate::application::port::VideoBackend

pub mod player;
pub mod probe;

pub use player::{init_ffmpeg, FfmpegBackend, FfmpegPlayer};
pub use probe::FfprobeProbe;
