// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`media`]: Still-image and frame-sequence decoding
//! - [`video`]: Video playback and resolution probing
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no `image` types)
//! - Traits are `Send` and object-safe so the session can box them
//! - Methods return `Result` with port error types

pub mod media;
pub mod video;

// Re-export main types for convenience
pub use media::{FrameSequence, MediaError, SequenceDecoder, StillDecoder};
pub use video::{ResolutionProbe, VideoBackend, VideoError, VideoPlayer};
