// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaKind`](media::MediaKind),
//!   [`MediaEntry`](media::MediaEntry), [`RawImage`](media::RawImage)) and the
//!   [`fit_within`](media::fit_within) scaling policy
//! - [`video`]: Playback state ([`PlaybackState`](video::PlaybackState))

pub mod media;
pub mod video;
