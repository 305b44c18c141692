// SPDX-License-Identifier: MPL-2.0
//! Playback domain types shared by animations and videos.

pub mod playback;

pub use playback::PlaybackState;
