// SPDX-License-Identifier: MPL-2.0
//! Media session: the single decoded resource currently on screen.
//!
//! [`MediaSession::show`] always tears the previous [`DisplaySession`] down
//! before decoding the next entry, even when that decode then fails. Video
//! playback is stopped by [`VideoPlayback`]'s `Drop`, so no early return can
//! leave a decoder running.
//!
//! Playback is driven from outside by [`MediaSession::tick`]. Each `show`
//! issues a fresh [`PlaybackToken`]; ticks carrying an older token are
//! ignored, which is what keeps a tick queued before a file switch from
//! touching the new session. A video decoder that fails mid-playback ends
//! the session and the tick reports [`Error::MediaLoadFailed`].

use crate::application::port::{
    FrameSequence, ResolutionProbe, SequenceDecoder, StillDecoder, VideoBackend, VideoError,
    VideoPlayer,
};
use crate::domain::media::{fit_within, Dimensions, MediaEntry, MediaKind, RawImage};
use crate::domain::video::playback::{is_final_frame, is_near_end};
use crate::domain::video::PlaybackState;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The decoder collaborators a session loads media with.
pub struct Decoders {
    pub still: Box<dyn StillDecoder>,
    pub sequence: Box<dyn SequenceDecoder>,
    pub video: Box<dyn VideoBackend>,
    pub probe: Box<dyn ResolutionProbe>,
}

/// Identity of one `show` call, attached to playback ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackToken(u64);

/// What a successful [`MediaSession::show`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shown {
    /// Confirmed kind; an animated-capable file with one frame is `Static`.
    pub kind: MediaKind,
    pub native: Dimensions,
    pub target: Dimensions,
    pub token: PlaybackToken,
}

// =============================================================================
// DisplaySession
// =============================================================================

/// The live decoded resource, one variant per media kind.
pub enum DisplaySession {
    Static(RawImage),
    Animated(AnimatedPlayback),
    Video(VideoPlayback),
}

impl DisplaySession {
    fn frame(&self) -> Option<&RawImage> {
        match self {
            DisplaySession::Static(image) => Some(image),
            DisplaySession::Animated(animation) => Some(animation.source.frame()),
            DisplaySession::Video(video) => video.frame.as_ref(),
        }
    }

    fn state(&self) -> PlaybackState {
        match self {
            DisplaySession::Static(_) => PlaybackState::Stopped,
            DisplaySession::Animated(animation) => animation.state,
            DisplaySession::Video(video) => video.state,
        }
    }
}

/// A frame sequence looping on a wall-clock budget.
pub struct AnimatedPlayback {
    source: Box<dyn FrameSequence>,
    state: PlaybackState,
    /// Time accumulated toward the current frame's delay.
    elapsed: Duration,
}

impl AnimatedPlayback {
    fn new(source: Box<dyn FrameSequence>) -> Self {
        Self {
            source,
            state: PlaybackState::Playing,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances by as many frames as `elapsed` covers, wrapping from the
    /// final frame to frame 0. At most one full loop per call.
    fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.state.is_playing() {
            return false;
        }

        self.elapsed += elapsed;
        let mut changed = false;

        for _ in 0..self.source.frame_count() {
            let delay = self.source.frame_delay();
            if self.elapsed < delay {
                break;
            }
            self.elapsed -= delay;

            if is_final_frame(self.source.current_frame(), self.source.frame_count()) {
                self.source.jump_to_frame(0);
                tracing::debug!("animation looped");
            } else {
                self.source.advance_frame();
            }
            changed = true;
        }

        // Drop whatever backlog one loop could not absorb (window was hidden).
        if self.elapsed >= self.source.frame_delay() {
            self.elapsed = Duration::ZERO;
        }

        changed
    }
}

/// A video player that rewinds itself near the end of the stream.
pub struct VideoPlayback {
    player: Box<dyn VideoPlayer>,
    frame: Option<RawImage>,
    state: PlaybackState,
    loop_tolerance: Duration,
}

impl VideoPlayback {
    fn tick(&mut self) -> Result<bool, VideoError> {
        if !self.state.is_playing() {
            return Ok(false);
        }

        let mut changed = false;
        if let Some(frame) = self.player.poll_frame()? {
            self.frame = Some(frame);
            changed = true;
        }

        let position = self.player.position();
        let ended = self.player.at_end()
            || self
                .player
                .duration()
                .is_some_and(|duration| is_near_end(position, duration, self.loop_tolerance));

        if ended {
            match self.player.set_position(Duration::ZERO) {
                Ok(()) => tracing::debug!(?position, "video looped"),
                Err(err) => {
                    tracing::warn!(%err, "cannot rewind video, stopping playback");
                    self.stop();
                }
            }
        }

        Ok(changed)
    }

    fn stop(&mut self) {
        self.player.stop();
        self.state = PlaybackState::Stopped;
    }
}

impl Drop for VideoPlayback {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// MediaSession
// =============================================================================

struct Active {
    path: PathBuf,
    kind: MediaKind,
    native: Dimensions,
    target: Dimensions,
    display: DisplaySession,
}

/// Owns at most one [`DisplaySession`] and the container it is fitted to.
pub struct MediaSession {
    decoders: Decoders,
    active: Option<Active>,
    container: Dimensions,
    loop_tolerance: Duration,
    session_id: u64,
}

impl MediaSession {
    #[must_use]
    pub fn new(decoders: Decoders, loop_tolerance: Duration) -> Self {
        Self {
            decoders,
            active: None,
            container: Dimensions::default(),
            loop_tolerance,
            session_id: 0,
        }
    }

    /// Replaces the current session with `entry` and starts its playback.
    ///
    /// # Errors
    ///
    /// - [`Error::MediaLoadFailed`] if a decoder rejects the file
    /// - [`Error::ProbeFailed`] if a video's resolution cannot be probed
    ///
    /// The previous session is torn down in either case.
    pub fn show(&mut self, entry: &MediaEntry) -> Result<Shown> {
        self.teardown();
        self.session_id = self.session_id.wrapping_add(1);

        let path = entry.path();
        let (kind, native, display) = match entry.kind() {
            MediaKind::Static => self.load_still(path)?,
            MediaKind::Animated => self.load_sequence(path)?,
            MediaKind::Video => self.load_video(path)?,
        };
        let target = fit_within(native, self.container);

        tracing::debug!(
            path = %path.display(),
            ?kind,
            %native,
            %target,
            "media shown"
        );

        self.active = Some(Active {
            path: path.to_path_buf(),
            kind,
            native,
            target,
            display,
        });

        Ok(Shown {
            kind,
            native,
            target,
            token: PlaybackToken(self.session_id),
        })
    }

    /// Stops playback and releases the current session, if any.
    pub fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!(path = %active.path.display(), "session torn down");
        }
    }

    /// Advances playback by `elapsed`.
    ///
    /// Returns true if the visible frame changed. Ticks whose token does not
    /// match the current session are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MediaLoadFailed`] if the video decoder failed. The
    /// session is torn down before returning.
    pub fn tick(&mut self, token: PlaybackToken, elapsed: Duration) -> Result<bool> {
        if !self.is_live(token) {
            tracing::trace!(?token, "stale tick ignored");
            return Ok(false);
        }

        let Some(active) = self.active.as_mut() else {
            return Ok(false);
        };
        let result = match &mut active.display {
            DisplaySession::Animated(animation) => Ok(animation.tick(elapsed)),
            DisplaySession::Video(video) => video.tick(),
            DisplaySession::Static(_) => Ok(false),
        };

        match result {
            Ok(changed) => Ok(changed),
            Err(err) => {
                let err = load_failed(&active.path, &err);
                tracing::warn!(%err, "video decoder failed");
                self.teardown();
                Err(err)
            }
        }
    }

    /// True if `token` belongs to the session on screen.
    #[must_use]
    pub fn is_live(&self, token: PlaybackToken) -> bool {
        self.token() == Some(token)
    }

    /// Refits the current media to a new container without reloading it.
    ///
    /// Returns the new target size, or `None` when nothing is shown.
    pub fn resize(&mut self, container: Dimensions) -> Option<Dimensions> {
        self.container = container;
        let active = self.active.as_mut()?;
        active.target = fit_within(active.native, container);
        Some(active.target)
    }

    /// Token of the current session, if one is live.
    #[must_use]
    pub fn token(&self) -> Option<PlaybackToken> {
        self.active.as_ref().map(|_| PlaybackToken(self.session_id))
    }

    /// Pixels to draw right now.
    #[must_use]
    pub fn frame(&self) -> Option<&RawImage> {
        self.active.as_ref().and_then(|active| active.display.frame())
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.active
            .as_ref()
            .map_or(PlaybackState::Stopped, |active| active.display.state())
    }

    #[must_use]
    pub fn kind(&self) -> Option<MediaKind> {
        self.active.as_ref().map(|active| active.kind)
    }

    #[must_use]
    pub fn native(&self) -> Option<Dimensions> {
        self.active.as_ref().map(|active| active.native)
    }

    #[must_use]
    pub fn target(&self) -> Option<Dimensions> {
        self.active.as_ref().map(|active| active.target)
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.active.as_ref().map(|active| active.path.as_path())
    }

    #[must_use]
    pub fn container(&self) -> Dimensions {
        self.container
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    fn load_still(&self, path: &Path) -> Result<(MediaKind, Dimensions, DisplaySession)> {
        let image = self
            .decoders
            .still
            .decode(path)
            .map_err(|err| load_failed(path, &err))?;
        Ok((
            MediaKind::Static,
            image.dimensions(),
            DisplaySession::Static(image),
        ))
    }

    /// Opens an animated-capable file and keeps it animated only if it has
    /// more than one frame.
    fn load_sequence(&self, path: &Path) -> Result<(MediaKind, Dimensions, DisplaySession)> {
        let source = self
            .decoders
            .sequence
            .open(path)
            .map_err(|err| load_failed(path, &err))?;

        if source.frame_count() > 1 {
            let native = source.frame_rect();
            Ok((
                MediaKind::Animated,
                native,
                DisplaySession::Animated(AnimatedPlayback::new(source)),
            ))
        } else {
            drop(source);
            self.load_still(path)
        }
    }

    fn load_video(&self, path: &Path) -> Result<(MediaKind, Dimensions, DisplaySession)> {
        let native = self
            .decoders
            .probe
            .probe(path)
            .map_err(|err| Error::ProbeFailed(err.to_string()))?;

        let player = self
            .decoders
            .video
            .load(path, native)
            .map_err(|err| load_failed(path, &err))?;

        let mut playback = VideoPlayback {
            player,
            frame: None,
            state: PlaybackState::Stopped,
            loop_tolerance: self.loop_tolerance,
        };
        playback
            .player
            .play()
            .map_err(|err| load_failed(path, &err))?;
        playback.state = PlaybackState::Playing;

        Ok((MediaKind::Video, native, DisplaySession::Video(playback)))
    }
}

fn load_failed(path: &Path, err: &impl std::fmt::Display) -> Error {
    Error::MediaLoadFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
