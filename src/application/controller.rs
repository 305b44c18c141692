// SPDX-License-Identifier: MPL-2.0
//! Viewer controller: turns user intents into navigation and media changes.
//!
//! Every intent goes through [`ViewerController::dispatch`], runs to
//! completion, and leaves a state that [`ViewerController::view_state`]
//! renders. Failures never unwind state: the error replaces the caption and
//! the collection, cursor and (where possible) the media on screen stay as
//! they were.

use crate::application::query::{MediaNavigator, OpenOutcome};
use crate::application::session::{Decoders, MediaSession, PlaybackToken};
use crate::config::Config;
use crate::domain::media::{Dimensions, MediaKind, RawImage, SortKey};
use crate::error::Error;
use crate::media::FormatRegistry;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Something the user (or the playback clock) asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Open a directory, or a file within its directory.
    Open(PathBuf),
    Next,
    Previous,
    First,
    Last,
    /// Delete the current file from disk.
    Delete,
    SortBy(SortKey),
    /// Re-list the current directory.
    Refresh,
    /// The area available for media changed.
    Resize(Dimensions),
    /// Playback clock tick for the session identified by `token`.
    Tick { token: PlaybackToken, now: Instant },
    ToggleFullscreen,
}

/// Which controls are enabled.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affordances {
    pub first: bool,
    pub previous: bool,
    pub next: bool,
    pub last: bool,
    pub delete: bool,
    pub refresh: bool,
}

/// Everything the front-end needs to draw one frame of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// File name (elided to fit), or the last error message.
    pub caption: String,
    /// Native size as "WxH", empty when nothing is shown.
    pub dimensions_text: String,
    /// "k / n", empty when the collection is empty.
    pub position_text: String,
    pub affordances: Affordances,
    pub sort_key: SortKey,
    pub fullscreen: bool,
    pub error: Option<Error>,
    pub kind: Option<MediaKind>,
    /// Size to draw `frame` at.
    pub target: Option<Dimensions>,
    pub frame: Option<RawImage>,
    pub playing: bool,
}

pub struct ViewerController {
    navigator: MediaNavigator,
    session: MediaSession,
    fullscreen: bool,
    error: Option<Error>,
    last_tick: Option<Instant>,
    caption_char_width: f32,
}

impl ViewerController {
    #[must_use]
    pub fn new(config: &Config, registry: FormatRegistry, decoders: Decoders) -> Self {
        Self {
            navigator: MediaNavigator::new(registry, config.sort_key),
            session: MediaSession::new(decoders, config.loop_tolerance),
            fullscreen: false,
            error: None,
            last_tick: None,
            caption_char_width: config.caption_char_width,
        }
    }

    /// Applies one intent.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Open(path) => self.open(path),
            Intent::Next => self.navigate(MediaNavigator::next),
            Intent::Previous => self.navigate(MediaNavigator::previous),
            Intent::First => self.navigate(MediaNavigator::first),
            Intent::Last => self.navigate(MediaNavigator::last),
            Intent::Delete => self.delete(),
            Intent::SortBy(key) => {
                self.error = None;
                self.navigator.sort_by(key);
                self.sync_session();
            }
            Intent::Refresh => self.refresh(),
            Intent::Resize(container) => {
                self.session.resize(container);
            }
            Intent::Tick { token, now } => self.tick(token, now),
            Intent::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                tracing::debug!(fullscreen = self.fullscreen, "fullscreen toggled");
            }
        }
    }

    /// Snapshot of what the window should show.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        let info = self.navigator.navigation_info();
        let non_empty = info.total_count > 0;

        let caption = match (&self.error, self.navigator.current()) {
            (Some(err), _) => err.to_string(),
            (None, Some(entry)) => elide_middle(&entry.file_name(), self.caption_budget()),
            (None, None) if self.navigator.directory().is_some() => {
                "No supported media in this directory".to_string()
            }
            (None, None) => String::new(),
        };

        let position_text = info
            .current_index
            .map(|index| format!("{} / {}", index + 1, info.total_count))
            .unwrap_or_default();

        ViewState {
            caption,
            dimensions_text: self
                .session
                .native()
                .map(|native| native.to_string())
                .unwrap_or_default(),
            position_text,
            affordances: Affordances {
                first: info.has_previous,
                previous: info.has_previous,
                next: info.has_next,
                last: info.has_next,
                delete: non_empty,
                refresh: non_empty,
            },
            sort_key: self.navigator.sort_key(),
            fullscreen: self.fullscreen,
            error: self.error.clone(),
            kind: self.session.kind(),
            target: self.session.target(),
            frame: self.session.frame().cloned(),
            playing: self.session.playback_state().is_playing(),
        }
    }

    /// Token to tag ticks with, present only while something is playing.
    #[must_use]
    pub fn playback_token(&self) -> Option<PlaybackToken> {
        if self.session.playback_state().is_playing() {
            self.session.token()
        } else {
            None
        }
    }

    /// Releases the media on screen before the window goes away.
    pub fn shutdown(&mut self) {
        self.session.teardown();
        self.last_tick = None;
    }

    #[must_use]
    pub fn navigator(&self) -> &MediaNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn session(&self) -> &MediaSession {
        &self.session
    }

    #[must_use]
    pub fn registry(&self) -> &FormatRegistry {
        self.navigator.registry()
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    // =========================================================================
    // Intent handlers
    // =========================================================================

    fn open(&mut self, path: PathBuf) {
        self.error = None;
        match self.navigator.open(&path) {
            Ok(outcome) => {
                self.show_current();
                if let OpenOutcome::RequestedMissing(missing) = outcome {
                    self.report(Error::FileNotFound { path: missing });
                }
            }
            Err(err) => self.report(err),
        }
    }

    fn navigate(&mut self, step: fn(&mut MediaNavigator) -> bool) {
        self.error = None;
        if step(&mut self.navigator) {
            self.show_current();
        }
    }

    fn delete(&mut self) {
        self.error = None;
        if self.navigator.is_empty() {
            return;
        }

        // A running video keeps its file open.
        let held_open = self.session.kind() == Some(MediaKind::Video);
        if held_open {
            self.session.teardown();
        }

        match self.navigator.delete_current() {
            Ok(_) => self.show_current(),
            Err(err) => {
                if held_open {
                    self.show_current();
                }
                self.report(err);
            }
        }
    }

    fn refresh(&mut self) {
        self.error = None;
        match self.navigator.refresh() {
            Ok(()) => self.sync_session(),
            Err(err) => self.report(err),
        }
    }

    /// Only ticks of the live session move the clock it measures from.
    fn tick(&mut self, token: PlaybackToken, now: Instant) {
        if !self.session.is_live(token) {
            return;
        }

        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        if let Err(err) = self.session.tick(token, elapsed) {
            self.last_tick = None;
            self.report(err);
        }
    }

    /// Loads the current entry, or clears the screen if there is none.
    fn show_current(&mut self) {
        self.last_tick = None;

        let Some(entry) = self.navigator.current().cloned() else {
            self.session.teardown();
            return;
        };

        match self.session.show(&entry) {
            Ok(shown) => {
                self.navigator
                    .record_loaded(entry.path(), shown.kind, shown.native);
            }
            Err(err) => self.report(err),
        }
    }

    /// Reloads only if the current entry is not the one on screen.
    fn sync_session(&mut self) {
        let on_screen = match (self.navigator.current(), self.session.path()) {
            (Some(entry), Some(path)) => entry.path() == path,
            (None, None) => true,
            _ => false,
        };
        if !on_screen {
            self.show_current();
        }
    }

    fn report(&mut self, err: Error) {
        tracing::warn!(kind = err.kind(), %err, "operation failed");
        self.error = Some(err);
    }

    fn caption_budget(&self) -> usize {
        let width = self.session.container().width;
        if width == 0 || self.caption_char_width <= 0.0 {
            return usize::MAX;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let chars = (width as f32 / self.caption_char_width) as usize;
        chars.max(1)
    }
}

/// Shortens `name` to at most `max_chars` characters by replacing its middle
/// with "…", keeping the extension visible when there is room for it.
#[must_use]
pub fn elide_middle(name: &str, max_chars: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_chars {
        return name.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let ext_len = name
        .rfind('.')
        .filter(|&dot| dot > 0)
        .map_or(0, |dot| name[dot..].chars().count());

    // Need at least one stem character on each side of the ellipsis.
    if ext_len + 3 > max_chars {
        let mut out: String = chars[..max_chars - 1].iter().collect();
        out.push('…');
        return out;
    }

    let stem = &chars[..chars.len() - ext_len];
    let budget = max_chars - ext_len - 1;
    let head = budget.div_ceil(2);
    let tail = budget - head;

    let mut out: String = stem[..head].iter().collect();
    out.push('…');
    out.extend(&stem[stem.len() - tail..]);
    out.extend(&chars[chars.len() - ext_len..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(elide_middle("cat.png", 20), "cat.png");
        assert_eq!(elide_middle("cat.png", 7), "cat.png");
    }

    #[test]
    fn long_names_keep_extension() {
        let elided = elide_middle("a_very_long_file_name.png", 12);
        assert_eq!(elided, "a_ve…ame.png");
        assert_eq!(elided.chars().count(), 12);
    }

    #[test]
    fn tight_budget_truncates_end() {
        assert_eq!(elide_middle("holiday.jpeg", 5), "holi…");
        assert_eq!(elide_middle("holiday.jpeg", 0), "");
    }

    #[test]
    fn names_without_extension_elide_in_the_middle() {
        assert_eq!(elide_middle("abcdefghij", 5), "ab…ij");
        assert_eq!(elide_middle(".hiddenfile", 5), ".h…le");
    }

    #[test]
    fn multibyte_names_are_counted_in_chars() {
        let elided = elide_middle("日本語のとても長いファイル名.png", 10);
        assert_eq!(elided.chars().count(), 10);
        assert!(elided.ends_with(".png"));
    }
}
