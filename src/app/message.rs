// SPDX-License-Identifier: MPL-2.0
//! Top-level messages for the application.

use crate::application::PlaybackToken;
use crate::domain::media::SortKey;
use iced::{window, Size};
use std::path::PathBuf;
use std::time::Instant;

/// Messages consumed by `App::update`. Most map one-to-one onto a controller
/// intent; the rest drive dialogs and the window.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open a file or directory given on the command line or picked in a dialog.
    Open(PathBuf),
    /// Show the open-file dialog.
    OpenFileDialog,
    /// Show the open-directory dialog.
    OpenDirectoryDialog,
    /// Result from either open dialog; `None` when cancelled.
    DialogPicked(Option<PathBuf>),
    First,
    Previous,
    Next,
    Last,
    Delete,
    Refresh,
    SortSelected(SortKey),
    ToggleFullscreen,
    /// Leave fullscreen; ignored in windowed mode.
    ExitFullscreen,
    /// Playback clock tick tagged with the session it was scheduled for.
    Tick(PlaybackToken, Instant),
    WindowResized { window: window::Id, size: Size },
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(window::Id),
}
