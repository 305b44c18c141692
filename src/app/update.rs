// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.

use super::Message;
use crate::application::{Intent, ViewerController};
use crate::config::CHROME_HEIGHT;
use crate::domain::media::Dimensions;
use iced::{window, Size, Task};
use std::path::PathBuf;

/// Mutable application state borrowed for the duration of one update.
pub struct UpdateContext<'a> {
    pub controller: &'a mut ViewerController,
    pub window_id: &'a mut Option<window::Id>,
}

/// Dispatches one message.
pub fn handle_message(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Open(path) | Message::DialogPicked(Some(path)) => {
            ctx.controller.dispatch(Intent::Open(path));
            Task::none()
        }
        // User cancelled the dialog
        Message::DialogPicked(None) => Task::none(),
        Message::OpenFileDialog => handle_open_file_dialog(ctx.controller),
        Message::OpenDirectoryDialog => handle_open_directory_dialog(ctx.controller),
        Message::First => dispatch(ctx, Intent::First),
        Message::Previous => dispatch(ctx, Intent::Previous),
        Message::Next => dispatch(ctx, Intent::Next),
        Message::Last => dispatch(ctx, Intent::Last),
        Message::Delete => dispatch(ctx, Intent::Delete),
        Message::Refresh => dispatch(ctx, Intent::Refresh),
        Message::SortSelected(key) => dispatch(ctx, Intent::SortBy(key)),
        Message::Tick(token, now) => dispatch(ctx, Intent::Tick { token, now }),
        Message::ToggleFullscreen => handle_toggle_fullscreen(ctx),
        Message::ExitFullscreen if ctx.controller.is_fullscreen() => {
            handle_toggle_fullscreen(ctx)
        }
        Message::ExitFullscreen => Task::none(),
        Message::WindowResized { window, size } => {
            *ctx.window_id = Some(window);
            let container = media_area(size, ctx.controller.is_fullscreen());
            dispatch(ctx, Intent::Resize(container))
        }
        Message::WindowCloseRequested(window) => {
            ctx.controller.shutdown();
            window::close(window)
        }
    }
}

fn dispatch(ctx: &mut UpdateContext<'_>, intent: Intent) -> Task<Message> {
    ctx.controller.dispatch(intent);
    Task::none()
}

/// Space left for media once the bars are drawn; the whole window in fullscreen.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn media_area(size: Size, fullscreen: bool) -> Dimensions {
    let chrome = if fullscreen { 0.0 } else { CHROME_HEIGHT as f32 };
    Dimensions::new(
        size.width.max(0.0) as u32,
        (size.height - chrome).max(0.0) as u32,
    )
}

fn handle_toggle_fullscreen(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(window_id) = *ctx.window_id else {
        return Task::none();
    };

    ctx.controller.dispatch(Intent::ToggleFullscreen);
    let mode = if ctx.controller.is_fullscreen() {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(window_id, mode)
}

/// Handles the open file dialog request.
fn handle_open_file_dialog(controller: &ViewerController) -> Task<Message> {
    let extensions: Vec<String> = controller
        .registry()
        .supported_extensions()
        .into_iter()
        .map(str::to_string)
        .collect();
    let start = last_directory(controller);

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new().add_filter("Media", &extensions);

            if let Some(dir) = start {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        },
        Message::DialogPicked,
    )
}

/// Handles the open directory dialog request.
fn handle_open_directory_dialog(controller: &ViewerController) -> Task<Message> {
    let start = last_directory(controller);

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new();

            if let Some(dir) = start {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.pick_folder().await.map(|h| h.path().to_path_buf())
        },
        Message::DialogPicked,
    )
}

fn last_directory(controller: &ViewerController) -> Option<PathBuf> {
    controller.navigator().directory().map(PathBuf::from)
}
