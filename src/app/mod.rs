// SPDX-License-Identifier: MPL-2.0
//! Application root state and the Iced event loop.
//!
//! The `App` struct owns the [`ViewerController`] and translates window
//! messages into controller intents. Everything that decides what is shown
//! lives in the controller; this layer only draws its [`ViewState`] and runs
//! the side effects Iced has to run (dialogs, window mode, timers).
//!
//! [`ViewState`]: crate::application::ViewState

mod message;
mod subscription;
mod update;
mod view;

pub use message::Message;

use crate::application::ViewerController;
use crate::config::{
    Config, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_DEFAULT_HEIGHT, WINDOW_DEFAULT_WIDTH,
};
use crate::infrastructure;
use crate::media::FormatRegistry;
use iced::widget::image;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    controller: ViewerController,
    config: Config,
    window_id: Option<window::Id>,
    /// Pixel buffer of the frame on screen and the handle uploaded for it.
    frame: Option<(Arc<Vec<u8>>, image::Handle)>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("directory", &self.controller.navigator().directory())
            .field("entries", &self.controller.navigator().len())
            .field("fullscreen", &self.controller.is_fullscreen())
            .finish_non_exhaustive()
    }
}

/// Builds the window settings
#[must_use]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        // Close requests go through `App::update` so playback is torn down first.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(config: Config, start_path: PathBuf) -> iced::Result {
    use std::cell::RefCell;

    // Wrap the boot state in RefCell<Option<_>> to satisfy the Fn bound
    // while only consuming it once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some((config, start_path)));
    let boot = move || {
        let (config, start_path) = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(config, start_path)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the controller from `config` and opens `start_path`.
    fn new(config: Config, start_path: PathBuf) -> (Self, Task<Message>) {
        let registry = FormatRegistry::from_host(&config.video_extensions);
        tracing::info!(
            extensions = registry.supported_extensions().len(),
            sort = %config.sort_key,
            "starting viewer"
        );

        let controller =
            ViewerController::new(&config, registry, infrastructure::decoders(&config));

        let mut app = Self {
            controller,
            config,
            window_id: None,
            frame: None,
        };

        let task = app.update(Message::Open(start_path));
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = "IcedPeek";
        match self.controller.navigator().current() {
            Some(entry) => format!("{} - {app_name}", entry.file_name()),
            None => app_name.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let playback_sub = subscription::create_playback_subscription(
            self.controller.playback_token(),
            self.config.tick_interval,
        );

        Subscription::batch([event_sub, playback_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            controller: &mut self.controller,
            window_id: &mut self.window_id,
        };

        let task = update::handle_message(&mut ctx, message);
        self.sync_frame();
        task
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            state: self.controller.view_state(),
            frame: self.frame.as_ref().map(|(_, handle)| handle),
        })
    }

    /// Re-uploads the frame only when the controller shows new pixels.
    fn sync_frame(&mut self) {
        let pixels = self
            .controller
            .session()
            .frame()
            .map(|frame| (frame.rgba_bytes_arc(), frame.width(), frame.height()));

        self.frame = match (pixels, self.frame.take()) {
            (Some((bytes, _, _)), Some((cached, handle))) if Arc::ptr_eq(&bytes, &cached) => {
                Some((cached, handle))
            }
            (Some((bytes, width, height)), _) => {
                let handle = image::Handle::from_rgba(width, height, bytes.as_ref().clone());
                Some((bytes, handle))
            }
            (None, _) => None,
        };
    }
}
