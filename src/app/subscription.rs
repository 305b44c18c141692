// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window events feed resize and close handling, and a few keys mirror the
//! buttons. The playback clock only runs while the controller reports a
//! playing session.

use super::Message;
use crate::application::PlaybackToken;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Routes window resize and close requests and navigation keys.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Window(
            window::Event::Resized(size) | window::Event::Opened { size, .. },
        ) => Some(Message::WindowResized {
            window: window_id,
            size,
        }),
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(named),
            ..
        }) if status == event::Status::Ignored => key_message(named),
        _ => None,
    })
}

fn key_message(key: Named) -> Option<Message> {
    match key {
        Named::ArrowRight => Some(Message::Next),
        Named::ArrowLeft => Some(Message::Previous),
        Named::Home => Some(Message::First),
        Named::End => Some(Message::Last),
        Named::F5 => Some(Message::Refresh),
        Named::F11 => Some(Message::ToggleFullscreen),
        Named::Escape => Some(Message::ExitFullscreen),
        _ => None,
    }
}

/// Creates the playback clock for the session identified by `token`.
///
/// The token is part of the subscription identity, so switching media
/// restarts the clock and every tick names the session it belongs to.
pub fn create_playback_subscription(
    token: Option<PlaybackToken>,
    interval: Duration,
) -> Subscription<Message> {
    match token {
        Some(token) => time::every(interval)
            .with(token)
            .map(|(token, now)| Message::Tick(token, now)),
        None => Subscription::none(),
    }
}
