// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layout, top to bottom: the action bar, the media surface, the caption
//! line and the navigation buttons. Fullscreen keeps only the media surface.

use super::Message;
use crate::application::ViewState;
use crate::domain::media::SortKey;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::{Handle, Image};
use iced::widget::{button, pick_list, Column, Container, Row, Text};
use iced::{Alignment, Element, Length};

const SPACING: f32 = 8.0;
const PADDING: u16 = 8;
const CAPTION_SIZE: f32 = 14.0;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub state: ViewState,
    /// Uploaded handle for `state.frame`.
    pub frame: Option<&'a Handle>,
}

/// Renders the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let surface = media_surface(&ctx);

    if ctx.state.fullscreen {
        return surface;
    }

    Column::new()
        .push(top_bar(&ctx.state))
        .push(surface)
        .push(caption_bar(&ctx.state))
        .push(navigation_bar(&ctx.state))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn top_bar<'a>(state: &ViewState) -> Element<'a, Message> {
    let sort_picker = pick_list(SortKey::ALL, Some(state.sort_key), Message::SortSelected)
        .padding(PADDING);

    Row::new()
        .push(button(Text::new("Open File…")).on_press(Message::OpenFileDialog))
        .push(button(Text::new("Open Directory…")).on_press(Message::OpenDirectoryDialog))
        .push(Text::new("Sort by"))
        .push(sort_picker)
        .push(
            button(Text::new("Refresh"))
                .on_press_maybe(state.affordances.refresh.then_some(Message::Refresh)),
        )
        .push(button(Text::new("Fullscreen")).on_press(Message::ToggleFullscreen))
        .spacing(SPACING)
        .padding(PADDING)
        .align_y(Alignment::Center)
        .into()
}

fn media_surface<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match (ctx.frame, ctx.state.target) {
        (Some(handle), Some(target)) if !target.is_empty() => Image::new(handle.clone())
            .width(Length::Fixed(target.width as f32))
            .height(Length::Fixed(target.height as f32))
            .into(),
        _ => Text::new("").into(),
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn caption_bar<'a>(state: &ViewState) -> Element<'a, Message> {
    Row::new()
        .push(
            Container::new(Text::new(state.caption.clone()).size(CAPTION_SIZE))
                .width(Length::Fill),
        )
        .push(Text::new(state.dimensions_text.clone()).size(CAPTION_SIZE))
        .push(Text::new(state.position_text.clone()).size(CAPTION_SIZE))
        .spacing(SPACING * 2.0)
        .padding(PADDING)
        .align_y(Alignment::Center)
        .into()
}

fn navigation_bar<'a>(state: &ViewState) -> Element<'a, Message> {
    let affordances = state.affordances;
    let nav_button = |label: &'static str, enabled: bool, message: Message| {
        button(Text::new(label)).on_press_maybe(enabled.then_some(message))
    };

    let buttons = Row::new()
        .push(nav_button("<<", affordances.first, Message::First))
        .push(nav_button("Previous", affordances.previous, Message::Previous))
        .push(nav_button("Delete", affordances.delete, Message::Delete))
        .push(nav_button("Next", affordances.next, Message::Next))
        .push(nav_button(">>", affordances.last, Message::Last))
        .spacing(SPACING);

    Container::new(buttons)
        .width(Length::Fill)
        .padding(PADDING)
        .align_x(Horizontal::Center)
        .into()
}
