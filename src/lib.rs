// SPDX-License-Identifier: MPL-2.0
//! `iced_peek` is a minimal image, animation and video viewer built with the
//! Iced GUI framework.
//!
//! It shows the supported media of one directory, one file at a time, in a
//! chosen sort order. Animations loop on their own clock, and videos loop
//! through the FFmpeg libraries. The viewer can also delete the
//! current file and re-read the directory.
//!
//! The GUI in [`app`] is a thin shell around [`application::ViewerController`],
//! which can be driven without a window.

#![doc(html_root_url = "https://docs.rs/iced_peek/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod media;
pub mod sorting;
