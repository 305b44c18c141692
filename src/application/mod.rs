// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for the decoder collaborators
//! - [`query`]: The file collection and its cursor
//! - [`session`]: The single live decoded resource
//! - [`controller`]: Intent dispatch binding the two together
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer drives the controller and renders its view state

pub mod controller;
pub mod port;
pub mod query;
pub mod session;

pub use controller::{Affordances, Intent, ViewState, ViewerController};
pub use session::{Decoders, MediaSession, PlaybackToken};
