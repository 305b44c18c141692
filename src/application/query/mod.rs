// SPDX-License-Identifier: MPL-2.0
//! Query services.
//!
//! # Available Services
//!
//! - [`navigation`]: File collection and cursor (`MediaNavigator`)
//!
//! They are not domain entities because they manage external state (file lists).

pub mod navigation;

// Re-export main types
pub use navigation::{MediaNavigator, NavigationInfo, OpenOutcome};
