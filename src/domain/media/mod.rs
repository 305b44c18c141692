// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains core media types that are independent of any
//! presentation or infrastructure concerns.

pub mod scaling;
pub mod sort_key;
pub mod types;

// Re-export commonly used types
pub use scaling::fit_within;
pub use sort_key::SortKey;
pub use types::{Dimensions, MediaEntry, MediaKind, RawImage};
