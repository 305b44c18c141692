// SPDX-License-Identifier: MPL-2.0
//! Media format handling.
//!
//! The [`FormatRegistry`] decides which files the viewer lists and which
//! decoder path each one takes.

pub mod registry;

pub use registry::FormatRegistry;
