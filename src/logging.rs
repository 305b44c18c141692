// SPDX-License-Identifier: MPL-2.0
//! Logging setup.
//!
//! Installs a `tracing` subscriber filtered by `ICED_PEEK_LOG`, then
//! `RUST_LOG`, then [`DEFAULT_FILTER`].

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "ICED_PEEK_LOG";

/// Filter used when no variable is set: info for this crate, warn elsewhere.
pub const DEFAULT_FILTER: &str = "iced_peek=info,warn";

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = build_filter(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Picks the first parsable directive string, falling back to the default.
fn build_filter(own: Option<String>, rust_log: Option<String>) -> EnvFilter {
    [own, rust_log]
        .into_iter()
        .flatten()
        .filter(|directives| !directives.trim().is_empty())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_when_nothing_set() {
        let filter = build_filter(None, None);
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
    }

    #[test]
    fn own_variable_wins_over_rust_log() {
        let filter = build_filter(Some("iced_peek=debug".into()), Some("trace".into()));
        assert_eq!(filter.to_string(), "iced_peek=debug");
    }

    #[test]
    fn blank_own_variable_falls_through() {
        let filter = build_filter(Some("  ".into()), Some("error".into()));
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init();
    }
}
