// SPDX-License-Identifier: MPL-2.0
//! Runtime configuration.
//!
//! Nothing is read from or written to disk. A [`Config`] is assembled once at
//! startup and handed to the controller; it lives as long as the window.
//!
//! # Resolution Order
//!
//! 1. **CLI arguments** (`--sort`, `--ffprobe`)
//! 2. **Environment variables** (`ICED_PEEK_FFPROBE`, `ICED_PEEK_VIDEO_EXTENSIONS`)
//! 3. **Compiled defaults** from [`defaults`]
//!
//! # Examples
//!
//! ```
//! use iced_peek::config::{Config, SortKey};
//!
//! let config = Config::from_lookup(|name| match name {
//!     "ICED_PEEK_VIDEO_EXTENSIONS" => Some("mp4, MKV".to_string()),
//!     _ => None,
//! });
//! assert_eq!(config.video_extensions, vec!["mp4", "mkv"]);
//! assert_eq!(config.sort_key, SortKey::ModifiedTime);
//! ```

pub mod defaults;

pub use defaults::*;

pub use crate::domain::media::SortKey;

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the resolution probe program.
pub const ENV_PROBE_PROGRAM: &str = "ICED_PEEK_FFPROBE";

/// Environment variable overriding the video extension allowlist
/// (comma-separated).
pub const ENV_VIDEO_EXTENSIONS: &str = "ICED_PEEK_VIDEO_EXTENSIONS";

// =============================================================================
// Config
// =============================================================================

/// Settings that stay fixed for the lifetime of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sort key selected at startup.
    pub sort_key: SortKey,
    /// Lower-case video container extensions, without dots.
    pub video_extensions: Vec<String>,
    /// Program printing "width,height" for a video.
    pub probe_program: String,
    /// Interval between playback ticks.
    pub tick_interval: Duration,
    /// End-of-stream window in which a video rewinds.
    pub loop_tolerance: Duration,
    /// Estimated caption character width, for elision.
    pub caption_char_width: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_key: SortKey::default(),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            probe_program: DEFAULT_PROBE_PROGRAM.to_string(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            loop_tolerance: Duration::from_millis(DEFAULT_LOOP_TOLERANCE_MS),
            caption_char_width: CAPTION_CHAR_WIDTH,
        }
    }
}

impl Config {
    /// Builds a config from defaults and the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from defaults and an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(program) = lookup(ENV_PROBE_PROGRAM).filter(|p| !p.trim().is_empty()) {
            config.probe_program = program;
        }
        if let Some(list) = lookup(ENV_VIDEO_EXTENSIONS) {
            let extensions = parse_extension_list(&list);
            if !extensions.is_empty() {
                config.video_extensions = extensions;
            }
        }

        config
    }

    /// Applies command-line overrides on top of this config.
    pub fn apply(&mut self, flags: &Flags) {
        if let Some(sort_key) = flags.sort_key {
            self.sort_key = sort_key;
        }
        if let Some(program) = &flags.probe_program {
            self.probe_program.clone_from(program);
        }
    }
}

/// Splits a comma-separated extension list, normalising case and dots.
#[must_use]
pub fn parse_extension_list(list: &str) -> Vec<String> {
    let mut extensions: Vec<String> = list
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect();
    extensions.dedup();
    extensions
}

// =============================================================================
// Command Line
// =============================================================================

pub const USAGE: &str = "\
Usage: iced_peek [OPTIONS] [PATH]

PATH may be a directory or a file; defaults to the current directory.

Options:
  --sort KEY       name | modified | type (default: modified)
  --ffprobe PATH   resolution probe program (default: ffprobe)
  -h, --help       print this help
";

/// Values taken from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flags {
    pub help: bool,
    pub start_path: Option<PathBuf>,
    pub sort_key: Option<SortKey>,
    pub probe_program: Option<String>,
}

impl Flags {
    /// Parses flags from the process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on unknown sort keys or stray arguments.
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let flags = Flags {
            help: args.contains(["-h", "--help"]),
            sort_key: args.opt_value_from_str("--sort")?,
            probe_program: args.opt_value_from_str("--ffprobe")?,
            start_path: None,
        };

        let mut rest = args.finish().into_iter();
        let start_path = rest.next().map(PathBuf::from);
        if let Some(extra) = rest.next() {
            return Err(Error::Config(format!(
                "unexpected argument: {}",
                extra.to_string_lossy()
            )));
        }

        Ok(Flags { start_path, ..flags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(list: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    #[test]
    fn sort_key_defaults_to_modified_time() {
        assert_eq!(SortKey::default(), SortKey::ModifiedTime);
        assert_eq!(Config::default().sort_key, SortKey::ModifiedTime);
    }

    #[test]
    fn environment_overrides_probe_and_extensions() {
        let config = Config::from_lookup(|name| match name {
            ENV_PROBE_PROGRAM => Some("/opt/ff/ffprobe".into()),
            ENV_VIDEO_EXTENSIONS => Some(".MP4,webm,,".into()),
            _ => None,
        });
        assert_eq!(config.probe_program, "/opt/ff/ffprobe");
        assert_eq!(config.video_extensions, vec!["mp4", "webm"]);
    }

    #[test]
    fn blank_probe_override_keeps_default() {
        let config = Config::from_lookup(|name| (name == ENV_PROBE_PROGRAM).then(|| "   ".into()));
        assert_eq!(config.probe_program, DEFAULT_PROBE_PROGRAM);
    }

    #[test]
    fn empty_extension_override_keeps_defaults() {
        let config = Config::from_lookup(|name| (name == ENV_VIDEO_EXTENSIONS).then(String::new));
        assert_eq!(config.video_extensions.len(), DEFAULT_VIDEO_EXTENSIONS.len());
    }

    #[test]
    fn flags_parse_options_and_path() {
        let flags = Flags::parse(args(&["--sort", "name", "--ffprobe", "fp", "/pics"]))
            .expect("flags should parse");
        assert_eq!(flags.sort_key, Some(SortKey::Name));
        assert_eq!(flags.probe_program.as_deref(), Some("fp"));
        assert_eq!(flags.start_path, Some(PathBuf::from("/pics")));

        let mut config = Config::default();
        config.apply(&flags);
        assert_eq!(config.sort_key, SortKey::Name);
        assert_eq!(config.probe_program, "fp");
    }

    #[test]
    fn flags_reject_bad_sort_key() {
        let err = Flags::parse(args(&["--sort", "size"])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn flags_reject_second_path() {
        let err = Flags::parse(args(&["a", "b"])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains('b')));
    }

    #[test]
    fn no_arguments_means_no_start_path() {
        let flags = Flags::parse(args(&[])).expect("flags should parse");
        assert_eq!(flags, Flags::default());
    }
}
