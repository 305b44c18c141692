// SPDX-License-Identifier: MPL-2.0
//! `ffprobe` adapter implementing [`ResolutionProbe`].
//!
//! Runs the probe as a child process and parses its `width,height` output.

use crate::application::port::{ResolutionProbe, VideoError};
use crate::domain::media::Dimensions;
use std::path::Path;
use std::process::{Command, Stdio};

/// Out-of-process resolution probe.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    program: String,
}

impl FfprobeProbe {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, query: &[&str], path: &Path) -> Result<String, VideoError> {
        let output = Command::new(&self.program)
            .args(["-v", "error"])
            .args(query)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| VideoError::SpawnFailed {
                program: self.program.clone(),
                reason: err.to_string(),
            })?;

        if !output.status.success() {
            return Err(VideoError::ProcessFailed {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ResolutionProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> Result<Dimensions, VideoError> {
        let output = self.run(
            &[
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height",
                "-of",
                "csv=p=0:s=,",
            ],
            path,
        )?;
        let dimensions = parse_resolution(&output)?;
        tracing::debug!(path = %path.display(), %dimensions, "probed video resolution");
        Ok(dimensions)
    }
}

/// Parses `width,height` from the first non-empty line of `output`.
///
/// # Errors
///
/// Returns [`VideoError::InvalidOutput`] unless the line holds exactly two
/// positive integers.
pub fn parse_resolution(output: &str) -> Result<Dimensions, VideoError> {
    let invalid = || VideoError::InvalidOutput(output.trim().to_string());

    let line = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(invalid)?;

    let mut parts = line
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let width: u32 = parts.next().and_then(|w| w.parse().ok()).ok_or_else(invalid)?;
    let height: u32 = parts.next().and_then(|h| h.parse().ok()).ok_or_else(invalid)?;

    if parts.next().is_some() || width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok(Dimensions::new(width, height))
}
