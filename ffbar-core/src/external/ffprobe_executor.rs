//! FFprobe integration for media analysis
//!
//! Provides the [`MediaProber`] seam used to read the frame count of the input
//! and the properties of the finished output, with an implementation backed
//! by the `ffprobe` crate.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::media::MediaProperties;
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Trait for reading media properties from a file.
pub trait MediaProber {
    fn probe(&self, path: &Path) -> CoreResult<MediaProperties>;

    /// Checks that the prober can be executed.
    fn check_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// [`MediaProber`] running the `ffprobe` binary through the `ffprobe` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for CrateFfprobeExecutor {
    fn probe(&self, path: &Path) -> CoreResult<MediaProperties> {
        log::debug!("Running ffprobe (via crate) on: {}", path.display());
        let metadata = ffprobe(path).map_err(|err| {
            log::error!("ffprobe failed on {}: {:?}", path.display(), err);
            map_ffprobe_error(err, &path.display().to_string())
        })?;

        let json = serde_json::to_value(&metadata).map_err(|e| {
            CoreError::JsonParseError(format!("ffprobe output for {}: {e}", path.display()))
        })?;
        let mut properties = MediaProperties::from_ffprobe_json(&json, &path.display().to_string())?;

        if properties.size.is_none() {
            properties.size = std::fs::metadata(path).ok().map(|m| m.len());
        }
        Ok(properties)
    }

    fn check_available(&self) -> CoreResult<()> {
        super::check_dependency("ffprobe")
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::JsonParseError(format!(
            "ffprobe output deserialization for {context}: {err}"
        )),
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error for {context}: {err:?}")),
    }
}
