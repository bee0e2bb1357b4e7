//! Summary of the finished output file.

use crate::media::MediaProperties;
use crate::utils::{format_bitrate_mbps, human_readable_size, human_readable_time};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Properties of the encoded file as shown after the progress bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<f64>,
    pub duration_secs: Option<f64>,
    pub bit_rate: Option<u64>,
    pub size_bytes: Option<u64>,
}

impl OutputSummary {
    #[must_use]
    pub fn from_properties(path: &Path, properties: &MediaProperties) -> Self {
        Self {
            path: path.to_path_buf(),
            width: properties.width,
            height: properties.height,
            frame_rate: properties.frame_rate,
            duration_secs: properties.duration_secs,
            bit_rate: properties.bit_rate,
            size_bytes: properties.size,
        }
    }

    /// Renders the multi-line block printed after the encode.
    ///
    /// Values the prober could not provide are shown as `N/A`.
    #[must_use]
    pub fn format_summary(&self) -> String {
        let resolution = match (self.width, self.height) {
            (Some(w), Some(h)) => format!("{w}x{h}"),
            _ => NOT_AVAILABLE.to_string(),
        };
        let frame_rate = self
            .frame_rate
            .map_or_else(|| NOT_AVAILABLE.to_string(), |fps| format!("{fps:.2} fps"));
        let duration = self.duration_secs.map_or_else(
            || NOT_AVAILABLE.to_string(),
            |secs| human_readable_time(secs.round() as i64),
        );
        let bitrate = self
            .bit_rate
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_bitrate_mbps);
        let size = self
            .size_bytes
            .map_or_else(|| NOT_AVAILABLE.to_string(), human_readable_size);

        format!(
            "==> Output file: {}\n\
             - Resolution: {resolution}\n\
             - Frame rate: {frame_rate}\n\
             - Duration: {duration}\n\
             - Bitrate: {bitrate}\n\
             - Size: {size}",
            self.path.display()
        )
    }
}

const NOT_AVAILABLE: &str = "N/A";

impl fmt::Display for OutputSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_summary())
    }
}
