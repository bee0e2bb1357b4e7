//! Media properties reported by the prober.
//!
//! The prober output is handled as a JSON document shaped like
//! `ffprobe -print_format json -show_format -show_streams`, so the conversion
//! can be tested without running ffprobe. Numeric fields are accepted either
//! as JSON numbers or as the strings ffprobe usually emits.

use crate::error::{CoreError, CoreResult};
use crate::utils::parse_frame_rate;
use serde::Serialize;
use serde_json::Value;

/// Properties of the first video stream of a media file (or of the first
/// stream when there is no video stream).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MediaProperties {
    /// Frame count used as the progress total. 0 when it cannot be determined.
    pub total_frames: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Frames per second, from `r_frame_rate` or `avg_frame_rate`.
    pub frame_rate: Option<f64>,
    pub duration_secs: Option<f64>,
    /// Bits per second of the stream, or of the container as a fallback.
    pub bit_rate: Option<u64>,
    /// File size in bytes.
    pub size: Option<u64>,
}

impl MediaProperties {
    /// Builds the properties from a prober JSON document.
    ///
    /// `source` is only used in messages.
    pub fn from_ffprobe_json(json: &Value, source: &str) -> CoreResult<Self> {
        let streams = json
            .get("streams")
            .and_then(Value::as_array)
            .filter(|streams| !streams.is_empty())
            .ok_or_else(|| {
                CoreError::MediaPropertiesUnavailable(format!("no streams found in {source}"))
            })?;

        let stream = streams
            .iter()
            .find(|s| s.get("codec_type").and_then(Value::as_str) == Some("video"))
            .unwrap_or(&streams[0]);
        let format = json.get("format");

        let frame_rate = ["r_frame_rate", "avg_frame_rate"]
            .iter()
            .filter_map(|key| stream.get(*key).and_then(Value::as_str))
            .filter_map(parse_frame_rate)
            .find(|rate| *rate > 0.0);

        let duration_secs = field_f64(stream, "duration")
            .or_else(|| format.and_then(|f| field_f64(f, "duration")));

        let total_frames = match field_u64(stream, "nb_frames") {
            Some(frames) => frames,
            None => match (duration_secs, frame_rate) {
                (Some(duration), Some(rate)) => {
                    let estimated = (duration * rate).round() as u64;
                    log::debug!(
                        "No frame count for {source}, estimated {estimated} frames from {duration:.3}s at {rate:.3} fps"
                    );
                    estimated
                }
                _ => {
                    log::warn!(
                        "Could not determine the frame count of {source}; progress percentage will stay at 0"
                    );
                    0
                }
            },
        };

        let bit_rate =
            field_u64(stream, "bit_rate").or_else(|| format.and_then(|f| field_u64(f, "bit_rate")));
        let size = format.and_then(|f| field_u64(f, "size"));

        Ok(Self {
            total_frames,
            width: field_u64(stream, "width").and_then(|w| u32::try_from(w).ok()),
            height: field_u64(stream, "height").and_then(|h| u32::try_from(h).ok()),
            frame_rate,
            duration_secs,
            bit_rate,
            size,
        })
    }
}

fn field_f64(object: &Value, key: &str) -> Option<f64> {
    match object.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field_u64(object: &Value, key: &str) -> Option<u64> {
    match object.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
