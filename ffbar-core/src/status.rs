//! Parsing of ffmpeg's status stream.
//!
//! ffmpeg reports progress on stderr with lines such as
//!
//! ```text
//! frame=  240 fps= 48 q=28.0 size=    1024kB time=00:00:10.00 bitrate= 838.9kbits/s speed=1.99x
//! ```
//!
//! separated by `\r` so that a terminal overwrites them in place. Everything
//! else on stderr (banner, stream mapping, warnings) is unrelated diagnostics.
//! Only the `frame=` and `fps=` fields are extracted.

use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::read_until_any::read_until_any;
use std::io::{self, BufReader, Read};

/// ffmpeg ends log lines with `\n` and status updates with `\r`.
const LINE_SEPARATORS: [u8; 2] = [b'\r', b'\n'];

const FRAME_TOKEN: &str = "frame=";
const FPS_TOKEN: &str = "fps=";
const QUALITY_TOKEN: &str = "q=";

/// Raw, trimmed field values of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFields<'a> {
    pub frame: &'a str,
    pub fps: &'a str,
}

/// The most recent progress reported by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressRecord {
    pub frame_index: u64,
    pub frames_per_second: f64,
}

/// Parses one raw line of the status stream.
///
/// Returns `Ok(None)` when the line is not a status line, i.e. it does not
/// start with exactly `frame=`. A line that does start with `frame=` but is
/// missing `fps=` or a following `q=` is a [`CoreError::MalformedStatusLine`].
/// No numeric validation happens here.
pub fn parse_status_line(line: &str) -> CoreResult<Option<StatusFields<'_>>> {
    let Some(after_frame) = line.strip_prefix(FRAME_TOKEN) else {
        return Ok(None);
    };

    let malformed = || CoreError::MalformedStatusLine {
        line: line.to_string(),
    };

    let (frame, after_fps) = after_frame.split_once(FPS_TOKEN).ok_or_else(malformed)?;
    let (fps, _) = after_fps.split_once(QUALITY_TOKEN).ok_or_else(malformed)?;

    Ok(Some(StatusFields {
        frame: frame.trim(),
        fps: fps.trim(),
    }))
}

impl TryFrom<StatusFields<'_>> for ProgressRecord {
    type Error = CoreError;

    /// The frame value must be an integer; an fps value ffmpeg could not
    /// compute yet (e.g. `N/A`) is read as `0.0`.
    fn try_from(fields: StatusFields<'_>) -> CoreResult<Self> {
        let frame_index = fields
            .frame
            .parse::<u64>()
            .map_err(|_| CoreError::MalformedStatusLine {
                line: format!("frame={} fps={}", fields.frame, fields.fps),
            })?;
        let frames_per_second = fields.fps.parse::<f64>().unwrap_or(0.0);
        Ok(Self {
            frame_index,
            frames_per_second,
        })
    }
}

/// Parses a raw status line straight into a [`ProgressRecord`].
pub fn parse_progress_record(line: &str) -> CoreResult<Option<ProgressRecord>> {
    parse_status_line(line)?
        .map(ProgressRecord::try_from)
        .transpose()
}

/// Splits a byte stream into lines on either `\r` or `\n`.
///
/// Empty fragments (such as the gap in a `\r\n` pair) are skipped. Invalid
/// UTF-8 is replaced rather than rejected, since diagnostics may contain
/// file names in any encoding.
pub struct StatusStreamReader<R> {
    reader: BufReader<R>,
}

impl<R: Read> StatusStreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
        }
    }

    /// Reads the next non-empty line, or `None` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            let mut buf = Vec::new();
            if read_until_any(&mut self.reader, &LINE_SEPARATORS, &mut buf)? == 0 {
                return Ok(None);
            }
            let line = trim_separators(&buf);
            if !line.is_empty() {
                return Ok(Some(String::from_utf8_lossy(line).into_owned()));
            }
        }
    }
}

impl<R: Read> Iterator for StatusStreamReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// `read_until_any` keeps the separator that ended the line as well as any
/// run of separators that preceded it.
fn trim_separators(buf: &[u8]) -> &[u8] {
    let start = buf
        .iter()
        .position(|b| !LINE_SEPARATORS.contains(b))
        .unwrap_or(buf.len());
    let end = buf
        .iter()
        .rposition(|b| !LINE_SEPARATORS.contains(b))
        .map_or(start, |i| i + 1);
    &buf[start..end]
}
