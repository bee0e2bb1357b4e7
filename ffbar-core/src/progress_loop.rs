//! The display loop: reads ffmpeg's status stream and redraws one console line.
//!
//! ```text
//! Starting ──▶ Running ──(stream closed / ffmpeg exited)──▶ Draining ──▶ Done
//! ```
//!
//! While running, every status line replaces the previous render in place
//! (`\r` without a newline). Draining waits for ffmpeg and writes a final
//! newline-terminated line with current = total, so a successful run always
//! ends on 100%.

use crate::error::CoreResult;
use crate::estimate::estimate;
use crate::external::{FfmpegProcess, StreamPoll};
use crate::render::BarRenderer;
use crate::status::{ProgressRecord, parse_progress_record};
use std::collections::VecDeque;
use std::io::Write;
use std::process::ExitStatus;
use std::time::{Duration, Instant};

/// Number of trailing non-status lines kept for error reporting.
const MAX_DIAGNOSTIC_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Starting,
    Running,
    Draining,
    Done,
}

/// What a finished loop observed.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub exit_status: ExitStatus,
    pub last_record: Option<ProgressRecord>,
    /// Progress lines rendered while running; the final 100% line is not counted.
    pub renders: usize,
    /// Last non-status lines ffmpeg printed, oldest first.
    pub diagnostics: Vec<String>,
}

impl LoopOutcome {
    #[must_use]
    pub fn diagnostics_text(&self) -> String {
        self.diagnostics.join("\n")
    }
}

pub struct ProgressLoop {
    renderer: BarRenderer,
    poll_interval: Duration,
    total_frames: u64,
    start: Instant,
    state: LoopState,
    last_record: Option<ProgressRecord>,
    renders: usize,
    last_width: usize,
    diagnostics: VecDeque<String>,
}

impl ProgressLoop {
    /// `start` is the instant ffmpeg was launched; all elapsed times and ETAs
    /// are measured from it.
    #[must_use]
    pub fn new(
        renderer: BarRenderer,
        poll_interval: Duration,
        total_frames: u64,
        start: Instant,
    ) -> Self {
        Self {
            renderer,
            poll_interval,
            total_frames,
            start,
            state: LoopState::Starting,
            last_record: None,
            renders: 0,
            last_width: 0,
            diagnostics: VecDeque::with_capacity(MAX_DIAGNOSTIC_LINES),
        }
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn last_record(&self) -> Option<ProgressRecord> {
        self.last_record
    }

    /// Drives the display until ffmpeg exits.
    ///
    /// A malformed status line aborts the loop with its error; the caller
    /// owns `process` and is expected to drop it, which stops ffmpeg.
    pub fn run<P, W>(&mut self, process: &mut P, out: &mut W) -> CoreResult<LoopOutcome>
    where
        P: FfmpegProcess + ?Sized,
        W: Write + ?Sized,
    {
        self.state = LoopState::Running;
        let mut stream_open = true;

        while self.state == LoopState::Running {
            match process.poll_line(self.poll_interval)? {
                StreamPoll::Line(line) => self.consume_line(&line, out)?,
                StreamPoll::Idle => {
                    if process.has_exited()? {
                        log::debug!("ffmpeg exited while the status stream was idle");
                        self.state = LoopState::Draining;
                    }
                }
                StreamPoll::Closed => {
                    log::debug!("ffmpeg status stream closed");
                    stream_open = false;
                    self.state = LoopState::Draining;
                }
            }
        }

        // Lines written just before ffmpeg exited may still be queued. An idle
        // poll now means something other than ffmpeg holds the stream open.
        while stream_open {
            match process.poll_line(self.poll_interval)? {
                StreamPoll::Line(line) => self.consume_line(&line, out)?,
                StreamPoll::Idle | StreamPoll::Closed => stream_open = false,
            }
        }

        let exit_status = process.wait()?;
        log::debug!("ffmpeg finished with {exit_status}");

        let fps = self.last_record.map_or(0.0, |r| r.frames_per_second);
        let text = self.progress_text(self.total_frames, fps, Instant::now());
        self.write_line(&text, out)?;
        writeln!(out)?;
        out.flush()?;

        self.state = LoopState::Done;
        Ok(LoopOutcome {
            exit_status,
            last_record: self.last_record,
            renders: self.renders,
            diagnostics: self.diagnostics.iter().cloned().collect(),
        })
    }

    /// Handles one line, terminating a partly drawn bar before reporting an error.
    fn consume_line<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> CoreResult<()> {
        let result = self.handle_line(line, out);
        if result.is_err() && self.renders > 0 {
            let _ = writeln!(out);
            let _ = out.flush();
        }
        result
    }

    fn handle_line<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> CoreResult<()> {
        let Some(record) = parse_progress_record(line)? else {
            log::debug!(target: "ffmpeg_log", "{line}");
            if self.diagnostics.len() == MAX_DIAGNOSTIC_LINES {
                self.diagnostics.pop_front();
            }
            self.diagnostics.push_back(line.to_string());
            return Ok(());
        };

        self.last_record = Some(record);
        let text = self.progress_text(record.frame_index, record.frames_per_second, Instant::now());
        self.write_line(&text, out)?;
        self.renders += 1;
        Ok(())
    }

    fn progress_text(&self, frame: u64, fps: f64, now: Instant) -> String {
        let est = estimate(frame, self.total_frames, self.start, now);
        format!(
            "{frame} / {} {fps:.2} fps {}",
            self.total_frames,
            self.renderer.render(frame, self.total_frames, est.elapsed, est.eta)
        )
    }

    /// Overwrites the current console line with `text`.
    fn write_line<W: Write + ?Sized>(&mut self, text: &str, out: &mut W) -> CoreResult<()> {
        let width = text.chars().count();
        let padding = self.last_width.saturating_sub(width);
        write!(out, "\r{text}{:padding$}", "")?;
        out.flush()?;
        self.last_width = width;
        Ok(())
    }
}
