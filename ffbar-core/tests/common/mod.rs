// ffbar-core/tests/common/mod.rs
//
// Scripted stand-ins for ffmpeg and ffprobe shared by the integration tests.

#![allow(dead_code)]

use ffbar_core::error::{CoreError, CoreResult};
use ffbar_core::external::{FfmpegProcess, FfmpegSpawner, MediaProber, StreamPoll};
use ffbar_core::media::MediaProperties;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::Write;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

/// Helper to create a file with some content
pub fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    let file_path = dir.join(filename);
    let mut file = File::create(&file_path).expect("Failed to create dummy file");
    file.write_all(b"dummy content")
        .expect("Failed to write dummy content");
    file_path
}

/// Exit status for a process that returned `code`.
pub fn exit_code(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

/// Replays a fixed sequence of stream events, then reports the stream closed.
#[derive(Debug, Clone)]
pub struct ScriptedProcess {
    pub script: VecDeque<StreamPoll>,
    pub status: ExitStatus,
    pub waited: bool,
}

impl ScriptedProcess {
    pub fn new(lines: &[&str], code: i32) -> Self {
        Self {
            script: lines
                .iter()
                .map(|line| StreamPoll::Line(line.to_string()))
                .collect(),
            status: exit_code(code),
            waited: false,
        }
    }
}

impl FfmpegProcess for ScriptedProcess {
    fn poll_line(&mut self, _timeout: Duration) -> CoreResult<StreamPoll> {
        Ok(self.script.pop_front().unwrap_or(StreamPoll::Closed))
    }

    fn has_exited(&mut self) -> CoreResult<bool> {
        Ok(self.script.is_empty())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.waited = true;
        Ok(self.status)
    }
}

/// Hands out one scripted process and records the arguments it was given.
#[derive(Default)]
pub struct ScriptedSpawner {
    process: RefCell<Option<ScriptedProcess>>,
    /// File created when the process is spawned, standing in for ffmpeg's output.
    creates_output: Option<PathBuf>,
    received_calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedSpawner {
    pub fn new(process: ScriptedProcess) -> Self {
        Self {
            process: RefCell::new(Some(process)),
            ..Default::default()
        }
    }

    pub fn creating_output(mut self, path: &Path) -> Self {
        self.creates_output = Some(path.to_path_buf());
        self
    }

    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for ScriptedSpawner {
    type Process = ScriptedProcess;

    fn spawn(&self, args: &[String]) -> CoreResult<Self::Process> {
        self.received_calls.borrow_mut().push(args.to_vec());
        if let Some(path) = &self.creates_output {
            File::create(path)?;
        }
        self.process.borrow_mut().take().ok_or_else(|| {
            CoreError::OperationFailed("scripted spawner called twice".to_string())
        })
    }
}

/// Returns canned properties per path.
#[derive(Default)]
pub struct ScriptedProber {
    properties: HashMap<PathBuf, MediaProperties>,
    probed: RefCell<Vec<PathBuf>>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &Path, properties: MediaProperties) -> Self {
        self.properties.insert(path.to_path_buf(), properties);
        self
    }

    pub fn probed(&self) -> Vec<PathBuf> {
        self.probed.borrow().clone()
    }
}

impl MediaProber for ScriptedProber {
    fn probe(&self, path: &Path) -> CoreResult<MediaProperties> {
        self.probed.borrow_mut().push(path.to_path_buf());
        self.properties.get(path).cloned().ok_or_else(|| {
            CoreError::MediaPropertiesUnavailable(format!("no streams found in {}", path.display()))
        })
    }
}

/// Properties of a 1080p clip at 25 fps.
pub fn clip_properties(total_frames: u64) -> MediaProperties {
    MediaProperties {
        total_frames,
        width: Some(1920),
        height: Some(1080),
        frame_rate: Some(25.0),
        duration_secs: Some(total_frames as f64 / 25.0),
        bit_rate: Some(2_500_000),
        size: Some(1_310_720),
    }
}
