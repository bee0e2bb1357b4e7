// ============================================================================
// ffbar-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// Spawns ffmpeg with the user's arguments and exposes its stderr as a stream
// of lines that can be polled with a timeout.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete spawner using the binary resolved by ffmpeg-sidecar
//
// ARCHITECTURE:
// A single reader thread drains stderr into a channel so the progress loop
// can wait for a line with `recv_timeout` and still notice when ffmpeg exits.
// The child is killed and reaped when a SidecarProcess is dropped before it
// was waited on, and on Linux it also receives SIGKILL if we die first.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use crate::status::StatusStreamReader;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

// --- FFmpeg Execution Abstraction ---

/// Result of waiting for the next line of the status stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamPoll {
    /// A non-empty line (status or diagnostic).
    Line(String),
    /// Nothing arrived within the timeout.
    Idle,
    /// The stream reached end of file.
    Closed,
}

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Waits up to `timeout` for the next stderr line.
    fn poll_line(&mut self, timeout: Duration) -> CoreResult<StreamPoll>;

    /// Returns whether the process has already terminated, without blocking.
    fn has_exited(&mut self) -> CoreResult<bool>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    /// Spawns ffmpeg with `args` passed through verbatim.
    fn spawn(&self, args: &[String]) -> CoreResult<Self::Process>;

    /// Checks that the encoder binary can be executed.
    fn check_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

// --- Concrete Implementation ---

/// A running ffmpeg child with its stderr drained by a reader thread.
pub struct SidecarProcess {
    child: Child,
    lines: Receiver<io::Result<String>>,
    reader: Option<JoinHandle<()>>,
    status: Option<ExitStatus>,
}

impl SidecarProcess {
    fn record_exit(&mut self, status: ExitStatus) -> ExitStatus {
        self.status = Some(status);
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                log::warn!("ffmpeg stderr reader thread panicked");
            }
        }
        status
    }
}

impl FfmpegProcess for SidecarProcess {
    fn poll_line(&mut self, timeout: Duration) -> CoreResult<StreamPoll> {
        match self.lines.recv_timeout(timeout) {
            Ok(Ok(line)) => Ok(StreamPoll::Line(line)),
            Ok(Err(e)) => Err(CoreError::Io(e)),
            Err(RecvTimeoutError::Timeout) => Ok(StreamPoll::Idle),
            Err(RecvTimeoutError::Disconnected) => Ok(StreamPoll::Closed),
        }
    }

    fn has_exited(&mut self) -> CoreResult<bool> {
        if self.status.is_some() {
            return Ok(true);
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                self.status = Some(status);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => Err(command_wait_error("ffmpeg", e)),
        }
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        let status = match self.status {
            Some(status) => status,
            None => self
                .child
                .wait()
                .map_err(|e| command_wait_error("ffmpeg", e))?,
        };
        Ok(self.record_exit(status))
    }
}

impl Drop for SidecarProcess {
    fn drop(&mut self) {
        if self.status.is_none() {
            log::debug!("Killing ffmpeg (pid {}) before it finished", self.child.id());
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Spawns ffmpeg from an explicit path or from the location ffmpeg-sidecar
/// resolves (its sidecar directory, falling back to `ffmpeg` on the PATH).
///
/// ffmpeg's stdout is discarded unless `forward_stdout` is set, which is
/// only wanted when the output itself is written there.
#[derive(Debug, Clone)]
pub struct SidecarSpawner {
    ffmpeg_path: PathBuf,
    forward_stdout: bool,
}

impl Default for SidecarSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl SidecarSpawner {
    pub fn new() -> Self {
        Self::with_path(ffmpeg_sidecar::paths::ffmpeg_path())
    }

    pub fn with_path(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            forward_stdout: false,
        }
    }

    /// Lets ffmpeg write to our stdout instead of discarding what it prints.
    #[must_use]
    pub fn forward_stdout(mut self, forward: bool) -> Self {
        self.forward_stdout = forward;
        self
    }

    /// Uses `config.ffmpeg_path` when set.
    pub fn from_config(config: &CoreConfig) -> Self {
        match &config.ffmpeg_path {
            Some(path) => Self::with_path(path),
            None => Self::new(),
        }
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }
}

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, args: &[String]) -> CoreResult<Self::Process> {
        let program = self.ffmpeg_path.display().to_string();

        let stdout = if self.forward_stdout {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        let mut command = Command::new(&self.ffmpeg_path);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::piped());
        #[cfg(target_os = "linux")]
        kill_with_parent(&mut command);

        log::debug!("Running: {} {}", program, args.join(" "));
        let mut child = command
            .spawn()
            .map_err(|e| command_start_error(program.clone(), e))?;

        let Some(stderr) = child.stderr.take() else {
            reap(&mut child);
            return Err(CoreError::OperationFailed(format!(
                "stderr of {program} was not captured"
            )));
        };

        let (tx, lines) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("ffmpeg-stderr".to_string())
            .spawn(move || {
                for line in StatusStreamReader::new(stderr) {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        break;
                    }
                }
            });
        let reader = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                reap(&mut child);
                return Err(CoreError::Io(e));
            }
        };

        Ok(SidecarProcess {
            child,
            lines,
            reader: Some(reader),
            status: None,
        })
    }

    fn check_available(&self) -> CoreResult<()> {
        super::check_dependency(&self.ffmpeg_path)
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Asks the kernel to SIGKILL the child when this process dies.
///
/// The request only covers deaths after it is made, so the child also gives
/// up if it was already reparented by then.
#[cfg(target_os = "linux")]
fn kill_with_parent(command: &mut Command) {
    use nix::errno::Errno;
    use nix::sys::signal::Signal;
    use nix::unistd::Pid;
    use std::os::unix::process::CommandExt;

    let parent = Pid::this();
    // SAFETY: pre_exec runs after fork, before exec in the child process.
    // The closure only makes the prctl and getppid syscalls and does not
    // allocate.
    unsafe {
        command.pre_exec(move || {
            nix::sys::prctl::set_pdeathsig(Signal::SIGKILL).map_err(io::Error::from)?;
            if Pid::parent() != parent {
                return Err(io::Error::from(Errno::ESRCH));
            }
            Ok(())
        });
    }
}
