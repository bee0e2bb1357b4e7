// ============================================================================
// ffbar-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates the two external programs the progress display
// depends on. Both are reached through traits so the session can be driven by
// scripted implementations in tests.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess: running the encoder and reading its stderr
// - MediaProber: reading frame counts and output properties
// - Dependency checking

use crate::error::{CoreError, CoreResult};
use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for executing ffmpeg
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, StreamPoll};
pub use ffprobe_executor::{CrateFfprobeExecutor, MediaProber};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs the command with `-version`. Only a failure to start counts; the
/// exit status is not inspected.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub(crate) fn check_dependency(cmd_name: impl AsRef<OsStr>) -> CoreResult<()> {
    let cmd_name = cmd_name.as_ref();
    let display_name = cmd_name.to_string_lossy().into_owned();

    let result = Command::new(cmd_name)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {display_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{display_name}' not found.");
            Err(CoreError::DependencyNotFound(display_name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{display_name}': {e}");
            Err(CoreError::CommandStart(display_name, e))
        }
    }
}
