//! Error types for the ffbar core library.
//!
//! Every fallible operation in the crate returns [`CoreResult`]. Lines that are
//! simply not part of the status protocol are not errors: the parser reports
//! them as `Ok(None)` and the progress loop skips them.

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for ffbar
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line started with `frame=` but lacked the `fps=`/`q=` delimiters,
    /// or carried a frame value that is not an integer.
    #[error("Malformed status line: {line:?}")]
    MalformedStatusLine { line: String },

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] std::io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Required command not found: {0}")]
    DependencyNotFound(String),

    #[error("Media properties unavailable: {0}")]
    MediaPropertiesUnavailable(String),

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("JSON error: {0}")]
    JsonParseError(String),

    #[error("Invalid encoder arguments: {0}")]
    InvalidInvocation(String),

    #[error("{0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for ffbar operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_wait_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}
